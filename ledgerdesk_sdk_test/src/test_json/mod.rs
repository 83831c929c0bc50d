//! Test data for the ledgerdesk-sdk crates.
//!
//! Exporting each const allows all the test data to have a single source of
//! truth.

use lazy_static::lazy_static;
use serde_json::{json, Value as JsonValue};

lazy_static! {
    pub static ref LOGIN: JsonValue = json!({
        "token": "1234",
        "user": {
            "id": 1,
            "name": "Example User",
            "email": "example@localhost",
            "role": "client"
        }
    });
}

lazy_static! {
    pub static ref LOGIN_RESPONSE_ERR: JsonValue = json!({
        "error": "Invalid email or password"
    });
}

lazy_static! {
    pub static ref LOGOUT: JsonValue = json!({
        "message": "Logged out successfully"
    });
}

lazy_static! {
    pub static ref WHOAMI: JsonValue = json!({
        "user": {
            "id": 1,
            "name": "Example User",
            "email": "example@localhost",
            "role": "client"
        }
    });
}

lazy_static! {
    pub static ref TOKEN_REFRESH: JsonValue = json!({
        "message": "Token refreshed successfully",
        "token": "5678"
    });
}

lazy_static! {
    pub static ref REGISTER: JsonValue = json!({
        "message": "Registration successful, please verify your email"
    });
}

lazy_static! {
    pub static ref MESSAGE: JsonValue = json!({
        "message": "OK"
    });
}

lazy_static! {
    pub static ref UNAUTHORIZED: JsonValue = json!({
        "error": "Invalid or expired token"
    });
}

lazy_static! {
    pub static ref SERVICES: JsonValue = json!({
        "services": [
            {
                "id": 1,
                "name": "Individual Tax Return",
                "description": "Federal and state filing for individuals",
                "price": 150.0,
                "category": "Tax Preparation",
                "duration_minutes": 60
            },
            {
                "id": 2,
                "name": "Small Business Bookkeeping",
                "description": "Monthly bookkeeping for small businesses",
                "price": 300.0,
                "category": "Bookkeeping",
                "duration_minutes": 90
            }
        ]
    });
}

lazy_static! {
    pub static ref SERVICE: JsonValue = json!({
        "service": {
            "id": 1,
            "name": "Individual Tax Return",
            "description": "Federal and state filing for individuals",
            "price": 150.0,
            "category": "Tax Preparation",
            "duration_minutes": 60
        }
    });
}

lazy_static! {
    pub static ref SERVICE_CATEGORIES: JsonValue = json!({
        "categories": ["Tax Preparation", "Bookkeeping", "Payroll"]
    });
}

lazy_static! {
    pub static ref APPOINTMENTS: JsonValue = json!({
        "appointments": [
            {
                "id": 10,
                "service_id": 1,
                "date": "2021-06-01",
                "time": "10:00",
                "status": "confirmed",
                "notes": "Bring last year's return"
            }
        ]
    });
}

lazy_static! {
    pub static ref APPOINTMENT: JsonValue = json!({
        "appointment": {
            "id": 10,
            "service_id": 1,
            "date": "2021-06-01",
            "time": "10:00",
            "status": "pending",
            "notes": null
        }
    });
}

lazy_static! {
    pub static ref AVAILABLE_SLOTS: JsonValue = json!({
        "slots": ["09:00", "10:00", "13:30", "15:00"]
    });
}

lazy_static! {
    pub static ref PAYMENTS: JsonValue = json!({
        "payments": [
            {
                "id": 7,
                "amount": 150.0,
                "payment_method": "card",
                "description": "Individual Tax Return",
                "invoice_id": 3,
                "status": "completed"
            }
        ]
    });
}

lazy_static! {
    pub static ref PAYMENT: JsonValue = json!({
        "payment": {
            "id": 7,
            "amount": 150.0,
            "payment_method": "card",
            "description": "Individual Tax Return",
            "invoice_id": 3,
            "status": "completed"
        }
    });
}

lazy_static! {
    pub static ref INVOICES: JsonValue = json!({
        "invoices": [
            {
                "id": 3,
                "amount": 150.0,
                "status": "open",
                "due_date": "2021-06-15",
                "description": "Individual Tax Return"
            }
        ]
    });
}

lazy_static! {
    pub static ref INVOICE: JsonValue = json!({
        "invoice": {
            "id": 3,
            "amount": 150.0,
            "status": "open",
            "due_date": "2021-06-15",
            "description": "Individual Tax Return"
        }
    });
}

lazy_static! {
    pub static ref NOTIFICATIONS: JsonValue = json!({
        "notifications": [
            {
                "id": 21,
                "message": "Your appointment was confirmed",
                "read": false,
                "created_at": "2021-05-28T09:12:00Z"
            },
            {
                "id": 20,
                "message": "Invoice #3 is due soon",
                "read": true,
                "created_at": "2021-05-27T16:40:00Z"
            }
        ]
    });
}

lazy_static! {
    pub static ref CALENDAR_EVENTS: JsonValue = json!({
        "events": [
            {
                "id": 5,
                "title": "Quarterly review",
                "description": "Q2 books review",
                "date": "2021-06-03",
                "start_time": "14:00",
                "end_time": "15:00",
                "location": "Office"
            }
        ]
    });
}

lazy_static! {
    pub static ref CALENDAR_EVENT: JsonValue = json!({
        "event": {
            "id": 5,
            "title": "Quarterly review",
            "description": "Q2 books review",
            "date": "2021-06-03",
            "start_time": "14:00",
            "end_time": "15:00",
            "location": "Office"
        }
    });
}

lazy_static! {
    pub static ref KNOWLEDGE_BASE: JsonValue = json!({
        "articles": [
            {
                "id": 1,
                "title": "What to bring to your first appointment",
                "content": "A checklist of documents...",
                "category": "Getting started"
            }
        ]
    });
}

lazy_static! {
    pub static ref KNOWLEDGE_ARTICLE: JsonValue = json!({
        "article": {
            "id": 1,
            "title": "What to bring to your first appointment",
            "content": "A checklist of documents...",
            "category": "Getting started"
        }
    });
}

lazy_static! {
    pub static ref TEAMS_MEETING: JsonValue = json!({
        "meeting": {
            "id": "19:meeting_NzY0",
            "join_url": "https://teams.microsoft.com/l/meetup-join/19%3ameeting_NzY0",
            "subject": "Tax consultation"
        }
    });
}

lazy_static! {
    pub static ref DEVICE_CODE: JsonValue = json!({
        "device_code": "GMMhmHCXhWEzkobqIHGG_EnNYYsAkukHspeYUk9E8",
        "user_code": "FJJ9LKQ2X",
        "verification_uri": "https://microsoft.com/devicelogin",
        "expires_in": 900,
        "interval": 0,
        "message": "To sign in, use a web browser to open https://microsoft.com/devicelogin and enter the code FJJ9LKQ2X to authenticate."
    });
}

lazy_static! {
    pub static ref MS_TOKEN: JsonValue = json!({
        "token_type": "Bearer",
        "scope": "User.Read Calendars.ReadWrite",
        "expires_in": 3599,
        "access_token": "ms-access-token",
        "refresh_token": "ms-refresh-token-rotated"
    });
}

lazy_static! {
    pub static ref MS_INTERACTION_REQUIRED: JsonValue = json!({
        "error": "interaction_required",
        "error_description": "AADSTS50076: the user must use multi-factor authentication."
    });
}

lazy_static! {
    pub static ref MS_AUTHORIZATION_DECLINED: JsonValue = json!({
        "error": "authorization_declined",
        "error_description": "The end user denied the authorization request."
    });
}
