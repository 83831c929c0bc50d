//! Notifications for the logged in user.

use http::Method;
use serde::{Deserialize, Serialize};

use crate::{client::MessageResponse, error::HttpError, Client, Result};

/// A notification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// The unique id of the notification.
    pub id: i64,
    /// The message of the notification.
    pub message: String,
    /// Whether the notification has been read.
    pub read: bool,
    /// When the notification was created.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// The notification channels the user wants to be reached on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    /// Receive notifications by email.
    pub email_notifications: bool,
    /// Receive notifications by SMS.
    pub sms_notifications: bool,
    /// Receive reminders for upcoming appointments.
    pub appointment_reminders: bool,
    /// Receive notifications about payments and invoices.
    pub payment_notifications: bool,
}

#[derive(Deserialize)]
struct NotificationsResponse {
    notifications: Vec<Notification>,
}

/// A handle to the notification endpoints.
#[derive(Clone, Debug)]
pub struct NotificationsHandle {
    client: Client,
}

impl NotificationsHandle {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List the notifications of the logged in user, newest first.
    pub async fn list(&self) -> Result<Vec<Notification>> {
        let response: NotificationsResponse = self
            .client
            .send(Method::GET, "/notifications", None)
            .await?;

        Ok(response.notifications)
    }

    /// Mark a notification as read.
    pub async fn mark_read(&self, id: i64) -> Result<()> {
        let _: MessageResponse = self
            .client
            .send(Method::PUT, &format!("/notifications/{}/read", id), None)
            .await?;

        Ok(())
    }

    /// Replace the notification preferences of the logged in user.
    pub async fn update_preferences(&self, preferences: NotificationPreferences) -> Result<()> {
        let _: MessageResponse = self
            .client
            .send(
                Method::POST,
                "/notifications/settings",
                Some(serde_json::to_value(&preferences).map_err(HttpError::Json)?),
            )
            .await?;

        Ok(())
    }
}
