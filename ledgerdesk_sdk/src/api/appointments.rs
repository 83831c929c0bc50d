// Copyright 2024 The LedgerDesk Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Booking and management of appointments.

use http::Method;
use serde::{Deserialize, Serialize};

use crate::{client::MessageResponse, error::HttpError, Client, Result};

/// A booked appointment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    /// The unique id of the appointment.
    pub id: i64,
    /// The id of the service the appointment was booked for.
    pub service_id: i64,
    /// The date of the appointment, `YYYY-MM-DD`.
    pub date: String,
    /// The start time of the appointment, `HH:MM`.
    pub time: String,
    /// The status of the appointment, e.g. "pending" or "confirmed".
    pub status: String,
    /// Free form notes attached to the appointment.
    #[serde(default)]
    pub notes: Option<String>,
}

/// A request to book a new appointment.
#[derive(Clone, Debug, Serialize)]
pub struct NewAppointment {
    /// The id of the service to book.
    pub service_id: i64,
    /// The requested date, `YYYY-MM-DD`.
    pub date: String,
    /// The requested start time, `HH:MM`.
    pub time: String,
    /// Optional notes for the appointment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Changes to an existing appointment.
#[derive(Clone, Debug, Default, Serialize)]
pub struct AppointmentChanges {
    /// The new notes for the appointment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Deserialize)]
struct AppointmentsResponse {
    appointments: Vec<Appointment>,
}

#[derive(Deserialize)]
struct AppointmentResponse {
    appointment: Appointment,
}

#[derive(Deserialize)]
struct SlotsResponse {
    slots: Vec<String>,
}

/// A handle to the appointment endpoints.
#[derive(Clone, Debug)]
pub struct AppointmentsHandle {
    client: Client,
}

impl AppointmentsHandle {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List the appointments of the logged in user.
    pub async fn list(&self) -> Result<Vec<Appointment>> {
        let response: AppointmentsResponse =
            self.client.send(Method::GET, "/appointments", None).await?;

        Ok(response.appointments)
    }

    /// Fetch a single appointment.
    pub async fn get(&self, id: i64) -> Result<Appointment> {
        let response: AppointmentResponse = self
            .client
            .send(Method::GET, &format!("/appointments/{}", id), None)
            .await?;

        Ok(response.appointment)
    }

    /// Book a new appointment.
    pub async fn create(&self, appointment: NewAppointment) -> Result<Appointment> {
        let response: AppointmentResponse = self
            .client
            .send(
                Method::POST,
                "/appointments",
                Some(serde_json::to_value(&appointment).map_err(HttpError::Json)?),
            )
            .await?;

        Ok(response.appointment)
    }

    /// Update an existing appointment.
    pub async fn update(&self, id: i64, changes: AppointmentChanges) -> Result<Appointment> {
        let response: AppointmentResponse = self
            .client
            .send(
                Method::PUT,
                &format!("/appointments/{}", id),
                Some(serde_json::to_value(&changes).map_err(HttpError::Json)?),
            )
            .await?;

        Ok(response.appointment)
    }

    /// Cancel an appointment.
    pub async fn cancel(&self, id: i64) -> Result<()> {
        let _: MessageResponse = self
            .client
            .send(Method::DELETE, &format!("/appointments/{}", id), None)
            .await?;

        Ok(())
    }

    /// List the available time slots on a given date, optionally narrowed
    /// down to a single service.
    ///
    /// # Arguments
    ///
    /// * `date` - The date to check, `YYYY-MM-DD`.
    ///
    /// * `service_id` - Limit the slots to ones long enough for the given
    /// service.
    pub async fn available_slots(
        &self,
        date: &str,
        service_id: Option<i64>,
    ) -> Result<Vec<String>> {
        let mut path = format!("/appointments/available?date={}", date);

        if let Some(service_id) = service_id {
            path.push_str(&format!("&service_id={}", service_id));
        }

        let response: SlotsResponse = self.client.send(Method::GET, &path, None).await?;

        Ok(response.slots)
    }
}

#[cfg(test)]
mod test {
    use ledgerdesk_sdk_test::test_json;
    use mockito::{mock, Matcher};

    use super::{AppointmentChanges, NewAppointment};
    use crate::client::test::logged_in_client;

    #[tokio::test]
    async fn list_appointments() {
        let client = logged_in_client("appt-1").await;

        let _m = mock("GET", "/appointments")
            .match_header("authorization", "Bearer appt-1")
            .with_status(200)
            .with_body(test_json::APPOINTMENTS.to_string())
            .create();

        let appointments = client.appointments().list().await.unwrap();

        assert_eq!(appointments.len(), 1);
        assert_eq!(appointments[0].status, "confirmed");
    }

    #[tokio::test]
    async fn book_appointment() {
        let client = logged_in_client("appt-2").await;

        let _m = mock("POST", "/appointments")
            .match_header("authorization", "Bearer appt-2")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "service_id": 1,
                "date": "2021-06-01",
                "time": "10:00"
            })))
            .with_status(201)
            .with_body(test_json::APPOINTMENT.to_string())
            .create();

        let appointment = client
            .appointments()
            .create(NewAppointment {
                service_id: 1,
                date: "2021-06-01".to_owned(),
                time: "10:00".to_owned(),
                notes: None,
            })
            .await
            .unwrap();

        assert_eq!(appointment.id, 10);
        assert_eq!(appointment.status, "pending");
    }

    #[tokio::test]
    async fn update_and_cancel_appointment() {
        let client = logged_in_client("appt-3").await;

        let _m1 = mock("PUT", "/appointments/10")
            .match_header("authorization", "Bearer appt-3")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "notes": "Reschedule if possible"
            })))
            .with_status(200)
            .with_body(test_json::APPOINTMENT.to_string())
            .create();

        let _m2 = mock("DELETE", "/appointments/10")
            .match_header("authorization", "Bearer appt-3")
            .with_status(200)
            .with_body(test_json::MESSAGE.to_string())
            .create();

        client
            .appointments()
            .update(
                10,
                AppointmentChanges {
                    notes: Some("Reschedule if possible".to_owned()),
                },
            )
            .await
            .unwrap();

        client.appointments().cancel(10).await.unwrap();
    }

    #[tokio::test]
    async fn available_slots() {
        let client = logged_in_client("appt-4").await;

        let _m = mock("GET", "/appointments/available")
            .match_header("authorization", "Bearer appt-4")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("date".into(), "2021-06-01".into()),
                Matcher::UrlEncoded("service_id".into(), "1".into()),
            ]))
            .with_status(200)
            .with_body(test_json::AVAILABLE_SLOTS.to_string())
            .create();

        let slots = client
            .appointments()
            .available_slots("2021-06-01", Some(1))
            .await
            .unwrap();

        assert_eq!(slots, vec!["09:00", "10:00", "13:30", "15:00"]);
    }
}
