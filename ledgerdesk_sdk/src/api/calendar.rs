//! The calendar of the logged in user.

use http::Method;
use serde::{Deserialize, Serialize};

use crate::{client::MessageResponse, error::HttpError, Client, Result};

/// An event in the calendar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// The unique id of the event.
    pub id: i64,
    /// The title of the event.
    pub title: String,
    /// A longer description.
    #[serde(default)]
    pub description: Option<String>,
    /// The date of the event, `YYYY-MM-DD`.
    pub date: String,
    /// The start time, `HH:MM`.
    pub start_time: String,
    /// The end time, `HH:MM`.
    pub end_time: String,
    /// Where the event takes place.
    #[serde(default)]
    pub location: Option<String>,
}

/// A new calendar event.
#[derive(Clone, Debug, Serialize)]
pub struct NewCalendarEvent {
    /// The title of the event.
    pub title: String,
    /// A longer description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The date of the event, `YYYY-MM-DD`.
    pub date: String,
    /// The start time, `HH:MM`.
    pub start_time: String,
    /// The end time, `HH:MM`.
    pub end_time: String,
    /// Where the event takes place.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Changes to an existing calendar event.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CalendarEventChanges {
    /// The new title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// The new description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The new date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// The new start time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    /// The new end time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// The new location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Deserialize)]
struct EventsResponse {
    events: Vec<CalendarEvent>,
}

#[derive(Deserialize)]
struct EventResponse {
    event: CalendarEvent,
}

/// A handle to the calendar endpoints.
#[derive(Clone, Debug)]
pub struct CalendarHandle {
    client: Client,
}

impl CalendarHandle {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List the calendar events of the logged in user.
    pub async fn events(&self) -> Result<Vec<CalendarEvent>> {
        let response: EventsResponse = self
            .client
            .send(Method::GET, "/calendar/events", None)
            .await?;

        Ok(response.events)
    }

    /// Create a new calendar event.
    pub async fn create_event(&self, event: NewCalendarEvent) -> Result<CalendarEvent> {
        let response: EventResponse = self
            .client
            .send(
                Method::POST,
                "/calendar/events",
                Some(serde_json::to_value(&event).map_err(HttpError::Json)?),
            )
            .await?;

        Ok(response.event)
    }

    /// Update an existing calendar event.
    pub async fn update_event(
        &self,
        id: i64,
        changes: CalendarEventChanges,
    ) -> Result<CalendarEvent> {
        let response: EventResponse = self
            .client
            .send(
                Method::PUT,
                &format!("/calendar/events/{}", id),
                Some(serde_json::to_value(&changes).map_err(HttpError::Json)?),
            )
            .await?;

        Ok(response.event)
    }

    /// Delete a calendar event.
    pub async fn delete_event(&self, id: i64) -> Result<()> {
        let _: MessageResponse = self
            .client
            .send(Method::DELETE, &format!("/calendar/events/{}", id), None)
            .await?;

        Ok(())
    }

    /// Pull in the events from the external calendar the user connected,
    /// returning the events that were added.
    pub async fn sync_external(&self) -> Result<Vec<CalendarEvent>> {
        let response: EventsResponse = self
            .client
            .send(Method::GET, "/calendar/sync", None)
            .await?;

        Ok(response.events)
    }
}

#[cfg(test)]
mod test {
    use ledgerdesk_sdk_test::test_json;
    use mockito::{mock, Matcher};

    use super::NewCalendarEvent;
    use crate::client::test::logged_in_client;

    #[tokio::test]
    async fn list_events() {
        let client = logged_in_client("cal-1").await;

        let _m = mock("GET", "/calendar/events")
            .match_header("authorization", "Bearer cal-1")
            .with_status(200)
            .with_body(test_json::CALENDAR_EVENTS.to_string())
            .create();

        let events = client.calendar().events().await.unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Quarterly review");
    }

    #[tokio::test]
    async fn create_and_delete_event() {
        let client = logged_in_client("cal-2").await;

        let _m1 = mock("POST", "/calendar/events")
            .match_header("authorization", "Bearer cal-2")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "title": "Quarterly review",
                "date": "2021-06-03"
            })))
            .with_status(201)
            .with_body(test_json::CALENDAR_EVENT.to_string())
            .create();

        let _m2 = mock("DELETE", "/calendar/events/5")
            .match_header("authorization", "Bearer cal-2")
            .with_status(200)
            .with_body(test_json::MESSAGE.to_string())
            .create();

        let event = client
            .calendar()
            .create_event(NewCalendarEvent {
                title: "Quarterly review".to_owned(),
                description: None,
                date: "2021-06-03".to_owned(),
                start_time: "14:00".to_owned(),
                end_time: "15:00".to_owned(),
                location: None,
            })
            .await
            .unwrap();

        client.calendar().delete_event(event.id).await.unwrap();
    }

    #[tokio::test]
    async fn sync_external() {
        let client = logged_in_client("cal-3").await;

        let _m = mock("GET", "/calendar/sync")
            .match_header("authorization", "Bearer cal-3")
            .with_status(200)
            .with_body(test_json::CALENDAR_EVENTS.to_string())
            .create();

        let events = client.calendar().sync_external().await.unwrap();

        assert_eq!(events.len(), 1);
    }
}
