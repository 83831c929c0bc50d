//! Microsoft Teams meetings attached to appointments.
//!
//! The meetings themselves are created by the backend, which talks to the
//! Microsoft Graph API with its own credentials. For a client-side
//! integration see the [`identity`] module.
//!
//! [`identity`]: crate::identity

use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{Client, Result};

/// An online meeting for an appointment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamsMeeting {
    /// The id of the meeting.
    pub id: String,
    /// The URL participants use to join the meeting.
    pub join_url: String,
    /// The subject of the meeting.
    #[serde(default)]
    pub subject: Option<String>,
}

#[derive(Deserialize)]
struct MeetingResponse {
    meeting: TeamsMeeting,
}

/// A handle to the Teams meeting endpoints.
#[derive(Clone, Debug)]
pub struct TeamsHandle {
    client: Client,
}

impl TeamsHandle {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create an online meeting for an appointment.
    pub async fn create_meeting(&self, appointment_id: i64) -> Result<TeamsMeeting> {
        let response: MeetingResponse = self
            .client
            .send(
                Method::POST,
                "/integrations/teams/meeting",
                Some(json!({ "appointment_id": appointment_id })),
            )
            .await?;

        Ok(response.meeting)
    }

    /// Fetch the join information of an existing meeting.
    pub async fn join_meeting(&self, meeting_id: &str) -> Result<TeamsMeeting> {
        let response: MeetingResponse = self
            .client
            .send(
                Method::GET,
                &format!("/integrations/teams/join/{}", meeting_id),
                None,
            )
            .await?;

        Ok(response.meeting)
    }
}
