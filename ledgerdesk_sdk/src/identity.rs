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

//! Connecting a Microsoft account for the calendar and Teams features.
//!
//! Tokens are acquired silently with a cached refresh token whenever
//! possible, falling back to the OAuth2 device authorization grant when the
//! identity provider requires user interaction. The acquired access tokens
//! are used against the Microsoft Graph API through [`GraphClient`].

use std::{fmt, sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};
use url::Url;

const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com/common";
const DEFAULT_GRAPH_URL: &str = "https://graph.microsoft.com/v1.0";
const DEVICE_CODE_GRANT: &str = "urn:ietf:params:oauth:grant-type:device_code";

const DEFAULT_SCOPES: &[&str] = &[
    "User.Read",
    "Calendars.ReadWrite",
    "OnlineMeetings.ReadWrite",
    "offline_access",
];

/// Result type of the identity module.
pub type IdentityResult<T> = std::result::Result<T, IdentityError>;

/// Errors of the Microsoft identity integration.
#[derive(Error, Debug)]
pub enum IdentityError {
    /// The identity provider requires user interaction, a silent token
    /// acquisition isn't possible.
    #[error("the identity provider requires user interaction to sign in")]
    InteractionRequired,

    /// The user declined the device code sign in.
    #[error("the sign in was declined")]
    Declined,

    /// The device code expired before the user completed the sign in.
    #[error("the device code expired before the sign in was completed")]
    Expired,

    /// No Microsoft account is connected.
    #[error("no Microsoft account is connected")]
    NotConnected,

    /// The identity provider rejected a request.
    #[error("the identity provider returned an error: {error}: {description}")]
    Provider {
        /// The error code the provider sent.
        error: String,
        /// The human readable description of the error.
        description: String,
    },

    /// The Graph API rejected a request.
    #[error("the Graph API returned an error: {code}: {message}")]
    Graph {
        /// The error code the Graph API sent.
        code: String,
        /// The human readable description of the error.
        message: String,
    },

    /// An error at the HTTP layer.
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    /// An error deserializing a response body.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Configuration for the Microsoft identity integration.
#[derive(Clone, Debug)]
pub struct MsIdentityConfig {
    pub(crate) client_id: String,
    pub(crate) authority: Url,
    pub(crate) scopes: Vec<String>,
}

impl MsIdentityConfig {
    /// Create a config for the given application.
    ///
    /// # Arguments
    ///
    /// * `client_id` - The application id from the Azure portal.
    pub fn new(client_id: &str) -> Self {
        Self {
            client_id: client_id.to_owned(),
            // The default authority URL is valid.
            authority: Url::parse(DEFAULT_AUTHORITY).unwrap(),
            scopes: DEFAULT_SCOPES.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    /// Use a different authority than the Microsoft common endpoint, e.g. a
    /// single tenant.
    pub fn authority(mut self, authority: Url) -> Self {
        self.authority = authority;
        self
    }

    /// Replace the default scopes.
    pub fn scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.authority.as_str().trim_end_matches('/'), path)
    }

    fn scope(&self) -> String {
        self.scopes.join(" ")
    }
}

/// A connected Microsoft account.
///
/// The record can be serialized and stored so the connection survives a
/// restart, restore it with [`MsIdentity::restore_account`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CachedAccount {
    /// The user principal name of the account.
    pub username: Option<String>,
    /// The display name of the account.
    pub name: Option<String>,
    /// The refresh token used for silent token acquisition.
    pub refresh_token: String,
}

/// The device authorization the user needs to complete in a browser.
#[derive(Clone, Debug, Deserialize)]
pub struct DeviceAuthorization {
    /// The code the user has to enter on the verification page.
    pub user_code: String,
    /// The URL of the verification page.
    pub verification_uri: String,
    /// The full instruction message from the provider.
    pub message: String,
    device_code: String,
    expires_in: u64,
    interval: u64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    id_token: Option<String>,
}

#[derive(Deserialize)]
struct ProviderError {
    error: String,
    #[serde(default)]
    error_description: String,
}

#[derive(Deserialize)]
struct IdTokenClaims {
    #[serde(default)]
    preferred_username: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// Decode the claims of an id token without validating the signature.
///
/// The token comes straight from the provider over TLS, it's only used for
/// display data.
fn decode_id_token_claims(id_token: &str) -> Option<IdTokenClaims> {
    let payload = id_token.split('.').nth(1)?;
    let bytes = base64::decode_config(payload, base64::URL_SAFE_NO_PAD).ok()?;

    serde_json::from_slice(&bytes).ok()
}

/// A connection to the Microsoft identity platform.
#[derive(Clone)]
pub struct MsIdentity {
    config: MsIdentityConfig,
    http: reqwest::Client,
    account: Arc<RwLock<Option<CachedAccount>>>,
}

impl fmt::Debug for MsIdentity {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("MsIdentity")
            .field("client_id", &self.config.client_id)
            .field("authority", &self.config.authority)
            .finish()
    }
}

impl MsIdentity {
    /// Create a new identity connection with the given configuration.
    pub fn new(config: MsIdentityConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            account: Arc::new(RwLock::new(None)),
        }
    }

    /// Restore a previously connected account.
    pub async fn restore_account(&self, account: CachedAccount) {
        *self.account.write().await = Some(account);
    }

    /// The currently connected account, if any.
    pub async fn account(&self) -> Option<CachedAccount> {
        self.account.read().await.clone()
    }

    /// Is a Microsoft account connected and still usable.
    ///
    /// This probes the provider with a silent token acquisition, a cached
    /// account whose refresh token was revoked counts as not connected.
    pub async fn is_connected(&self) -> bool {
        if self.account.read().await.is_none() {
            return false;
        }

        self.acquire_token_silent().await.is_ok()
    }

    /// Forget the connected account.
    ///
    /// This only drops the cached refresh token, it doesn't revoke the
    /// grant on the Microsoft side.
    pub async fn disconnect(&self) {
        self.account.write().await.take();
    }

    async fn post_token_request(
        &self,
        form: &[(&str, &str)],
    ) -> IdentityResult<std::result::Result<TokenResponse, ProviderError>> {
        let response = self
            .http
            .post(&self.config.endpoint("/oauth2/v2.0/token"))
            .form(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            Ok(Ok(serde_json::from_slice(&body)?))
        } else {
            Ok(Err(serde_json::from_slice(&body)?))
        }
    }

    async fn receive_token_response(&self, response: TokenResponse) -> String {
        let claims = response
            .id_token
            .as_deref()
            .and_then(decode_id_token_claims);

        let mut account = self.account.write().await;
        let previous = account.take();

        let refresh_token = match response.refresh_token {
            Some(token) => token,
            // The provider is allowed to skip the rotation, keep what we
            // have in that case.
            None => match &previous {
                Some(previous) => previous.refresh_token.clone(),
                None => {
                    warn!("The provider sent no refresh token, silent sign in won't work");
                    String::new()
                }
            },
        };

        *account = Some(CachedAccount {
            username: claims
                .as_ref()
                .and_then(|c| c.preferred_username.clone())
                .or_else(|| previous.as_ref().and_then(|a| a.username.clone())),
            name: claims
                .as_ref()
                .and_then(|c| c.name.clone())
                .or_else(|| previous.as_ref().and_then(|a| a.name.clone())),
            refresh_token,
        });

        response.access_token
    }

    /// Acquire an access token with the cached refresh token, without user
    /// interaction.
    ///
    /// Fails with `IdentityError::InteractionRequired` when the provider
    /// insists on the user signing in again, use [`connect`] in that case.
    ///
    /// [`connect`]: #method.connect
    pub async fn acquire_token_silent(&self) -> IdentityResult<String> {
        let refresh_token = match self.account.read().await.as_ref() {
            Some(account) => account.refresh_token.clone(),
            None => return Err(IdentityError::NotConnected),
        };

        let scope = self.config.scope();
        let response = self
            .post_token_request(&[
                ("client_id", &self.config.client_id),
                ("grant_type", "refresh_token"),
                ("refresh_token", &refresh_token),
                ("scope", &scope),
            ])
            .await?;

        match response {
            Ok(token) => Ok(self.receive_token_response(token).await),
            Err(e) => match e.error.as_str() {
                "interaction_required" | "invalid_grant" | "consent_required"
                | "login_required" => Err(IdentityError::InteractionRequired),
                _ => Err(IdentityError::Provider {
                    error: e.error,
                    description: e.error_description,
                }),
            },
        }
    }

    /// Connect a Microsoft account.
    ///
    /// A silent sign in is attempted first. When that isn't possible the
    /// device authorization flow is started and `prompt` is called with the
    /// code the user has to enter at the verification URL, then the provider
    /// is polled until the user completes or declines the sign in.
    ///
    /// Returns an access token for the configured scopes.
    pub async fn connect<F>(&self, prompt: F) -> IdentityResult<String>
    where
        F: FnOnce(&DeviceAuthorization),
    {
        match self.acquire_token_silent().await {
            Ok(token) => return Ok(token),
            Err(IdentityError::InteractionRequired) | Err(IdentityError::NotConnected) => {
                info!("Silent sign in isn't possible, starting the device code flow");
            }
            Err(e) => return Err(e),
        }

        let scope = self.config.scope();
        let response = self
            .http
            .post(&self.config.endpoint("/oauth2/v2.0/devicecode"))
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("scope", &scope),
            ])
            .send()
            .await?
            .error_for_status()?;

        let authorization: DeviceAuthorization =
            serde_json::from_slice(&response.bytes().await?)?;

        prompt(&authorization);

        self.poll_device_token(authorization).await
    }

    async fn poll_device_token(
        &self,
        authorization: DeviceAuthorization,
    ) -> IdentityResult<String> {
        let mut interval = authorization.interval;
        // The provider reports expiry with the expired_token error as well,
        // the local deadline is a backstop against a misbehaving one.
        let mut remaining = authorization.expires_in;

        loop {
            let response = self
                .post_token_request(&[
                    ("client_id", &self.config.client_id),
                    ("grant_type", DEVICE_CODE_GRANT),
                    ("device_code", &authorization.device_code),
                ])
                .await?;

            match response {
                Ok(token) => return Ok(self.receive_token_response(token).await),
                Err(e) => match e.error.as_str() {
                    "authorization_pending" => {}
                    "slow_down" => interval += 5,
                    "authorization_declined" => return Err(IdentityError::Declined),
                    "expired_token" => return Err(IdentityError::Expired),
                    _ => {
                        return Err(IdentityError::Provider {
                            error: e.error,
                            description: e.error_description,
                        })
                    }
                },
            }

            if remaining < interval {
                return Err(IdentityError::Expired);
            }
            remaining -= interval;

            tokio::time::sleep(Duration::from_secs(interval)).await;
        }
    }
}

/// The profile of the signed in Microsoft account.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphProfile {
    /// The display name of the account.
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    /// The user principal name, usually the email address.
    #[serde(rename = "userPrincipalName")]
    pub user_principal_name: Option<String>,
}

/// A date and time in a Graph calendar event.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphDateTime {
    /// The date and time, e.g. `2021-06-03T14:00:00`.
    #[serde(rename = "dateTime")]
    pub date_time: String,
    /// The time zone the date and time are in.
    #[serde(rename = "timeZone")]
    pub time_zone: String,
}

/// A new event in the signed in account's calendar.
#[derive(Clone, Debug, Serialize)]
pub struct NewGraphEvent {
    /// The subject of the event.
    pub subject: String,
    /// When the event starts.
    pub start: GraphDateTime,
    /// When the event ends.
    pub end: GraphDateTime,
    /// Whether an online meeting should be attached to the event.
    #[serde(rename = "isOnlineMeeting")]
    pub is_online_meeting: bool,
}

/// A calendar event as returned by the Graph API.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphEvent {
    /// The id of the event.
    pub id: String,
    /// The subject of the event.
    pub subject: Option<String>,
    /// The URL to join the attached online meeting, if there is one.
    #[serde(rename = "onlineMeetingUrl")]
    pub online_meeting_url: Option<String>,
}

#[derive(Deserialize)]
struct GraphErrorBody {
    error: GraphErrorDetails,
}

#[derive(Deserialize)]
struct GraphErrorDetails {
    code: String,
    message: String,
}

/// A minimal client for the Microsoft Graph API.
///
/// The access token is set from the outside, acquire one with
/// [`MsIdentity`].
#[derive(Clone)]
pub struct GraphClient {
    http: reqwest::Client,
    base_url: Url,
    access_token: Arc<RwLock<Option<String>>>,
}

impl fmt::Debug for GraphClient {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("GraphClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Default for GraphClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphClient {
    /// Create a client for the public Graph API endpoint.
    pub fn new() -> Self {
        // The default Graph URL is valid.
        Self::with_base_url(Url::parse(DEFAULT_GRAPH_URL).unwrap())
    }

    /// Create a client for a different Graph endpoint, e.g. a national
    /// cloud.
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            access_token: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the access token used for the requests.
    pub async fn set_access_token(&self, access_token: String) {
        *self.access_token.write().await = Some(access_token);
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    async fn bearer(&self) -> IdentityResult<String> {
        self.access_token
            .read()
            .await
            .clone()
            .ok_or(IdentityError::NotConnected)
    }

    async fn deserialize_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> IdentityResult<T> {
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            Ok(serde_json::from_slice(&body)?)
        } else {
            let error: GraphErrorBody = serde_json::from_slice(&body)?;
            Err(IdentityError::Graph {
                code: error.error.code,
                message: error.error.message,
            })
        }
    }

    /// Fetch the profile of the signed in account.
    pub async fn me(&self) -> IdentityResult<GraphProfile> {
        let response = self
            .http
            .get(&self.endpoint("/me"))
            .bearer_auth(self.bearer().await?)
            .send()
            .await?;

        self.deserialize_response(response).await
    }

    /// Create an event in the signed in account's calendar.
    pub async fn create_calendar_event(&self, event: NewGraphEvent) -> IdentityResult<GraphEvent> {
        let response = self
            .http
            .post(&self.endpoint("/me/events"))
            .bearer_auth(self.bearer().await?)
            .json(&event)
            .send()
            .await?;

        self.deserialize_response(response).await
    }
}
