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

use std::{
    convert::TryInto,
    fmt::{self, Debug},
    sync::Arc,
    time::Duration,
};

use http::{HeaderValue, Method};
use reqwest::Proxy;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, instrument, warn};
use url::Url;

use ledgerdesk_sdk_base::{
    BaseClient, BaseClientConfig, CredentialStore, Session, SessionObserver, SessionState, User,
};

use crate::{
    api::{
        appointments::AppointmentsHandle, calendar::CalendarHandle, invoices::InvoicesHandle,
        knowledge_base::KnowledgeBaseHandle, notifications::NotificationsHandle,
        payments::PaymentsHandle, services::ServicesHandle, teams::TeamsHandle,
    },
    error::{Error, HttpError, Result},
    http_client::{DefaultHttpClient, HttpClient, HttpSend},
};

/// A generic `{"message": ...}` response from the backend.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct MessageResponse {
    pub message: String,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
    user: User,
}

#[derive(Deserialize)]
struct UserResponse {
    user: User,
}

#[derive(Deserialize)]
struct RefreshTokenResponse {
    #[allow(dead_code)]
    message: String,
    token: String,
}

/// A new account registration.
#[derive(Clone, Debug, Serialize)]
pub struct RegisterRequest {
    /// The display name of the new account.
    pub name: String,
    /// The email address that will be used to log in.
    pub email: String,
    /// The password for the new account.
    pub password: String,
    /// An optional phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// An optional street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// An optional city.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// An optional state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// An optional zip code.
    #[serde(rename = "zipCode", skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
}

/// Changes to the profile of the logged in user.
#[derive(Clone, Debug, Serialize)]
pub struct ProfileChanges {
    /// The new display name.
    pub name: String,
    /// The new phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// The new street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Configuration for the creation of the `Client`.
///
/// When setting the `StateStore` it is up to the user to open/connect
/// the storage backend before client creation.
///
/// # Example
///
/// ```
/// # use ledgerdesk_sdk::ClientConfig;
/// // To pass all the request through mitmproxy set the proxy and disable SSL
/// // verification
/// let client_config = ClientConfig::new()
///     .proxy("http://localhost:8080")
///     .unwrap()
///     .disable_ssl_verification();
/// ```
#[derive(Default)]
pub struct ClientConfig {
    pub(crate) proxy: Option<Proxy>,
    pub(crate) user_agent: Option<HeaderValue>,
    pub(crate) disable_ssl_verification: bool,
    pub(crate) base_config: BaseClientConfig,
    pub(crate) timeout: Option<Duration>,
    pub(crate) client: Option<Arc<dyn HttpSend>>,
}

impl Debug for ClientConfig {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> std::result::Result<(), fmt::Error> {
        fmt.debug_struct("ClientConfig")
            .field("proxy", &self.proxy)
            .field("user_agent", &self.user_agent)
            .field("disable_ssl_verification", &self.disable_ssl_verification)
            .finish()
    }
}

impl ClientConfig {
    /// Create a new default `ClientConfig`.
    pub fn new() -> Self {
        Default::default()
    }

    /// Set the proxy through which all the HTTP requests should go.
    ///
    /// Note, only HTTP proxies are supported.
    ///
    /// # Arguments
    ///
    /// * `proxy` - The HTTP URL of the proxy.
    ///
    /// # Example
    ///
    /// ```
    /// use ledgerdesk_sdk::ClientConfig;
    ///
    /// let client_config = ClientConfig::new()
    ///     .proxy("http://localhost:8080")
    ///     .unwrap();
    /// ```
    pub fn proxy(mut self, proxy: &str) -> Result<Self> {
        self.proxy = Some(Proxy::all(proxy)?);
        Ok(self)
    }

    /// Disable SSL verification for the HTTP requests.
    pub fn disable_ssl_verification(mut self) -> Self {
        self.disable_ssl_verification = true;
        self
    }

    /// Set a custom HTTP user agent for the client.
    pub fn user_agent(mut self, user_agent: &str) -> Result<Self> {
        self.user_agent = Some(
            HeaderValue::from_str(user_agent)
                .map_err(|e| Error::Http(HttpError::IntoHttp(e.into())))?,
        );
        Ok(self)
    }

    /// Set the configuration for the underlying `BaseClient`, e.g. the
    /// credential store.
    pub fn base_config(mut self, base_config: BaseClientConfig) -> Self {
        self.base_config = base_config;
        self
    }

    /// Set a timeout for the HTTP requests, requests taking longer than the
    /// timeout will fail.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Specify a client to handle sending requests and receiving responses.
    ///
    /// Any type that implements the `HttpSend` trait can be used to send and
    /// receive http messages.
    pub fn client(mut self, client: Arc<dyn HttpSend>) -> Self {
        self.client = Some(client);
        self
    }
}

/// An async/await enabled client for the LedgerDesk backend.
///
/// All of the state is held in an `Arc` so the `Client` can be cloned freely.
#[derive(Clone)]
pub struct Client {
    /// The URL the backend lives at.
    base_url: Arc<Url>,
    /// The underlying HTTP client.
    http_client: HttpClient,
    /// User session data.
    pub(crate) base_client: BaseClient,
}

impl Debug for Client {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "Client {{ base_url: {} }}", self.base_url.as_str())
    }
}

impl Client {
    /// Creates a new client for making HTTP requests to the given backend.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The URL of the backend the client should connect to.
    pub fn new<U: TryInto<Url>>(base_url: U) -> Result<Self> {
        let config = ClientConfig::new();
        Client::new_with_config(base_url, config)
    }

    /// Create a new client with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The URL of the backend the client should connect to.
    ///
    /// * `config` - Configuration for the client.
    pub fn new_with_config<U: TryInto<Url>>(base_url: U, config: ClientConfig) -> Result<Self> {
        let base_url = Arc::new(base_url.try_into().map_err(|_| Error::InvalidBaseUrl)?);

        let client = if let Some(client) = config.client.clone() {
            client
        } else {
            Arc::new(DefaultHttpClient::with_config(&config)?)
        };

        let base_client = BaseClient::new_with_config(config.base_config)?;
        let session = base_client.session().clone();

        let http_client = HttpClient {
            inner: client,
            base_url: base_url.clone(),
            session,
        };

        Ok(Self {
            base_url,
            http_client,
            base_client,
        })
    }

    /// The URL of the backend this client connects to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Is the client logged in.
    pub async fn logged_in(&self) -> bool {
        self.base_client.logged_in().await
    }

    /// The current authentication state of the client.
    pub async fn state(&self) -> SessionState {
        self.base_client.state().await
    }

    /// Returns the current session, if any.
    pub async fn session(&self) -> Option<Session> {
        self.base_client.session().read().await.clone()
    }

    /// Returns the logged in user, if any.
    pub async fn user(&self) -> Option<User> {
        self.session().await.map(|s| s.user)
    }

    /// Get a reference to the credential store.
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        self.base_client.store()
    }

    /// Set the observer that gets notified when the backend rejects the
    /// access token and the session is invalidated.
    pub async fn set_session_observer(&self, observer: Box<dyn SessionObserver>) {
        self.base_client.set_session_observer(observer).await;
    }

    /// Send an authenticated request to the backend.
    ///
    /// If the backend rejects the access token the session is invalidated,
    /// the session observer is notified and the request fails with
    /// `Error::AuthenticationRequired`.
    pub(crate) async fn send<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        match self.http_client.send(method, path, body).await {
            Ok(response) => Ok(response),
            Err(HttpError::Unauthorized { message }) => {
                warn!("The backend rejected our access token: {}", message);
                self.base_client.receive_unauthorized().await;
                Err(Error::AuthenticationRequired)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Login to the backend.
    ///
    /// This stores the session so it can be restored later with
    /// [`restore_session`].
    ///
    /// # Arguments
    ///
    /// * `email` - The email address of the user that should be logged in.
    ///
    /// * `password` - The password of the user.
    ///
    /// [`restore_session`]: #method.restore_session
    #[instrument(skip(password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        info!("Logging in to {}", self.base_url);

        let response: LoginResponse = self
            .http_client
            .send(
                Method::POST,
                "/auth/login",
                Some(json!({ "email": email, "password": password })),
            )
            .await?;

        self.base_client
            .receive_login_response(&response.token, response.user.clone())
            .await?;

        Ok(response.user)
    }

    /// Restore a previously logged in session without checking it against
    /// the backend.
    ///
    /// # Arguments
    ///
    /// * `session` - An session that the user already has from a
    /// previous login call.
    pub async fn restore_login(&self, session: Session) -> Result<()> {
        Ok(self.base_client.restore_login(session).await?)
    }

    /// Restore the session from the credential store and validate it against
    /// the backend.
    ///
    /// Returns the restored session, or `None` if there were no stored
    /// credentials or the backend no longer accepts them. A rejected token
    /// clears the stored credentials but doesn't notify the session observer,
    /// since nothing was invalidated behind the user's back.
    pub async fn restore_session(&self) -> Result<Option<Session>> {
        let stored = match self.base_client.load_stored_session().await? {
            Some(session) => session,
            None => {
                self.base_client.logout().await;
                return Ok(None);
            }
        };

        self.base_client.begin_validation(stored).await;

        match self
            .http_client
            .send::<UserResponse>(Method::GET, "/user/me", None)
            .await
        {
            Ok(response) => {
                self.base_client.receive_profile(response.user).await?;
                Ok(self.session().await)
            }
            Err(e) => {
                info!("The stored session couldn't be validated: {}", e);
                self.base_client.logout().await;
                Ok(None)
            }
        }
    }

    /// Log out of the backend.
    ///
    /// The local session is dropped and the stored credentials are cleared
    /// even when the logout request fails, or when there was no active
    /// session to begin with.
    pub async fn logout(&self) -> Result<()> {
        if self.logged_in().await {
            // The empty object body keeps the backend from rejecting the
            // request with an unsupported media type error.
            let response = self
                .http_client
                .send::<MessageResponse>(Method::POST, "/auth/logout", Some(json!({})))
                .await;

            match response {
                Ok(response) => info!("{}", response.message),
                Err(e) => warn!("The logout request failed: {}", e),
            }
        }

        self.base_client.logout().await;

        Ok(())
    }

    /// Register a new account on the backend.
    ///
    /// The account needs to be verified before it can log in, see
    /// [`verify_account`].
    ///
    /// [`verify_account`]: #method.verify_account
    #[instrument(skip(registration))]
    pub async fn register(&self, registration: RegisterRequest) -> Result<()> {
        info!("Registering to {}", self.base_url);

        let _: MessageResponse = self
            .http_client
            .send(
                Method::POST,
                "/auth/register",
                Some(serde_json::to_value(&registration).map_err(HttpError::Json)?),
            )
            .await?;

        Ok(())
    }

    /// Verify a newly registered account with the token from the
    /// verification email.
    pub async fn verify_account(&self, token: &str) -> Result<()> {
        let query: String = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("token", token)
            .finish();

        let _: MessageResponse = self
            .http_client
            .send(Method::GET, &format!("/auth/verify?{}", query), None)
            .await?;

        Ok(())
    }

    /// Request a new verification email for an unverified account.
    pub async fn resend_verification(&self, email: &str) -> Result<()> {
        let _: MessageResponse = self
            .http_client
            .send(
                Method::POST,
                "/auth/resend-verification",
                Some(json!({ "email": email })),
            )
            .await?;

        Ok(())
    }

    /// Request a password reset email.
    pub async fn request_password_reset(&self, email: &str) -> Result<()> {
        let _: MessageResponse = self
            .http_client
            .send(
                Method::POST,
                "/auth/reset-password-request",
                Some(json!({ "email": email })),
            )
            .await?;

        Ok(())
    }

    /// Complete a password reset with the token from the reset email.
    #[instrument(skip(token, password))]
    pub async fn reset_password(&self, token: &str, password: &str) -> Result<()> {
        let _: MessageResponse = self
            .http_client
            .send(
                Method::POST,
                "/auth/reset-password-complete",
                Some(json!({ "token": token, "password": password })),
            )
            .await?;

        Ok(())
    }

    /// Request a one time password to be sent to the given email address.
    pub async fn send_otp(&self, email: &str) -> Result<()> {
        let _: MessageResponse = self
            .http_client
            .send(Method::POST, "/auth/send-otp", Some(json!({ "email": email })))
            .await?;

        Ok(())
    }

    /// Verify a one time password that was sent by [`send_otp`].
    ///
    /// [`send_otp`]: #method.send_otp
    #[instrument(skip(otp))]
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<()> {
        let _: MessageResponse = self
            .http_client
            .send(
                Method::POST,
                "/auth/verify-otp",
                Some(json!({ "email": email, "otp": otp })),
            )
            .await?;

        Ok(())
    }

    /// Exchange the current access token for a fresh one.
    pub async fn refresh_token(&self) -> Result<()> {
        let response: RefreshTokenResponse = self
            .send(Method::POST, "/auth/refresh-token", Some(json!({})))
            .await?;

        self.base_client
            .receive_token_refresh(&response.token)
            .await?;

        Ok(())
    }

    /// Fetch the profile of the logged in user from the backend without
    /// touching the session.
    pub async fn whoami(&self) -> Result<User> {
        let response: UserResponse = self.send(Method::GET, "/user/me", None).await?;

        Ok(response.user)
    }

    /// Fetch the profile of the logged in user from the backend.
    ///
    /// The session is updated with the returned profile, fetching a profile
    /// that doesn't match the stored one anymore is surfaced as an error
    /// instead of keeping the stale data.
    pub async fn refresh_user_profile(&self) -> Result<User> {
        let response: UserResponse = self.send(Method::GET, "/user/me", None).await?;

        self.base_client
            .receive_profile(response.user.clone())
            .await?;

        Ok(response.user)
    }

    /// Update the profile of the logged in user.
    pub async fn update_profile(&self, changes: ProfileChanges) -> Result<User> {
        let response: UserResponse = self
            .send(
                Method::PUT,
                "/user/me",
                Some(serde_json::to_value(&changes).map_err(HttpError::Json)?),
            )
            .await?;

        self.base_client
            .receive_profile(response.user.clone())
            .await?;

        Ok(response.user)
    }

    /// Get a handle to the appointment endpoints.
    pub fn appointments(&self) -> AppointmentsHandle {
        AppointmentsHandle::new(self.clone())
    }

    /// Get a handle to the service catalogue endpoints.
    pub fn services(&self) -> ServicesHandle {
        ServicesHandle::new(self.clone())
    }

    /// Get a handle to the payment endpoints.
    pub fn payments(&self) -> PaymentsHandle {
        PaymentsHandle::new(self.clone())
    }

    /// Get a handle to the invoice endpoints.
    pub fn invoices(&self) -> InvoicesHandle {
        InvoicesHandle::new(self.clone())
    }

    /// Get a handle to the notification endpoints.
    pub fn notifications(&self) -> NotificationsHandle {
        NotificationsHandle::new(self.clone())
    }

    /// Get a handle to the calendar endpoints.
    pub fn calendar(&self) -> CalendarHandle {
        CalendarHandle::new(self.clone())
    }

    /// Get a handle to the knowledge base endpoints.
    pub fn knowledge_base(&self) -> KnowledgeBaseHandle {
        KnowledgeBaseHandle::new(self.clone())
    }

    /// Get a handle to the Microsoft Teams meeting endpoints.
    pub fn teams(&self) -> TeamsHandle {
        TeamsHandle::new(self.clone())
    }
}

#[cfg(test)]
pub(crate) mod test {
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    };

    use async_trait::async_trait;
    use ledgerdesk_sdk_base::{
        BaseClientConfig, Session, SessionObserver, SessionState, User,
    };
    use ledgerdesk_sdk_test::test_json;
    use mockito::{mock, Matcher};

    use super::{Client, ClientConfig, ProfileChanges, RegisterRequest};
    use crate::error::{Error, HttpError};

    pub(crate) fn user() -> User {
        User {
            id: 1,
            name: "Example User".to_owned(),
            email: "example@localhost".to_owned(),
            role: Some("client".to_owned()),
        }
    }

    pub(crate) fn session_with_token(token: &str) -> Session {
        Session {
            access_token: token.to_owned(),
            user: user(),
        }
    }

    pub(crate) async fn logged_in_client(token: &str) -> Client {
        let client = Client::new(mockito::server_url().as_str()).unwrap();
        client
            .restore_login(session_with_token(token))
            .await
            .unwrap();
        client
    }

    struct Flag(Arc<AtomicBool>);

    #[async_trait]
    impl SessionObserver for Flag {
        async fn on_session_expired(&self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[test]
    fn invalid_base_url() {
        assert!(matches!(
            Client::new("not a url"),
            Err(Error::InvalidBaseUrl)
        ));
    }

    #[tokio::test]
    async fn login() {
        let client = Client::new(mockito::server_url().as_str()).unwrap();

        let _m = mock("POST", "/auth/login")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "email": "example@localhost"
            })))
            .with_status(200)
            .with_body(test_json::LOGIN.to_string())
            .create();

        let user = client.login("example@localhost", "wordpass").await.unwrap();

        assert_eq!(user.email, "example@localhost");
        assert!(client.logged_in().await);
        assert_eq!(client.state().await, SessionState::Authenticated);
        assert_eq!(client.session().await.unwrap().access_token, "1234");
    }

    #[tokio::test]
    async fn login_error() {
        let client = Client::new(mockito::server_url().as_str()).unwrap();

        let _m = mock("POST", "/auth/login")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "email": "wrong@localhost"
            })))
            .with_status(401)
            .with_body(test_json::LOGIN_RESPONSE_ERR.to_string())
            .create();

        let err = client
            .login("wrong@localhost", "wordpass")
            .await
            .unwrap_err();

        if let Error::Http(HttpError::Unauthorized { message }) = err {
            assert_eq!(message, "Invalid email or password");
        } else {
            panic!("found the wrong `Error` type {:?}, expected `Unauthorized`", err);
        }

        assert!(!client.logged_in().await);
    }

    #[tokio::test]
    async fn login_persists_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::new()
            .base_config(BaseClientConfig::new().store_path(dir.path()));
        let client =
            Client::new_with_config(mockito::server_url().as_str(), config).unwrap();

        let _m = mock("POST", "/auth/login")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "email": "persist@localhost"
            })))
            .with_status(200)
            .with_body(test_json::LOGIN.to_string())
            .create();

        client.login("persist@localhost", "wordpass").await.unwrap();

        let stored = client.store().load().await.unwrap().unwrap();
        assert_eq!(stored.token, "1234");
        assert_eq!(stored.user, user());
    }

    #[tokio::test]
    async fn restore_session_from_store() {
        let dir = tempfile::tempdir().unwrap();

        {
            let config = ClientConfig::new()
                .base_config(BaseClientConfig::new().store_path(dir.path()));
            let client =
                Client::new_with_config(mockito::server_url().as_str(), config).unwrap();
            client
                .base_client
                .receive_login_response("restore-1", user())
                .await
                .unwrap();
        }

        let _m = mock("GET", "/user/me")
            .match_header("authorization", "Bearer restore-1")
            .with_status(200)
            .with_body(test_json::WHOAMI.to_string())
            .create();

        let config = ClientConfig::new()
            .base_config(BaseClientConfig::new().store_path(dir.path()));
        let client =
            Client::new_with_config(mockito::server_url().as_str(), config).unwrap();

        assert_eq!(client.state().await, SessionState::Uninitialized);

        let session = client.restore_session().await.unwrap().unwrap();

        assert_eq!(session.access_token, "restore-1");
        assert_eq!(client.state().await, SessionState::Authenticated);
    }

    #[tokio::test]
    async fn restore_session_without_credentials() {
        let client = Client::new(mockito::server_url().as_str()).unwrap();

        let session = client.restore_session().await.unwrap();

        assert!(session.is_none());
        assert_eq!(client.state().await, SessionState::Anonymous);
    }

    #[tokio::test]
    async fn restore_session_with_rejected_token() {
        let dir = tempfile::tempdir().unwrap();

        {
            let config = ClientConfig::new()
                .base_config(BaseClientConfig::new().store_path(dir.path()));
            let client =
                Client::new_with_config(mockito::server_url().as_str(), config).unwrap();
            client
                .base_client
                .receive_login_response("restore-2", user())
                .await
                .unwrap();
        }

        let _m = mock("GET", "/user/me")
            .match_header("authorization", "Bearer restore-2")
            .with_status(401)
            .with_body(test_json::UNAUTHORIZED.to_string())
            .create();

        let config = ClientConfig::new()
            .base_config(BaseClientConfig::new().store_path(dir.path()));
        let client =
            Client::new_with_config(mockito::server_url().as_str(), config).unwrap();

        let expired = Arc::new(AtomicBool::new(false));
        client
            .set_session_observer(Box::new(Flag(expired.clone())))
            .await;

        let session = client.restore_session().await.unwrap();

        assert!(session.is_none());
        assert_eq!(client.state().await, SessionState::Anonymous);
        assert!(client.store().load().await.unwrap().is_none());
        // Restoring a dead session isn't an expiry, the user never saw it as
        // logged in.
        assert!(!expired.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn expired_session_invalidates_client() {
        let client = logged_in_client("expired-1").await;

        let expired = Arc::new(AtomicBool::new(false));
        client
            .set_session_observer(Box::new(Flag(expired.clone())))
            .await;

        let _m = mock("GET", "/appointments")
            .match_header("authorization", "Bearer expired-1")
            .with_status(401)
            .with_body(test_json::UNAUTHORIZED.to_string())
            .create();

        let err = client.appointments().list().await.unwrap_err();

        assert!(matches!(err, Error::AuthenticationRequired));
        assert!(!client.logged_in().await);
        assert_eq!(client.state().await, SessionState::Anonymous);
        assert!(expired.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn logout() {
        let client = logged_in_client("logout-1").await;

        let _m = mock("POST", "/auth/logout")
            .match_header("authorization", "Bearer logout-1")
            .with_status(200)
            .with_body(test_json::LOGOUT.to_string())
            .create();

        client.logout().await.unwrap();

        assert!(!client.logged_in().await);
        assert_eq!(client.state().await, SessionState::Anonymous);
        assert!(client.store().load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn logout_with_server_error() {
        let client = logged_in_client("logout-2").await;

        let _m = mock("POST", "/auth/logout")
            .match_header("authorization", "Bearer logout-2")
            .with_status(500)
            .with_body("{\"error\": \"boom\"}")
            .create();

        client.logout().await.unwrap();

        assert!(!client.logged_in().await);
    }

    #[tokio::test]
    async fn logout_when_not_logged_in() {
        let client = Client::new(mockito::server_url().as_str()).unwrap();

        client.logout().await.unwrap();

        assert!(!client.logged_in().await);
        assert_eq!(client.state().await, SessionState::Anonymous);
        assert!(client.store().load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn logout_clears_stored_credentials_without_session() {
        let dir = tempfile::tempdir().unwrap();

        {
            let config = ClientConfig::new()
                .base_config(BaseClientConfig::new().store_path(dir.path()));
            let client =
                Client::new_with_config(mockito::server_url().as_str(), config).unwrap();
            client
                .base_client
                .receive_login_response("logout-3", user())
                .await
                .unwrap();
        }

        // A fresh client over the same store, logged out before any session
        // restoration.
        let config = ClientConfig::new()
            .base_config(BaseClientConfig::new().store_path(dir.path()));
        let client =
            Client::new_with_config(mockito::server_url().as_str(), config).unwrap();

        client.logout().await.unwrap();

        assert_eq!(client.state().await, SessionState::Anonymous);
        assert!(client.store().load().await.unwrap().is_none());
        assert!(client.restore_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn register() {
        let client = Client::new(mockito::server_url().as_str()).unwrap();

        let _m = mock("POST", "/auth/register")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "email": "new@localhost",
                "zipCode": "12345"
            })))
            .with_status(201)
            .with_body(test_json::REGISTER.to_string())
            .create();

        client
            .register(RegisterRequest {
                name: "New User".to_owned(),
                email: "new@localhost".to_owned(),
                password: "wordpass".to_owned(),
                phone: None,
                address: None,
                city: None,
                state: None,
                zip_code: Some("12345".to_owned()),
            })
            .await
            .unwrap();

        assert!(!client.logged_in().await);
    }

    #[tokio::test]
    async fn verify_account() {
        let client = Client::new(mockito::server_url().as_str()).unwrap();

        let _m = mock("GET", "/auth/verify")
            .match_query(Matcher::UrlEncoded("token".into(), "verify-123".into()))
            .with_status(200)
            .with_body(test_json::MESSAGE.to_string())
            .create();

        client.verify_account("verify-123").await.unwrap();
    }

    #[tokio::test]
    async fn verify_account_with_reserved_characters() {
        let client = Client::new(mockito::server_url().as_str()).unwrap();

        let _m = mock("GET", "/auth/verify")
            .match_query(Matcher::UrlEncoded(
                "token".into(),
                "ver&ify=1+23".into(),
            ))
            .with_status(200)
            .with_body(test_json::MESSAGE.to_string())
            .create();

        client.verify_account("ver&ify=1+23").await.unwrap();
    }

    #[tokio::test]
    async fn reset_password_flow() {
        let client = Client::new(mockito::server_url().as_str()).unwrap();

        let _m1 = mock("POST", "/auth/reset-password-request")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "email": "reset@localhost"
            })))
            .with_status(200)
            .with_body(test_json::MESSAGE.to_string())
            .create();

        let _m2 = mock("POST", "/auth/reset-password-complete")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "token": "reset-token"
            })))
            .with_status(200)
            .with_body(test_json::MESSAGE.to_string())
            .create();

        client.request_password_reset("reset@localhost").await.unwrap();
        client.reset_password("reset-token", "newpass").await.unwrap();
    }

    #[tokio::test]
    async fn otp_flow() {
        let client = Client::new(mockito::server_url().as_str()).unwrap();

        let _m1 = mock("POST", "/auth/send-otp")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "email": "otp@localhost"
            })))
            .with_status(200)
            .with_body(test_json::MESSAGE.to_string())
            .create();

        let _m2 = mock("POST", "/auth/verify-otp")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "email": "otp@localhost",
                "otp": "000111"
            })))
            .with_status(200)
            .with_body(test_json::MESSAGE.to_string())
            .create();

        client.send_otp("otp@localhost").await.unwrap();
        client.verify_otp("otp@localhost", "000111").await.unwrap();
    }

    #[tokio::test]
    async fn refresh_token() {
        let client = logged_in_client("refresh-1").await;

        let _m = mock("POST", "/auth/refresh-token")
            .match_header("authorization", "Bearer refresh-1")
            .with_status(200)
            .with_body(test_json::TOKEN_REFRESH.to_string())
            .create();

        client.refresh_token().await.unwrap();

        assert_eq!(client.session().await.unwrap().access_token, "5678");
    }

    #[tokio::test]
    async fn refresh_user_profile() {
        let client = logged_in_client("profile-1").await;

        let _m = mock("GET", "/user/me")
            .match_header("authorization", "Bearer profile-1")
            .with_status(200)
            .with_body(test_json::WHOAMI.to_string())
            .create();

        let user = client.refresh_user_profile().await.unwrap();

        assert_eq!(user, self::user());
        assert_eq!(client.user().await.unwrap(), user);
    }

    #[tokio::test]
    async fn update_profile() {
        let client = logged_in_client("profile-2").await;

        let _m = mock("PUT", "/user/me")
            .match_header("authorization", "Bearer profile-2")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "name": "Example User"
            })))
            .with_status(200)
            .with_body(test_json::WHOAMI.to_string())
            .create();

        let user = client
            .update_profile(ProfileChanges {
                name: "Example User".to_owned(),
                phone: Some("555-0100".to_owned()),
                address: None,
            })
            .await
            .unwrap();

        assert_eq!(client.user().await.unwrap(), user);
    }

    #[tokio::test]
    async fn no_authorization_header_without_session() {
        let client = Client::new(mockito::server_url().as_str()).unwrap();

        let _m = mock("GET", "/services/categories")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(test_json::SERVICE_CATEGORIES.to_string())
            .create();

        let categories = client.services().categories().await.unwrap();

        assert_eq!(categories, vec!["Tax Preparation", "Bookkeeping", "Payroll"]);
    }

    #[tokio::test]
    async fn api_error_with_fallback_message() {
        let client = logged_in_client("err-1").await;

        let _m = mock("GET", "/invoices")
            .match_header("authorization", "Bearer err-1")
            .with_status(500)
            .with_body("not json")
            .create();

        let err = client.invoices().list().await.unwrap_err();

        if let Error::Http(HttpError::Api(api)) = err {
            assert_eq!(api.status, 500);
            assert_eq!(api.message, "An error occurred");
        } else {
            panic!("found the wrong `Error` type {:?}, expected `Api`", err);
        }

        // A plain server error doesn't end the session.
        assert!(client.logged_in().await);
    }
}
