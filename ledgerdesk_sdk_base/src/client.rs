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

use std::fmt::{self, Debug};
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::{
    error::Result,
    session::{Session, SessionState, User},
    store::{CredentialRecord, CredentialStore, JsonStore, MemoryStore},
};

/// Gets notified about changes to the session that the client didn't ask
/// for itself, e.g. the backend rejecting the access token.
#[async_trait]
pub trait SessionObserver: Send + Sync {
    /// Called when the session was invalidated because the backend rejected
    /// the access token. The credentials have already been cleared when this
    /// is called.
    async fn on_session_expired(&self);
}

/// Configuration for the creation of the `BaseClient`.
///
/// # Example
///
/// ```
/// # use ledgerdesk_sdk_base::BaseClientConfig;
/// let client_config = BaseClientConfig::new()
///     .store_path("/home/example/ledgerdesk");
/// ```
#[derive(Default)]
pub struct BaseClientConfig {
    store: Option<Arc<dyn CredentialStore>>,
    store_path: Option<std::path::PathBuf>,
}

impl Debug for BaseClientConfig {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("BaseClientConfig").finish()
    }
}

impl BaseClientConfig {
    /// Create a new default `BaseClientConfig`.
    pub fn new() -> Self {
        Default::default()
    }

    /// Set a custom implementation of a `CredentialStore`.
    ///
    /// The credential store should be connected before being set.
    pub fn credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the path for storage of the credentials.
    pub fn store_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.store_path = Some(path.as_ref().into());
        self
    }
}

/// A no (network) IO client implementation.
///
/// This client is a state machine that holds the session and delegates the
/// persistence of credentials to its store, it doesn't do any network
/// requests on its own.
#[derive(Clone)]
pub struct BaseClient {
    /// The current session, containing the access token and the logged in
    /// user.
    session: Arc<RwLock<Option<Session>>>,
    /// The current authentication state.
    state: Arc<RwLock<SessionState>>,
    /// Credential storage.
    store: Arc<dyn CredentialStore>,
    /// Observer that gets notified when the session expires.
    observer: Arc<RwLock<Option<Box<dyn SessionObserver>>>>,
}

impl Debug for BaseClient {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("BaseClient")
            .field("session", &self.session)
            .finish()
    }
}

impl BaseClient {
    /// Create a new default client.
    pub fn new() -> Result<Self> {
        BaseClient::new_with_config(BaseClientConfig::default())
    }

    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `config` - the configuration for the client.
    pub fn new_with_config(config: BaseClientConfig) -> Result<Self> {
        let store: Arc<dyn CredentialStore> = if let Some(store) = config.store {
            store
        } else if let Some(path) = config.store_path {
            Arc::new(JsonStore::open(path)?)
        } else {
            Arc::new(MemoryStore::new())
        };

        Ok(BaseClient {
            session: Arc::new(RwLock::new(None)),
            state: Arc::new(RwLock::new(SessionState::default())),
            store,
            observer: Arc::new(RwLock::new(None)),
        })
    }

    /// The current client session containing the user and access token.
    pub fn session(&self) -> &Arc<RwLock<Option<Session>>> {
        &self.session
    }

    /// The current authentication state of the client.
    pub async fn state(&self) -> SessionState {
        *self.state.read().await
    }

    /// Is the client logged in.
    pub async fn logged_in(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// Get a reference to the credential store.
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Set the observer that will be notified when the session expires.
    pub async fn set_session_observer(&self, observer: Box<dyn SessionObserver>) {
        *self.observer.write().await = Some(observer);
    }

    /// Receive a successful login response.
    ///
    /// Sets the session, marks the client as authenticated and persists the
    /// credentials.
    ///
    /// # Arguments
    ///
    /// * `access_token` - the token the backend issued for the session.
    ///
    /// * `user` - the user the token was issued for.
    pub async fn receive_login_response(&self, access_token: &str, user: User) -> Result<()> {
        let session = Session {
            access_token: access_token.to_owned(),
            user,
        };

        self.store
            .save(&CredentialRecord {
                token: session.access_token.clone(),
                user: session.user.clone(),
            })
            .await?;

        *self.session.write().await = Some(session);
        *self.state.write().await = SessionState::Authenticated;

        Ok(())
    }

    /// Restore a previously logged in session without hitting the store.
    pub async fn restore_login(&self, session: Session) -> Result<()> {
        *self.session.write().await = Some(session);
        *self.state.write().await = SessionState::Authenticated;

        Ok(())
    }

    /// Load the stored credentials, if any, without installing them as the
    /// active session.
    pub async fn load_stored_session(&self) -> Result<Option<Session>> {
        Ok(self.store.load().await?.map(|record| Session {
            access_token: record.token,
            user: record.user,
        }))
    }

    /// Install the given session as the active one and mark the client as
    /// validating it against the backend.
    pub async fn begin_validation(&self, session: Session) {
        *self.session.write().await = Some(session);
        *self.state.write().await = SessionState::Validating;
    }

    /// Receive an up to date user profile from the backend.
    ///
    /// Updates the user of the active session, persists the updated
    /// credentials and marks the client as authenticated.
    pub async fn receive_profile(&self, user: User) -> Result<()> {
        let mut session = self.session.write().await;

        if let Some(session) = session.as_mut() {
            session.user = user;
            self.store
                .save(&CredentialRecord {
                    token: session.access_token.clone(),
                    user: session.user.clone(),
                })
                .await?;
        } else {
            warn!("Received a profile without an active session");
            return Ok(());
        }

        *self.state.write().await = SessionState::Authenticated;

        Ok(())
    }

    /// Receive a refreshed access token from the backend.
    pub async fn receive_token_refresh(&self, access_token: &str) -> Result<()> {
        let mut session = self.session.write().await;

        if let Some(session) = session.as_mut() {
            session.access_token = access_token.to_owned();
            self.store
                .save(&CredentialRecord {
                    token: session.access_token.clone(),
                    user: session.user.clone(),
                })
                .await?;
        }

        Ok(())
    }

    /// Forget the session and clear the stored credentials.
    ///
    /// Failing to clear the store only gets logged, the in-memory session is
    /// dropped regardless. Logging out twice is not an error.
    pub async fn logout(&self) {
        self.session.write().await.take();
        *self.state.write().await = SessionState::Anonymous;

        if let Err(e) = self.store.clear().await {
            warn!("Failed to clear the stored credentials: {}", e);
        }
    }

    /// Receive notice that the backend rejected our access token.
    ///
    /// Clears the session like `logout()` does and additionally notifies the
    /// session observer, but only if there was a session to invalidate.
    pub async fn receive_unauthorized(&self) {
        let had_session = self.session.write().await.take().is_some();
        *self.state.write().await = SessionState::Anonymous;

        if let Err(e) = self.store.clear().await {
            warn!("Failed to clear the stored credentials: {}", e);
        }

        if had_session {
            info!("The access token was rejected, session invalidated");

            if let Some(observer) = self.observer.read().await.as_ref() {
                observer.on_session_expired().await;
            }
        }
    }
}
