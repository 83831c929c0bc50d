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

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::{session::User, Result};

mod json_store;

pub use json_store::JsonStore;

/// The stored credentials of a logged in user.
///
/// The token and the user it belongs to are persisted as a single record so
/// a store can never hold one without the other.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// The access token for the session.
    pub token: String,
    /// The user the token was issued for.
    pub user: User,
}

/// Abstraction over the storage of session credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync + Debug {
    /// Load the stored credentials, if any.
    async fn load(&self) -> Result<Option<CredentialRecord>>;

    /// Save the given credentials, replacing any previously stored ones.
    async fn save(&self, record: &CredentialRecord) -> Result<()>;

    /// Remove the stored credentials.
    ///
    /// Clearing an empty store is not an error.
    async fn clear(&self) -> Result<()>;
}

/// A credential store that keeps the record in memory, mainly useful for
/// testing.
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: RwLock<Option<CredentialRecord>>,
}

impl MemoryStore {
    /// Create a new empty `MemoryStore`.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn load(&self) -> Result<Option<CredentialRecord>> {
        Ok(self.record.read().await.clone())
    }

    async fn save(&self, record: &CredentialRecord) -> Result<()> {
        *self.record.write().await = Some(record.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.record.write().await = None;
        Ok(())
    }
}
