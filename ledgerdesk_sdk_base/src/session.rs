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

//! User sessions.

use serde::{Deserialize, Serialize};

/// A user account as returned by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The unique id of the user.
    pub id: i64,
    /// The display name of the user.
    pub name: String,
    /// The email address the user signed up with.
    pub email: String,
    /// The role of the user, e.g. "client" or "admin".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// A user session, containing the access token used for authenticated
/// requests and the user the token belongs to.
///
/// # Example
///
/// ```
/// # use ledgerdesk_sdk_base::{Session, User};
/// let session = Session {
///     access_token: "My-Token".to_owned(),
///     user: User {
///         id: 1,
///         name: "Example".to_owned(),
///         email: "example@localhost".to_owned(),
///         role: None,
///     },
/// };
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// The access token used for this session.
    pub access_token: String,
    /// The user the access token was issued for.
    pub user: User,
}

/// The current authentication state of a client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No session restoration has been attempted yet.
    Uninitialized,
    /// Stored credentials were found and are being validated against the
    /// backend.
    Validating,
    /// The session was validated and the user is logged in.
    Authenticated,
    /// There is no valid session.
    Anonymous,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Uninitialized
    }
}
