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

//! Error conditions.

use http::StatusCode;
use ledgerdesk_sdk_base::Error as SdkBaseError;
use reqwest::Error as ReqwestError;
use serde_json::Error as JsonError;
use thiserror::Error;

use crate::identity::IdentityError;

/// Result type of the ledgerdesk-sdk.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Result type of a pure HTTP request.
pub type HttpResult<T> = std::result::Result<T, HttpError>;

/// An error response from the backend, with the message it sent and the
/// status code of the response.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ApiError {
    /// The status code of the response.
    pub status: StatusCode,
    /// The error message the backend sent, or a generic fallback if the
    /// response body didn't contain one.
    pub message: String,
}

/// An HTTP error, representing either a connection error or an error while
/// converting the raw HTTP response into a backend response.
#[derive(Error, Debug)]
pub enum HttpError {
    /// An error at the HTTP layer.
    #[error(transparent)]
    Reqwest(#[from] ReqwestError),

    /// The backend rejected the access token.
    #[error("the access token was rejected: {message}")]
    Unauthorized {
        /// The error message the backend sent along with the rejection.
        message: String,
    },

    /// The backend responded with an error for the request.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// An error converting between http request/response types.
    #[error(transparent)]
    IntoHttp(#[from] http::Error),

    /// An error deserializing the response body.
    #[error(transparent)]
    Json(#[from] JsonError),
}

/// Internal representation of errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Error doing an HTTP request.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Queried endpoint requires authentication but was called on an
    /// anonymous client, or the session expired mid-request.
    #[error("the queried endpoint requires authentication but no session is active")]
    AuthenticationRequired,

    /// An error de/serializing type for the `CredentialStore`.
    #[error(transparent)]
    SerdeJson(#[from] JsonError),

    /// An IO error.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// An error occurred in the state machine or its store.
    #[error(transparent)]
    SdkBaseError(#[from] SdkBaseError),

    /// An error in the Microsoft identity integration.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// The given base URL couldn't be parsed.
    #[error("the given base URL is not a valid URL")]
    InvalidBaseUrl,
}

impl From<ReqwestError> for Error {
    fn from(e: ReqwestError) -> Self {
        Error::Http(HttpError::Reqwest(e))
    }
}

impl From<ApiError> for Error {
    fn from(e: ApiError) -> Self {
        Error::Http(HttpError::Api(e))
    }
}
