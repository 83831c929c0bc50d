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

//! This crate implements a LedgerDesk client library.
//!
//! ## Crate Feature Flags
//!
//! The following crate feature flags are available:
//!
//! * `native-tls`: Enables TLS functionality provided by `native-tls`,
//!   enabled by default.
//!
//! * `rustls-tls`: Enables TLS functionality provided by `rustls`.
//!
//! * `socks`: Enables SOCKS support in reqwest, the default HTTP client.
//!
//! * `docs`: Compiles the docs with feature annotations.
#![deny(
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces
)]
#![warn(missing_docs)]
#![cfg_attr(feature = "docs", feature(doc_cfg))]

pub use ledgerdesk_sdk_base::{
    BaseClientConfig, CredentialRecord, CredentialStore, Error as BaseError, JsonStore,
    MemoryStore, Session, SessionObserver, SessionState, User,
};

pub use reqwest;

mod client;
mod error;
mod http_client;

pub mod api;
pub mod identity;

pub use client::{Client, ClientConfig, ProfileChanges, RegisterRequest};
pub use error::{ApiError, Error, HttpError, HttpResult, Result};
pub use http_client::{DefaultHttpClient, HttpSend};

pub(crate) const VERSION: &str = env!("CARGO_PKG_VERSION");
