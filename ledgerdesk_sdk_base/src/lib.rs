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

//! This crate implements the base to build a LedgerDesk client library.
//!
//! ## Crate Feature Flags
//!
//! The following crate feature flags are available:
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

mod client;
mod error;
mod session;

pub mod store;

pub use client::{BaseClient, BaseClientConfig, SessionObserver};
pub use error::{Error, Result};
pub use session::{Session, SessionState, User};
pub use store::{CredentialRecord, CredentialStore, JsonStore, MemoryStore};
