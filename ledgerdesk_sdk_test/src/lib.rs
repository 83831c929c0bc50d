//! Shared test data for the ledgerdesk-sdk crates.

pub mod test_json;
