//! Storage adapters usable without a native shell (headless runs, demos, tests).

mod memory_credential_store;

pub use memory_credential_store::InMemoryCredentialStore;
