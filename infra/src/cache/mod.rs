//! In-memory verification code storage

pub mod memory_store;

pub use memory_store::InMemoryCodeStore;
