//! Process-local verification code store
//!
//! Entries live in a map keyed by phone number. The map is guarded by a
//! `tokio::sync::Mutex`, so the lookup, state transition and removal done by
//! [`CodeStoreTrait::verify_code`] happen as one step for each phone.
//! Nothing is persisted; a restart discards every pending verification.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

use sv_core::domain::entities::{VerificationEntry, VerificationOutcome};
use sv_core::services::verification::CodeStoreTrait;
use sv_shared::phone::mask_phone_number;

/// In-memory implementation of the code store trait
#[derive(Debug, Default)]
pub struct InMemoryCodeStore {
    entries: Mutex<HashMap<String, VerificationEntry>>,
}

impl InMemoryCodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Snapshot of the entry for a phone number
    pub async fn get(&self, phone: &str) -> Option<VerificationEntry> {
        self.entries.lock().await.get(phone).cloned()
    }
}

#[async_trait]
impl CodeStoreTrait for InMemoryCodeStore {
    async fn store_code(&self, phone: &str, entry: VerificationEntry) -> Result<(), String> {
        let replaced = self
            .entries
            .lock()
            .await
            .insert(phone.to_string(), entry)
            .is_some();

        if replaced {
            debug!(
                phone = %mask_phone_number(phone),
                "Replaced pending verification code"
            );
        }
        Ok(())
    }

    async fn verify_code(
        &self,
        phone: &str,
        code: &str,
        now: DateTime<Utc>,
        max_attempts: u32,
    ) -> Result<Option<VerificationOutcome>, String> {
        let mut entries = self.entries.lock().await;

        let outcome = match entries.get_mut(phone) {
            Some(entry) => entry.verify(code, now, max_attempts),
            None => return Ok(None),
        };

        if outcome.discards_entry() {
            entries.remove(phone);
        }

        Ok(Some(outcome))
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, String> {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        Ok(before - entries.len())
    }
}
