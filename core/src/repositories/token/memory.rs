//! In-memory token registry backed by a sharded concurrent map.

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::entities::token::Token;
use crate::errors::TokenError;

use super::trait_::TokenRegistry;

/// Process-local token registry
///
/// Lookups are O(1) by token id. Locking is per shard, so concurrent
/// requests touching different tokens do not contend. Construct one per
/// process and share it behind an `Arc`.
#[derive(Debug, Default)]
pub struct InMemoryTokenRegistry {
    tokens: DashMap<Uuid, Token>,
}

impl InMemoryTokenRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            tokens: DashMap::new(),
        }
    }
}

impl TokenRegistry for InMemoryTokenRegistry {
    fn put(&self, token: Token) {
        self.tokens.insert(token.id, token);
    }

    fn try_put(&self, token: Token) -> bool {
        match self.tokens.entry(token.id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(token);
                true
            }
        }
    }

    fn remove(&self, id: Uuid) -> Option<Token> {
        self.tokens.remove(&id).map(|(_, token)| token)
    }

    fn get(&self, id: Uuid) -> Option<Token> {
        self.tokens.get(&id).map(|entry| entry.value().clone())
    }

    fn revoke(&self, id: Uuid) -> Result<Token, TokenError> {
        let mut entry = self.tokens.get_mut(&id).ok_or(TokenError::NotRegistered)?;
        entry.revoke();
        Ok(entry.value().clone())
    }

    fn revoke_subject(&self, subject: &str) -> usize {
        let mut revoked = 0;
        for mut entry in self.tokens.iter_mut() {
            if entry.subject == subject && !entry.revoked {
                entry.revoke();
                revoked += 1;
            }
        }
        revoked
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut removed = 0;
        self.tokens.retain(|_, token| {
            let keep = !token.is_expired_at(now);
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    fn len(&self) -> usize {
        self.tokens.len()
    }

    fn contains(&self, id: Uuid) -> bool {
        self.tokens.contains_key(&id)
    }
}
