//! Token registry trait: the authoritative record of every token issued by
//! this process.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::token::Token;
use crate::errors::TokenError;

/// Concurrency-safe store of canonical tokens keyed by token id
///
/// Implementations own their synchronization; callers never lock. A write
/// made by `put` is visible to every later `get`, from any thread, and a
/// reader never observes a partially written entry.
///
/// The registry is authoritative for `revoked` and for the validity window:
/// whatever a signed token claims, the copy stored here decides.
pub trait TokenRegistry: Send + Sync {
    /// Insert a token, overwriting any entry with the same id
    ///
    /// # Arguments
    /// * `token` - The canonical token to store
    fn put(&self, token: Token);

    /// Insert a token only if its id is not taken yet
    ///
    /// The check and the insert are one atomic step.
    ///
    /// # Returns
    /// * `true` - The token was stored
    /// * `false` - An entry with the same id already exists; it is untouched
    fn try_put(&self, token: Token) -> bool;

    /// Remove an entry, returning it if it existed
    fn remove(&self, id: Uuid) -> Option<Token>;

    /// Look up the canonical copy of a token
    ///
    /// # Returns
    /// * `Some(Token)` - A clone of the stored entry
    /// * `None` - No token with this id was issued, or it has been purged
    fn get(&self, id: Uuid) -> Option<Token>;

    /// Mark a token as revoked
    ///
    /// # Returns
    /// * `Ok(Token)` - The updated canonical copy
    /// * `Err(TokenError::NotRegistered)` - Unknown id; nothing is changed
    fn revoke(&self, id: Uuid) -> Result<Token, TokenError>;

    /// Mark every token issued to `subject` as revoked
    ///
    /// # Returns
    /// Number of entries that went from active to revoked
    fn revoke_subject(&self, subject: &str) -> usize;

    /// Remove every entry whose `expires_at` is at or before `now`
    ///
    /// # Returns
    /// Number of entries removed
    fn purge_expired(&self, now: DateTime<Utc>) -> usize;

    /// Number of stored entries
    fn len(&self) -> usize;

    /// Whether an entry with this id exists
    fn contains(&self, id: Uuid) -> bool {
        self.get(id).is_some()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
