//! Unit tests for the in-memory token registry

use std::sync::Arc;
use std::thread;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::{Token, TokenKind};
use crate::errors::TokenError;
use crate::repositories::token::{InMemoryTokenRegistry, TokenRegistry};

fn token_with_id(id: Uuid) -> Token {
    let mut token = Token::new(TokenKind::Access, "user-1", Utc::now(), Duration::hours(1));
    token.id = id;
    token
}

#[test]
fn test_put_then_get() {
    let registry = InMemoryTokenRegistry::new();
    let token = token_with_id(Uuid::new_v4());

    registry.put(token.clone());

    assert_eq!(registry.get(token.id), Some(token));
    assert_eq!(registry.len(), 1);
    assert!(!registry.is_empty());
}

#[test]
fn test_get_unknown_is_none() {
    let registry = InMemoryTokenRegistry::new();
    assert!(registry.get(Uuid::new_v4()).is_none());
    assert!(registry.is_empty());
}

#[test]
fn test_put_overwrites_same_id() {
    let registry = InMemoryTokenRegistry::new();
    let id = Uuid::new_v4();
    registry.put(token_with_id(id));

    let mut replacement = token_with_id(id);
    replacement.subject = "user-2".to_string();
    registry.put(replacement);

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get(id).unwrap().subject, "user-2");
}

#[test]
fn test_revoke_marks_entry() {
    let a1 = Uuid::parse_str("00000000-0000-4000-8000-0000000000a1").unwrap();
    let registry = InMemoryTokenRegistry::new();
    registry.put(token_with_id(a1));

    let revoked = registry.revoke(a1).unwrap();

    assert!(revoked.revoked);
    assert!(registry.get(a1).unwrap().revoked);
}

#[test]
fn test_revoke_unknown_id_changes_nothing() {
    let registry = InMemoryTokenRegistry::new();
    let known = token_with_id(Uuid::new_v4());
    registry.put(known.clone());

    let result = registry.revoke(Uuid::new_v4());

    assert_eq!(result, Err(TokenError::NotRegistered));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get(known.id), Some(known));
}

#[test]
fn test_purge_expired_removes_only_expired() {
    let registry = InMemoryTokenRegistry::new();
    let now = Utc::now();

    let live = Token::new(TokenKind::Access, "u", now, Duration::hours(1));
    let expired = Token::new(TokenKind::Access, "u", now - Duration::hours(2), Duration::hours(1));
    let boundary = Token::new(TokenKind::Refresh, "u", now - Duration::hours(1), Duration::hours(1));
    registry.put(live.clone());
    registry.put(expired.clone());
    registry.put(boundary.clone());

    let removed = registry.purge_expired(now);

    assert_eq!(removed, 2);
    assert!(registry.contains(live.id));
    assert!(!registry.contains(expired.id));
    assert!(!registry.contains(boundary.id));
}

#[test]
fn test_concurrent_puts_are_all_visible() {
    let registry = Arc::new(InMemoryTokenRegistry::new());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                (0..250)
                    .map(|_| {
                        let token = token_with_id(Uuid::new_v4());
                        let id = token.id;
                        registry.put(token);
                        assert!(registry.get(id).is_some());
                        id
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let ids: Vec<Uuid> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();

    assert_eq!(registry.len(), 2000);
    assert!(ids.iter().all(|id| registry.contains(*id)));
}

#[test]
fn test_concurrent_revoke_and_get() {
    let registry = Arc::new(InMemoryTokenRegistry::new());
    let ids: Vec<Uuid> = (0..100)
        .map(|_| {
            let token = token_with_id(Uuid::new_v4());
            let id = token.id;
            registry.put(token);
            id
        })
        .collect();

    let revoker = {
        let registry = Arc::clone(&registry);
        let ids = ids.clone();
        thread::spawn(move || {
            for id in ids {
                registry.revoke(id).unwrap();
            }
        })
    };
    let reader = {
        let registry = Arc::clone(&registry);
        let ids = ids.clone();
        thread::spawn(move || {
            for id in ids {
                let token = registry.get(id).unwrap();
                assert_eq!(token.subject, "user-1");
            }
        })
    };
    revoker.join().unwrap();
    reader.join().unwrap();

    assert!(ids.iter().all(|id| registry.get(*id).unwrap().revoked));
}

#[test]
fn test_try_put_keeps_existing_entry() {
    let registry = InMemoryTokenRegistry::new();
    let id = Uuid::new_v4();
    let original = token_with_id(id);
    assert!(registry.try_put(original.clone()));

    let mut intruder = token_with_id(id);
    intruder.subject = "user-2".to_string();

    assert!(!registry.try_put(intruder));
    assert_eq!(registry.get(id), Some(original));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_concurrent_try_put_same_id_has_one_winner() {
    let registry = Arc::new(InMemoryTokenRegistry::new());
    let id = Uuid::new_v4();

    let handles: Vec<_> = (0..8)
        .map(|n| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let mut token = token_with_id(id);
                token.subject = format!("user-{}", n);
                registry.try_put(token)
            })
        })
        .collect();

    let winners = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|stored| *stored)
        .count();

    assert_eq!(winners, 1);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_remove() {
    let registry = InMemoryTokenRegistry::new();
    let token = token_with_id(Uuid::new_v4());
    registry.put(token.clone());

    assert_eq!(registry.remove(token.id), Some(token.clone()));
    assert!(registry.remove(token.id).is_none());
    assert!(registry.is_empty());
}

#[test]
fn test_revoke_subject_only_touches_that_subject() {
    let registry = InMemoryTokenRegistry::new();
    let now = Utc::now();
    let access = Token::new(TokenKind::Access, "user-1", now, Duration::hours(1));
    let refresh = Token::new(TokenKind::Refresh, "user-1", now, Duration::days(7));
    let other = Token::new(TokenKind::Access, "user-2", now, Duration::hours(1));
    for token in [&access, &refresh, &other] {
        registry.put(token.clone());
    }

    assert_eq!(registry.revoke_subject("user-1"), 2);

    assert!(registry.get(access.id).unwrap().revoked);
    assert!(registry.get(refresh.id).unwrap().revoked);
    assert!(!registry.get(other.id).unwrap().revoked);
    // Already revoked entries are not counted twice
    assert_eq!(registry.revoke_subject("user-1"), 0);
    assert_eq!(registry.revoke_subject("nobody"), 0);
}
