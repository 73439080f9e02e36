//! Per-class QR broadcast lifecycle.
//!
//! The registry owns every active broadcast: starting one mints the first
//! token and spawns its rotation task, stopping one aborts the task and
//! drops all outstanding tokens on the floor. Scan validation reads the
//! same map, so "is this token live" is a lock-and-look, never a database
//! trip.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::error::BroadcastError;
use crate::token::TokenCodec;
use crate::types::{IssuedToken, QrSettings};

/// One active broadcast. Tokens are ordered oldest to newest; the newest is
/// the one currently on screen, older entries are still inside their grace
/// window until the TTL trim catches them.
struct Broadcast {
    created_at: DateTime<Utc>,
    tokens: VecDeque<IssuedToken>,
    rotation: JoinHandle<()>,
}

/// Keyed registry of active QR broadcasts, one slot per class.
///
/// Cloning is cheap and shares the underlying map, so the HTTP layer, the
/// scan processor and the rotation tasks all observe the same state.
#[derive(Clone)]
pub struct BroadcastRegistry {
    inner: Arc<RwLock<HashMap<i64, Broadcast>>>,
    codec: TokenCodec,
    settings: QrSettings,
}

impl BroadcastRegistry {
    pub fn new(codec: TokenCodec, settings: QrSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            codec,
            settings,
        }
    }

    /// The codec this registry mints with, shared with scan validation.
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn settings(&self) -> &QrSettings {
        &self.settings
    }

    /// Starts broadcasting for a class and returns the initial token.
    ///
    /// Fails with [`BroadcastError::AlreadyBroadcasting`] while a broadcast
    /// for the same class is live. The rotation task it spawns is bound to
    /// this broadcast and aborted on stop.
    pub async fn start_broadcast(&self, class_id: i64) -> Result<IssuedToken, BroadcastError> {
        let mut sessions = self.inner.write().await;
        if sessions.contains_key(&class_id) {
            return Err(BroadcastError::AlreadyBroadcasting);
        }

        let now = Utc::now();
        let issued = self.mint(class_id, now);

        let registry = self.clone();
        let rotation = tokio::spawn(async move { registry.rotation_loop(class_id).await });

        sessions.insert(
            class_id,
            Broadcast {
                created_at: now,
                tokens: VecDeque::from([issued.clone()]),
                rotation,
            },
        );
        tracing::info!(class_id, "started QR broadcast");
        Ok(issued)
    }

    /// Stops a broadcast, aborting its rotation task.
    ///
    /// Every token the broadcast issued becomes invalid immediately, grace
    /// window or not.
    pub async fn stop_broadcast(&self, class_id: i64) -> Result<(), BroadcastError> {
        let mut sessions = self.inner.write().await;
        let broadcast = sessions
            .remove(&class_id)
            .ok_or(BroadcastError::NotBroadcasting)?;
        broadcast.rotation.abort();
        tracing::info!(class_id, "stopped QR broadcast");
        Ok(())
    }

    /// The token currently on screen for a class.
    pub async fn current_token(&self, class_id: i64) -> Result<IssuedToken, BroadcastError> {
        let sessions = self.inner.read().await;
        let broadcast = sessions
            .get(&class_id)
            .ok_or(BroadcastError::NotBroadcasting)?;
        // A broadcast always holds at least the token it was created with.
        broadcast
            .tokens
            .back()
            .cloned()
            .ok_or(BroadcastError::NotBroadcasting)
    }

    /// Mints the next token for a class and trims aged-out history.
    ///
    /// Returns `None` when the class is not broadcasting, which tells the
    /// rotation task to wind down.
    pub async fn rotate(&self, class_id: i64, now: DateTime<Utc>) -> Option<IssuedToken> {
        let mut sessions = self.inner.write().await;
        let broadcast = sessions.get_mut(&class_id)?;

        let issued = self.mint(class_id, now);
        broadcast.tokens.push_back(issued.clone());

        let ttl = Duration::seconds(self.settings.token_ttl_seconds);
        while let Some(front) = broadcast.tokens.front() {
            if now.signed_duration_since(front.issued_at) > ttl {
                broadcast.tokens.pop_front();
            } else {
                break;
            }
        }

        tracing::debug!(class_id, live = broadcast.tokens.len(), "rotated QR token");
        Some(issued)
    }

    /// Whether `token` is one this class's live broadcast issued and its age
    /// is still within the TTL at `now`.
    pub async fn is_token_valid(&self, class_id: i64, token: &str, now: DateTime<Utc>) -> bool {
        let sessions = self.inner.read().await;
        let Some(broadcast) = sessions.get(&class_id) else {
            return false;
        };
        let ttl = Duration::seconds(self.settings.token_ttl_seconds);
        broadcast
            .tokens
            .iter()
            .any(|t| t.token == token && now.signed_duration_since(t.issued_at) <= ttl)
    }

    fn mint(&self, class_id: i64, now: DateTime<Utc>) -> IssuedToken {
        IssuedToken {
            token: self.codec.mint(class_id, now),
            issued_at: now,
        }
    }

    async fn rotation_loop(self, class_id: i64) {
        let interval = std::time::Duration::from_secs(self.settings.rotation_seconds.max(1));
        loop {
            tokio::time::sleep(interval).await;
            let now = Utc::now();

            if self.broadcast_age_exceeded(class_id, now).await {
                tracing::info!(class_id, "QR broadcast reached its maximum age, stopping");
                let _ = self.stop_broadcast(class_id).await;
                break;
            }

            if self.rotate(class_id, now).await.is_none() {
                break;
            }
        }
    }

    async fn broadcast_age_exceeded(&self, class_id: i64, now: DateTime<Utc>) -> bool {
        let sessions = self.inner.read().await;
        sessions.get(&class_id).is_some_and(|b| {
            now.signed_duration_since(b.created_at)
                >= Duration::seconds(self.settings.broadcast_max_seconds)
        })
    }

    #[cfg(test)]
    async fn history_len(&self, class_id: i64) -> usize {
        let sessions = self.inner.read().await;
        sessions.get(&class_id).map_or(0, |b| b.tokens.len())
    }
}
