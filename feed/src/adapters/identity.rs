//! Session identity adapter
//!
//! Holds the signed-in actor in memory. The presentation layer calls
//! `sign_in`/`sign_out`; the aggregator picks the change up on `sync_identity`.

use std::sync::RwLock;

use crate::domain::entities::UserId;
use crate::domain::ports::IdentityProvider;

/// In-memory identity provider
#[derive(Debug, Default)]
pub struct SessionIdentity {
    actor: RwLock<Option<UserId>>,
}

impl SessionIdentity {
    /// Anonymous session
    pub fn new() -> Self {
        Self::default()
    }

    /// Session already signed in as `user_id`
    pub fn signed_in(user_id: UserId) -> Self {
        Self {
            actor: RwLock::new(Some(user_id)),
        }
    }

    pub fn sign_in(&self, user_id: UserId) {
        tracing::info!(user_id = %user_id, "Signed in");
        *self.actor.write().unwrap_or_else(|e| e.into_inner()) = Some(user_id);
    }

    pub fn sign_out(&self) {
        tracing::info!("Signed out");
        *self.actor.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl IdentityProvider for SessionIdentity {
    fn current_actor(&self) -> Option<UserId> {
        self.actor
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
