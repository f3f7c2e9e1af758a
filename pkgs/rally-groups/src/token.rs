//! Opaque id and invite token generation
//!
//! Entity ids are prefixed uuid-v4 strings. Invite tokens are URL-safe
//! alphanumeric strings drawn from the thread-local CSPRNG; uniqueness is
//! ultimately enforced by the unique key on `group_invites.token`, the
//! generator only has to make collisions negligible.

use rand::distributions::Alphanumeric;
use rand::Rng;
use uuid::Uuid;

/// Generates opaque entity ids and unguessable invite tokens
#[derive(Debug, Clone)]
pub struct TokenGenerator {
    token_length: usize,
}

impl TokenGenerator {
    pub fn new(token_length: usize) -> Self {
        Self { token_length }
    }

    /// Fresh invite id, e.g. `inv_6f9619ff-...`
    pub fn invite_id(&self) -> String {
        format!("inv_{}", Uuid::new_v4())
    }

    /// Fresh membership id, e.g. `gm_6f9619ff-...`
    pub fn member_id(&self) -> String {
        format!("gm_{}", Uuid::new_v4())
    }

    /// Fresh URL-safe invite token, e.g. `t_hTx9...` (token_length random chars)
    pub fn invite_token(&self) -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.token_length)
            .map(char::from)
            .collect();
        format!("t_{suffix}")
    }
}
