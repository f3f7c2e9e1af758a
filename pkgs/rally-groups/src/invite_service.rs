//! Invitation service: create, redeem and revoke group invitations
//!
//! All coordination goes through the store's transaction isolation; the
//! service holds no shared mutable state beyond the connection handle, so
//! independent instances over the same database behave identically.

use sea_orm::{DatabaseConnection, SqlErr, TransactionTrait};
use tracing::{debug, info, warn};

use crate::error::GroupError;
use crate::events::{DomainEvent, EventSender};
use crate::invite_store::{GroupInvite, InviteStore};
use crate::member_store::{GroupMember, MemberRole, MemberStatus, MemberStore};
use crate::token::TokenGenerator;
use crate::StoreConfig;

/// Invitation service: create, redeem and revoke group invitations
#[derive(Debug, Clone)]
pub struct InvitationService {
    db: DatabaseConnection,
    invites: InviteStore,
    tokens: TokenGenerator,
    events: EventSender,
    default_ttl_seconds: i64,
    token_insert_attempts: u32,
}

impl InvitationService {
    /// Create a new invitation service over a database handle
    pub fn new(db: DatabaseConnection, config: &StoreConfig) -> Self {
        Self {
            invites: InviteStore::new(db.clone()),
            tokens: TokenGenerator::new(config.token_length),
            events: EventSender::disabled(),
            default_ttl_seconds: config.default_invite_ttl_seconds,
            token_insert_attempts: config.token_insert_attempts,
            db,
        }
    }

    /// Attach a domain event sender (events are emitted post-commit)
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = events;
        self
    }

    /// Create a fresh invite for a group.
    ///
    /// A missing or non-positive `ttl_seconds` means the default TTL (7
    /// days), matching how callers have always used the endpoint; a zero
    /// TTL does not produce an instantly dead invite. A blank `created_by`
    /// is recorded as `system`.
    pub async fn create_invite(
        &self,
        group_id: &str,
        created_by: Option<&str>,
        ttl_seconds: Option<i64>,
    ) -> Result<GroupInvite, GroupError> {
        if group_id.trim().is_empty() {
            return Err(GroupError::Validation("group_id is required".into()));
        }

        let created_by = match created_by {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => "system".to_string(),
        };
        let ttl = ttl_seconds
            .filter(|t| *t > 0)
            .unwrap_or(self.default_ttl_seconds);

        // Each attempt is a fresh insert with a fresh token; a failed
        // insert is never resumed
        let mut attempt = 0;
        loop {
            attempt += 1;
            let now = chrono::Utc::now().timestamp_millis();
            let invite = GroupInvite {
                id: self.tokens.invite_id(),
                group_id: group_id.to_string(),
                token: self.tokens.invite_token(),
                created_by: created_by.clone(),
                created_at: now,
                expires_at: now + ttl * 1000,
                used_at: None,
            };

            match self.invites.insert(&invite).await {
                Ok(()) => {
                    info!("Invite '{}' created for group '{}'", invite.id, group_id);
                    return Ok(invite);
                }
                Err(e)
                    if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
                        && attempt < self.token_insert_attempts =>
                {
                    warn!(
                        "Invite token collision on attempt {}, retrying with a fresh token",
                        attempt
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Redeem an invite token into a membership.
    ///
    /// The `used_at` claim and the membership insert commit together or
    /// not at all; of two concurrent redeemers exactly one gets the
    /// membership, the other `AlreadyUsed`.
    pub async fn accept_invite(
        &self,
        token: &str,
        user_id: &str,
    ) -> Result<GroupMember, GroupError> {
        if token.trim().is_empty() || user_id.trim().is_empty() {
            return Err(GroupError::Validation("token and user_id are required".into()));
        }

        let invite = self
            .invites
            .find_by_token(token)
            .await?
            .ok_or(GroupError::NotFound("invite"))?;

        if invite.used_at.is_some() {
            return Err(GroupError::AlreadyUsed);
        }
        let now = chrono::Utc::now().timestamp_millis();
        if invite.expires_at < now {
            debug!("Invite '{}' expired at {}", invite.id, invite.expires_at);
            return Err(GroupError::Expired);
        }

        let txn = self.db.begin().await.map_err(GroupError::Persistence)?;

        let claimed = InviteStore::mark_used_if_unused(&txn, &invite.id, now).await?;
        if !claimed {
            // Lost the race to a concurrent redeemer
            txn.rollback().await.map_err(GroupError::Persistence)?;
            return Err(GroupError::AlreadyUsed);
        }

        let member = GroupMember {
            id: self.tokens.member_id(),
            group_id: invite.group_id.clone(),
            user_id: user_id.to_string(),
            role: MemberRole::Member,
            status: MemberStatus::Accepted,
            joined_at: now,
        };
        MemberStore::insert(&txn, &member).await?;

        txn.commit().await.map_err(GroupError::Persistence)?;
        info!(
            "Invite '{}' redeemed by '{}' into group '{}'",
            invite.id, user_id, invite.group_id
        );

        self.events.emit(DomainEvent::MemberJoined {
            group_id: member.group_id.clone(),
            member_id: member.id.clone(),
            user_id: member.user_id.clone(),
        });

        Ok(member)
    }

    /// Revoke an invite. Revoking an unknown or already-revoked id is a
    /// no-op so retries are harmless; an acceptance that commits first
    /// wins the race and leaves this a no-op on the consumed record.
    pub async fn revoke_invite(&self, invite_id: &str) -> Result<(), GroupError> {
        let deleted = self.invites.delete(invite_id).await?;
        if !deleted {
            debug!("Revoke of '{}' matched no invite", invite_id);
        }

        Ok(())
    }

    /// Read-side access to the underlying invite store
    pub fn store(&self) -> &InviteStore {
        &self.invites
    }
}
