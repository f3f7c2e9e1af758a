//! Ownership transfer service: the atomic multi-row role transition
//!
//! Demote current owner(s), promote the target, republish the group's
//! owner pointer — all in one transaction, so no partial demotion or
//! promotion is ever observable. Re-running with the same arguments is
//! idempotent: the final state depends only on the target member.

use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{debug, info};

use crate::error::GroupError;
use crate::events::{DomainEvent, EventSender};
use crate::group_store::GroupStore;
use crate::member_store::MemberStore;

/// Ownership transfer service for the atomic owner role transition
#[derive(Debug, Clone)]
pub struct OwnershipTransferService {
    db: DatabaseConnection,
    events: EventSender,
}

impl OwnershipTransferService {
    /// Create a new transfer service over a database handle
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            events: EventSender::disabled(),
        }
    }

    /// Attach a domain event sender (events are emitted post-commit)
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = events;
        self
    }

    /// Make `new_member_id` the sole owner of `group_id`.
    ///
    /// The target is resolved inside the transaction before any write, so
    /// an unknown member or one belonging to another group fails with
    /// `NotFound` and the group is never left ownerless. A group with no
    /// current owner is tolerated: single ownership is restored as a
    /// postcondition, not required as a precondition.
    pub async fn transfer_ownership(
        &self,
        group_id: &str,
        new_member_id: &str,
    ) -> Result<(), GroupError> {
        if group_id.trim().is_empty() {
            return Err(GroupError::Validation("group_id is required".into()));
        }
        if new_member_id.trim().is_empty() {
            return Err(GroupError::Validation("new_member_id is required".into()));
        }

        let txn = self.db.begin().await.map_err(GroupError::Persistence)?;

        let target = match MemberStore::find_in_group(&txn, group_id, new_member_id).await? {
            Some(member) => member,
            None => {
                txn.rollback().await.map_err(GroupError::Persistence)?;
                return Err(GroupError::NotFound("member"));
            }
        };

        let demoted = MemberStore::demote_owners(&txn, group_id).await?;
        if demoted == 0 {
            debug!("Group '{}' had no owner to demote", group_id);
        }
        MemberStore::promote(&txn, new_member_id).await?;
        GroupStore::set_owner(&txn, group_id, &target.user_id).await?;

        txn.commit().await.map_err(GroupError::Persistence)?;
        info!(
            "Ownership of group '{}' transferred to member '{}' (user '{}')",
            group_id, new_member_id, target.user_id
        );

        self.events.emit(DomainEvent::OwnershipTransferred {
            group_id: group_id.to_string(),
            new_owner_member_id: new_member_id.to_string(),
            new_owner_user_id: target.user_id,
        });

        Ok(())
    }
}
