//! Invite store for single-use, time-bounded group invitations

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::entities::group_invites;

/// A single-use invitation to join a group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupInvite {
    pub id: String,
    pub group_id: String,
    pub token: String,
    pub created_by: String,
    pub created_at: i64,
    pub expires_at: i64,
    /// Null until redeemed; set exactly once, never cleared
    pub used_at: Option<i64>,
}

impl From<group_invites::Model> for GroupInvite {
    fn from(model: group_invites::Model) -> Self {
        Self {
            id: model.id,
            group_id: model.group_id,
            token: model.token,
            created_by: model.created_by,
            created_at: model.created_at,
            expires_at: model.expires_at,
            used_at: model.used_at,
        }
    }
}

/// Invite store for single-use group invitations
#[derive(Debug, Clone)]
pub struct InviteStore {
    db: DatabaseConnection,
}

impl InviteStore {
    /// Create a new invite store
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert an invite row.
    ///
    /// A token collision surfaces as a unique-constraint `DbErr`; the
    /// invitation service retries with a fresh token in a fresh insert.
    pub async fn insert(&self, invite: &GroupInvite) -> Result<(), DbErr> {
        let model = group_invites::ActiveModel {
            id: Set(invite.id.clone()),
            group_id: Set(invite.group_id.clone()),
            token: Set(invite.token.clone()),
            created_by: Set(invite.created_by.clone()),
            created_at: Set(invite.created_at),
            expires_at: Set(invite.expires_at),
            used_at: Set(invite.used_at),
        };
        group_invites::Entity::insert(model).exec(&self.db).await?;

        Ok(())
    }

    /// Look up an invite by its token
    pub async fn find_by_token(&self, token: &str) -> Result<Option<GroupInvite>, DbErr> {
        debug!("Looking up invite by token");

        let result = group_invites::Entity::find()
            .filter(group_invites::Column::Token.eq(token))
            .one(&self.db)
            .await?;

        Ok(result.map(GroupInvite::from))
    }

    /// Get an invite by id
    pub async fn get(&self, invite_id: &str) -> Result<Option<GroupInvite>, DbErr> {
        let result = group_invites::Entity::find_by_id(invite_id)
            .one(&self.db)
            .await?;

        Ok(result.map(GroupInvite::from))
    }

    /// List invites for a group, most recent first
    pub async fn list_by_group(&self, group_id: &str) -> Result<Vec<GroupInvite>, DbErr> {
        let invites = group_invites::Entity::find()
            .filter(group_invites::Column::GroupId.eq(group_id))
            .order_by_desc(group_invites::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(invites.into_iter().map(GroupInvite::from).collect())
    }

    /// Delete an invite row. Deleting an absent id is not an error.
    pub async fn delete(&self, invite_id: &str) -> Result<bool, DbErr> {
        debug!("Deleting invite: {}", invite_id);

        let result = group_invites::Entity::delete_many()
            .filter(group_invites::Column::Id.eq(invite_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            info!("Invite '{}' deleted", invite_id);
        }

        Ok(result.rows_affected > 0)
    }

    /// Delete unredeemed invites whose expiry lies strictly before
    /// `now_millis`. Redeemed invites are kept as a historical record.
    ///
    /// Housekeeping only; redemption never depends on this running.
    pub async fn delete_expired(&self, now_millis: i64) -> Result<u64, DbErr> {
        let result = group_invites::Entity::delete_many()
            .filter(group_invites::Column::ExpiresAt.lt(now_millis))
            .filter(group_invites::Column::UsedAt.is_null())
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            info!("Pruned {} expired invites", result.rows_affected);
        }

        Ok(result.rows_affected)
    }

    /// Claim an invite: set `used_at` only if it is still null.
    ///
    /// Returns whether this caller won the claim. Concurrent redeemers of
    /// the same token are serialized by the store; exactly one sees `true`.
    /// Takes any connection so the claim can share a transaction with the
    /// membership insert.
    pub async fn mark_used_if_unused<C: ConnectionTrait>(
        conn: &C,
        invite_id: &str,
        used_at_millis: i64,
    ) -> Result<bool, DbErr> {
        let result = group_invites::Entity::update_many()
            .col_expr(group_invites::Column::UsedAt, Expr::value(used_at_millis))
            .filter(group_invites::Column::Id.eq(invite_id))
            .filter(group_invites::Column::UsedAt.is_null())
            .exec(conn)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_invite_from_model() {
        let model = group_invites::Model {
            id: "inv_1".to_string(),
            group_id: "g1".to_string(),
            token: "t_abc".to_string(),
            created_by: "alice".to_string(),
            created_at: 100,
            expires_at: 200,
            used_at: None,
        };

        let invite = GroupInvite::from(model);
        assert_eq!(invite.id, "inv_1");
        assert_eq!(invite.token, "t_abc");
        assert!(invite.used_at.is_none());
    }
}
