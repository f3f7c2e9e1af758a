//! Member store for group membership rows (role, status, join time)

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entities::group_members;

/// A member's role within a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Owner,
    Admin,
    Member,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Owner => "owner",
            MemberRole::Admin => "admin",
            MemberRole::Member => "member",
        }
    }

    /// Unknown stored values decode to the least-privileged role
    fn from_column(value: &str) -> Self {
        match value {
            "owner" => MemberRole::Owner,
            "admin" => MemberRole::Admin,
            _ => MemberRole::Member,
        }
    }
}

/// A member's standing within a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Accepted,
    Pending,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Accepted => "accepted",
            MemberStatus::Pending => "pending",
        }
    }

    fn from_column(value: &str) -> Self {
        match value {
            "accepted" => MemberStatus::Accepted,
            _ => MemberStatus::Pending,
        }
    }
}

/// A user's membership in a group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMember {
    pub id: String,
    pub group_id: String,
    pub user_id: String,
    pub role: MemberRole,
    pub status: MemberStatus,
    pub joined_at: i64,
}

impl From<group_members::Model> for GroupMember {
    fn from(model: group_members::Model) -> Self {
        Self {
            id: model.id,
            group_id: model.group_id,
            user_id: model.user_id,
            role: MemberRole::from_column(&model.role),
            status: MemberStatus::from_column(&model.status),
            joined_at: model.joined_at,
        }
    }
}

/// Member store for group membership rows
#[derive(Debug, Clone)]
pub struct MemberStore {
    db: DatabaseConnection,
}

impl MemberStore {
    /// Create a new member store
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// List members of a group, most recent join first
    pub async fn list_by_group(&self, group_id: &str) -> Result<Vec<GroupMember>, DbErr> {
        debug!("Listing members of group: {}", group_id);

        let members = group_members::Entity::find()
            .filter(group_members::Column::GroupId.eq(group_id))
            .order_by_desc(group_members::Column::JoinedAt)
            .all(&self.db)
            .await?;

        Ok(members.into_iter().map(GroupMember::from).collect())
    }

    /// Get count of members in a group
    pub async fn count_by_group(&self, group_id: &str) -> Result<u64, DbErr> {
        let count = group_members::Entity::find()
            .filter(group_members::Column::GroupId.eq(group_id))
            .count(&self.db)
            .await?;

        Ok(count)
    }

    /// Insert a membership row.
    ///
    /// Takes any connection so invite acceptance can write the row inside
    /// the same transaction that claims the invite.
    pub async fn insert<C: ConnectionTrait>(
        conn: &C,
        member: &GroupMember,
    ) -> Result<(), DbErr> {
        let model = group_members::ActiveModel {
            id: Set(member.id.clone()),
            group_id: Set(member.group_id.clone()),
            user_id: Set(member.user_id.clone()),
            role: Set(member.role.as_str().to_string()),
            status: Set(member.status.as_str().to_string()),
            joined_at: Set(member.joined_at),
        };
        group_members::Entity::insert(model).exec(conn).await?;

        Ok(())
    }

    /// Find a member row by id within a specific group
    pub async fn find_in_group<C: ConnectionTrait>(
        conn: &C,
        group_id: &str,
        member_id: &str,
    ) -> Result<Option<GroupMember>, DbErr> {
        let result = group_members::Entity::find()
            .filter(group_members::Column::Id.eq(member_id))
            .filter(group_members::Column::GroupId.eq(group_id))
            .one(conn)
            .await?;

        Ok(result.map(GroupMember::from))
    }

    /// Demote every current owner of a group to admin.
    ///
    /// Zero affected rows is not an error: an ownerless group is a
    /// data-integrity anomaly the transfer transaction repairs rather than
    /// rejects.
    pub async fn demote_owners<C: ConnectionTrait>(
        conn: &C,
        group_id: &str,
    ) -> Result<u64, DbErr> {
        let result = group_members::Entity::update_many()
            .col_expr(
                group_members::Column::Role,
                Expr::value(MemberRole::Admin.as_str()),
            )
            .filter(group_members::Column::GroupId.eq(group_id))
            .filter(group_members::Column::Role.eq(MemberRole::Owner.as_str()))
            .exec(conn)
            .await?;

        Ok(result.rows_affected)
    }

    /// Promote a member row to owner
    pub async fn promote<C: ConnectionTrait>(conn: &C, member_id: &str) -> Result<u64, DbErr> {
        let result = group_members::Entity::update_many()
            .col_expr(
                group_members::Column::Role,
                Expr::value(MemberRole::Owner.as_str()),
            )
            .filter(group_members::Column::Id.eq(member_id))
            .exec(conn)
            .await?;

        Ok(result.rows_affected)
    }
}
