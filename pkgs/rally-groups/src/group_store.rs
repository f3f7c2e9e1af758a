//! Group store for the group records themselves

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::entities::groups;

/// A group record with its denormalized owner pointer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRecord {
    pub id: String,
    pub name: String,
    pub owner_user_id: String,
    pub created_at: i64,
}

impl From<groups::Model> for GroupRecord {
    fn from(model: groups::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            owner_user_id: model.owner_user_id,
            created_at: model.created_at,
        }
    }
}

/// Group store for the group records themselves
#[derive(Debug, Clone)]
pub struct GroupStore {
    db: DatabaseConnection,
}

impl GroupStore {
    /// Create a new group store
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a group owned by `owner_user_id`
    pub async fn create(
        &self,
        group_id: &str,
        name: &str,
        owner_user_id: &str,
    ) -> Result<GroupRecord, DbErr> {
        debug!("Creating group: {}", group_id);

        let now = chrono::Utc::now().timestamp_millis();
        let record = GroupRecord {
            id: group_id.to_string(),
            name: name.to_string(),
            owner_user_id: owner_user_id.to_string(),
            created_at: now,
        };

        let model = groups::ActiveModel {
            id: Set(record.id.clone()),
            name: Set(record.name.clone()),
            owner_user_id: Set(record.owner_user_id.clone()),
            created_at: Set(now),
        };
        groups::Entity::insert(model).exec(&self.db).await?;

        info!("Group '{}' created", group_id);
        Ok(record)
    }

    /// Get a group by id
    pub async fn get(&self, group_id: &str) -> Result<Option<GroupRecord>, DbErr> {
        let result = groups::Entity::find_by_id(group_id).one(&self.db).await?;

        Ok(result.map(GroupRecord::from))
    }

    /// Rewrite the denormalized owner pointer of a group.
    ///
    /// Takes any connection so it can run inside the ownership transfer
    /// transaction; only `OwnershipTransferService` may call this, which is
    /// what keeps the single-owner invariant intact.
    pub async fn set_owner<C: ConnectionTrait>(
        conn: &C,
        group_id: &str,
        owner_user_id: &str,
    ) -> Result<u64, DbErr> {
        let result = groups::Entity::update_many()
            .col_expr(groups::Column::OwnerUserId, Expr::value(owner_user_id))
            .filter(groups::Column::Id.eq(group_id))
            .exec(conn)
            .await?;

        Ok(result.rows_affected)
    }
}
