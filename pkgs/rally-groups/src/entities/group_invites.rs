//! Group invites entity: single-use, time-bounded join capabilities
//!
//! `used_at` is null until the invite is redeemed; it is set exactly once
//! (conditional update, see `InviteStore::mark_used_if_unused`) and never
//! cleared. Expiry carries no state flag and is checked at redemption time.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "group_invites")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub group_id: String,
    #[sea_orm(unique)]
    pub token: String,
    pub created_by: String,
    pub created_at: i64,
    pub expires_at: i64,
    pub used_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
