//! Rally Groups - invitation and membership lifecycle storage
//!
//! This crate manages time-limited group invitations, their redemption
//! into memberships, and ownership transfer between members, backed by a
//! transactional SQL store through Sea-ORM.
//!
//! # Architecture
//!
//! The layer is organized into stores (row-level persistence) and
//! services (multi-row orchestration):
//!
//! - **GroupStore**: group records and their denormalized owner pointer
//! - **InviteStore**: invite rows, token lookup, the conditional
//!   `used_at` claim, and expiry housekeeping
//! - **MemberStore**: membership rows, ordered listing, role transitions
//! - **InvitationService**: create / accept / revoke invitations; accept
//!   claims the token and inserts the membership in one transaction
//! - **OwnershipTransferService**: demote-promote-republish in one
//!   transaction, keeping exactly one owner per group
//!
//! Both services emit [`DomainEvent`]s after commit for the external
//! notification relay; delivery is fire-and-forget.
//!
//! # Database Schema
//!
//! Sea-ORM with SQLite, three tables:
//!
//! - `groups`: id, name, owner_user_id, created_at
//! - `group_members`: id, group_id, user_id, role, status, joined_at
//! - `group_invites`: id, group_id, token (unique), created_by,
//!   created_at, expires_at, used_at
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use rally_groups::{InvitationService, MemberStore, StoreConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StoreConfig::default();
//! let db = rally_groups::open_database(&config).await?;
//!
//! let invites = InvitationService::new(db.clone(), &config);
//! let invite = invites.create_invite("g1", Some("alice"), Some(3600)).await?;
//! let member = invites.accept_invite(&invite.token, "bob").await?;
//!
//! let members = MemberStore::new(db).list_by_group(&member.group_id).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod entities;
pub mod migration;

mod error;
mod events;
mod group_store;
mod invite_service;
mod invite_store;
mod member_store;
mod token;
mod transfer_service;

pub use error::{ErrorKind, GroupError};
pub use events::{DomainEvent, EventSender};
pub use group_store::{GroupRecord, GroupStore};
pub use invite_service::InvitationService;
pub use invite_store::{GroupInvite, InviteStore};
pub use member_store::{GroupMember, MemberRole, MemberStatus, MemberStore};
pub use token::TokenGenerator;
pub use transfer_service::OwnershipTransferService;

use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

/// Configuration for the group lifecycle store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file
    pub db_path: std::path::PathBuf,

    /// TTL applied when an invite is created without a positive
    /// ttl_seconds (default: 7 days)
    pub default_invite_ttl_seconds: i64,

    /// Insert attempts before a token collision surfaces as an error
    /// (default: 3)
    pub token_insert_attempts: u32,

    /// Random characters in a generated invite token (default: 32)
    pub token_length: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::path::PathBuf::from("rally-groups.db"),
            default_invite_ttl_seconds: 7 * 24 * 3600, // 7 days
            token_insert_attempts: 3,
            token_length: 32,
        }
    }
}

/// Open the configured database and bring the schema up to date
pub async fn open_database(config: &StoreConfig) -> Result<DatabaseConnection, DbErr> {
    let db_url = format!(
        "sqlite://{}?mode=rwc",
        config.db_path.display().to_string().replace('\\', "/")
    );
    tracing::info!("Connecting to database at: {}", db_url);

    let db = Database::connect(&db_url).await?;
    migration::Migrator::up(&db, None).await?;

    Ok(db)
}
