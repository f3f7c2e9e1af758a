//! Transport-agnostic API contracts for the group lifecycle operations
//!
//! Wire field names are camelCase, the shape the existing clients speak.
//! Error mapping keeps each taxonomy kind distinguishable by status and
//! never leaks store-internal messages to callers.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, GroupError};
use crate::invite_store::GroupInvite;
use crate::member_store::{GroupMember, MemberRole, MemberStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInviteRequest {
    pub group_id: String,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub ttl_seconds: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptInviteRequest {
    pub token: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevokeInviteRequest {
    pub invite_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOwnershipRequest {
    pub group_id: String,
    pub new_member_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteResponse {
    pub id: String,
    pub group_id: String,
    pub token: String,
    pub created_by: String,
    pub created_at: i64,
    pub expires_at: i64,
}

impl From<GroupInvite> for InviteResponse {
    fn from(invite: GroupInvite) -> Self {
        Self {
            id: invite.id,
            group_id: invite.group_id,
            token: invite.token,
            created_by: invite.created_by,
            created_at: invite.created_at,
            expires_at: invite.expires_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: String,
    pub group_id: String,
    pub user_id: String,
    pub role: MemberRole,
    pub status: MemberStatus,
    pub joined_at: i64,
}

impl From<GroupMember> for MemberResponse {
    fn from(member: GroupMember) -> Self {
        Self {
            id: member.id,
            group_id: member.group_id,
            user_id: member.user_id,
            role: member.role,
            status: member.status,
            joined_at: member.joined_at,
        }
    }
}

/// Acknowledgement body for operations with no data to return
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    pub ok: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// Caller-facing error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<&GroupError> for ErrorBody {
    fn from(err: &GroupError) -> Self {
        Self {
            error: user_message(err).to_string(),
        }
    }
}

/// Status code for an error, one per taxonomy kind
pub fn error_status(err: &GroupError) -> u16 {
    match err.kind() {
        ErrorKind::Validation => 400,
        ErrorKind::NotFound => 404,
        ErrorKind::AlreadyUsed => 409,
        ErrorKind::Expired => 410,
        ErrorKind::Persistence => 500,
    }
}

/// Caller-facing message for an error.
///
/// Terminal invite states are reported as actionable; persistence detail
/// stays server-side.
pub fn user_message(err: &GroupError) -> String {
    match err {
        GroupError::Validation(msg) => format!("invalid request: {msg}"),
        GroupError::NotFound(what) => format!("{what} not found"),
        GroupError::AlreadyUsed => {
            "this invite can no longer be used: it has already been redeemed".to_string()
        }
        GroupError::Expired => {
            "this invite can no longer be used: it has expired".to_string()
        }
        GroupError::Persistence(_) => "internal storage error".to_string(),
    }
}
