//! Sea-ORM entities for rally-groups

pub mod group_invites;
pub mod group_members;
pub mod groups;

pub use group_invites::Entity as GroupInvites;
pub use group_members::Entity as GroupMembers;
pub use groups::Entity as Groups;
