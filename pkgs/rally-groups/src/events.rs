//! Domain events emitted after membership-changing commits
//!
//! Events feed an external notification relay and are fire-and-forget:
//! they are emitted only after the transaction commits, and a missing or
//! dropped receiver never affects the committed state.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::warn;

/// Notification-worthy outcome of a group lifecycle operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DomainEvent {
    #[serde(rename_all = "camelCase")]
    MemberJoined {
        group_id: String,
        member_id: String,
        user_id: String,
    },
    #[serde(rename_all = "camelCase")]
    OwnershipTransferred {
        group_id: String,
        new_owner_member_id: String,
        new_owner_user_id: String,
    },
}

/// Handle for emitting domain events, cheap to clone
#[derive(Debug, Clone, Default)]
pub struct EventSender {
    tx: Option<UnboundedSender<DomainEvent>>,
}

impl EventSender {
    /// Sender that discards every event
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    /// Sender/receiver pair backed by an unbounded channel
    pub fn channel() -> (Self, UnboundedReceiver<DomainEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// Emit an event, ignoring delivery failure
    pub fn emit(&self, event: DomainEvent) {
        if let Some(tx) = &self.tx {
            if tx.send(event).is_err() {
                warn!("Domain event receiver dropped; event discarded");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_channel_delivers_events() {
        let (sender, mut rx) = EventSender::channel();
        sender.emit(DomainEvent::MemberJoined {
            group_id: "g1".to_string(),
            member_id: "gm_1".to_string(),
            user_id: "bob".to_string(),
        });

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, DomainEvent::MemberJoined { ref user_id, .. } if user_id == "bob"));
    }

    #[tokio::test]
    async fn test_emit_survives_dropped_receiver() {
        let (sender, rx) = EventSender::channel();
        drop(rx);
        sender.emit(DomainEvent::OwnershipTransferred {
            group_id: "g1".to_string(),
            new_owner_member_id: "gm_2".to_string(),
            new_owner_user_id: "bob".to_string(),
        });
    }

    #[test]
    fn test_event_wire_shape() {
        let event = DomainEvent::MemberJoined {
            group_id: "g1".to_string(),
            member_id: "gm_1".to_string(),
            user_id: "bob".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"memberJoined\""));
        assert!(json.contains("\"groupId\":\"g1\""));
    }
}
