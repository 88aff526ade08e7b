//! Change notification payloads
//!
//! What a push subscription delivers to staff clients. Notifications
//! carry no record data beyond the topic: the backend offers no delta
//! protocol, so the feed always re-fetches full state on any hint.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which table of backend records changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeTopic {
    Orders,
    QuickRequests,
    Tables,
}

impl fmt::Display for ChangeTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Orders => write!(f, "orders"),
            Self::QuickRequests => write!(f, "quick_requests"),
            Self::Tables => write!(f, "tables"),
        }
    }
}

/// Change notification (backend → staff client)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeNotification {
    pub topic: ChangeTopic,
    /// Entity that changed, when the transport knows it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
}

impl ChangeNotification {
    pub fn new(topic: ChangeTopic) -> Self {
        Self {
            topic,
            entity_id: None,
        }
    }

    pub fn for_entity(topic: ChangeTopic, entity_id: impl Into<String>) -> Self {
        Self {
            topic,
            entity_id: Some(entity_id.into()),
        }
    }
}
