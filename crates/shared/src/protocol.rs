use serde::{Deserialize, Serialize};

use crate::domain::{OrderId, Theme};

/// Notifications published after a state change has been persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum StorefrontEvent {
    CartChanged {
        total_qty: u32,
        total_price: f64,
    },
    SessionChanged {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_name: Option<String>,
    },
    ThemeChanged {
        theme: Theme,
    },
    OrderPlaced {
        order_id: OrderId,
    },
}
