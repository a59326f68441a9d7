use rust_decimal::Decimal;
use uuid::Uuid;

/// Emitted once per successful submission, after the deep link has been
/// handed to the messaging channel.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct OrderSubmittedEvent {
    pub session_id: Uuid,
    pub order_number: String,
    pub item_count: usize,
    pub total_charge: Decimal,
    pub express_delivery: bool,
    pub timestamp: i64,
}

impl OrderSubmittedEvent {
    /// Log the event as one structured line
    pub fn emit(&self) {
        match serde_json::to_string(self) {
            Ok(payload) => tracing::info!(
                order_number = %self.order_number,
                event = %payload,
                "Order submitted"
            ),
            Err(err) => tracing::warn!("Failed to serialize order submitted event: {}", err),
        }
    }
}
