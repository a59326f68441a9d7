use crate::customer::CustomerInfo;
use crate::delivery::DeliveryMethod;
use crate::item::Item;
use chrono::NaiveDate;
use sendme_catalog::{Charges, PricingCalculator, PricingContext, TimeSlot};
use serde::Serialize;

/// Steps of the ordering wizard
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WizardState {
    CollectingIdentity,
    ConfiguringDelivery,
    CollectingItems,
    ReadyToSubmit,
    Submitted,
}

/// Delivery choices frozen at submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliverySummary {
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub purchase_location: String,
    pub method: DeliveryMethod,
    /// Only present for home delivery
    pub municipality: Option<String>,
    pub is_express: bool,
}

/// Everything the outbound message is rendered from. Built once at
/// submission and dropped afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub customer: CustomerInfo,
    pub delivery: DeliverySummary,
    pub items: Vec<Item>,
    pub charges: Charges,
}

impl Order {
    pub fn new(
        customer: CustomerInfo,
        delivery: DeliverySummary,
        items: &[Item],
        calculator: &PricingCalculator,
    ) -> Self {
        let items: Vec<Item> = items.iter().map(Item::finalized).collect();
        let charges = calculator.quote(&pricing_context(&items, delivery.is_express));

        Self {
            customer,
            delivery,
            items,
            charges,
        }
    }
}

/// Facts about an item list and delivery day that drive the charges
pub fn pricing_context(items: &[Item], is_express: bool) -> PricingContext {
    PricingContext {
        is_express,
        has_call_if_exceeded: items.iter().any(Item::has_call_if_exceeded),
        packaging_selections: items.iter().map(|item| item.packaging().len()).sum(),
    }
}
