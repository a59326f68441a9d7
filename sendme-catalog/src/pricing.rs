use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order facts the charge schedule depends on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingContext {
    /// Delivery date falls on an express day
    pub is_express: bool,

    /// At least one item asks to be called or texted when over budget
    pub has_call_if_exceeded: bool,

    /// Packaging options selected, summed over all items
    pub packaging_selections: usize,
}

/// Service charges, in K. Loaded from `business_rules.charges`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeSchedule {
    /// Flat fee for every order
    #[serde(default = "default_shopping")]
    pub shopping: Decimal,

    #[serde(default = "default_express")]
    pub express: Decimal,

    /// Flat, however many items ask for a call/text
    #[serde(default = "default_call_text")]
    pub call_text: Decimal,

    #[serde(default = "default_packaging_per_option")]
    pub packaging_per_option: Decimal,
}

fn default_shopping() -> Decimal { Decimal::from(25) }
fn default_express() -> Decimal { Decimal::from(50) }
fn default_call_text() -> Decimal { Decimal::from(2) }
fn default_packaging_per_option() -> Decimal { Decimal::from(5) }

impl Default for ChargeSchedule {
    fn default() -> Self {
        Self {
            shopping: default_shopping(),
            express: default_express(),
            call_text: default_call_text(),
            packaging_per_option: default_packaging_per_option(),
        }
    }
}

/// Breakdown rendered in the order message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charges {
    pub shopping: Decimal,
    pub express: Decimal,
    pub call_text: Decimal,
    pub packaging: Decimal,
    pub total: Decimal,
}

pub struct PricingCalculator {
    schedule: ChargeSchedule,
}

impl PricingCalculator {
    pub fn new(schedule: ChargeSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &ChargeSchedule {
        &self.schedule
    }

    pub fn quote(&self, context: &PricingContext) -> Charges {
        let shopping = self.schedule.shopping;
        let express = if context.is_express {
            self.schedule.express
        } else {
            Decimal::ZERO
        };
        let call_text = if context.has_call_if_exceeded {
            self.schedule.call_text
        } else {
            Decimal::ZERO
        };
        let packaging = self.schedule.packaging_per_option * Decimal::from(context.packaging_selections);

        Charges {
            shopping,
            express,
            call_text,
            packaging,
            total: shopping + express + call_text + packaging,
        }
    }
}

impl Default for PricingCalculator {
    fn default() -> Self {
        Self::new(ChargeSchedule::default())
    }
}
