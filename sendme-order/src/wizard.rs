use crate::app_config::BusinessRules;
use crate::changes::{ChangeError, ItemCollection};
use crate::customer::{CustomerError, CustomerInfo};
use crate::delivery::{DateSelection, DeliveryConfig, DeliveryError, DeliveryIncomplete, DeliveryMethod};
use crate::item::{Item, ItemDraft, ItemId};
use crate::models::{pricing_context, Order, WizardState};
use crate::serializer::OrderSerializer;
use chrono::NaiveDate;
use sendme_catalog::{Charges, PricingCalculator, TimeSlot};
use sendme_core::events::OrderSubmittedEvent;
use sendme_core::{Clock, Masked, MessageChannel};
use std::sync::Arc;
use uuid::Uuid;

/// What the delivery guard was asked by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeliveryTrigger {
    /// Any delivery field changed
    FieldsChanged,
    /// The customer pressed "continue"
    Continue,
}

/// Result of a successful submission
#[derive(Debug, Clone)]
pub struct Submission {
    pub order_number: String,
    /// Message text before percent-encoding
    pub message: String,
    /// Deep link handed to the messaging channel
    pub url: String,
    pub order: Order,
}

impl Submission {
    pub fn charges(&self) -> &Charges {
        &self.order.charges
    }
}

/// One customer's ordering session.
///
/// Drives identity capture, delivery configuration, item collection and
/// submission. Earlier steps stay editable after the wizard moves on; only
/// a submitted session is closed for changes.
pub struct OrderWizard {
    session_id: Uuid,
    state: WizardState,
    clock: Arc<dyn Clock>,
    calculator: PricingCalculator,
    max_items: usize,
    customer: Option<CustomerInfo>,
    delivery: DeliveryConfig,
    items: ItemCollection,
    terms_accepted: bool,
}

impl OrderWizard {
    pub fn new(rules: &BusinessRules, clock: Arc<dyn Clock>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            state: WizardState::CollectingIdentity,
            clock,
            calculator: PricingCalculator::new(rules.charges.clone()),
            max_items: rules.max_items,
            customer: None,
            delivery: DeliveryConfig::new(),
            items: ItemCollection::new(rules.max_items),
            terms_accepted: false,
        }
    }

    /// Throw the session away and start a new one at identity capture
    pub fn reset(&mut self) {
        tracing::info!(session_id = %self.session_id, "Session discarded");
        self.session_id = Uuid::new_v4();
        self.state = WizardState::CollectingIdentity;
        self.customer = None;
        self.delivery = DeliveryConfig::new();
        self.items = ItemCollection::new(self.max_items);
        self.terms_accepted = false;
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn customer(&self) -> Option<&CustomerInfo> {
        self.customer.as_ref()
    }

    pub fn delivery(&self) -> &DeliveryConfig {
        &self.delivery
    }

    pub fn items(&self) -> &[Item] {
        self.items.items()
    }

    pub fn item_capacity(&self) -> (usize, usize) {
        (self.items.len(), self.items.max_items())
    }

    pub fn terms_accepted(&self) -> bool {
        self.terms_accepted
    }

    pub fn is_express_delivery(&self) -> bool {
        self.delivery.is_express_delivery()
    }

    /// Charges for the current items and delivery day
    pub fn charges_preview(&self) -> Charges {
        self.calculator.quote(&pricing_context(
            self.items.items(),
            self.delivery.is_express_delivery(),
        ))
    }

    // Identity

    pub fn capture_identity(&mut self, customer: CustomerInfo) -> Result<(), WizardError> {
        self.ensure_state(&[WizardState::CollectingIdentity], "capture identity")?;

        tracing::info!(
            session_id = %self.session_id,
            phone = %Masked(customer.phone_number()),
            existing = customer.is_existing_customer(),
            "Customer identified"
        );
        self.customer = Some(customer);
        self.transition(WizardState::ConfiguringDelivery);
        Ok(())
    }

    /// Validate raw form fields and capture them in one step
    pub fn submit_identity(
        &mut self,
        phone_number: &str,
        name: Option<&str>,
        email: Option<&str>,
        is_existing_customer: bool,
    ) -> Result<(), WizardError> {
        self.ensure_state(&[WizardState::CollectingIdentity], "capture identity")?;
        let customer = CustomerInfo::new(phone_number, name, email, is_existing_customer)?;
        self.capture_identity(customer)
    }

    // Delivery

    pub fn select_date(&mut self, date: NaiveDate) -> Result<DateSelection, WizardError> {
        self.ensure_delivery_editable()?;
        let selection = self.delivery.select_date(date, self.clock.now())?;
        self.after_delivery_change()?;
        Ok(selection)
    }

    pub fn select_time_slot(&mut self, slot: &str) -> Result<TimeSlot, WizardError> {
        self.ensure_delivery_editable()?;
        let slot = self.delivery.select_time_slot(slot, self.clock.now())?;
        self.after_delivery_change()?;
        Ok(slot)
    }

    pub fn select_delivery_method(&mut self, method: DeliveryMethod) -> Result<(), WizardError> {
        self.ensure_delivery_editable()?;
        self.delivery.select_delivery_method(method);
        self.after_delivery_change()
    }

    pub fn select_municipality(&mut self, value: &str) -> Result<(), WizardError> {
        self.ensure_delivery_editable()?;
        self.delivery.select_municipality(value)?;
        self.after_delivery_change()
    }

    pub fn select_other_municipality(&mut self, free_text: &str) -> Result<(), WizardError> {
        self.ensure_delivery_editable()?;
        self.delivery.select_other_municipality(free_text);
        self.after_delivery_change()
    }

    pub fn append_area_details(&mut self, free_text: &str) -> Result<(), WizardError> {
        self.ensure_delivery_editable()?;
        self.delivery.append_area_details(free_text);
        self.after_delivery_change()
    }

    pub fn select_purchase_location(&mut self, value: &str) -> Result<(), WizardError> {
        self.ensure_delivery_editable()?;
        self.delivery.select_purchase_location(value)?;
        self.after_delivery_change()
    }

    pub fn select_custom_purchase_location(&mut self, free_text: &str) -> Result<(), WizardError> {
        self.ensure_delivery_editable()?;
        self.delivery.select_custom_purchase_location(free_text);
        self.after_delivery_change()
    }

    /// The "continue" button: same guard as the automatic advance, but a
    /// missing field is reported instead of ignored
    pub fn continue_to_items(&mut self) -> Result<(), WizardError> {
        self.ensure_delivery_editable()?;
        self.advance_from_delivery(DeliveryTrigger::Continue)
    }

    fn after_delivery_change(&mut self) -> Result<(), WizardError> {
        self.advance_from_delivery(DeliveryTrigger::FieldsChanged)
    }

    /// Guard for `ConfiguringDelivery -> CollectingItems`
    fn advance_from_delivery(&mut self, trigger: DeliveryTrigger) -> Result<(), WizardError> {
        if self.state != WizardState::ConfiguringDelivery {
            return Ok(());
        }

        match self.delivery.missing_field() {
            None => {
                self.transition(WizardState::CollectingItems);
                Ok(())
            }
            Some(missing) if trigger == DeliveryTrigger::Continue => {
                tracing::debug!(session_id = %self.session_id, %missing, "Delivery step incomplete");
                Err(missing.into())
            }
            Some(_) => Ok(()),
        }
    }

    // Items

    /// Add an item. The first item also opens the review step.
    pub fn add_item(&mut self, draft: &ItemDraft) -> Result<ItemId, WizardError> {
        self.ensure_items_editable("add item")?;
        let millis = u64::try_from(self.clock.now().and_utc().timestamp_millis()).unwrap_or_default();
        let id = self.items.add(draft, millis)?;

        if self.state == WizardState::CollectingItems {
            self.transition(WizardState::ReadyToSubmit);
        }
        Ok(id)
    }

    pub fn edit_item(&mut self, item_id: ItemId, draft: &ItemDraft) -> Result<(), WizardError> {
        self.ensure_items_editable("edit item")?;
        self.items.edit(item_id, draft)?;
        Ok(())
    }

    pub fn remove_item(&mut self, item_id: ItemId) -> Result<Item, WizardError> {
        self.ensure_items_editable("remove item")?;
        Ok(self.items.remove(item_id)?)
    }

    /// `CollectingItems -> ReadyToSubmit`, ungated
    pub fn review(&mut self) -> Result<(), WizardError> {
        self.ensure_items_editable("review order")?;
        if self.state == WizardState::CollectingItems {
            self.transition(WizardState::ReadyToSubmit);
        }
        Ok(())
    }

    // Submission

    pub fn set_terms_accepted(&mut self, accepted: bool) {
        self.terms_accepted = accepted;
    }

    /// Check every submission gate, build the message and hand its deep
    /// link to `channel`. On any failure the wizard stays in
    /// `ReadyToSubmit` and nothing is sent.
    pub fn submit(&mut self, channel: &dyn MessageChannel) -> Result<Submission, WizardError> {
        self.review()?;

        if let Err(err) = self.check_submission() {
            tracing::warn!(session_id = %self.session_id, reason = %err, "Submission rejected");
            return Err(err.into());
        }

        let customer = self.customer.clone().ok_or(WizardError::InvalidTransition {
            from: self.state,
            to: WizardState::Submitted,
        })?;
        let delivery = self.delivery.summary().map_err(SubmissionError::from)?;
        let order = Order::new(customer, delivery, self.items.items(), &self.calculator);

        let now = self.clock.now();
        let order_number = OrderSerializer::generate_order_number(now);
        let message = OrderSerializer::format_order(&order, &order_number, now);
        let url = channel.link_for(&message);
        channel.dispatch(&url);

        self.transition(WizardState::Submitted);
        OrderSubmittedEvent {
            session_id: self.session_id,
            order_number: order_number.clone(),
            item_count: order.items.len(),
            total_charge: order.charges.total,
            express_delivery: order.delivery.is_express,
            timestamp: now.and_utc().timestamp(),
        }
        .emit();

        Ok(Submission {
            order_number,
            message,
            url,
            order,
        })
    }

    /// Submission gates in reporting order
    fn check_submission(&self) -> Result<(), SubmissionError> {
        if !self.terms_accepted {
            return Err(SubmissionError::TermsNotAccepted);
        }
        if self.items.is_empty() {
            return Err(SubmissionError::NoItems);
        }
        if let Some(missing) = self.delivery.missing_field() {
            return Err(missing.into());
        }
        Ok(())
    }

    fn transition(&mut self, to: WizardState) {
        tracing::info!(session_id = %self.session_id, from = ?self.state, to = ?to, "Wizard transition");
        self.state = to;
    }

    fn ensure_state(&self, allowed: &[WizardState], action: &'static str) -> Result<(), WizardError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(WizardError::StepNotAvailable { state: self.state, action })
        }
    }

    fn ensure_delivery_editable(&self) -> Result<(), WizardError> {
        self.ensure_state(
            &[
                WizardState::ConfiguringDelivery,
                WizardState::CollectingItems,
                WizardState::ReadyToSubmit,
            ],
            "change delivery options",
        )
    }

    fn ensure_items_editable(&self, action: &'static str) -> Result<(), WizardError> {
        self.ensure_state(&[WizardState::CollectingItems, WizardState::ReadyToSubmit], action)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Please accept the Terms & Conditions before submitting your order.")]
    TermsNotAccepted,

    #[error("Please add at least one item to your order.")]
    NoItems,

    #[error(transparent)]
    Delivery(#[from] DeliveryIncomplete),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("Invalid state transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: WizardState,
        to: WizardState,
    },

    #[error("Cannot {action} while {state:?}")]
    StepNotAvailable {
        state: WizardState,
        action: &'static str,
    },

    #[error(transparent)]
    Customer(#[from] CustomerError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error(transparent)]
    DeliveryIncomplete(#[from] DeliveryIncomplete),

    #[error(transparent)]
    Items(#[from] ChangeError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}
