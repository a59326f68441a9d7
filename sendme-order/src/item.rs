use rust_decimal::Decimal;
use sendme_catalog::{ItemCategory, PackagingOption};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Creation-timestamp derived, unique within one order
pub type ItemId = u64;

/// Stands in for a blank description in the submitted order
pub const DEFAULT_DESCRIPTION: &str = "No description provided";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    #[default]
    Call,
    Text,
}

impl fmt::Display for ContactMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactMethod::Call => f.write_str("call"),
            ContactMethod::Text => f.write_str("text"),
        }
    }
}

/// Budget the shopper should stay within, in K
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

/// Who to reach, and how, when the item costs more than expected
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallIfExceeded {
    pub contact_method: ContactMethod,
    pub contact_number: String,
}

/// How strictly the shopper must match the requested item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Substitution {
    #[default]
    Unspecified,
    /// Exact item only
    Exclusive,
    /// Listed alternatives are acceptable, in order of preference
    Flexible { alternatives: Vec<String> },
}

/// The four checkboxes of the purchase preference form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceFlag {
    Exclusive,
    Flexible,
    PriceRange,
    CallIfExceeded,
}

/// Per-item shopping instructions. Exclusive and flexible are alternatives of
/// one `Substitution`; price range and call-if-exceeded combine freely with
/// either.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchasePreference {
    pub substitution: Substitution,
    pub price_range: Option<PriceRange>,
    pub call_if_exceeded: Option<CallIfExceeded>,
}

impl PurchasePreference {
    pub fn is_exclusive(&self) -> bool {
        matches!(self.substitution, Substitution::Exclusive)
    }

    pub fn is_flexible(&self) -> bool {
        matches!(self.substitution, Substitution::Flexible { .. })
    }

    pub fn alternatives(&self) -> &[String] {
        match &self.substitution {
            Substitution::Flexible { alternatives } => alternatives,
            _ => &[],
        }
    }

    /// Apply one checkbox change. Turning exclusive on drops flexible and its
    /// alternatives and vice versa; the optional add-ons are allocated with
    /// zero/"call" defaults when switched on and discarded when switched off.
    pub fn set_flag(&mut self, flag: PreferenceFlag, enabled: bool) {
        match (flag, enabled) {
            (PreferenceFlag::Exclusive, true) => self.substitution = Substitution::Exclusive,
            (PreferenceFlag::Exclusive, false) => {
                if self.is_exclusive() {
                    self.substitution = Substitution::Unspecified;
                }
            }
            (PreferenceFlag::Flexible, true) => {
                if !self.is_flexible() {
                    self.substitution = Substitution::Flexible { alternatives: Vec::new() };
                }
            }
            (PreferenceFlag::Flexible, false) => {
                if self.is_flexible() {
                    self.substitution = Substitution::Unspecified;
                }
            }
            (PreferenceFlag::PriceRange, true) => {
                self.price_range.get_or_insert_with(PriceRange::default);
            }
            (PreferenceFlag::PriceRange, false) => self.price_range = None,
            (PreferenceFlag::CallIfExceeded, true) => {
                self.call_if_exceeded.get_or_insert_with(CallIfExceeded::default);
            }
            (PreferenceFlag::CallIfExceeded, false) => self.call_if_exceeded = None,
        }
    }

    pub fn is_enabled(&self, flag: PreferenceFlag) -> bool {
        match flag {
            PreferenceFlag::Exclusive => self.is_exclusive(),
            PreferenceFlag::Flexible => self.is_flexible(),
            PreferenceFlag::PriceRange => self.price_range.is_some(),
            PreferenceFlag::CallIfExceeded => self.call_if_exceeded.is_some(),
        }
    }

    /// Replace the alternatives from the comma-separated text box.
    /// Ignored unless the preference is flexible.
    pub fn set_alternatives_text(&mut self, raw: &str) -> bool {
        match &mut self.substitution {
            Substitution::Flexible { alternatives } => {
                *alternatives = parse_alternatives(raw);
                true
            }
            _ => false,
        }
    }

    /// Ignored unless the price range is switched on
    pub fn set_price_range(&mut self, min_raw: &str, max_raw: &str) -> bool {
        match &mut self.price_range {
            Some(range) => {
                range.min = parse_amount(min_raw);
                range.max = parse_amount(max_raw);
                true
            }
            None => false,
        }
    }

    /// Ignored unless call-if-exceeded is switched on
    pub fn set_contact(&mut self, method: ContactMethod, number: &str) -> bool {
        match &mut self.call_if_exceeded {
            Some(contact) => {
                contact.contact_method = method;
                contact.contact_number = number.trim().to_string();
                true
            }
            None => false,
        }
    }

    /// True once at least one of the four options is chosen
    pub fn is_specified(&self) -> bool {
        !matches!(self.substitution, Substitution::Unspecified)
            || self.price_range.is_some()
            || self.call_if_exceeded.is_some()
    }

    fn normalized(&self) -> Self {
        let mut preference = self.clone();
        if let Substitution::Flexible { alternatives } = &mut preference.substitution {
            *alternatives = alternatives
                .iter()
                .map(|alt| alt.trim().to_string())
                .filter(|alt| !alt.is_empty())
                .collect();
        }
        preference
    }
}

/// Split comma-separated alternatives, keeping order and multi-word entries
pub fn parse_alternatives(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|alt| !alt.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lenient money input: anything unparsable or negative becomes zero
pub fn parse_amount(raw: &str) -> Decimal {
    match raw.trim().parse::<Decimal>() {
        Ok(amount) if amount >= Decimal::ZERO => amount,
        _ => Decimal::ZERO,
    }
}

/// Advisory shown next to an item. Never blocks submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemNotice {
    PrescriptionRequired,
    NoPurchasePreference,
}

impl fmt::Display for ItemNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemNotice::PrescriptionRequired => f.write_str(
                "Please note: For prescription medicines, you will need to send a valid prescription via WhatsApp after submitting your order.",
            ),
            ItemNotice::NoPurchasePreference => {
                f.write_str("Please select at least one purchase preference.")
            }
        }
    }
}

fn notices_for(category: Option<ItemCategory>, preference: &PurchasePreference) -> Vec<ItemNotice> {
    let mut notices = Vec::new();
    if category.is_some_and(|c| c.requires_prescription_notice()) {
        notices.push(ItemNotice::PrescriptionRequired);
    }
    if !preference.is_specified() {
        notices.push(ItemNotice::NoPurchasePreference);
    }
    notices
}

/// The add/edit item form, before validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDraft {
    pub name: String,
    pub category: Option<ItemCategory>,
    pub description: String,
    /// Raw text from the price field
    pub estimated_price: String,
    pub purchase_preference: PurchasePreference,
    pub test_criteria: String,
    pub packaging: Vec<PackagingOption>,
}

impl ItemDraft {
    pub fn new(name: &str, category: ItemCategory) -> Self {
        Self {
            name: name.to_string(),
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn update_preference_flag(&mut self, flag: PreferenceFlag, enabled: bool) {
        self.purchase_preference.set_flag(flag, enabled);
    }

    /// Tick or untick one packaging checkbox
    pub fn toggle_packaging(&mut self, option: PackagingOption, selected: bool) {
        if selected {
            if !self.packaging.contains(&option) {
                self.packaging.push(option);
            }
        } else {
            self.packaging.retain(|p| *p != option);
        }
    }

    pub fn shows_test_criteria(&self) -> bool {
        self.category.is_some_and(|c| c.accepts_test_criteria())
    }

    pub fn shows_packaging(&self) -> bool {
        self.category.is_some_and(|c| c.accepts_packaging())
    }

    pub fn notices(&self) -> Vec<ItemNotice> {
        notices_for(self.category, &self.purchase_preference)
    }
}

impl From<&Item> for ItemDraft {
    fn from(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            category: Some(item.category),
            description: item.description.clone(),
            estimated_price: item.estimated_price.to_string(),
            purchase_preference: item.purchase_preference.clone(),
            test_criteria: item.test_criteria.clone().unwrap_or_default(),
            packaging: item.packaging.clone(),
        }
    }
}

/// One line of the shopping list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    id: ItemId,
    name: String,
    category: ItemCategory,
    description: String,
    estimated_price: Decimal,
    purchase_preference: PurchasePreference,
    test_criteria: Option<String>,
    packaging: Vec<PackagingOption>,
}

impl Item {
    pub fn create(id: ItemId, draft: &ItemDraft) -> Result<Self, ItemError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(ItemError::MissingName);
        }
        let category = draft.category.ok_or(ItemError::MissingCategory)?;

        let test_criteria = if category.accepts_test_criteria() {
            Some(draft.test_criteria.trim())
                .filter(|t| !t.is_empty())
                .map(str::to_string)
        } else {
            None
        };

        let mut packaging = Vec::new();
        if category.accepts_packaging() {
            for option in &draft.packaging {
                if !packaging.contains(option) {
                    packaging.push(*option);
                }
            }
        } else if !draft.packaging.is_empty() {
            tracing::debug!(%category, "Dropping packaging for category without packaging");
        }

        Ok(Self {
            id,
            name: name.to_string(),
            category,
            description: draft.description.trim().to_string(),
            estimated_price: parse_amount(&draft.estimated_price),
            purchase_preference: draft.purchase_preference.normalized(),
            test_criteria,
            packaging,
        })
    }

    /// Replace every field but the id. Nothing changes if the draft is invalid.
    pub(crate) fn replace_with(&mut self, draft: &ItemDraft) -> Result<(), ItemError> {
        *self = Self::create(self.id, draft)?;
        Ok(())
    }

    /// Copy with a blank description replaced by [`DEFAULT_DESCRIPTION`]
    pub(crate) fn finalized(&self) -> Self {
        let mut item = self.clone();
        if item.description.is_empty() {
            item.description = DEFAULT_DESCRIPTION.to_string();
        }
        item
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> ItemCategory {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn estimated_price(&self) -> Decimal {
        self.estimated_price
    }

    pub fn purchase_preference(&self) -> &PurchasePreference {
        &self.purchase_preference
    }

    pub fn test_criteria(&self) -> Option<&str> {
        self.test_criteria.as_deref()
    }

    pub fn packaging(&self) -> &[PackagingOption] {
        &self.packaging
    }

    pub fn has_call_if_exceeded(&self) -> bool {
        self.purchase_preference.call_if_exceeded.is_some()
    }

    pub fn notices(&self) -> Vec<ItemNotice> {
        notices_for(Some(self.category), &self.purchase_preference)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ItemError {
    #[error("Please enter an item name.")]
    MissingName,

    #[error("Please select a category.")]
    MissingCategory,
}
