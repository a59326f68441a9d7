pub mod app_config;
pub mod changes;
pub mod customer;
pub mod delivery;
pub mod item;
pub mod models;
pub mod serializer;
pub mod wizard;

pub use changes::ItemCollection;
pub use customer::CustomerInfo;
pub use delivery::{DeliveryConfig, DeliveryMethod};
pub use item::{Item, ItemDraft, PreferenceFlag, PurchasePreference};
pub use models::{DeliverySummary, Order, WizardState};
pub use serializer::OrderSerializer;
pub use wizard::{OrderWizard, Submission};
