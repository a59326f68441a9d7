pub mod category;
pub mod locations;
pub mod pricing;
pub mod schedule;

pub use category::{ItemCategory, PackagingOption};
pub use locations::{municipalities, purchase_locations, LocationGroup, OTHER};
pub use pricing::{ChargeSchedule, Charges, PricingCalculator, PricingContext};
pub use schedule::TimeSlot;
