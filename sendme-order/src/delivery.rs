use crate::models::DeliverySummary;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use sendme_catalog::{locations, TimeSlot, OTHER};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    #[default]
    Pickup,
    Delivery,
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryMethod::Pickup => f.write_str("pickup"),
            DeliveryMethod::Delivery => f.write_str("delivery"),
        }
    }
}

/// Tuesdays and Thursdays are express days
pub fn is_express_day(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Tue | Weekday::Thu)
}

/// Outcome of an accepted date selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSelection {
    pub is_express: bool,
    /// The previously chosen slot no longer fits the new date and was dropped
    pub slot_cleared: bool,
}

/// Logistics chosen in the delivery step.
///
/// Every setter validates its own input and leaves the config untouched on
/// rejection. Completeness is judged only by [`DeliveryConfig::missing_field`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeliveryConfig {
    delivery_date: Option<NaiveDate>,
    time_slot: Option<TimeSlot>,
    method: DeliveryMethod,
    purchase_location: Option<String>,
    custom_purchase_location: String,
    municipality: Option<String>,
    other_municipality: String,
    area_details: String,
    is_express: bool,
}

impl DeliveryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_date(
        &mut self,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> Result<DateSelection, DeliveryError> {
        if date < now.date() {
            tracing::debug!(%date, "Rejected delivery date in the past");
            return Err(DeliveryError::PastDate);
        }

        self.delivery_date = Some(date);
        self.is_express = is_express_day(date);

        let slot_cleared = match self.time_slot {
            Some(slot) if !slot.is_available(date, now) => {
                tracing::info!(%date, %slot, "Cleared time slot that is already past on the new date");
                self.time_slot = None;
                true
            }
            _ => false,
        };

        Ok(DateSelection {
            is_express: self.is_express,
            slot_cleared,
        })
    }

    pub fn select_time_slot(
        &mut self,
        raw: &str,
        now: NaiveDateTime,
    ) -> Result<TimeSlot, DeliveryError> {
        let slot: TimeSlot = raw
            .parse()
            .map_err(|_| DeliveryError::UnknownTimeSlot(raw.to_string()))?;
        if !slot.is_offered() {
            return Err(DeliveryError::UnknownTimeSlot(raw.to_string()));
        }

        if let Some(date) = self.delivery_date {
            if !slot.is_available(date, now) {
                tracing::debug!(%slot, "Rejected time slot in the past");
                return Err(DeliveryError::PastTimeSlot);
            }
        }

        self.time_slot = Some(slot);
        Ok(slot)
    }

    pub fn select_delivery_method(&mut self, method: DeliveryMethod) {
        self.method = method;
    }

    /// Pick an area from the catalog, or `OTHER` to type one in
    pub fn select_municipality(&mut self, value: &str) -> Result<(), DeliveryError> {
        if !locations::is_municipality(value) {
            return Err(DeliveryError::UnknownMunicipality(value.to_string()));
        }
        self.municipality = Some(value.to_string());
        Ok(())
    }

    /// Free-text area, used while `OTHER` is selected
    pub fn select_other_municipality(&mut self, free_text: &str) {
        self.other_municipality = free_text.trim().to_string();
    }

    /// Street or landmark details. Each call replaces the previous details.
    pub fn append_area_details(&mut self, free_text: &str) {
        self.area_details = free_text.trim().to_string();
    }

    /// Pick a store from the catalog, or `OTHER` to type one in
    pub fn select_purchase_location(&mut self, value: &str) -> Result<(), DeliveryError> {
        if !locations::is_purchase_location(value) {
            return Err(DeliveryError::UnknownPurchaseLocation(value.to_string()));
        }
        self.purchase_location = Some(value.to_string());
        Ok(())
    }

    /// Free-text store, used while `OTHER` is selected
    pub fn select_custom_purchase_location(&mut self, free_text: &str) {
        self.custom_purchase_location = free_text.trim().to_string();
    }

    pub fn delivery_date(&self) -> Option<NaiveDate> {
        self.delivery_date
    }

    pub fn time_slot(&self) -> Option<TimeSlot> {
        self.time_slot
    }

    pub fn delivery_method(&self) -> DeliveryMethod {
        self.method
    }

    pub fn is_express_delivery(&self) -> bool {
        self.is_express
    }

    /// Store name as it will appear in the order
    pub fn effective_purchase_location(&self) -> Option<String> {
        match self.purchase_location.as_deref() {
            Some(OTHER) => Some(self.custom_purchase_location.clone()).filter(|l| !l.is_empty()),
            Some(location) => Some(location.to_string()),
            None => None,
        }
    }

    /// Area as it will appear in the order: `"<area> - <details>"` when
    /// details were given
    pub fn effective_municipality(&self) -> Option<String> {
        let base = match self.municipality.as_deref() {
            Some(OTHER) => Some(self.other_municipality.as_str()).filter(|m| !m.is_empty()),
            Some(area) => Some(area),
            None => None,
        }?;

        if self.area_details.is_empty() {
            Some(base.to_string())
        } else {
            Some(format!("{} - {}", base, self.area_details))
        }
    }

    /// First unmet requirement, checked as date, time, purchase location, area
    pub fn missing_field(&self) -> Option<DeliveryIncomplete> {
        if self.delivery_date.is_none() {
            return Some(DeliveryIncomplete::MissingDate);
        }
        if self.time_slot.is_none() {
            return Some(DeliveryIncomplete::MissingTimeSlot);
        }
        if self.effective_purchase_location().is_none() {
            return Some(DeliveryIncomplete::MissingPurchaseLocation);
        }
        if self.method == DeliveryMethod::Delivery && self.effective_municipality().is_none() {
            return Some(DeliveryIncomplete::MissingMunicipality);
        }
        None
    }

    pub fn is_complete(&self) -> bool {
        self.missing_field().is_none()
    }

    /// Freeze the current choices for an order
    pub fn summary(&self) -> Result<DeliverySummary, DeliveryIncomplete> {
        let incomplete = self.missing_field();
        match (self.delivery_date, self.time_slot, self.effective_purchase_location()) {
            (Some(date), Some(time_slot), Some(purchase_location)) if incomplete.is_none() => {
                Ok(DeliverySummary {
                    date,
                    time_slot,
                    purchase_location,
                    method: self.method,
                    municipality: match self.method {
                        DeliveryMethod::Delivery => self.effective_municipality(),
                        DeliveryMethod::Pickup => None,
                    },
                    is_express: self.is_express,
                })
            }
            _ => Err(incomplete.unwrap_or(DeliveryIncomplete::MissingDate)),
        }
    }
}

/// Why the delivery step cannot be left yet
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum DeliveryIncomplete {
    #[error("Please select a delivery date for your order.")]
    MissingDate,

    #[error("Please select a time for your order.")]
    MissingTimeSlot,

    #[error("Please select a purchase location.")]
    MissingPurchaseLocation,

    #[error("Please select an area for delivery.")]
    MissingMunicipality,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("You cannot select a date in the past.")]
    PastDate,

    #[error("You cannot select a time in the past. Please choose a future time.")]
    PastTimeSlot,

    #[error("Unknown time slot: {0}")]
    UnknownTimeSlot(String),

    #[error("Unknown purchase location: {0}")]
    UnknownPurchaseLocation(String),

    #[error("Unknown area: {0}")]
    UnknownMunicipality(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tuesday
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()
    }

    fn now(hour: u32, minute: u32) -> NaiveDateTime {
        today().and_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_express_days() {
        let monday = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let expected = [false, true, false, true, false, false, false];
        for (offset, express) in expected.iter().enumerate() {
            let date = monday + chrono::Duration::days(offset as i64);
            assert_eq!(is_express_day(date), *express, "{}", date);
        }
    }

    #[test]
    fn test_past_date_rejected() {
        let mut config = DeliveryConfig::new();
        let yesterday = today().pred_opt().unwrap();

        assert_eq!(config.select_date(yesterday, now(8, 0)), Err(DeliveryError::PastDate));
        assert_eq!(config.delivery_date(), None);

        let selection = config.select_date(today(), now(23, 59)).unwrap();
        assert!(selection.is_express);
        assert!(config.is_express_delivery());
    }

    #[test]
    fn test_past_time_slot_rejected_only_today() {
        let mut config = DeliveryConfig::new();
        config.select_date(today(), now(10, 0)).unwrap();

        assert_eq!(
            config.select_time_slot("09:00 – 09:30", now(10, 0)),
            Err(DeliveryError::PastTimeSlot)
        );
        assert!(config.select_time_slot("11:00 – 11:30", now(10, 0)).is_ok());
        assert!(config.select_time_slot("Instant Order", now(22, 0)).is_ok());

        config.select_date(today().succ_opt().unwrap(), now(10, 0)).unwrap();
        assert!(config.select_time_slot("07:00 – 07:30", now(10, 0)).is_ok());
    }

    #[test]
    fn test_unknown_slot_rejected() {
        let mut config = DeliveryConfig::new();
        assert_eq!(
            config.select_time_slot("08:00 – 08:30", now(6, 0)),
            Err(DeliveryError::UnknownTimeSlot("08:00 – 08:30".to_string()))
        );
        assert!(config.time_slot().is_none());
    }

    #[test]
    fn test_moving_date_to_today_clears_stale_slot() {
        let mut config = DeliveryConfig::new();
        config.select_date(today().succ_opt().unwrap(), now(12, 0)).unwrap();
        config.select_time_slot("09:00 – 09:30", now(12, 0)).unwrap();

        let selection = config.select_date(today(), now(12, 0)).unwrap();
        assert!(selection.slot_cleared);
        assert!(config.time_slot().is_none());
    }

    #[test]
    fn test_other_sentinels_use_free_text() {
        let mut config = DeliveryConfig::new();
        config.select_purchase_location(OTHER).unwrap();
        assert_eq!(config.effective_purchase_location(), None);
        config.select_custom_purchase_location(" Shoprite Manda Hill ");
        assert_eq!(config.effective_purchase_location().as_deref(), Some("Shoprite Manda Hill"));

        config.select_municipality(OTHER).unwrap();
        assert_eq!(config.effective_municipality(), None);
        config.select_other_municipality("Roma");
        assert_eq!(config.effective_municipality().as_deref(), Some("Roma"));

        assert!(config.select_purchase_location("Corner Shop").is_err());
        assert!(config.select_municipality("Atlantis").is_err());
        assert_eq!(config.effective_municipality().as_deref(), Some("Roma"));
    }

    #[test]
    fn test_area_details_replace_not_accumulate() {
        let mut config = DeliveryConfig::new();
        config.append_area_details("Plot 12");
        assert_eq!(config.effective_municipality(), None);

        config.select_municipality("Kabulonga").unwrap();
        config.append_area_details("Plot 12");
        config.append_area_details("Plot 14, blue gate");
        assert_eq!(
            config.effective_municipality().as_deref(),
            Some("Kabulonga - Plot 14, blue gate")
        );

        config.append_area_details("  ");
        assert_eq!(config.effective_municipality().as_deref(), Some("Kabulonga"));
    }

    #[test]
    fn test_missing_field_priority() {
        let mut config = DeliveryConfig::new();
        config.select_delivery_method(DeliveryMethod::Delivery);
        assert_eq!(config.missing_field(), Some(DeliveryIncomplete::MissingDate));

        config.select_date(today(), now(6, 0)).unwrap();
        assert_eq!(config.missing_field(), Some(DeliveryIncomplete::MissingTimeSlot));

        config.select_time_slot("07:00 – 07:30", now(6, 0)).unwrap();
        assert_eq!(config.missing_field(), Some(DeliveryIncomplete::MissingPurchaseLocation));

        config.select_purchase_location("Lusaka Pharmacy").unwrap();
        assert_eq!(config.missing_field(), Some(DeliveryIncomplete::MissingMunicipality));

        config.select_delivery_method(DeliveryMethod::Pickup);
        assert!(config.is_complete());

        config.select_delivery_method(DeliveryMethod::Delivery);
        config.select_municipality("Chelston").unwrap();
        assert!(config.is_complete());
    }

    #[test]
    fn test_summary_omits_municipality_for_pickup() {
        let mut config = DeliveryConfig::new();
        assert_eq!(config.summary(), Err(DeliveryIncomplete::MissingDate));

        config.select_date(today(), now(6, 0)).unwrap();
        config.select_time_slot("Instant Order", now(6, 0)).unwrap();
        config.select_purchase_location("Lusaka Pharmacy").unwrap();
        config.select_municipality("Chelston").unwrap();

        let summary = config.summary().unwrap();
        assert_eq!(summary.method, DeliveryMethod::Pickup);
        assert_eq!(summary.municipality, None);
        assert!(summary.is_express);
    }
}
