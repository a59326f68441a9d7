use chrono::NaiveDate;
use rust_decimal::Decimal;
use sendme_catalog::{ItemCategory, PackagingOption};
use sendme_core::{Clock, FixedClock, RecordingChannel};
use sendme_order::app_config::{BusinessRules, Config};
use sendme_order::changes::ChangeError;
use sendme_order::delivery::DeliveryIncomplete;
use sendme_order::item::ContactMethod;
use sendme_order::wizard::{SubmissionError, WizardError};
use sendme_order::{DeliveryMethod, ItemDraft, OrderWizard, PreferenceFlag, WizardState};
use std::str::FromStr;
use std::sync::Arc;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
}

// Tuesday 20 October 2026, 10:00
fn clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::at(date(20), 10, 0).unwrap())
}

fn channel() -> RecordingChannel {
    RecordingChannel::new("https://wa.me", "260979013006")
}

fn ready_wizard(rules: &BusinessRules) -> OrderWizard {
    let mut wizard = OrderWizard::new(rules, clock());
    wizard
        .submit_identity("0977123456", Some("Jane Banda"), Some("jane@example.com"), false)
        .unwrap();
    wizard.select_delivery_method(DeliveryMethod::Delivery).unwrap();
    wizard.select_date(date(20)).unwrap();
    wizard.select_time_slot("11:00 – 11:30").unwrap();
    wizard.select_purchase_location("Lusaka Pharmacy").unwrap();
    wizard.select_municipality("Kabulonga").unwrap();
    wizard.append_area_details("Plot 14, blue gate").unwrap();
    wizard
}

fn gift_draft() -> ItemDraft {
    let mut draft = ItemDraft::new("Wrist watch", ItemCategory::GiftsAndParcels);
    draft.estimated_price = "450".to_string();
    draft.update_preference_flag(PreferenceFlag::CallIfExceeded, true);
    draft.purchase_preference.set_contact(ContactMethod::Call, "0977123456");
    draft.toggle_packaging(PackagingOption::Box, true);
    draft.toggle_packaging(PackagingOption::GiftWrap, true);
    draft
}

/// Pull the amount out of the `Total Charge: K...` line
fn total_in(message: &str) -> Decimal {
    let line = message
        .lines()
        .find(|l| l.starts_with("Total Charge: K"))
        .expect("message has a total line");
    Decimal::from_str(line.trim_start_matches("Total Charge: K")).unwrap()
}

#[test]
fn test_full_order_reaches_channel() {
    let channel = channel();
    let mut wizard = ready_wizard(&BusinessRules::default());
    assert_eq!(wizard.state(), WizardState::CollectingItems);
    assert!(wizard.is_express_delivery());

    wizard.add_item(&gift_draft()).unwrap();
    let mut bread = ItemDraft::new("Bread", ItemCategory::Groceries);
    bread.update_preference_flag(PreferenceFlag::Exclusive, true);
    wizard.add_item(&bread).unwrap();
    assert_eq!(wizard.state(), WizardState::ReadyToSubmit);

    let preview = wizard.charges_preview();
    assert_eq!(preview.total, Decimal::from(87));

    wizard.set_terms_accepted(true);
    let submission = wizard.submit(&channel).unwrap();

    let dispatched = channel.dispatched();
    assert_eq!(dispatched, vec![submission.url.clone()]);

    let encoded = dispatched[0]
        .strip_prefix("https://wa.me/260979013006?text=")
        .unwrap();
    let decoded = urlencoding::decode(encoded).unwrap();
    assert_eq!(decoded, submission.message);
    assert_eq!(total_in(&decoded), preview.total);
    assert_eq!(submission.charges().total, preview.total);

    assert!(decoded.contains("Name: Jane Banda\n"));
    assert!(decoded.contains("📦 Item 1: Wrist watch\n"));
    assert!(decoded.contains("📦 Item 2: Bread\n"));
    assert!(decoded.contains("Delivery Municipality: Kabulonga - Plot 14, blue gate\n"));
    assert!(decoded.contains("Order Date: Tue Oct 20 2026\n"));
    assert!(decoded.ends_with(&format!("Reference: #{}", submission.order_number)));
    assert_eq!(wizard.state(), WizardState::Submitted);
}

#[test]
fn test_terms_gate_blocks_dispatch() {
    let channel = channel();
    let mut wizard = ready_wizard(&BusinessRules::default());
    wizard.add_item(&gift_draft()).unwrap();

    for _ in 0..3 {
        assert_eq!(
            wizard.submit(&channel).unwrap_err(),
            WizardError::Submission(SubmissionError::TermsNotAccepted)
        );
    }
    assert!(channel.dispatched().is_empty());
    assert_eq!(wizard.state(), WizardState::ReadyToSubmit);
}

#[test]
fn test_twenty_first_item_is_rejected() {
    let mut wizard = ready_wizard(&BusinessRules::default());
    let draft = ItemDraft::new("Apples", ItemCategory::Groceries);
    for _ in 0..20 {
        wizard.add_item(&draft).unwrap();
    }

    let err = wizard.add_item(&draft).unwrap_err();
    assert_eq!(err, WizardError::Items(ChangeError::CapacityReached(20)));
    assert_eq!(err.to_string(), "You have reached the maximum limit of 20 items.");
    assert_eq!(wizard.items().len(), 20);

    // ids issued within one millisecond stay distinct
    let mut ids: Vec<_> = wizard.items().iter().map(|i| i.id()).collect();
    ids.dedup();
    assert_eq!(ids.len(), 20);
}

#[test]
fn test_moving_to_today_drops_passed_slot() {
    let channel = channel();
    let mut wizard = OrderWizard::new(&BusinessRules::default(), clock());
    wizard.submit_identity("0977123456", None, None, true).unwrap();
    wizard.select_date(date(21)).unwrap();
    wizard.select_time_slot("09:00 – 09:30").unwrap();
    wizard.select_purchase_location("Other").unwrap();
    assert_eq!(wizard.state(), WizardState::ConfiguringDelivery);

    wizard.select_custom_purchase_location("Corner kiosk").unwrap();
    assert_eq!(wizard.state(), WizardState::CollectingItems);
    assert!(!wizard.is_express_delivery());

    let selection = wizard.select_date(date(20)).unwrap();
    assert!(selection.slot_cleared);
    assert!(selection.is_express);

    wizard.add_item(&ItemDraft::new("Airtime", ItemCategory::Other)).unwrap();
    wizard.set_terms_accepted(true);
    assert_eq!(
        wizard.submit(&channel).unwrap_err(),
        WizardError::Submission(SubmissionError::Delivery(DeliveryIncomplete::MissingTimeSlot))
    );

    wizard.select_time_slot("Instant Order").unwrap();
    let submission = wizard.submit(&channel).unwrap();
    assert!(submission.message.contains("Purchase Location: Corner kiosk\n"));
    assert!(submission.message.contains("Order Time: Instant Order\n"));
    assert!(!submission.message.contains("Name:"));
}

#[test]
fn test_configured_charges_reach_message() {
    let config = Config::from_toml_str(
        r#"
        [business_rules]
        max_items = 5

        [business_rules.charges]
        shopping = 30
        express = 0
        "#,
    )
    .unwrap();

    let channel = config.channel.deep_link_channel();
    let mut wizard = ready_wizard(&config.business_rules);
    wizard.add_item(&gift_draft()).unwrap();
    wizard.set_terms_accepted(true);

    let submission = wizard.submit(&channel).unwrap();
    assert_eq!(total_in(&submission.message), Decimal::from(42));
    assert!(!submission.message.contains("Express Delivery Charge"));
    assert!(submission.message.contains("Express Delivery: Yes\n"));
}

#[test]
fn test_order_serializes_for_logs() {
    let channel = channel();
    let mut wizard = ready_wizard(&BusinessRules::default());
    wizard.add_item(&gift_draft()).unwrap();
    wizard.set_terms_accepted(true);
    let submission = wizard.submit(&channel).unwrap();

    let json = serde_json::to_value(&submission.order).unwrap();
    assert_eq!(json["delivery"]["time_slot"], "11:00 – 11:30");
    assert_eq!(json["items"][0]["description"], "No description provided");
    assert_eq!(serde_json::to_value(wizard.state()).unwrap(), "SUBMITTED");
}
