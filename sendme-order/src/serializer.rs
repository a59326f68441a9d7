use crate::delivery::DeliveryMethod;
use crate::item::{Item, Substitution};
use crate::models::Order;
use chrono::NaiveDateTime;
use rand::Rng;
use rust_decimal::Decimal;

pub const ORDER_NUMBER_PREFIX: &str = "SM";
pub const MESSAGE_HEADER: &str = "SendMe Orders";

const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";
const DATE_FORMAT: &str = "%a %b %d %Y";

/// Renders a finished order into the text sent to the shop's messaging inbox
pub struct OrderSerializer;

impl OrderSerializer {
    /// `SM` + `YYMMDD` + four random digits. Not guaranteed unique.
    pub fn generate_order_number(now: NaiveDateTime) -> String {
        Self::generate_order_number_with(now, &mut rand::thread_rng())
    }

    pub fn generate_order_number_with<R: Rng>(now: NaiveDateTime, rng: &mut R) -> String {
        let suffix: u32 = rng.gen_range(0..9999);
        format!("{}{}{:04}", ORDER_NUMBER_PREFIX, now.format("%y%m%d"), suffix)
    }

    /// Plain (not yet percent-encoded) message text
    pub fn format_order(order: &Order, order_number: &str, timestamp: NaiveDateTime) -> String {
        let mut text = format!(
            "{}\nOrder #{}\nDate: {}\n\n",
            MESSAGE_HEADER,
            order_number,
            timestamp.format(TIMESTAMP_FORMAT)
        );

        text.push_str("Customer Information:\n");
        text.push_str(&format!("Phone Number: {}\n", order.customer.phone_number()));
        if !order.customer.is_existing_customer() {
            text.push_str(&format!("Name: {}\n", order.customer.name().unwrap_or_default()));
            text.push_str(&format!("Email: {}\n", order.customer.email().unwrap_or_default()));
        }
        text.push('\n');

        for (index, item) in order.items.iter().enumerate() {
            text.push_str(&Self::format_item(index + 1, item));
        }

        let delivery = &order.delivery;
        text.push_str(&format!("Order Date: {}\n", delivery.date.format(DATE_FORMAT)));
        text.push_str(&format!("Order Time: {}\n", delivery.time_slot));
        text.push_str(&format!("Purchase Location: {}\n", delivery.purchase_location));
        text.push_str(&format!("Delivery Method: {}\n", delivery.method));
        if delivery.method == DeliveryMethod::Delivery {
            text.push_str(&format!(
                "Delivery Municipality: {}\n",
                delivery.municipality.as_deref().unwrap_or_default()
            ));
        }
        text.push_str(&format!(
            "Express Delivery: {}\n\n",
            if delivery.is_express { "Yes" } else { "No" }
        ));

        let charges = &order.charges;
        text.push_str(&format!("Shopping Charge: {}\n", money(charges.shopping)));
        if charges.express > Decimal::ZERO {
            text.push_str(&format!("Express Delivery Charge: {}\n", money(charges.express)));
        }
        if charges.call_text > Decimal::ZERO {
            text.push_str(&format!("Call/Text Charge: {}\n", money(charges.call_text)));
        }
        if charges.packaging > Decimal::ZERO {
            text.push_str(&format!("Packaging Charge: {}\n", money(charges.packaging)));
        }
        text.push_str(&format!("Total Charge: {}\n\n", money(charges.total)));

        text.push_str(&format!(
            "✅ Final Confirmation: \"Ready to place order!\"\nReference: #{}",
            order_number
        ));

        text
    }

    fn format_item(position: usize, item: &Item) -> String {
        let mut text = format!("📦 Item {}: {}\n\n", position, item.name());
        text.push_str(&format!("Category: {}\n", item.category()));
        text.push_str(&format!("Description: {}\n", item.description()));
        text.push_str(&format!("Estimated Price: {}\n", money(item.estimated_price())));

        let preference = item.purchase_preference();
        text.push_str("Purchase Preference:\n");
        match &preference.substitution {
            Substitution::Exclusive => text.push_str("- Exclusive\n"),
            Substitution::Flexible { alternatives } => {
                text.push_str("- Flexible\n");
                if !alternatives.is_empty() {
                    text.push_str(&format!("  Alternatives: {}\n", alternatives.join(", ")));
                }
            }
            Substitution::Unspecified => {}
        }
        if let Some(range) = &preference.price_range {
            text.push_str(&format!("- Price Range: K{} - K{}\n", range.min, range.max));
        }
        if let Some(contact) = &preference.call_if_exceeded {
            text.push_str(&format!(
                "- Call/Text if Exceeded: {} at {}\n",
                contact.contact_method, contact.contact_number
            ));
        }

        if let Some(criteria) = item.test_criteria() {
            text.push_str(&format!("Test Criteria: {}\n", criteria));
        }
        if !item.packaging().is_empty() {
            let packaging: Vec<&str> = item.packaging().iter().map(|p| p.as_str()).collect();
            text.push_str(&format!("Packaging: {}\n", packaging.join(", ")));
        }
        text.push('\n');
        text
    }
}

/// `K` followed by the amount rounded to two decimals
fn money(amount: Decimal) -> String {
    format!("K{:.2}", amount.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::CustomerInfo;
    use crate::item::{ContactMethod, ItemDraft, PreferenceFlag};
    use crate::models::DeliverySummary;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sendme_catalog::{ItemCategory, PackagingOption, PricingCalculator, TimeSlot};

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 20)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap()
    }

    fn delivery(method: DeliveryMethod, is_express: bool) -> DeliverySummary {
        DeliverySummary {
            date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            time_slot: "11:00 – 11:30".parse::<TimeSlot>().unwrap(),
            purchase_location: "Lusaka Pharmacy".to_string(),
            method,
            municipality: Some("Kabulonga - Plot 14".to_string()),
            is_express,
        }
    }

    #[test]
    fn test_order_number_format() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let number = OrderSerializer::generate_order_number_with(timestamp(), &mut rng);
            assert_eq!(number.len(), 12);
            assert!(number.starts_with("SM261020"));
            assert!(number[2..].chars().all(|c| c.is_ascii_digit()));
        }
        assert!(OrderSerializer::generate_order_number(timestamp()).starts_with("SM261020"));
    }

    #[test]
    fn test_existing_customer_pickup_message() {
        let mut draft = ItemDraft::new("Bread", ItemCategory::Groceries);
        draft.estimated_price = "18.5".to_string();
        draft.update_preference_flag(PreferenceFlag::Exclusive, true);
        let items = vec![Item::create(1, &draft).unwrap()];

        let order = Order::new(
            CustomerInfo::existing("0977123456").unwrap(),
            delivery(DeliveryMethod::Pickup, false),
            &items,
            &PricingCalculator::default(),
        );

        let text = OrderSerializer::format_order(&order, "SM2610200042", timestamp());
        let expected = "SendMe Orders
Order #SM2610200042
Date: 10/20/2026, 9:05:07 AM

Customer Information:
Phone Number: 0977123456

📦 Item 1: Bread

Category: Groceries
Description: No description provided
Estimated Price: K18.50
Purchase Preference:
- Exclusive

Order Date: Tue Oct 20 2026
Order Time: 11:00 – 11:30
Purchase Location: Lusaka Pharmacy
Delivery Method: pickup
Express Delivery: No

Shopping Charge: K25.00
Total Charge: K25.00

✅ Final Confirmation: \"Ready to place order!\"
Reference: #SM2610200042";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_full_preference_and_delivery_lines() {
        let mut draft = ItemDraft::new("Phone case", ItemCategory::Electronics);
        draft.description = "Clear, for model X".to_string();
        draft.update_preference_flag(PreferenceFlag::Flexible, true);
        draft.purchase_preference.set_alternatives_text("Black, Red and yellow");
        draft.update_preference_flag(PreferenceFlag::PriceRange, true);
        draft.purchase_preference.set_price_range("50", "80.5");
        draft.update_preference_flag(PreferenceFlag::CallIfExceeded, true);
        draft.purchase_preference.set_contact(ContactMethod::Text, "0966000111");
        draft.test_criteria = "Fits snugly".to_string();
        draft.toggle_packaging(PackagingOption::Box, true);
        draft.toggle_packaging(PackagingOption::GiftWrap, true);
        let items = vec![Item::create(1, &draft).unwrap()];

        let customer = CustomerInfo::new("0977123456", Some("Jane"), Some("jane@example.com"), false).unwrap();
        let order = Order::new(
            customer,
            delivery(DeliveryMethod::Delivery, true),
            &items,
            &PricingCalculator::default(),
        );
        let text = OrderSerializer::format_order(&order, "SM2610200042", timestamp());

        for line in [
            "Name: Jane\n",
            "Email: jane@example.com\n",
            "- Flexible\n  Alternatives: Black, Red and yellow\n",
            "- Price Range: K50 - K80.5\n",
            "- Call/Text if Exceeded: text at 0966000111\n",
            "Test Criteria: Fits snugly\n",
            "Packaging: Box, Gift wrap\n",
            "Delivery Municipality: Kabulonga - Plot 14\n",
            "Express Delivery: Yes\n",
            "Express Delivery Charge: K50.00\n",
            "Call/Text Charge: K2.00\n",
            "Packaging Charge: K10.00\n",
            "Total Charge: K87.00\n",
        ] {
            assert!(text.contains(line), "missing {:?} in\n{}", line, text);
        }
    }
}
