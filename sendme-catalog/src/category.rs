use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of item categories a customer can order from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ItemCategory {
    #[serde(rename = "Food & Drinks")]
    FoodAndDrinks,
    Beverages,
    Laundry,
    Quotations,
    Groceries,
    Medicine,
    #[serde(rename = "Gifts & Parcels")]
    GiftsAndParcels,
    Electronics,
    Documents,
    Other,
}

impl ItemCategory {
    /// Every category, in the order the category picker lists them
    pub const ALL: [ItemCategory; 10] = [
        ItemCategory::FoodAndDrinks,
        ItemCategory::Beverages,
        ItemCategory::Laundry,
        ItemCategory::Quotations,
        ItemCategory::Groceries,
        ItemCategory::Medicine,
        ItemCategory::GiftsAndParcels,
        ItemCategory::Electronics,
        ItemCategory::Documents,
        ItemCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCategory::FoodAndDrinks => "Food & Drinks",
            ItemCategory::Beverages => "Beverages",
            ItemCategory::Laundry => "Laundry",
            ItemCategory::Quotations => "Quotations",
            ItemCategory::Groceries => "Groceries",
            ItemCategory::Medicine => "Medicine",
            ItemCategory::GiftsAndParcels => "Gifts & Parcels",
            ItemCategory::Electronics => "Electronics",
            ItemCategory::Documents => "Documents",
            ItemCategory::Other => "Other",
        }
    }

    /// Medicine orders must show the prescription notice before submission
    pub fn requires_prescription_notice(&self) -> bool {
        matches!(self, ItemCategory::Medicine)
    }

    /// Whether items in this category may carry test criteria
    pub fn accepts_test_criteria(&self) -> bool {
        matches!(self, ItemCategory::Electronics | ItemCategory::GiftsAndParcels)
    }

    /// Whether items in this category may carry packaging selections
    pub fn accepts_packaging(&self) -> bool {
        matches!(self, ItemCategory::Electronics | ItemCategory::GiftsAndParcels)
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemCategory {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

/// Extra packaging the shopper can add; each selection is charged
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PackagingOption {
    #[serde(rename = "Gift wrap")]
    GiftWrap,
    #[serde(rename = "Bubble wrap")]
    BubbleWrap,
    Box,
    #[serde(rename = "Plastic bag")]
    PlasticBag,
    #[serde(rename = "Paper bag")]
    PaperBag,
}

impl PackagingOption {
    pub const ALL: [PackagingOption; 5] = [
        PackagingOption::GiftWrap,
        PackagingOption::BubbleWrap,
        PackagingOption::Box,
        PackagingOption::PlasticBag,
        PackagingOption::PaperBag,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PackagingOption::GiftWrap => "Gift wrap",
            PackagingOption::BubbleWrap => "Bubble wrap",
            PackagingOption::Box => "Box",
            PackagingOption::PlasticBag => "Plastic bag",
            PackagingOption::PaperBag => "Paper bag",
        }
    }
}

impl fmt::Display for PackagingOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackagingOption {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CatalogError::UnknownPackaging(s.to_string()))
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown packaging option: {0}")]
    UnknownPackaging(String),
}
