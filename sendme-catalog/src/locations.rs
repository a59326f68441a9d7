/// Sentinel picked when the customer wants to type a value instead
pub const OTHER: &str = "Other";

/// Stores of one kind, e.g. grocery stores or pharmacies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationGroup {
    pub name: &'static str,
    pub locations: &'static [&'static str],
}

static PURCHASE_LOCATIONS: [LocationGroup; 2] = [
    LocationGroup {
        name: "Grocery Stores",
        locations: &[
            "Young Phiroz General Dealers - City Market Soweto",
            "Young Phiroz Burma Road",
            "Young Phiroz General Dealers - Simoson Mega Store",
            "Young Phiroz Kalinga Linga (Alick Nkhata Road)",
            "Young Phiroz Garden (Katima Mulilo Road)",
        ],
    },
    LocationGroup {
        name: "Pharmacies",
        locations: &[
            "Lusaka Chemist Ltd - Main branch (Freedom Way)",
            "LUSAKA CHEMIST LTD (Katunjila Rd)",
            "Lusaka chemist Ltd (Carousell mall, Kafue and Lumumba Road)",
            "Lusaka Pharmacy (Freedom Way)",
            "Lusaka Pharmacy (Katunjila Road)",
            "Lusaka Pharmacy",
        ],
    },
];

static MUNICIPALITIES: [&str; 86] = [
    "Avondale",
    "Bauleni",
    "Barlaston Park",
    "Bedrock",
    "Chaisa",
    "Chalala",
    "Chazanga",
    "Chainama",
    "Chilenje",
    "Chilenje South",
    "Chipata",
    "Chunga",
    "Civic Centre",
    "Central Business District",
    "Chelston",
    "Frank",
    "Foxdale",
    "Garden",
    "Garden Compound",
    "Garden Park",
    "George",
    "Heavy Industrial Area",
    "Helen Kaunda",
    "Ibex Hill",
    "John Howard",
    "John Laing",
    "Kamama",
    "Kamwala",
    "Kamwala South",
    "Kabulonga",
    "Kabanana",
    "Kalikiliki",
    "Kalundu",
    "Kanyama",
    "Kafue Estates",
    "Kuomboka",
    "Kuku",
    "Leona",
    "Libala Stage 1",
    "Libala Stage 2",
    "Libala Stage 3",
    "Libala Stage 4A",
    "Libala Stage 4B",
    "Lilanda",
    "Lilayi",
    "Lilayi Gondwe",
    "Longacres",
    "Lusaka North Forest",
    "Lusaka West",
    "Madras",
    "Makeni",
    "Makeni Industrial Zone",
    "Matero",
    "Matero East",
    "Matero North",
    "Meanwood Avondale",
    "Meanwood Chamba Valley",
    "Meanwood Ibex",
    "Meanwood Kwamwena",
    "Meanwood Mutumbi",
    "Meanwood Ndeke",
    "Mandevu/Marapodi",
    "Misisi",
    "Mtendere",
    "Mtendere East",
    "Munali",
    "New Kasama",
    "Ngombe",
    "Northmead",
    "Nyumba Yanga",
    "NRDC",
    "Olympia",
    "Paradise",
    "PHI (Presidential Housing Initiative)",
    "Prospect Hill",
    "Rockfield",
    "Rhodes Park",
    "Show Grounds",
    "Shimabala",
    "Silverest Estate",
    "Sunningdale",
    "Thornpark",
    "Zanimuone",
    "Chawama",
    "Chudleigh",
    OTHER,
];

/// Purchase locations grouped by store kind. `OTHER` is not part of any group.
pub fn purchase_locations() -> &'static [LocationGroup] {
    &PURCHASE_LOCATIONS
}

/// Delivery areas, ending with the `OTHER` sentinel
pub fn municipalities() -> &'static [&'static str] {
    &MUNICIPALITIES
}

pub fn is_purchase_location(value: &str) -> bool {
    value == OTHER
        || PURCHASE_LOCATIONS
            .iter()
            .any(|group| group.locations.contains(&value))
}

pub fn is_municipality(value: &str) -> bool {
    MUNICIPALITIES.contains(&value)
}

/// Case-insensitive substring filter used by the searchable pickers
pub fn search<'a>(options: &[&'a str], query: &str) -> Vec<&'a str> {
    let needle = query.trim().to_lowercase();
    options
        .iter()
        .copied()
        .filter(|option| option.to_lowercase().contains(&needle))
        .collect()
}

/// Flattened purchase location list with `OTHER` appended, as the picker shows it
pub fn purchase_location_options() -> Vec<&'static str> {
    PURCHASE_LOCATIONS
        .iter()
        .flat_map(|group| group.locations.iter().copied())
        .chain(std::iter::once(OTHER))
        .collect()
}
