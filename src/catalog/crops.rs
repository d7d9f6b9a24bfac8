//! Crop display metadata, keyed by lowercase label

use serde::Serialize;

/// Display fields for one crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CropInfo {
    pub name: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    pub season: &'static str,
    pub duration: &'static str,
    pub tips: &'static [&'static str],
}

/// (label, info) pairs. Labels match the label encoder classes.
const CROPS: &[(&str, CropInfo)] = &[
    (
        "rice",
        CropInfo {
            name: "Rice",
            emoji: "🌾",
            description: "Staple food grain, requires high water and humidity",
            season: "Monsoon/Kharif",
            duration: "90-150 days",
            tips: &["Requires standing water", "Needs high nitrogen", "Plant during monsoon"],
        },
    ),
    (
        "maize",
        CropInfo {
            name: "Maize",
            emoji: "🌽",
            description: "Versatile cereal crop, good for animal feed and human consumption",
            season: "Kharif/Rabi",
            duration: "80-100 days",
            tips: &[
                "Moderate water requirement",
                "Good for crop rotation",
                "Harvest when kernels are hard",
            ],
        },
    ),
    (
        "chickpea",
        CropInfo {
            name: "Chickpea",
            emoji: "🫘",
            description: "Protein-rich legume, improves soil fertility",
            season: "Rabi",
            duration: "90-120 days",
            tips: &["Drought tolerant", "Fixes nitrogen in soil", "Good for intercropping"],
        },
    ),
    (
        "kidneybeans",
        CropInfo {
            name: "Kidney Beans",
            emoji: "🫘",
            description: "High protein legume, popular in many cuisines",
            season: "Kharif/Rabi",
            duration: "90-120 days",
            tips: &[
                "Well-drained soil needed",
                "Support required for climbing varieties",
                "Harvest when pods are dry",
            ],
        },
    ),
    (
        "pigeonpeas",
        CropInfo {
            name: "Pigeon Peas",
            emoji: "🫘",
            description: "Drought-resistant legume, important for food security",
            season: "Kharif",
            duration: "120-180 days",
            tips: &["Very drought tolerant", "Deep root system", "Good for dry regions"],
        },
    ),
    (
        "mothbeans",
        CropInfo {
            name: "Moth Beans",
            emoji: "🫘",
            description: "Drought-resistant legume, grows well in arid conditions",
            season: "Kharif",
            duration: "60-90 days",
            tips: &["Excellent for dry areas", "Low water requirement", "Fast growing"],
        },
    ),
    (
        "mungbean",
        CropInfo {
            name: "Mung Bean",
            emoji: "🫘",
            description: "Quick-growing legume, popular for sprouts",
            season: "Kharif/Rabi",
            duration: "60-90 days",
            tips: &[
                "Short duration crop",
                "Good for multiple cropping",
                "Harvest when pods turn black",
            ],
        },
    ),
    (
        "blackgram",
        CropInfo {
            name: "Black Gram",
            emoji: "🫘",
            description: "Protein-rich pulse, improves soil health",
            season: "Kharif/Rabi",
            duration: "80-100 days",
            tips: &["Moderate water needs", "Good soil conditioner", "Popular in Indian cuisine"],
        },
    ),
    (
        "lentil",
        CropInfo {
            name: "Lentil",
            emoji: "🫘",
            description: "Nutritious pulse, easy to grow and store",
            season: "Rabi",
            duration: "80-110 days",
            tips: &["Cool season crop", "Low water requirement", "Good for crop rotation"],
        },
    ),
    (
        "pomegranate",
        CropInfo {
            name: "Pomegranate",
            emoji: "🍎",
            description: "Nutritious fruit tree, drought tolerant once established",
            season: "Year-round",
            duration: "3-4 years to fruit",
            tips: &["Deep watering needed", "Prune regularly", "Harvest when color deepens"],
        },
    ),
    (
        "banana",
        CropInfo {
            name: "Banana",
            emoji: "🍌",
            description: "Tropical fruit, high yield and quick returns",
            season: "Year-round",
            duration: "9-12 months",
            tips: &[
                "Requires high humidity",
                "Needs regular watering",
                "Rich organic matter preferred",
            ],
        },
    ),
    (
        "mango",
        CropInfo {
            name: "Mango",
            emoji: "🥭",
            description: "King of fruits, high commercial value",
            season: "Summer",
            duration: "3-5 years to fruit",
            tips: &["Deep root system", "Prune after harvest", "Protect from strong winds"],
        },
    ),
    (
        "grapes",
        CropInfo {
            name: "Grapes",
            emoji: "🍇",
            description: "High-value fruit, requires support structure",
            season: "Year-round",
            duration: "2-3 years to fruit",
            tips: &["Trellis support needed", "Prune in winter", "Well-drained soil essential"],
        },
    ),
    (
        "watermelon",
        CropInfo {
            name: "Watermelon",
            emoji: "🍉",
            description: "Summer fruit, high water content",
            season: "Summer",
            duration: "70-90 days",
            tips: &["High water requirement", "Warm weather crop", "Harvest when tendril dries"],
        },
    ),
    (
        "muskmelon",
        CropInfo {
            name: "Muskmelon",
            emoji: "🍈",
            description: "Sweet summer fruit, good market demand",
            season: "Summer",
            duration: "70-90 days",
            tips: &["Warm climate needed", "Regular watering", "Harvest when stem slips easily"],
        },
    ),
    (
        "apple",
        CropInfo {
            name: "Apple",
            emoji: "🍎",
            description: "Temperate fruit, requires cold winters",
            season: "Temperate regions",
            duration: "3-5 years to fruit",
            tips: &["Cold winter required", "Well-drained soil", "Regular pruning essential"],
        },
    ),
    (
        "orange",
        CropInfo {
            name: "Orange",
            emoji: "🍊",
            description: "Citrus fruit, rich in vitamin C",
            season: "Winter",
            duration: "3-4 years to fruit",
            tips: &["Moderate climate preferred", "Regular watering", "Protect from frost"],
        },
    ),
    (
        "papaya",
        CropInfo {
            name: "Papaya",
            emoji: "🥭",
            description: "Tropical fruit, fast growing",
            season: "Year-round",
            duration: "6-9 months to fruit",
            tips: &["Warm climate needed", "Well-drained soil", "Harvest when color changes"],
        },
    ),
    (
        "coconut",
        CropInfo {
            name: "Coconut",
            emoji: "🥥",
            description: "Multi-purpose tree, coastal regions preferred",
            season: "Year-round",
            duration: "5-7 years to fruit",
            tips: &["Coastal areas ideal", "High humidity needed", "Regular irrigation"],
        },
    ),
    (
        "cotton",
        CropInfo {
            name: "Cotton",
            emoji: "🌿",
            description: "Fiber crop, important for textile industry",
            season: "Kharif",
            duration: "150-180 days",
            tips: &["Warm climate needed", "Moderate water", "Harvest when bolls open"],
        },
    ),
    (
        "jute",
        CropInfo {
            name: "Jute",
            emoji: "🌿",
            description: "Fiber crop, requires high rainfall",
            season: "Kharif",
            duration: "120-150 days",
            tips: &["High rainfall needed", "Flooding tolerant", "Harvest before flowering"],
        },
    ),
    (
        "coffee",
        CropInfo {
            name: "Coffee",
            emoji: "☕",
            description: "High-value crop, requires specific altitude and climate",
            season: "Year-round",
            duration: "3-4 years to fruit",
            tips: &["Elevated regions preferred", "Shade required", "Well-drained soil essential"],
        },
    ),
];

/// Look up display metadata for a crop label, case-insensitively.
/// Surrounding whitespace is part of the label and will not match.
pub fn lookup(label: &str) -> Option<&'static CropInfo> {
    let key = label.to_lowercase();
    CROPS
        .iter()
        .find(|(label, _)| *label == key)
        .map(|(_, info)| info)
}

/// Every known (label, info) pair, in table order.
pub fn all_crops() -> impl Iterator<Item = (&'static str, &'static CropInfo)> {
    CROPS.iter().map(|(label, info)| (*label, info))
}
