//! Compiled-in reference data: the known plants and the feature cards.

/// A known plant and its medicinal uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlantInfo {
    pub name: &'static str,
    pub uses: &'static [&'static str],
}

/// Title and body text behind one feature card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureInfo {
    pub key: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

pub static PLANTS: &[PlantInfo] = &[
    PlantInfo {
        name: "Bhibitaki",
        uses: &[
            "Digestive health and bowel regulation",
            "Respiratory ailments like asthma and bronchitis",
            "Antioxidant properties for overall wellness",
            "Hair and skin health improvement",
            "Liver detoxification support",
        ],
    },
    PlantInfo {
        name: "Candelabra plant",
        uses: &[
            "Treatment of skin conditions and wounds",
            "Anti-inflammatory properties",
            "Pain relief for joints and muscles",
            "Antimicrobial effects",
            "Traditional fever reduction",
        ],
    },
    PlantInfo {
        name: "Chebulic Myrobalan",
        uses: &[
            "Powerful digestive aid and laxative",
            "Antioxidant and anti-aging properties",
            "Cardiovascular health support",
            "Immune system strengthening",
            "Mental clarity and memory enhancement",
        ],
    },
    PlantInfo {
        name: "Gotu Kola",
        uses: &[
            "Brain function and memory improvement",
            "Wound healing and skin regeneration",
            "Anxiety and stress reduction",
            "Circulation enhancement",
            "Anti-inflammatory effects",
        ],
    },
    PlantInfo {
        name: "Holy Basil",
        uses: &[
            "Stress reduction and adaptogenic properties",
            "Respiratory health and cough relief",
            "Blood sugar regulation",
            "Immune system support",
            "Anti-inflammatory and antioxidant effects",
        ],
    },
    PlantInfo {
        name: "Indian Borage",
        uses: &[
            "Respiratory ailments like cold and cough",
            "Digestive disorders and stomach pain",
            "Skin conditions and wound healing",
            "Fever reduction",
            "Antimicrobial properties",
        ],
    },
    PlantInfo {
        name: "Lemongrass",
        uses: &[
            "Digestive health and stomach disorders",
            "Antimicrobial and antifungal properties",
            "Anxiety and stress relief",
            "Pain and inflammation reduction",
            "Detoxification and cleansing",
        ],
    },
    PlantInfo {
        name: "Longevity Spinach",
        uses: &[
            "Anti-aging and longevity promotion",
            "Blood sugar regulation",
            "Cardiovascular health support",
            "Antioxidant protection",
            "Immune system enhancement",
        ],
    },
    PlantInfo {
        name: "Madagascar Periwinkle",
        uses: &[
            "Diabetes management and blood sugar control",
            "Cancer treatment support (vincristine/vinblastine)",
            "Wound healing properties",
            "Antimicrobial effects",
            "Blood pressure regulation",
        ],
    },
    PlantInfo {
        name: "Neem Tree",
        uses: &[
            "Skin conditions and acne treatment",
            "Antimicrobial and antifungal properties",
            "Dental health and oral hygiene",
            "Immune system support",
            "Blood purification and detox",
        ],
    },
];

pub static FEATURES: &[FeatureInfo] = &[
    FeatureInfo {
        key: "ai-powered",
        title: "AI-Powered Technology",
        body: "Our model is powered by a state-of-the-art deep learning algorithm trained on \
               over 10,000 medicinal leaf images. It accurately identifies each plant species, \
               ensuring fast and reliable results for researchers, herbalists, and nature \
               enthusiasts. Just scan a leaf, and let the AI do the rest!",
    },
    FeatureInfo {
        key: "plant-types",
        title: "10 Plant Types Database",
        body: "Explore a comprehensive database of 10 powerful medicinal plants, including \
               Neem Tree, Holy Basil, Gotu Kola, and more. Each plant entry is supported with \
               high-resolution samples and precise classification, making it easy to learn \
               and compare.",
    },
    FeatureInfo {
        key: "medicinal-uses",
        title: "Medicinal Uses & Benefits",
        body: "Discover the natural healing properties of each plant. From boosting immunity \
               to reducing inflammation, we provide detailed therapeutic information backed by \
               traditional and modern sources. Perfect for health-conscious users looking for \
               natural remedies.",
    },
];

/// Exact-match lookup of a plant by name.
pub fn plant(name: &str) -> Option<&'static PlantInfo> {
    PLANTS.iter().find(|plant| plant.name == name)
}

pub fn feature(key: &str) -> Option<&'static FeatureInfo> {
    FEATURES.iter().find(|feature| feature.key == key)
}
