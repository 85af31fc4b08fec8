/// Energy and battery terms a notice must mention to be kept
pub const KEYWORDS: &[&str] = &[
    "battery",
    "batteries",
    "energy storage",
    "bess",
    "powerwall",
    "battery energy storage",
    "solar battery",
    "home battery",
    "residential energy storage",
    "lithium",
    "inverter",
    "solar pv",
    "photovoltaic",
    "renewable energy",
    "ev charging",
    "electric vehicle charging",
    "microgrid",
];

/// Case-insensitive substring test against [`KEYWORDS`].
///
/// No tokenization or word boundaries: "lithium-ion" matches "lithium",
/// and so does any word that merely contains a keyword.
pub fn matches(text: &str) -> bool {
    let lower = text.to_lowercase();
    KEYWORDS.iter().any(|kw| lower.contains(kw))
}
