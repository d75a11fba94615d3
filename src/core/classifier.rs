use crate::models::{ClassifiedNutrient, NutrientCategory, UpstreamRecord};

/// How a rule inspects the lower-cased nutrient name
#[derive(Debug, Clone, Copy)]
enum Pattern {
    /// Name contains any of the terms
    Any(&'static [&'static str]),
    /// Name contains every one of the terms
    All(&'static [&'static str]),
    /// Either sub-pattern matches
    Either(&'static Pattern, &'static Pattern),
}

impl Pattern {
    fn matches(&self, name: &str) -> bool {
        match self {
            Pattern::Any(terms) => terms.iter().any(|t| name.contains(t)),
            Pattern::All(terms) => terms.iter().all(|t| name.contains(t)),
            Pattern::Either(a, b) => a.matches(name) || b.matches(name),
        }
    }
}

/// Classification rules, evaluated in order; the first match wins.
///
/// Order matters: USDA names often match several rules, e.g.
/// "Energy from protein" must stay a calorie entry.
const RULES: &[(Pattern, NutrientCategory)] = &[
    (Pattern::Any(&["energy", "calorie"]), NutrientCategory::Calories),
    (Pattern::Any(&["protein"]), NutrientCategory::Protein),
    (
        Pattern::All(&["carbohydrate", "by difference"]),
        NutrientCategory::Carbohydrates,
    ),
    (
        Pattern::Either(&Pattern::Any(&["total lipid"]), &Pattern::All(&["fat", "total"])),
        NutrientCategory::Fat,
    ),
    (
        Pattern::Any(&["vitamin", "folate", "niacin", "riboflavin", "thiamin"]),
        NutrientCategory::Micronutrient,
    ),
    (
        Pattern::Any(&["calcium", "iron", "magnesium", "phosphorus", "potassium", "sodium", "zinc"]),
        NutrientCategory::Micronutrient,
    ),
];

/// Map a free-text USDA nutrient name to its category
///
/// Case-insensitive substring matching on the untrimmed name. Names that
/// match no rule fall back to [`NutrientCategory::Other`].
pub fn classify(name: &str) -> NutrientCategory {
    let lowered = name.to_lowercase();

    RULES
        .iter()
        .find(|(pattern, _)| pattern.matches(&lowered))
        .map(|(_, category)| *category)
        .unwrap_or(NutrientCategory::Other)
}

impl From<UpstreamRecord> for ClassifiedNutrient {
    fn from(record: UpstreamRecord) -> Self {
        let category = classify(&record.name);
        ClassifiedNutrient {
            name: record.name,
            amount: record.value,
            unit: record.unit,
            category,
        }
    }
}
