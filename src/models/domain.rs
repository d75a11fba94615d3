use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Semantic bucket a nutrient falls into after classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NutrientCategory {
    Calories,
    Protein,
    Carbohydrates,
    Fat,
    Micronutrient,
    Other,
}

impl NutrientCategory {
    /// Calories, protein, carbohydrates and fat
    pub fn is_macro(self) -> bool {
        matches!(
            self,
            NutrientCategory::Calories
                | NutrientCategory::Protein
                | NutrientCategory::Carbohydrates
                | NutrientCategory::Fat
        )
    }
}

/// A single nutrient observation as reported by the USDA API
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRecord {
    pub name: String,
    pub value: f64,
    pub unit: String,
}

impl UpstreamRecord {
    pub fn new(name: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            unit: unit.into(),
        }
    }
}

/// Nutrient tagged with its category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedNutrient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub category: NutrientCategory,
}

/// Search result shape returned to the frontend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodSummary {
    #[serde(rename = "fdcId")]
    pub fdc_id: Option<u64>,
    pub description: Option<String>,
    #[serde(rename = "dataType")]
    pub data_type: Option<String>,
    #[serde(rename = "brandOwner")]
    pub brand_owner: Option<String>,
    /// Macro nutrients only, in upstream order
    pub nutrients: Vec<ClassifiedNutrient>,
}

/// Full nutrient breakdown for a single food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodDetail {
    #[serde(rename = "fdcId")]
    pub fdc_id: Option<u64>,
    pub description: Option<String>,
    #[serde(rename = "dataType")]
    pub data_type: Option<String>,
    #[serde(rename = "brandOwner")]
    pub brand_owner: Option<String>,
    #[serde(rename = "servingSize")]
    pub serving_size: Option<f64>,
    #[serde(rename = "servingSizeUnit")]
    pub serving_size_unit: Option<String>,
    #[serde(rename = "householdServingFullText")]
    pub household_serving_full_text: Option<String>,
    pub macronutrients: BTreeMap<NutrientCategory, ClassifiedNutrient>,
    pub micronutrients: BTreeMap<String, ClassifiedNutrient>,
    #[serde(rename = "otherNutrients")]
    pub other_nutrients: BTreeMap<String, ClassifiedNutrient>,
}

impl FoodDetail {
    /// Number of nutrient entries across all three groups
    pub fn nutrient_count(&self) -> usize {
        self.macronutrients.len() + self.micronutrients.len() + self.other_nutrients.len()
    }
}

/// Normalized search results
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub foods: Vec<FoodSummary>,
    pub total_hits: u64,
}

/// Decode an explicit `null` the same way as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Raw USDA payloads. Upstream records are heterogeneous, so every field is
// optional and missing values decode as empty or zero.

/// `GET /foods/search` response body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpstreamSearchResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub foods: Vec<UpstreamFood>,
    #[serde(rename = "totalHits")]
    pub total_hits: Option<u64>,
}

/// Food entry inside a search response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpstreamFood {
    #[serde(rename = "fdcId")]
    pub fdc_id: Option<u64>,
    pub description: Option<String>,
    #[serde(rename = "dataType")]
    pub data_type: Option<String>,
    #[serde(rename = "brandOwner")]
    pub brand_owner: Option<String>,
    #[serde(rename = "foodNutrients", deserialize_with = "null_as_default")]
    pub food_nutrients: Vec<UpstreamSearchNutrient>,
}

/// Flat nutrient shape used by the search endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpstreamSearchNutrient {
    #[serde(rename = "nutrientName")]
    pub nutrient_name: Option<String>,
    pub value: Option<f64>,
    #[serde(rename = "unitName")]
    pub unit_name: Option<String>,
}

impl From<UpstreamSearchNutrient> for UpstreamRecord {
    fn from(raw: UpstreamSearchNutrient) -> Self {
        UpstreamRecord {
            name: raw.nutrient_name.unwrap_or_default(),
            value: raw.value.unwrap_or(0.0),
            unit: raw.unit_name.unwrap_or_default(),
        }
    }
}

/// `GET /food/{fdcId}` response body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpstreamFoodDetail {
    #[serde(rename = "fdcId")]
    pub fdc_id: Option<u64>,
    pub description: Option<String>,
    #[serde(rename = "dataType")]
    pub data_type: Option<String>,
    #[serde(rename = "brandOwner")]
    pub brand_owner: Option<String>,
    #[serde(rename = "servingSize")]
    pub serving_size: Option<f64>,
    #[serde(rename = "servingSizeUnit")]
    pub serving_size_unit: Option<String>,
    #[serde(rename = "householdServingFullText")]
    pub household_serving_full_text: Option<String>,
    #[serde(rename = "foodNutrients", deserialize_with = "null_as_default")]
    pub food_nutrients: Vec<UpstreamDetailNutrient>,
}

/// Nested nutrient shape used by the detail endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpstreamDetailNutrient {
    pub nutrient: Option<UpstreamNutrientInfo>,
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpstreamNutrientInfo {
    pub name: Option<String>,
    #[serde(rename = "unitName")]
    pub unit_name: Option<String>,
}

impl From<UpstreamDetailNutrient> for UpstreamRecord {
    fn from(raw: UpstreamDetailNutrient) -> Self {
        let info = raw.nutrient.unwrap_or_default();
        UpstreamRecord {
            name: info.name.unwrap_or_default(),
            value: raw.amount.unwrap_or(0.0),
            unit: info.unit_name.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_nutrient_missing_fields() {
        let raw: UpstreamDetailNutrient = serde_json::from_str(r#"{"amount": null}"#).unwrap();
        let record = UpstreamRecord::from(raw);
        assert_eq!(record, UpstreamRecord::new("", 0.0, ""));
    }

    #[test]
    fn test_search_food_without_nutrients() {
        let raw: UpstreamFood =
            serde_json::from_str(r#"{"fdcId": 1750340, "description": "Apples, fuji"}"#).unwrap();
        assert_eq!(raw.fdc_id, Some(1750340));
        assert!(raw.food_nutrients.is_empty());
        assert!(raw.brand_owner.is_none());
    }

    #[test]
    fn test_null_lists_decode_as_empty() {
        let search: UpstreamSearchResponse =
            serde_json::from_str(r#"{"totalHits": 0, "foods": null}"#).unwrap();
        assert!(search.foods.is_empty());
        assert_eq!(search.total_hits, Some(0));

        let food: UpstreamFood =
            serde_json::from_str(r#"{"fdcId": 1, "foodNutrients": null}"#).unwrap();
        assert!(food.food_nutrients.is_empty());

        let detail: UpstreamFoodDetail =
            serde_json::from_str(r#"{"fdcId": 171688, "foodNutrients": null}"#).unwrap();
        assert_eq!(detail.fdc_id, Some(171688));
        assert!(detail.food_nutrients.is_empty());
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&NutrientCategory::Carbohydrates).unwrap();
        assert_eq!(json, "\"carbohydrates\"");
    }
}
