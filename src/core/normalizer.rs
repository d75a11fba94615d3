use crate::models::{
    ClassifiedNutrient, FoodDetail, FoodSummary, NutrientCategory, SearchResult, UpstreamFood,
    UpstreamFoodDetail, UpstreamRecord, UpstreamSearchResponse,
};
use std::collections::BTreeMap;

/// Normalize a whole search response
pub fn summarize_search(response: UpstreamSearchResponse) -> SearchResult {
    SearchResult {
        total_hits: response.total_hits.unwrap_or(0),
        foods: response.foods.into_iter().map(summarize).collect(),
    }
}

/// Build the search preview for one food
///
/// Only calories, protein, carbohydrates and fat are kept, in upstream order.
pub fn summarize(food: UpstreamFood) -> FoodSummary {
    let nutrients = food
        .food_nutrients
        .into_iter()
        .map(UpstreamRecord::from)
        .map(ClassifiedNutrient::from)
        .filter(|n| n.category.is_macro())
        .collect();

    FoodSummary {
        fdc_id: food.fdc_id,
        description: food.description,
        data_type: food.data_type,
        brand_owner: food.brand_owner,
        nutrients,
    }
}

/// Build the full detail view for one food
///
/// Every nutrient lands in exactly one group. Macros are keyed by category
/// and the other groups by the upstream name; later duplicates replace
/// earlier ones.
pub fn detail(food: UpstreamFoodDetail) -> FoodDetail {
    let mut macronutrients = BTreeMap::new();
    let mut micronutrients = BTreeMap::new();
    let mut other_nutrients = BTreeMap::new();

    for raw in food.food_nutrients {
        let nutrient = ClassifiedNutrient::from(UpstreamRecord::from(raw));
        match nutrient.category {
            category if category.is_macro() => {
                macronutrients.insert(category, nutrient);
            }
            NutrientCategory::Micronutrient => {
                micronutrients.insert(nutrient.name.clone(), nutrient);
            }
            _ => {
                other_nutrients.insert(nutrient.name.clone(), nutrient);
            }
        }
    }

    FoodDetail {
        fdc_id: food.fdc_id,
        description: food.description,
        data_type: food.data_type,
        brand_owner: food.brand_owner,
        serving_size: food.serving_size,
        serving_size_unit: food.serving_size_unit,
        household_serving_full_text: food.household_serving_full_text,
        macronutrients,
        micronutrients,
        other_nutrients,
    }
}
