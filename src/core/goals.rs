/// Simplified, weight-only basal metabolic rate factor (kcal per kg)
const BMR_PER_KG: f64 = 22.0;
/// Multiplier used when the activity level is missing or unknown
const DEFAULT_ACTIVITY_MULTIPLIER: f64 = 1.55;
const WEIGHT_LOSS_DEFICIT: f64 = 500.0;
const MUSCLE_GAIN_SURPLUS: f64 = 300.0;
const PROTEIN_GRAMS_PER_KG: f64 = 2.2;
const FAT_CALORIE_SHARE: f64 = 0.25;

const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
const KCAL_PER_GRAM_CARBS: f64 = 4.0;
const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Dietary goal selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalType {
    WeightLoss,
    MuscleGain,
    Maintenance,
}

impl GoalType {
    /// Parse a goal label; anything unrecognized is treated as maintenance
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("weight_loss") => GoalType::WeightLoss,
            Some("muscle_gain") => GoalType::MuscleGain,
            _ => GoalType::Maintenance,
        }
    }
}

/// Self-reported activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "sedentary" => Some(ActivityLevel::Sedentary),
            "light" => Some(ActivityLevel::Light),
            "moderate" => Some(ActivityLevel::Moderate),
            "active" => Some(ActivityLevel::Active),
            "very_active" => Some(ActivityLevel::VeryActive),
            _ => None,
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

/// Inputs to the goal calculator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalInput {
    pub goal_type: GoalType,
    pub current_weight: f64,
    pub target_weight: f64,
    /// `None` when the label was missing or unknown
    pub activity_level: Option<ActivityLevel>,
}

/// Daily calorie and macro targets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroTargets {
    pub calories: i64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Derive daily targets from a user's weight, activity and goal
///
/// Formula:
/// maintenance = weight * 22 * activity_multiplier
/// calories    = maintenance - 500 (loss) | + 300 (gain) | + 0, truncated
/// protein     = weight * 2.2 g
/// fat         = 25% of calories / 9
/// carbs       = remaining calories / 4
///
/// Carbs are not clamped and go negative when protein and fat already
/// exceed the calorie budget.
pub fn calculate_targets(input: &GoalInput) -> MacroTargets {
    let bmr = input.current_weight * BMR_PER_KG;
    let multiplier = input
        .activity_level
        .map(ActivityLevel::multiplier)
        .unwrap_or(DEFAULT_ACTIVITY_MULTIPLIER);
    let maintenance = bmr * multiplier;

    let adjusted = match input.goal_type {
        GoalType::WeightLoss => maintenance - WEIGHT_LOSS_DEFICIT,
        GoalType::MuscleGain => maintenance + MUSCLE_GAIN_SURPLUS,
        GoalType::Maintenance => maintenance,
    };
    let calories = adjusted.trunc() as i64;
    let calories_f = calories as f64;

    let protein = input.current_weight * PROTEIN_GRAMS_PER_KG;
    let fat = calories_f * FAT_CALORIE_SHARE / KCAL_PER_GRAM_FAT;
    let carbs = (calories_f - protein * KCAL_PER_GRAM_PROTEIN - fat * KCAL_PER_GRAM_FAT) / KCAL_PER_GRAM_CARBS;

    MacroTargets {
        calories,
        protein,
        carbs,
        fat,
    }
}

/// Round grams to one decimal place for display
#[inline]
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
