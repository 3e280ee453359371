use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    #[default]
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    pub fn parse(value: &str) -> crate::Result<Self> {
        match MealType::from_str(value.trim()) {
            Ok(meal_type) => Ok(meal_type),
            Err(_) => crate::user!("Invalid meal_type"),
        }
    }

    /// Clock time printed on a plan when the family did not configure one.
    pub fn plan_time(&self) -> &'static str {
        match self {
            MealType::Breakfast => "08:00",
            MealType::Lunch => "12:00",
            MealType::Dinner => "18:00",
        }
    }

    /// Family meal start used until a holder changes it.
    pub fn default_start(&self) -> &'static str {
        match self {
            MealType::Breakfast => "08:00",
            MealType::Lunch => "11:00",
            MealType::Dinner => "17:30",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(MealType::parse("LUNCH").unwrap(), MealType::Lunch);
        assert_eq!(MealType::parse(" breakfast ").unwrap(), MealType::Breakfast);
        assert_eq!(MealType::Dinner.to_string(), "dinner");
        assert_eq!(
            MealType::parse("brunch").unwrap_err().to_string(),
            "Invalid meal_type"
        );
    }
}
