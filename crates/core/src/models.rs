use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Interest {
    #[default]
    #[serde(rename = "ALL")]
    All,
    Culture,
    Food,
    Nature,
    Shopping,
    History,
    Art,
    Adventure,
    Relaxation,
}

impl Interest {
    pub const VARIANTS: [Interest; 9] = [
        Self::All,
        Self::Culture,
        Self::Food,
        Self::Nature,
        Self::Shopping,
        Self::History,
        Self::Art,
        Self::Adventure,
        Self::Relaxation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Culture => "Culture",
            Self::Food => "Food",
            Self::Nature => "Nature",
            Self::Shopping => "Shopping",
            Self::History => "History",
            Self::Art => "Art",
            Self::Adventure => "Adventure",
            Self::Relaxation => "Relaxation",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let key = option_key(value);
        Self::VARIANTS
            .into_iter()
            .find(|variant| option_key(variant.label()) == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MealPreference {
    #[default]
    #[serde(rename = "No Preference")]
    NoPreference,
    Vegetarian,
    Vegan,
    #[serde(rename = "Non-Vegetarian")]
    NonVegetarian,
}

impl MealPreference {
    pub const VARIANTS: [MealPreference; 4] = [
        Self::NoPreference,
        Self::Vegetarian,
        Self::Vegan,
        Self::NonVegetarian,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::NoPreference => "No Preference",
            Self::Vegetarian => "Vegetarian",
            Self::Vegan => "Vegan",
            Self::NonVegetarian => "Non-Vegetarian",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let key = option_key(value);
        Self::VARIANTS
            .into_iter()
            .find(|variant| option_key(variant.label()) == key)
    }
}

/// Returned when a select value matches none of the known options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {field} option `{value}` (expected one of: {expected})")]
pub struct UnknownOption {
    pub field: &'static str,
    pub value: String,
    pub expected: String,
}

impl FromStr for Interest {
    type Err = UnknownOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| UnknownOption {
            field: "interest",
            value: value.to_string(),
            expected: join_labels(Self::VARIANTS.iter().map(|v| v.label())),
        })
    }
}

impl FromStr for MealPreference {
    type Err = UnknownOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| UnknownOption {
            field: "meal preference",
            value: value.to_string(),
            expected: join_labels(Self::VARIANTS.iter().map(|v| v.label())),
        })
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for MealPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The seven form fields of one submission. Values are kept exactly as the
/// user entered them; validation reports problems without rewriting fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    pub source: String,
    pub destination: String,
    #[serde(default)]
    pub interest: Interest,
    #[serde(default)]
    pub budget: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub meal_preference: MealPreference,
    #[serde(default)]
    pub special_requirements: Option<String>,
}

impl TripRequest {
    /// Special requirements as they appear in the prompt: blank input
    /// becomes the literal `None`.
    pub fn special_requirements_or_none(&self) -> &str {
        self.special_requirements
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or("None")
    }
}

/// What one press of the submit trigger produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub warnings: Vec<String>,
    pub banner: Option<String>,
    pub itinerary: Option<String>,
}

impl Submission {
    pub fn was_requested(&self) -> bool {
        self.itinerary.is_some()
    }
}

fn option_key(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

fn join_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels.collect::<Vec<_>>().join(", ")
}
