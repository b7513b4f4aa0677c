use serde::Serialize;

use crate::models::{Interest, MealPreference};

pub const APP_TITLE: &str = "🌍 Smart AI Travel Planner";
pub const APP_TAGLINE: &str = "Plan your journey effortlessly! Get AI-powered travel options with estimated costs and helpful insights.";
pub const SUBMIT_LABEL: &str = "🔎 Get Travel Suggestions";
pub const BUDGET_STEP: u64 = 500;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldControl {
    Text { placeholder: &'static str },
    TextArea { placeholder: &'static str },
    Select { options: Vec<&'static str>, default: &'static str },
    Number { min: u64, step: u64, default: u64 },
    Date,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub control: FieldControl,
}

/// Everything a presentation layer needs to render the trip form.
#[derive(Debug, Clone, Serialize)]
pub struct FormSchema {
    pub title: &'static str,
    pub tagline: &'static str,
    pub fields: Vec<FormField>,
    pub submit_label: &'static str,
}

pub fn trip_form() -> FormSchema {
    FormSchema {
        title: APP_TITLE,
        tagline: APP_TAGLINE,
        fields: vec![
            FormField {
                name: "source",
                label: "📍 Departure Location",
                control: FieldControl::Text {
                    placeholder: "E.g., Delhi",
                },
            },
            FormField {
                name: "destination",
                label: "🎯 Destination",
                control: FieldControl::Text {
                    placeholder: "E.g., Kolkata",
                },
            },
            FormField {
                name: "interest",
                label: "💡 Travel Interest",
                control: FieldControl::Select {
                    options: Interest::VARIANTS.iter().map(|v| v.label()).collect(),
                    default: Interest::default().label(),
                },
            },
            FormField {
                name: "budget",
                label: "💰 Budget (in ₹)",
                control: FieldControl::Number {
                    min: 0,
                    step: BUDGET_STEP,
                    default: 0,
                },
            },
            FormField {
                name: "start_date",
                label: "🗓️ Start Date",
                control: FieldControl::Date,
            },
            FormField {
                name: "end_date",
                label: "🗓️ End Date",
                control: FieldControl::Date,
            },
            FormField {
                name: "meal_preference",
                label: "🍽️ Meal Preference",
                control: FieldControl::Select {
                    options: MealPreference::VARIANTS.iter().map(|v| v.label()).collect(),
                    default: MealPreference::default().label(),
                },
            },
            FormField {
                name: "special_requirements",
                label: "📝 Other Special Requirements",
                control: FieldControl::TextArea {
                    placeholder: "Wheelchair access, pets allowed, language preference, etc.",
                },
            },
        ],
        submit_label: SUBMIT_LABEL,
    }
}

impl FormSchema {
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.name == name)
    }
}
