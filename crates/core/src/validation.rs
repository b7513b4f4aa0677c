use chrono::NaiveDate;
use serde::Serialize;

use crate::models::TripRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationIssue {
    MissingLocations,
    StartDateInPast,
    EndBeforeStart,
}

impl ValidationIssue {
    pub fn message(self) -> &'static str {
        match self {
            Self::MissingLocations => "Please enter both departure and destination locations.",
            Self::StartDateInPast => "Start date cannot be in the past.",
            Self::EndBeforeStart => "End date cannot be earlier than start date.",
        }
    }

    /// Only missing locations suppress the itinerary call. Date problems are
    /// reported but the request still goes out.
    pub fn blocks_request(self) -> bool {
        matches!(self, Self::MissingLocations)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn proceed(&self) -> bool {
        !self.issues.iter().any(|issue| issue.blocks_request())
    }

    pub fn messages(&self) -> Vec<String> {
        self.issues
            .iter()
            .map(|issue| issue.message().to_string())
            .collect()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Runs every clause in order; a failing clause does not stop later ones.
pub fn validate_trip(request: &TripRequest, today: NaiveDate) -> ValidationReport {
    let mut issues = Vec::new();

    if request.source.trim().is_empty() || request.destination.trim().is_empty() {
        issues.push(ValidationIssue::MissingLocations);
    }

    if request.start_date < today {
        issues.push(ValidationIssue::StartDateInPast);
    }

    if request.end_date < request.start_date {
        issues.push(ValidationIssue::EndBeforeStart);
    }

    ValidationReport { issues }
}
