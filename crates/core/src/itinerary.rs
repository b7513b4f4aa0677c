use crate::error::GenerationError;

pub const NO_RESPONSE_TEXT: &str = "⚠️ No response from AI.";
pub const ERROR_MARKER: &str = "❌ Error fetching travel suggestions:";
pub const SUCCESS_BANNER: &str = "✅ Here are your travel recommendations:";
pub const BUSY_MESSAGE: &str = "⏳ Gathering best travel options...";

/// Collapses a model call into the text shown to the user. Failures become
/// display text here and are never raised past this point.
pub fn itinerary_text(result: Result<Option<String>, GenerationError>) -> String {
    match result {
        Ok(Some(text)) if !text.trim().is_empty() => text,
        Ok(_) => NO_RESPONSE_TEXT.to_string(),
        Err(err) => format!("{ERROR_MARKER} {err}"),
    }
}
