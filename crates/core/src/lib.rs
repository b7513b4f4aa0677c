pub mod chat;
pub mod error;
pub mod form;
pub mod itinerary;
pub mod models;
pub mod prompt;
pub mod validation;

pub use chat::{ChatMessage, ChatModel, ChatRole};
pub use error::{ConfigError, GenerationError};
pub use form::{trip_form, FieldControl, FormField, FormSchema};
pub use itinerary::{itinerary_text, BUSY_MESSAGE, ERROR_MARKER, NO_RESPONSE_TEXT, SUCCESS_BANNER};
pub use models::*;
pub use prompt::{build_itinerary_messages, build_user_instruction, SYSTEM_INSTRUCTION};
pub use validation::{validate_trip, ValidationIssue, ValidationReport};
