//! Shared fixtures for the integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use wayfarer_core::{ChatMessage, ChatModel, GenerationError, TripRequest};

#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Text(String),
    Empty,
    Fail(String),
}

/// A `ChatModel` that answers from a script and records every call.
pub struct ScriptedModel {
    reply: ScriptedReply,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedModel {
    pub fn new(reply: ScriptedReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn text(text: &str) -> Arc<Self> {
        Self::new(ScriptedReply::Text(text.to_string()))
    }

    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    fn model_id(&self) -> &str {
        "scripted-model"
    }

    async fn invoke(&self, messages: &[ChatMessage]) -> Result<Option<String>, GenerationError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(messages.to_vec());
        }
        match &self.reply {
            ScriptedReply::Text(text) => Ok(Some(text.clone())),
            ScriptedReply::Empty => Ok(None),
            ScriptedReply::Fail(message) => Err(GenerationError::Transport(message.clone())),
        }
    }
}

pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 4, 1).unwrap_or_default()
}

pub fn delhi_to_kolkata() -> TripRequest {
    let start = fixed_today() + Days::new(7);
    TripRequest {
        source: "Delhi".to_string(),
        destination: "Kolkata".to_string(),
        interest: wayfarer_core::Interest::Culture,
        budget: 5000,
        start_date: start,
        end_date: start + Days::new(2),
        meal_preference: wayfarer_core::MealPreference::Vegetarian,
        special_requirements: Some(String::new()),
    }
}
