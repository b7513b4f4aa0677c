use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use wayfarer_core::{
    build_itinerary_messages, itinerary_text, validate_trip, ChatModel, Submission, TripRequest,
    SUCCESS_BANNER,
};
use wayfarer_observability::AppMetrics;

/// Runs one press of the submit trigger: validate, then ask the model for an
/// itinerary when both locations are present.
#[derive(Clone)]
pub struct TripPlanner {
    model: Arc<dyn ChatModel>,
    metrics: Arc<AppMetrics>,
}

impl TripPlanner {
    pub fn new(model: Arc<dyn ChatModel>, metrics: Arc<AppMetrics>) -> Self {
        Self { model, metrics }
    }

    pub fn model_id(&self) -> &str {
        self.model.model_id()
    }

    pub fn metrics(&self) -> &Arc<AppMetrics> {
        &self.metrics
    }

    #[instrument(skip(self, request), fields(submission_id = %Uuid::new_v4()))]
    pub async fn submit(&self, request: &TripRequest, today: NaiveDate) -> Submission {
        self.metrics.inc_submission();

        let report = validate_trip(request, today);
        let warnings = report.messages();

        if !report.proceed() {
            self.metrics.inc_blocked();
            info!(warnings = warnings.len(), invoked = false, "submission handled");
            return Submission {
                warnings,
                banner: None,
                itinerary: None,
            };
        }

        let itinerary = self.request_itinerary(request).await;
        info!(warnings = warnings.len(), invoked = true, "submission handled");

        Submission {
            warnings,
            banner: Some(SUCCESS_BANNER.to_string()),
            itinerary: Some(itinerary),
        }
    }

    /// Exactly one model call. The result is always display text.
    pub async fn request_itinerary(&self, request: &TripRequest) -> String {
        let started = Instant::now();
        self.metrics.inc_generation();

        let messages = build_itinerary_messages(request);
        let result = self.model.invoke(&messages).await;
        let elapsed = started.elapsed();
        self.metrics.observe_generation_latency(elapsed);

        match &result {
            Ok(Some(text)) if !text.trim().is_empty() => {
                info!(
                    model = %self.model.model_id(),
                    latency_ms = elapsed.as_millis() as u64,
                    chars = text.len(),
                    "itinerary generated"
                );
            }
            Ok(_) => {
                self.metrics.inc_empty_response();
                warn!(model = %self.model.model_id(), "model returned no content");
            }
            Err(err) => {
                self.metrics.inc_generation_error();
                warn!(model = %self.model.model_id(), error = %err, "itinerary generation failed");
            }
        }

        itinerary_text(result)
    }
}
