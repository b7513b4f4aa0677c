use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct AppMetrics {
    submissions_total: AtomicU64,
    blocked_total: AtomicU64,
    generations_total: AtomicU64,
    generation_errors_total: AtomicU64,
    empty_responses_total: AtomicU64,
    total_generation_millis: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub submissions_total: u64,
    pub blocked_total: u64,
    pub generations_total: u64,
    pub generation_errors_total: u64,
    pub empty_responses_total: u64,
    pub avg_generation_millis: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_submission(&self) {
        self.submissions_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_blocked(&self) {
        self.blocked_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_generation(&self) {
        self.generations_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_generation_error(&self) {
        self.generation_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_empty_response(&self) {
        self.empty_responses_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn observe_generation_latency(&self, duration: Duration) {
        self.total_generation_millis
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let generations = self.generations_total.load(Ordering::Relaxed);
        let latency = self.total_generation_millis.load(Ordering::Relaxed);

        MetricsSnapshot {
            submissions_total: self.submissions_total.load(Ordering::Relaxed),
            blocked_total: self.blocked_total.load(Ordering::Relaxed),
            generations_total: generations,
            generation_errors_total: self.generation_errors_total.load(Ordering::Relaxed),
            empty_responses_total: self.empty_responses_total.load(Ordering::Relaxed),
            avg_generation_millis: if generations == 0 {
                0.0
            } else {
                latency as f64 / generations as f64
            },
        }
    }
}

/// JSON logs on stderr so stdout stays free for itinerary output.
pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,wayfarer_agents=info,wayfarer_llm=info",
                service_name
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(std::io::stderr)
            .init();
    });
}
