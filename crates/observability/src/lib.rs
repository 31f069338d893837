use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct AppMetrics {
    requests_total: AtomicU64,
    chat_replies_total: AtomicU64,
    chat_fallback_total: AtomicU64,
    upstream_fetches_total: AtomicU64,
    upstream_failures_total: AtomicU64,
    latency_samples_total: AtomicU64,
    total_latency_millis: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub chat_replies_total: u64,
    pub chat_fallback_total: u64,
    pub upstream_fetches_total: u64,
    pub upstream_failures_total: u64,
    pub latency_samples_total: u64,
    pub avg_latency_millis: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_chat_reply(&self, fallback: bool) {
        self.chat_replies_total.fetch_add(1, Ordering::Relaxed);
        if fallback {
            self.chat_fallback_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn inc_upstream_fetch(&self) {
        self.upstream_fetches_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_upstream_failure(&self) {
        self.upstream_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn observe_latency(&self, duration: Duration) {
        self.latency_samples_total.fetch_add(1, Ordering::Relaxed);
        self.total_latency_millis
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let samples = self.latency_samples_total.load(Ordering::Relaxed);
        let latency = self.total_latency_millis.load(Ordering::Relaxed);

        MetricsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            chat_replies_total: self.chat_replies_total.load(Ordering::Relaxed),
            chat_fallback_total: self.chat_fallback_total.load(Ordering::Relaxed),
            upstream_fetches_total: self.upstream_fetches_total.load(Ordering::Relaxed),
            upstream_failures_total: self.upstream_failures_total.load(Ordering::Relaxed),
            latency_samples_total: samples,
            avg_latency_millis: if samples == 0 {
                0.0
            } else {
                latency as f64 / samples as f64
            },
        }
    }
}

pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,aama_api=info,aama_reviews=info",
                service_name
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .init();
    });
}
