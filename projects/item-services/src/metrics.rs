use prometheus::{Encoder, Histogram, HistogramOpts, HistogramTimer, IntCounter, Registry, TextEncoder};

pub const REQUESTS_TOTAL: &str = "api_requests_total";
pub const REQUEST_LATENCY_SECONDS: &str = "api_request_latency_seconds";

/// Request counter and latency histogram of the metered service.
///
/// Owns its own [`Registry`] so each service instance (and each test) scrapes
/// only what it registered.
pub struct RequestMetrics {
    registry: Registry,
    requests_total: IntCounter,
    request_latency: Histogram,
}

impl RequestMetrics {
    /// # Errors
    ///
    /// Fails if either metric cannot be registered.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests_total = IntCounter::new(REQUESTS_TOTAL, "Total API Requests")?;
        registry.register(Box::new(requests_total.clone()))?;

        let request_latency = Histogram::with_opts(HistogramOpts::new(
            REQUEST_LATENCY_SECONDS,
            "API Request Latency",
        ))?;
        registry.register(Box::new(request_latency.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            request_latency,
        })
    }

    pub fn inc_requests(&self) {
        self.requests_total.inc();
    }

    pub fn requests_total(&self) -> u64 {
        self.requests_total.get()
    }

    /// Starts a latency observation that is recorded when the timer drops.
    pub fn start_timer(&self) -> HistogramTimer {
        self.request_latency.start_timer()
    }

    pub fn latency_sample_count(&self) -> u64 {
        self.request_latency.get_sample_count()
    }

    /// Serialize the registry to the Prometheus text exposition format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_starts_at_zero_and_increments() {
        let metrics = RequestMetrics::new().expect("metrics");
        assert_eq!(metrics.requests_total(), 0);
        metrics.inc_requests();
        metrics.inc_requests();
        assert_eq!(metrics.requests_total(), 2);
    }

    #[test]
    fn test_timer_records_on_drop() {
        let metrics = RequestMetrics::new().expect("metrics");
        {
            let _timer = metrics.start_timer();
        }
        assert_eq!(metrics.latency_sample_count(), 1);
    }

    #[test]
    fn test_render_lists_both_metric_families() {
        let metrics = RequestMetrics::new().expect("metrics");
        metrics.inc_requests();
        drop(metrics.start_timer());

        let text = metrics.render().expect("render");
        assert!(text.contains("# TYPE api_requests_total counter"));
        assert!(text.contains("api_requests_total 1"));
        assert!(text.contains("# TYPE api_request_latency_seconds histogram"));
        assert!(text.contains("api_request_latency_seconds_count 1"));
    }

    #[test]
    fn test_instances_do_not_share_state() {
        let a = RequestMetrics::new().expect("metrics");
        let b = RequestMetrics::new().expect("metrics");
        a.inc_requests();
        assert_eq!(b.requests_total(), 0);
    }
}
