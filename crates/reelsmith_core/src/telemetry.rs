//! Tracing subscriber and span export.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::{
    trace::{RandomIdGenerator, Sampler, TracerProvider},
    Resource,
};
use opentelemetry_stdout::SpanExporter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "warn,reelsmith=info";

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global tracing subscriber.
///
/// Log lines go through a fmt layer; spans are exported to stdout through
/// OpenTelemetry, tagged with the `reelsmith` service name. Without
/// `RUST_LOG`, reelsmith crates log at `info` and everything else at `warn`.
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
pub fn init_telemetry() -> Result<(), Box<dyn std::error::Error>> {
    let provider = TracerProvider::builder()
        .with_simple_exporter(SpanExporter::default())
        .with_id_generator(RandomIdGenerator::default())
        .with_sampler(Sampler::AlwaysOn)
        .with_resource(Resource::new(vec![
            KeyValue::new("service.name", "reelsmith"),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        ]))
        .build();

    let tracer = provider.tracer("reelsmith");
    opentelemetry::global::set_tracer_provider(provider);

    let spans = tracing_opentelemetry::layer()
        .with_tracer(tracer)
        .with_filter(filter());
    let logs = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_filter(filter());

    tracing_subscriber::registry().with(spans).with(logs).try_init()?;
    Ok(())
}

/// Flush pending spans and shut the tracer provider down.
pub fn shutdown_telemetry() {
    opentelemetry::global::shutdown_tracer_provider();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses() {
        assert!(DEFAULT_FILTER.parse::<EnvFilter>().is_ok());
    }
}
