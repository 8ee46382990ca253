use anyhow::{Context, Result};
use opentelemetry_sdk::trace::{BatchConfig, RandomIdGenerator, Sampler};
use tracing_subscriber::{
    filter::FilterFn, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
    EnvFilter, Layer,
};

const DEFAULT_LOG_FILTER: &str =
    "info,reelbot=trace,serenity=warn,serenity::http::ratelimiting=off,poise=info";

/// Initializes logging, and opentelemetry tracing when it is configured:
///
/// ```sh
/// export OTEL_SERVICE_NAME=reelbot
/// export OTEL_EXPORTER_OTLP_PROTOCOL="http/protobuf"
/// export OTEL_EXPORTER_OTLP_ENDPOINT="https://otlp.example.com/otlp"
/// ```
///
/// Log filters are read from `RUST_LOG`, trace filters from `RUST_LOG_TRACES`.
pub fn init_tracing() -> Result<()> {
    let log_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(DEFAULT_LOG_FILTER)?,
    };
    // Gateway event debug lines would repeat every event we handle ourselves.
    let remove_dispatch_filter = FilterFn::new(|m| {
        !(m.target().starts_with("serenity::gateway") && m.name() == "handle_gateway_dispatch")
    });

    let logfmt_builder = tracing_logfmt_otel::builder()
        .with_level(true)
        .with_target(true)
        .with_span_name(true)
        .with_span_path(true)
        .with_otel_data(true)
        .with_file(true)
        .with_line(true)
        .with_module(true);
    let sub = tracing_subscriber::registry().with(log_filter).with(remove_dispatch_filter);

    if std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").is_err() {
        sub.with(logfmt_builder.layer()).try_init().context("Failed to install logger")?;
        return Ok(());
    }

    opentelemetry::global::set_text_map_propagator(
        opentelemetry_sdk::propagation::TraceContextPropagator::new(),
    );
    let trace_config = opentelemetry_sdk::trace::config()
        .with_id_generator(RandomIdGenerator::default())
        .with_sampler(Sampler::AlwaysOn);
    let tracer = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_trace_config(trace_config)
        .with_exporter(opentelemetry_otlp::new_exporter().http())
        .with_batch_config(BatchConfig::default())
        .install_batch(opentelemetry_sdk::runtime::Tokio);

    match tracer {
        Ok(tracer) => {
            let traces_filter = EnvFilter::try_from_env("RUST_LOG_TRACES")
                .unwrap_or_else(|_| EnvFilter::new("trace"));
            let heartbeat_filter = EnvFilter::try_new("trace,serenity::gateway::ws[send_heartbeat]=off")?;
            let telemetry = tracing_opentelemetry::layer()
                .with_location(true)
                .with_tracked_inactivity(true)
                .with_tracer(tracer)
                .with_filter(heartbeat_filter)
                .with_filter(traces_filter);
            sub.with(telemetry)
                .with(logfmt_builder.layer())
                .try_init()
                .context("Failed to install tracing subscriber")?;
            tracing::info!("Exporting traces via opentelemetry");
        }
        Err(err) => {
            sub.with(logfmt_builder.layer()).try_init().context("Failed to install logger")?;
            tracing::warn!(error.message = %err, "Failed to initialize opentelemetry, only logging");
        }
    }
    Ok(())
}
