//! Logging subscriber initialisation.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{ServerConfig, observability::LogFormat};

use super::ObservabilityError;

/// Dependencies held at `warn` unless the configured directives mention them.
/// `sqlx` logs every statement at `info`.
const QUIET_TARGETS: [&str; 6] = ["sqlx", "h2", "hyper", "tower", "tonic", "opentelemetry"];

pub(super) fn init_subscriber(
    config: &ServerConfig,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    let filter = EnvFilter::new(filter_directives(&config.logging.log_level));

    match config.logging.log_format {
        LogFormat::Compact => install(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_line_number(true),
            filter,
            config,
            tracer_provider,
        ),
        LogFormat::Json => install(
            tracing_subscriber::fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(true)
                .with_span_list(true),
            filter,
            config,
            tracer_provider,
        ),
    }
}

/// `RUST_LOG` feeds `log_level`, so these directives are the whole filter.
fn filter_directives(log_level: &str) -> String {
    let quiet = QUIET_TARGETS
        .iter()
        .filter(|target| !log_level.contains(*target))
        .map(|target| format!("{target}=warn"));

    std::iter::once(log_level.trim().to_string())
        .chain(quiet)
        .collect::<Vec<_>>()
        .join(",")
}

fn install<L>(
    fmt_layer: L,
    filter: EnvFilter,
    config: &ServerConfig,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::registry().with(fmt_layer).with(filter);

    match tracer_provider {
        Some(provider) => {
            let tracer = provider.tracer(config.observability.otel_service_name.clone());

            subscriber
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .try_init()?;
        }
        None => subscriber.try_init()?,
    }

    Ok(())
}
