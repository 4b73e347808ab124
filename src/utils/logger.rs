use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{ConfigError, LoggingConfig, Target};
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};

/// Collects event fields as JSON attributes.
#[derive(Default)]
struct AttributeVisitor(Map<String, Value>);

impl Visit for AttributeVisitor {
    fn record_i64(&mut self, field: &Field, value: i64) {
        self.0.insert(field.name().to_string(), value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.insert(field.name().to_string(), value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.0.insert(field.name().to_string(), value.into());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.into());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.0.insert(field.name().to_string(), value.into());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0
            .insert(field.name().to_string(), format!("{:?}", value).into());
    }
}

/// One JSON object per line, shaped after the OpenTelemetry log data model.
#[derive(Clone)]
struct OtelJsonEventFormatter {
    /// `service.*` and `deployment.environment`, fixed for the process lifetime.
    resource: Map<String, Value>,
}

impl OtelJsonEventFormatter {
    fn new(logging_config: &LoggingConfig, target: Option<Target>) -> Self {
        let mut resource = Map::new();
        resource.insert(
            "service.name".to_string(),
            logging_config.service_name.clone().into(),
        );
        resource.insert(
            "service.version".to_string(),
            logging_config.service_version.clone().into(),
        );
        if let Some(target) = target {
            resource.insert("deployment.environment".to_string(), target.as_str().into());
        }
        Self { resource }
    }

    fn severity_number(level: &Level) -> u64 {
        match *level {
            Level::TRACE => 1,
            Level::DEBUG => 5,
            Level::INFO => 9,
            Level::WARN => 13,
            Level::ERROR => 17,
        }
    }

    fn to_record(&self, event: &Event<'_>) -> Value {
        let metadata = event.metadata();
        let mut visitor = AttributeVisitor::default();
        event.record(&mut visitor);
        let mut attributes = visitor.0;

        let body = match attributes.remove("message") {
            Some(Value::String(message)) => message,
            _ => metadata.name().to_string(),
        };
        if let Some(file) = metadata.file() {
            attributes.insert("code.filepath".to_string(), file.into());
        }
        if let Some(line) = metadata.line() {
            attributes.insert("code.lineno".to_string(), line.into());
        }
        attributes.insert("code.target".to_string(), metadata.target().into());

        serde_json::json!({
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            "severity_text": metadata.level().as_str(),
            "severity_number": Self::severity_number(metadata.level()),
            "body": body,
            "resource": self.resource,
            "attributes": attributes,
        })
    }
}

impl<S, N> FormatEvent<S, N> for OtelJsonEventFormatter
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let serialized =
            serde_json::to_string(&self.to_record(event)).map_err(|_| std::fmt::Error)?;
        writer.write_str(&serialized)?;
        writer.write_char('\n')
    }
}

/// Parses a `logging.level` value.
pub fn parse_level(level: &str) -> Result<LevelFilter, ConfigError> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" => Ok(LevelFilter::WARN),
        "error" => Ok(LevelFilter::ERROR),
        _ => Err(ConfigError::InvalidLogLevel(level.to_string())),
    }
}

/// Output shapes selectable through `logging.format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Console,
}

/// Parses a `logging.format` value.
pub fn parse_format(format: &str) -> Result<LogFormat, ConfigError> {
    match format.trim().to_lowercase().as_str() {
        "json" => Ok(LogFormat::Json),
        "console" => Ok(LogFormat::Console),
        _ => Err(ConfigError::InvalidLogFormat(format.to_string())),
    }
}

/// Installs the global subscriber. `RUST_LOG` directives are applied on top
/// of the configured level.
pub fn init_logging(
    logging_config: &LoggingConfig,
    target: Option<Target>,
) -> Result<(), ConfigError> {
    let level_filter = parse_level(&logging_config.level)?;
    let format = parse_format(&logging_config.format)?;

    let filter_layer = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .from_env_lossy();

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter_layer)
                .with(
                    fmt::layer().event_format(OtelJsonEventFormatter::new(logging_config, target)),
                )
                .init();
        }
        LogFormat::Console => {
            tracing_subscriber::registry()
                .with(filter_layer)
                .with(fmt::layer().pretty())
                .init();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_levels() {
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::DEBUG);
        assert_eq!(parse_level(" WARN ").unwrap(), LevelFilter::WARN);
    }

    #[test]
    fn rejects_unknown_level() {
        assert!(matches!(
            parse_level("verbose"),
            Err(ConfigError::InvalidLogLevel(ref l)) if l == "verbose"
        ));
    }

    #[test]
    fn parses_known_formats() {
        assert_eq!(parse_format("json").unwrap(), LogFormat::Json);
        assert_eq!(parse_format(" Console ").unwrap(), LogFormat::Console);
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(matches!(
            parse_format("logfmt"),
            Err(ConfigError::InvalidLogFormat(ref f)) if f == "logfmt"
        ));
    }

    #[test]
    fn init_rejects_unknown_format_before_installing() {
        let config = LoggingConfig {
            format: "xml".to_string(),
            ..LoggingConfig::default()
        };
        assert!(matches!(
            init_logging(&config, None),
            Err(ConfigError::InvalidLogFormat(_))
        ));
    }

    #[test]
    fn severity_numbers_follow_otel() {
        assert_eq!(OtelJsonEventFormatter::severity_number(&Level::TRACE), 1);
        assert_eq!(OtelJsonEventFormatter::severity_number(&Level::INFO), 9);
        assert_eq!(OtelJsonEventFormatter::severity_number(&Level::ERROR), 17);
    }

    #[test]
    fn resource_carries_the_deployment_target() {
        let formatter = OtelJsonEventFormatter::new(&LoggingConfig::default(), Some(Target::Qa));
        assert_eq!(
            formatter.resource.get("deployment.environment"),
            Some(&Value::from("qa"))
        );
        assert_eq!(
            formatter.resource.get("service.name"),
            Some(&Value::from("envresolver"))
        );

        let formatter = OtelJsonEventFormatter::new(&LoggingConfig::default(), None);
        assert!(!formatter.resource.contains_key("deployment.environment"));
    }
}
