/// URL for accessing the PostgreSQL database (should contain a database name in the path)
pub const DB_URL: &str = "DATABASE_URL";
/// Log level configuration for the application. Uses [tracing_subscriber's EnvFilter syntax](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html#directives)
pub const LOG_LEVEL: &str = "LOG_LEVEL";
/// Address the HTTP server binds to. Defaults to [DEFAULT_LISTEN_ADDR] when absent.
pub const LISTEN_ADDR: &str = "LISTEN_ADDR";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// OpenTelemetry span export URL, typically http://localhost:4317 when the service runs
/// with an OpenTelemetry collector sidecar. Exporting is disabled when unset.
pub const OTEL_SPAN_EXPORT_URL: &str = "OTEL_SPAN_EXPORT_URL";
/// OpenTelemetry metrics export URL, typically http://localhost:4317 when the service runs
/// with an OpenTelemetry collector sidecar. Exporting is disabled when unset.
pub const OTEL_METRIC_EXPORT_URL: &str = "OTEL_METRIC_EXPORT_URL";

/// URL for accessing the PostgreSQL server during integration tests (should not contain a database name in the path)
pub const TEST_DB_URL: &str = "TEST_DB_URL";
