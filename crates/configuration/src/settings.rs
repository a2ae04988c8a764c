use core_types::TimeRange;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerSettings,
    pub analytics: AnalyticsSettings,
}

/// Contains parameters for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// The address the server binds to (e.g., "0.0.0.0").
    pub host: String,
    /// The TCP port the server listens on.
    pub port: u16,
}

/// Contains parameters for analytics report generation.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsSettings {
    /// The reporting window applied when a request names none.
    #[serde(default)]
    pub default_time_range: TimeRange,
}
