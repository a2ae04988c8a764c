use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{AnalyticsSettings, Config, ServerSettings};

/// Loads the application configuration from the `config.toml` file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, deserializes it into our strongly-typed `Config`
/// struct, and returns it.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`
        .add_source(config::File::with_name("config.toml"))
        // Allow SHOPFRONT_SERVER__PORT-style environment overrides.
        .add_source(config::Environment::with_prefix("SHOPFRONT").separator("__"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;

    Ok(config)
}
