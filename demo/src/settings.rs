use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub fibonacci: FibonacciSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FibonacciSettings {
    pub indexes: Vec<i64>,
    /// Also time the plain, unmemoized implementation.
    pub compare_plain: bool,
}

impl AppConfig {
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        let builder =
            Config::builder()
                .add_source(File::with_name(path).required(true))
                .add_source(Environment::with_prefix("MEMOPROXY").try_parsing(true).separator("__"));
        builder.build()?.try_deserialize()
    }

    /// `config/settings.toml` of this crate, whatever the working directory.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/config/settings"))
    }
}
