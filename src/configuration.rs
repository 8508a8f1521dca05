use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
}

#[derive(Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    /// Signing secret reserved for the session layer. Must be non-empty in
    /// production even though nothing consumes it yet.
    pub secret: SecretString,
    pub media_dir: PathBuf,
}

#[derive(Deserialize)]
pub struct DatabaseSettings {
    pub url: SecretString,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub enum Environment {
    Development,
    Production,
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            other => Err(format!(
                "{other} is not a supported environment, use `development` or `production`"
            )),
        }
    }
}

/// Reads settings from `APP__`-prefixed environment variables, e.g.
/// `APP__DATABASE__URL` or `APP__APPLICATION__PORT`. Defaults form a
/// runnable sample wiring; `APP_ENVIRONMENT=production` makes the secret
/// and the database url mandatory.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "development".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    let settings: Settings = config::Config::builder()
        .set_default("application.host", "0.0.0.0")?
        .set_default("application.port", "8080")?
        .set_default("application.secret", "")?
        .set_default("application.media_dir", "static")?
        .set_default("database.url", "sqlite:qna.db?mode=rwc")?
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize()?;

    if let Environment::Production = environment {
        if settings.application.secret.expose_secret().is_empty() {
            return Err(config::ConfigError::Message(
                "APP__APPLICATION__SECRET must be set in production".into(),
            ));
        }
        if settings.database.url.expose_secret().is_empty() {
            return Err(config::ConfigError::Message(
                "APP__DATABASE__URL must be set in production".into(),
            ));
        }
    }

    Ok(settings)
}
