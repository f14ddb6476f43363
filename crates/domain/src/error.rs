//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`WeatherBulbError`] via `#[from]` or an explicit `into_domain`.

/// Top-level error crossing port boundaries.
#[derive(Debug, thiserror::Error)]
pub enum WeatherBulbError {
    /// The request or the installed app configuration is not usable.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A remote collaborator (weather provider, device cloud) failed.
    #[error("upstream error: {0}")]
    Upstream(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors raised while answering a configuration request or reading the
/// settings of an installed app.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A configuration page other than the single known page was requested.
    #[error("unsupported page id: {0}")]
    UnsupportedPage(String),

    /// The configuration phase is neither `INITIALIZE` nor `PAGE`.
    #[error("unsupported configuration phase")]
    UnsupportedPhase,

    /// The configuration request carried no `config` section.
    #[error("no config section set in request")]
    MissingConfig,

    /// A setting required by the integration is absent from the installed app.
    #[error("missing setting `{0}`")]
    MissingSetting(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_name_the_page_in_unsupported_page_error() {
        let err = ConfigurationError::UnsupportedPage("2".to_string());
        assert_eq!(err.to_string(), "unsupported page id: 2");
    }

    #[test]
    fn should_name_the_setting_in_missing_setting_error() {
        let err = ConfigurationError::MissingSetting("zipCode");
        assert_eq!(err.to_string(), "missing setting `zipCode`");
    }

    #[test]
    fn should_convert_configuration_error_with_from() {
        let err: WeatherBulbError = ConfigurationError::MissingConfig.into();
        assert!(matches!(
            err,
            WeatherBulbError::Configuration(ConfigurationError::MissingConfig)
        ));
    }
}
