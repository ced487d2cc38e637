use super::{AppConfig, ConfigError};

const MAX_INDENT: usize = 8;

const VALID_LOG_LEVELS: &[&str] = &[
    "DISABLED", "TRACE", "DEBUG", "INFO", "WARN", "WARNING", "ERROR", "CRITICAL",
];

/// Validate the full application config, returning an error if any rule is violated.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] when any configuration invariant is violated.
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    validate_display_config(config)?;
    validate_log_level(config)?;
    Ok(())
}

fn validation_err(msg: impl Into<String>) -> ConfigError {
    ConfigError::Validation(msg.into())
}

fn validate_display_config(config: &AppConfig) -> Result<(), ConfigError> {
    let display = &config.display;
    if display.collapsed_lines == 0 {
        return Err(validation_err(
            "display.collapsed_lines must be greater than 0",
        ));
    }
    if display.wrap_width == 0 {
        return Err(validation_err("display.wrap_width must be greater than 0"));
    }
    if display.indent > MAX_INDENT {
        return Err(validation_err(format!(
            "display.indent must be at most {MAX_INDENT}, got {}",
            display.indent
        )));
    }
    Ok(())
}

fn validate_log_level(config: &AppConfig) -> Result<(), ConfigError> {
    let level = config.features.log_level.to_uppercase();
    if !VALID_LOG_LEVELS.contains(&level.as_str()) {
        return Err(validation_err(format!(
            "features.log_level '{}' is not one of: {}",
            config.features.log_level,
            VALID_LOG_LEVELS.join(", ")
        )));
    }
    Ok(())
}
