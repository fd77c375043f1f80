//! `${VAR}` expansion in configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in place.
///
/// Values without `${` are left untouched, so bare `$` characters in URLs
/// survive. An unset variable without a default is an error naming `field`.
pub(crate) fn expand_in_place(value: &mut String, field: &str) -> Result<(), ConfigError> {
    if !value.contains("${") {
        return Ok(());
    }

    let expanded =
        shellexpand::env_with_context(value.as_str(), |var| std::env::var(var).map(Some))
            .map_err(|err| ConfigError::EnvVar {
                field: field.to_owned(),
                message: format!("${{{}}}: {}", err.var_name, err.cause),
            })?;

    *value = expanded.into_owned();
    Ok(())
}
