use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Please enter a URL")]
    Empty,
    #[error("Please enter a valid URL: {0}")]
    Unparseable(String),
    #[error("URL must include a host")]
    MissingHost,
}

/// Format rule applied before any probe: an absolute URL with scheme and host.
pub fn validate_url_format(raw: &str) -> Result<Url, FormatError> {
    if raw.trim().is_empty() {
        return Err(FormatError::Empty);
    }
    let parsed = Url::parse(raw).map_err(|err| FormatError::Unparseable(err.to_string()))?;
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed),
        _ => Err(FormatError::MissingHost),
    }
}

pub fn is_valid_url(raw: &str) -> bool {
    validate_url_format(raw).is_ok()
}
