use thiserror::Error;

/// Why an availability check did not accept a URL.
///
/// The `Display` output is the reason shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeFailure {
    #[error("Timeout reaching {url}")]
    Timeout { url: String },
    #[error("HEAD request failed ({status})")]
    HttpStatus { status: u16 },
    #[error("Invalid content type (expected text/plain)")]
    InvalidContentType,
    #[error("Request to {url} failed: {detail}")]
    Transport { url: String, detail: String },
    #[error("Check of {url} was cancelled")]
    Cancelled { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Accepted,
    Rejected(ProbeFailure),
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted)
    }

    /// Human-readable rejection reason, `None` when accepted.
    pub fn reason(&self) -> Option<String> {
        match self {
            ValidationOutcome::Accepted => None,
            ValidationOutcome::Rejected(failure) => Some(failure.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasons_match_user_facing_wording() {
        let timeout = ValidationOutcome::Rejected(ProbeFailure::Timeout {
            url: "https://a.example.com/metrics".to_string(),
        });
        assert_eq!(
            timeout.reason().as_deref(),
            Some("Timeout reaching https://a.example.com/metrics")
        );
        assert_eq!(
            ProbeFailure::HttpStatus { status: 503 }.to_string(),
            "HEAD request failed (503)"
        );
        assert_eq!(
            ProbeFailure::InvalidContentType.to_string(),
            "Invalid content type (expected text/plain)"
        );
        assert_eq!(ValidationOutcome::Accepted.reason(), None);
    }
}
