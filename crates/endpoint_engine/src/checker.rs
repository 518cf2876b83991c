use std::sync::Arc;

use endpoint_core::{ProbeFailure, ValidationOutcome};
use endpoint_logging::{endpoint_info, endpoint_warn};
use tokio_util::sync::CancellationToken;

use crate::{ProbeError, ProbeResponse, ProbeSettings, Prober, ReqwestProber};

/// Bounded-time availability check of a single URL.
#[derive(Clone)]
pub struct AvailabilityChecker {
    prober: Arc<dyn Prober>,
    settings: ProbeSettings,
}

impl AvailabilityChecker {
    pub fn new(prober: Arc<dyn Prober>, settings: ProbeSettings) -> Self {
        Self { prober, settings }
    }

    pub fn with_reqwest(settings: ProbeSettings) -> Result<Self, ProbeError> {
        let prober = ReqwestProber::new(&settings)?;
        Ok(Self::new(Arc::new(prober), settings))
    }

    pub fn settings(&self) -> &ProbeSettings {
        &self.settings
    }

    pub async fn check(&self, url: &str) -> ValidationOutcome {
        self.check_with_cancel(url, &CancellationToken::new()).await
    }

    /// Like [`check`](Self::check), but gives up as soon as `cancel` fires.
    ///
    /// The probe future and its deadline are dropped together on every exit
    /// path, which aborts the underlying request.
    pub async fn check_with_cancel(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> ValidationOutcome {
        endpoint_info!("Probing url={}", url);
        let probe = tokio::time::timeout(self.settings.timeout, self.prober.probe(url));

        let outcome = tokio::select! {
            _ = cancel.cancelled() => ValidationOutcome::Rejected(ProbeFailure::Cancelled {
                url: url.to_string(),
            }),
            result = probe => match result {
                Err(_) | Ok(Err(ProbeError::Timeout)) => {
                    ValidationOutcome::Rejected(ProbeFailure::Timeout { url: url.to_string() })
                }
                Ok(Err(err)) => ValidationOutcome::Rejected(ProbeFailure::Transport {
                    url: url.to_string(),
                    detail: err.to_string(),
                }),
                Ok(Ok(response)) => self.classify(&response),
            },
        };

        match outcome.reason() {
            None => endpoint_info!("Probe accepted url={}", url),
            Some(reason) => endpoint_warn!("Probe rejected url={} reason={}", url, reason),
        }
        outcome
    }

    /// Applies the status and content-type rules to a completed probe.
    pub fn classify(&self, response: &ProbeResponse) -> ValidationOutcome {
        if !(200..300).contains(&response.status) {
            return ValidationOutcome::Rejected(ProbeFailure::HttpStatus {
                status: response.status,
            });
        }
        let expected = self.settings.expected_content_type.to_ascii_lowercase();
        let matches = response
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains(&expected));
        if !matches {
            return ValidationOutcome::Rejected(ProbeFailure::InvalidContentType);
        }
        ValidationOutcome::Accepted
    }
}
