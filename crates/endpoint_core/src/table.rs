/// Static completion fragments, grouped by the part of the URL they complete.
///
/// Declaration order is significance order: earlier entries are offered
/// first and the first entry is the one taken by "accept top suggestion".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlSuggestionTable {
    pub protocols: &'static [&'static str],
    pub subdomains: &'static [&'static str],
    pub tlds: &'static [&'static str],
    pub paths: &'static [&'static str],
}

impl UrlSuggestionTable {
    pub const fn metrics_endpoints() -> Self {
        Self {
            protocols: &["https://", "http://"],
            subdomains: &[
                "api.",
                "metrics.",
                "monitoring.",
                "prometheus.",
                "grafana.",
                "stats.",
                "telemetry.",
            ],
            tlds: &[
                ".com", ".io", ".net", ".org", ".co", ".dev", ".cloud", ".local", ".internal",
            ],
            paths: &[
                "/metrics",
                "/prometheus",
                "/actuator/prometheus",
                "/federate",
                "/stats",
                "/probe",
            ],
        }
    }
}

impl Default for UrlSuggestionTable {
    fn default() -> Self {
        Self::metrics_endpoints()
    }
}
