#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldViewModel {
    pub value: String,
    pub suggestions: Vec<String>,
    pub suggestions_visible: bool,
    /// Inline message for a value that failed the format rule.
    pub format_error: Option<String>,
    /// A manual submit is awaiting its check.
    pub loading: bool,
    /// A scheduled re-validation is awaiting its check.
    pub refreshing: bool,
    pub auto_refresh: bool,
    pub refresh_armed: bool,
    pub dirty: bool,
}
