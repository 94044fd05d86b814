/// Outcome of a single capability probe.
///
/// `passed` and `error` are not mutually exclusive views of the same
/// thing: a probe can fail without a captured error (the tools-only
/// probe treats "no tool calls issued" as a silent policy failure).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub passed: bool,
    pub error: Option<String>,
}

impl ProbeOutcome {
    pub fn pass() -> Self {
        Self {
            passed: true,
            error: None,
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            passed: false,
            error: Some(error.into()),
        }
    }

    /// Failure with no captured error text (policy failure, not an
    /// exception).
    pub fn fail_silent() -> Self {
        Self {
            passed: false,
            error: None,
        }
    }
}

/// All four probe outcomes for one model run. Immutable once the suite
/// for the model completes.
#[derive(Debug, Clone)]
pub struct ModelReport {
    pub model: String,
    pub basic: ProbeOutcome,
    pub tools: ProbeOutcome,
    pub schema: ProbeOutcome,
    pub combined: ProbeOutcome,
}

impl ModelReport {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            basic: ProbeOutcome::default(),
            tools: ProbeOutcome::default(),
            schema: ProbeOutcome::default(),
            combined: ProbeOutcome::default(),
        }
    }

    pub fn all_passed(&self) -> bool {
        self.basic.passed && self.tools.passed && self.schema.passed && self.combined.passed
    }

    /// Accumulated error log: one `probe: message` line per probe that
    /// captured an error.
    pub fn errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for (label, outcome) in [
            ("Basic", &self.basic),
            ("Tools", &self.tools),
            ("Schema", &self.schema),
            ("Combined", &self.combined),
        ] {
            if let Some(error) = &outcome.error {
                errors.push(format!("{label}: {error}"));
            }
        }
        errors
    }
}
