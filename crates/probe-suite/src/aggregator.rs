use probe_core::ModelReport;

/// Append-only collection of per-model reports.
///
/// Only the single control thread ever writes to it, once per model,
/// after that model's suite completes.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    reports: Vec<ModelReport>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, report: ModelReport) {
        self.reports.push(report);
    }

    pub fn reports(&self) -> &[ModelReport] {
        &self.reports
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Number of models for which every probe passed.
    pub fn fully_passing(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| report.all_passed())
            .count()
    }
}
