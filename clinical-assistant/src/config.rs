use std::time::Duration;

/// Simulated processing time for each suggestion kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssistantConfig {
    pub diagnosis_delay: Duration,
    pub summary_delay: Duration,
    pub medication_delay: Duration,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self::from_millis(500, 300, 400)
    }
}

impl AssistantConfig {
    pub fn from_millis(diagnosis_ms: u64, summary_ms: u64, medication_ms: u64) -> Self {
        Self {
            diagnosis_delay: Duration::from_millis(diagnosis_ms),
            summary_delay: Duration::from_millis(summary_ms),
            medication_delay: Duration::from_millis(medication_ms),
        }
    }

    /// No artificial latency, for tests and local tooling
    pub fn instant() -> Self {
        Self::from_millis(0, 0, 0)
    }
}
