use std::time::Duration;

/// Timeouts for outbound calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Whole-request timeout for plan generation
    pub llm_request: Duration,

    /// TCP connect timeout
    pub connect: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            llm_request: Duration::from_secs(60),
            connect: Duration::from_secs(10),
        }
    }
}

impl TimeoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_llm_request(mut self, timeout: Duration) -> Self {
        self.llm_request = timeout;
        self
    }

    pub fn with_connect(mut self, timeout: Duration) -> Self {
        self.connect = timeout;
        self
    }
}
