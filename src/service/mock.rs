/*!
 * Mock provider implementations for testing.
 *
 * - `MockProvider::working()` — always succeeds, tagging each line
 * - `MockProvider::failing()` — always fails with a connection error
 * - `MockProvider::dropping(n)` — succeeds but omits every nth line,
 *   simulating a model that loses markers
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::{BatchRequest, TranslateProvider};
use crate::errors::ProviderError;

/// Behavior mode for the mock provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a tagged translation
    Working,
    /// Always fails with a connection error
    Failing,
    /// Succeeds but returns no translation for every nth line (1-based)
    Dropping {
        /// Drop every nth line
        every: usize,
    },
}

/// Mock provider for testing translation behavior.
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Lines seen across all calls
    lines_seen: Arc<AtomicUsize>,
    /// Batches requested across all calls
    batches_seen: Arc<AtomicUsize>,
    /// Echo the input line instead of tagging it
    echo: bool,
}

impl MockProvider {
    /// Create a mock with the given behavior.
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            lines_seen: Arc::new(AtomicUsize::new(0)),
            batches_seen: Arc::new(AtomicUsize::new(0)),
            echo: false,
        }
    }

    /// Create a working mock that always succeeds.
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock that always errors.
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that drops every nth line.
    pub fn dropping(every: usize) -> Self {
        Self::new(MockBehavior::Dropping { every: every.max(1) })
    }

    /// Return the input line unchanged instead of tagging it.
    pub fn with_echo(mut self) -> Self {
        self.echo = true;
        self
    }

    /// Total lines submitted across all calls.
    pub fn lines_seen(&self) -> usize {
        self.lines_seen.load(Ordering::SeqCst)
    }

    /// Total batches submitted across all calls.
    pub fn batches_seen(&self) -> usize {
        self.batches_seen.load(Ordering::SeqCst)
    }

    fn translate_line(&self, line: &str) -> String {
        if self.echo {
            line.to_string()
        } else {
            format!("[MY] {}", line)
        }
    }
}

#[async_trait]
impl TranslateProvider for MockProvider {
    async fn translate_batch(
        &self,
        request: &BatchRequest<'_>,
    ) -> Result<Vec<Option<String>>, ProviderError> {
        self.batches_seen.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "mock provider is configured to fail".to_string(),
            )),
            MockBehavior::Working => Ok(request
                .lines
                .iter()
                .map(|line| {
                    self.lines_seen.fetch_add(1, Ordering::SeqCst);
                    Some(self.translate_line(line))
                })
                .collect()),
            MockBehavior::Dropping { every } => Ok(request
                .lines
                .iter()
                .map(|line| {
                    let seen = self.lines_seen.fetch_add(1, Ordering::SeqCst) + 1;
                    if seen % every == 0 {
                        None
                    } else {
                        Some(self.translate_line(line))
                    }
                })
                .collect()),
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "mock provider is configured to fail".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
