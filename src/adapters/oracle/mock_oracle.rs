//! Mock scoring oracle for testing.
//!
//! Answers deterministically without a language model and records how many
//! calls were in flight at once, so tests can check the scorer's
//! concurrency bound.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::action::Action;
use crate::domain::combination::PreferenceLabel;
use crate::domain::profile::UserProfile;
use crate::ports::{AIError, OracleError, ScoringOracle, ScoringRequest};

type Judge = dyn Fn(&Action, &Action, &UserProfile) -> PreferenceLabel + Send + Sync;

/// Deterministic oracle with failure injection and call tracking.
#[derive(Clone)]
pub struct MockScoringOracle {
    judge: Arc<Judge>,
    failing_solutions: HashSet<String>,
    malformed_solutions: HashSet<String>,
    delay: Duration,
    calls: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl Default for MockScoringOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl MockScoringOracle {
    /// Prefers action_a whenever its solution name sorts first.
    pub fn new() -> Self {
        Self::with_judge(|a, b, _| {
            if a.solution <= b.solution {
                PreferenceLabel::FirstPreferred
            } else {
                PreferenceLabel::SecondPreferred
            }
        })
    }

    /// Always answers with `label`.
    pub fn constant(label: PreferenceLabel) -> Self {
        Self::with_judge(move |_, _, _| label)
    }

    /// Answers with the supplied function.
    pub fn with_judge(
        judge: impl Fn(&Action, &Action, &UserProfile) -> PreferenceLabel + Send + Sync + 'static,
    ) -> Self {
        Self {
            judge: Arc::new(judge),
            failing_solutions: HashSet::new(),
            malformed_solutions: HashSet::new(),
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Fails with a transport error for any pair involving `solution`.
    pub fn failing_on(mut self, solution: impl Into<String>) -> Self {
        self.failing_solutions.insert(solution.into());
        self
    }

    /// Answers with an unparseable body for any pair involving `solution`.
    pub fn malformed_on(mut self, solution: impl Into<String>) -> Self {
        self.malformed_solutions.insert(solution.into());
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of calls received.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of calls observed in flight at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn involves(set: &HashSet<String>, request: &ScoringRequest<'_>) -> bool {
        set.contains(&request.action_a.solution) || set.contains(&request.action_b.solution)
    }
}

/// Decrements the in-flight gauge even if the call future is dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ScoringOracle for MockScoringOracle {
    async fn score(&self, request: ScoringRequest<'_>) -> Result<PreferenceLabel, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        } else {
            tokio::task::yield_now().await;
        }

        if Self::involves(&self.failing_solutions, &request) {
            return Err(AIError::unavailable("mock oracle failure").into());
        }
        if Self::involves(&self.malformed_solutions, &request) {
            return Err(OracleError::malformed("mock oracle returned prose"));
        }

        Ok((self.judge)(
            request.action_a,
            request.action_b,
            request.user_profile,
        ))
    }
}
