//! ConcurrentScorer - Bounded fan-out of the work set to the scoring oracle.
//!
//! # Design
//!
//! A fixed pool of at most K workers pulls item indices from a shared
//! cursor. Each worker validates its item, calls the oracle once under a
//! deadline, and sends `(index, outcome)` to a single aggregator. The
//! aggregator owns the counters and writes successes into pre-sized,
//! index-addressed slots, so the output keeps work-set order without sorting.
//!
//! Workers and aggregator run as futures on the caller's task. Nothing is
//! spawned, so dropping the returned future cancels the whole batch.

use futures::future::join_all;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

use crate::domain::combination::{Combination, CombinationRecord, ScoredCombination};
use crate::domain::foundation::{RunId, Timestamp, ValidationError};
use crate::ports::{OracleError, ScoringOracle, ScoringRequest};

/// Default number of concurrent oracle calls.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Default per-call deadline.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(120);

/// Outcome of a scoring batch.
#[derive(Debug, Clone)]
pub struct ScoringReport {
    pub run_id: RunId,
    /// Successfully scored records, in work-set order.
    pub scored: Vec<ScoredCombination>,
    pub completed: usize,
    pub failed: usize,
    pub total: usize,
    pub started_at: Timestamp,
    pub finished_at: Timestamp,
}

impl ScoringReport {
    /// One-line summary, e.g. `4 scored, 1 failed of 5`.
    pub fn summary(&self) -> String {
        format!(
            "{} scored, {} failed of {}",
            self.completed, self.failed, self.total
        )
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at.duration_since(&self.started_at)
    }
}

/// Why a single item was dropped.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ItemFailure {
    #[error("invalid record: {0}")]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

/// Names used in per-item log events.
#[derive(Debug, Clone)]
struct ItemLabel {
    solution_a: String,
    solution_b: String,
    city: String,
}

impl ItemLabel {
    fn of(record: &CombinationRecord) -> Self {
        let text = |value: &Value, field: &str| {
            value
                .get(field)
                .and_then(Value::as_str)
                .unwrap_or("<unknown>")
                .to_string()
        };
        Self {
            solution_a: text(&record.action_a, "solution"),
            solution_b: text(&record.action_b, "solution"),
            city: text(&record.user_profile, "city"),
        }
    }
}

struct ItemOutcome {
    index: usize,
    label: ItemLabel,
    result: Result<ScoredCombination, ItemFailure>,
}

/// Scores a work set against an oracle with bounded concurrency.
pub struct ConcurrentScorer {
    oracle: Arc<dyn ScoringOracle>,
    concurrency: usize,
    call_timeout: Duration,
}

impl ConcurrentScorer {
    /// Creates a scorer. A concurrency of zero is treated as one.
    pub fn new(oracle: Arc<dyn ScoringOracle>, concurrency: usize, call_timeout: Duration) -> Self {
        Self {
            oracle,
            concurrency: concurrency.max(1),
            call_timeout,
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Scores every record. Item failures are counted, never returned.
    pub async fn score(&self, records: &[CombinationRecord]) -> ScoringReport {
        let run_id = RunId::new();
        let started_at = Timestamp::now();
        let total = records.len();
        let workers = self.concurrency.min(total);

        tracing::info!(
            %run_id,
            total,
            workers,
            timeout_secs = self.call_timeout.as_secs(),
            "Starting scoring run"
        );

        let cursor = AtomicUsize::new(0);
        let (tx, rx) = mpsc::channel::<ItemOutcome>(workers.max(1) * 2);
        let trace_prefix = run_id.to_string();

        let pool: Vec<_> = (0..workers)
            .map(|_| self.worker(records, &cursor, tx.clone(), &trace_prefix))
            .collect();
        drop(tx);

        let (_, (scored, completed, failed)) =
            tokio::join!(join_all(pool), Self::aggregate(rx, total));

        let report = ScoringReport {
            run_id,
            scored,
            completed,
            failed,
            total,
            started_at,
            finished_at: Timestamp::now(),
        };

        tracing::info!(
            %run_id,
            completed = report.completed,
            failed = report.failed,
            total = report.total,
            elapsed_ms = report.elapsed().num_milliseconds(),
            "Scoring finished: {}",
            report.summary()
        );
        report
    }

    /// Pulls indices until the queue is drained or the aggregator is gone.
    async fn worker(
        &self,
        records: &[CombinationRecord],
        cursor: &AtomicUsize,
        tx: mpsc::Sender<ItemOutcome>,
        trace_prefix: &str,
    ) {
        loop {
            let index = cursor.fetch_add(1, Ordering::Relaxed);
            let Some(record) = records.get(index) else {
                break;
            };

            let trace_id = format!("{}-{}", trace_prefix, index);
            let outcome = ItemOutcome {
                index,
                label: ItemLabel::of(record),
                result: self.score_item(record, &trace_id).await,
            };

            if tx.send(outcome).await.is_err() {
                break;
            }
        }
    }

    /// Validates one record and asks the oracle exactly once.
    async fn score_item(
        &self,
        record: &CombinationRecord,
        trace_id: &str,
    ) -> Result<ScoredCombination, ItemFailure> {
        let combination = Combination::from_record(record)?;

        let request = ScoringRequest {
            action_a: combination.action_a(),
            action_b: combination.action_b(),
            user_profile: combination.user_profile(),
            trace_id,
        };

        let label = timeout(self.call_timeout, self.oracle.score(request))
            .await
            .map_err(|_| OracleError::timeout(self.call_timeout))??;

        Ok(ScoredCombination::new(combination, label))
    }

    /// Single owner of the counters and result slots.
    async fn aggregate(
        mut rx: mpsc::Receiver<ItemOutcome>,
        total: usize,
    ) -> (Vec<ScoredCombination>, usize, usize) {
        let mut slots: Vec<Option<ScoredCombination>> = (0..total).map(|_| None).collect();
        let mut completed = 0usize;
        let mut failed = 0usize;

        while let Some(ItemOutcome {
            index,
            label,
            result,
        }) = rx.recv().await
        {
            match result {
                Ok(scored) => {
                    completed += 1;
                    tracing::info!(
                        index,
                        solution_a = %label.solution_a,
                        solution_b = %label.solution_b,
                        city = %label.city,
                        score = scored.score.as_u8(),
                        "[{}/{}] scored",
                        completed,
                        total
                    );
                    slots[index] = Some(scored);
                }
                Err(error) => {
                    failed += 1;
                    tracing::warn!(
                        index,
                        solution_a = %label.solution_a,
                        solution_b = %label.solution_b,
                        city = %label.city,
                        %error,
                        "[FAILED {}] item dropped",
                        failed
                    );
                }
            }
        }

        (slots.into_iter().flatten().collect(), completed, failed)
    }
}
