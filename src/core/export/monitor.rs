//! Operation monitor
//!
//! Polls a long-running export operation until it reports `done`. The
//! interval, overall timeout and attempt cap come from [`PollingPolicy`];
//! leaving both limits unset polls until the operation finishes.

use crate::adapters::firestore::ExportService;
use crate::config::PollingConfig;
use crate::domain::{
    FirestoreError, FsExportError, Operation, OperationName, OperationState, Result,
};
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// How often and for how long to poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollingPolicy {
    pub interval: Duration,
    pub timeout: Option<Duration>,
    pub max_attempts: Option<u32>,
}

impl PollingPolicy {
    /// Fixed interval with no limits
    pub fn every(interval: Duration) -> Self {
        Self {
            interval,
            timeout: None,
            max_attempts: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }
}

impl Default for PollingPolicy {
    fn default() -> Self {
        Self::every(Duration::from_secs(10))
    }
}

impl From<&PollingConfig> for PollingPolicy {
    fn from(config: &PollingConfig) -> Self {
        Self {
            interval: config.interval(),
            timeout: config.timeout(),
            max_attempts: config.max_attempts,
        }
    }
}

/// Result of a completed wait
#[derive(Debug, Clone)]
pub struct MonitorOutcome {
    /// Final operation snapshot (`done == true`, no error)
    pub operation: Operation,

    /// Number of status requests made
    pub attempts: u32,

    pub elapsed: Duration,
}

/// Waits for an export operation to finish
pub struct OperationMonitor<'a> {
    service: &'a dyn ExportService,
    policy: PollingPolicy,
    shutdown: watch::Receiver<bool>,
}

impl<'a> OperationMonitor<'a> {
    pub fn new(
        service: &'a dyn ExportService,
        policy: PollingPolicy,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            service,
            policy,
            shutdown,
        }
    }

    /// Polls `name` until it is done
    ///
    /// # Errors
    ///
    /// - [`FirestoreError::OperationMonitoringFailed`] on a non-success status
    ///   response; no further request is made
    /// - [`FirestoreError::OperationFailed`] when the finished operation
    ///   carries an error status
    /// - [`FsExportError::PollTimeout`] when the timeout or attempt cap is hit
    /// - [`FsExportError::Interrupted`] when a shutdown signal arrives
    pub async fn wait_for_completion(&mut self, name: &OperationName) -> Result<MonitorOutcome> {
        let started = Instant::now();
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            let operation = self.service.get_operation(name).await?;

            if operation.state() == OperationState::Done {
                if let Some(status) = &operation.error {
                    return Err(FirestoreError::OperationFailed {
                        name: name.to_string(),
                        code: status.code,
                        message: status.message.clone(),
                    }
                    .into());
                }

                tracing::info!(
                    operation = %name,
                    attempts,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Operation complete"
                );
                return Ok(MonitorOutcome {
                    operation,
                    attempts,
                    elapsed: started.elapsed(),
                });
            }

            log_progress(name, &operation, attempts);

            let timed_out = |elapsed: Duration| {
                FsExportError::PollTimeout {
                    operation: name.to_string(),
                    attempts,
                    elapsed,
                }
            };

            if self.policy.max_attempts.is_some_and(|max| attempts >= max) {
                return Err(timed_out(started.elapsed()));
            }

            let mut delay = self.policy.interval;
            if let Some(timeout) = self.policy.timeout {
                let remaining = timeout.saturating_sub(started.elapsed());
                if remaining.is_zero() {
                    return Err(timed_out(started.elapsed()));
                }
                delay = delay.min(remaining);
            }

            if wait_or_shutdown(&mut self.shutdown, delay).await {
                tracing::warn!(operation = %name, "Shutdown requested while waiting for export");
                return Err(FsExportError::Interrupted(name.to_string()));
            }
        }
    }
}

fn log_progress(name: &OperationName, operation: &Operation, attempts: u32) {
    let docs = operation.document_progress();
    let bytes = operation.byte_progress();
    tracing::info!(
        operation = %name,
        attempts,
        state = operation.reported_state().unwrap_or("UNKNOWN"),
        documents_completed = docs.map(|p| p.completed),
        documents_estimated = docs.map(|p| p.estimated),
        bytes_completed = bytes.map(|p| p.completed),
        percent = docs.and_then(|p| p.percent()),
        "Operation in progress, waiting..."
    );
}

/// Sleeps for `delay`, returning `true` early if shutdown was signalled
async fn wait_or_shutdown(shutdown: &mut watch::Receiver<bool>, delay: Duration) -> bool {
    if *shutdown.borrow() {
        return true;
    }

    let sleep = tokio::time::sleep(delay);
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            _ = &mut sleep => return false,
            changed = shutdown.changed() => match changed {
                Ok(()) if *shutdown.borrow() => return true,
                Ok(()) => continue,
                // Sender gone: nobody can signal any more
                Err(_) => {
                    (&mut sleep).await;
                    return false;
                }
            },
        }
    }
}
