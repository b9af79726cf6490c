use std::collections::HashMap;
use std::time::Instant;

use crate::job::domain::job_status::{JobId, JobStatus};

/// Observer for job workflow events.
///
/// Keeps the workflow free of any particular output mechanism so the CLI and
/// tests can watch submission and polling without changing orchestration.
pub trait JobLogger: Send {
    /// A job was accepted by the provider.
    fn submitted(&mut self, id: &JobId);

    /// One status check finished. `status` is `None` when the check failed.
    fn poll_attempt(&mut self, attempt: u32, status: Option<&JobStatus>);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-job summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullJobLogger;

impl JobLogger for NullJobLogger {
    fn submitted(&mut self, _id: &JobId) {}
    fn poll_attempt(&mut self, _attempt: u32, _status: Option<&JobStatus>) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI-oriented logger that counts status checks and reports a summary
/// once the result is in.
pub struct StdoutJobLogger {
    job_id: Option<JobId>,
    attempts: u32,
    failed_checks: u32,
    statuses: HashMap<String, u32>,
    start_time: Instant,
}

impl StdoutJobLogger {
    pub fn new() -> Self {
        Self {
            job_id: None,
            attempts: 0,
            failed_checks: 0,
            statuses: HashMap::new(),
            start_time: Instant::now(),
        }
    }

    /// Returns the formatted summary string, or `None` if no job was submitted.
    pub fn summary_string(&self) -> Option<String> {
        let id = self.job_id.as_ref()?;
        let elapsed = self.start_time.elapsed().as_secs_f64();
        let mut lines = vec![format!(
            "Job {id} summary ({} status checks, {elapsed:.1}s total):",
            self.attempts
        )];

        let mut names: Vec<_> = self.statuses.keys().collect();
        names.sort();
        for name in names {
            let label = if name.is_empty() { "<none>" } else { name };
            lines.push(format!("  {label:10}: {}", self.statuses[name]));
        }
        if self.failed_checks > 0 {
            lines.push(format!("  failed    : {}", self.failed_checks));
        }

        Some(lines.join("\n"))
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn status_count(&self, status: &str) -> u32 {
        self.statuses.get(status).copied().unwrap_or(0)
    }
}

impl Default for StdoutJobLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl JobLogger for StdoutJobLogger {
    fn submitted(&mut self, id: &JobId) {
        log::info!("Job created: {id}");
        self.job_id = Some(id.clone());
    }

    fn poll_attempt(&mut self, attempt: u32, status: Option<&JobStatus>) {
        self.attempts = attempt;
        match status {
            Some(status) => {
                log::info!("Status check {attempt}: {status}");
                *self.statuses.entry(status.to_string()).or_default() += 1;
            }
            None => {
                log::info!("Status check {attempt}: no answer");
                self.failed_checks += 1;
            }
        }
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
