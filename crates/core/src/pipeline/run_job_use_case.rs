use std::thread;

use crate::job::domain::api_error::ApiError;
use crate::job::domain::job_request::{JobKind, JobRequest};
use crate::job::domain::job_result::{JobResult, ResultFormat};
use crate::job::domain::job_status::{JobId, JobStatus};
use crate::job::domain::speech_api::{ProgressFn, SpeechApi};
use crate::pipeline::job_error::JobError;
use crate::pipeline::job_logger::JobLogger;
use crate::pipeline::poll_policy::PollPolicy;

/// Submit a job, wait for it to finish, fetch the result.
///
/// All calls are sequential and blocking; the only delay is the fixed
/// interval between status checks.
pub struct RunJobUseCase {
    api: Box<dyn SpeechApi>,
    logger: Box<dyn JobLogger>,
    policy: PollPolicy,
    format: ResultFormat,
    progress: Option<ProgressFn>,
}

impl RunJobUseCase {
    pub fn new(
        api: Box<dyn SpeechApi>,
        logger: Box<dyn JobLogger>,
        policy: PollPolicy,
        format: ResultFormat,
        progress: Option<ProgressFn>,
    ) -> Self {
        Self {
            api,
            logger,
            policy,
            format,
            progress,
        }
    }

    pub fn execute(&mut self, request: &JobRequest) -> Result<JobResult, JobError> {
        let id = self.submit(request)?;
        self.poll_until_done(&id)?;
        let result = self.retrieve(&id, request.kind())?;
        self.logger.summary();
        Ok(result)
    }

    pub fn submit(&mut self, request: &JobRequest) -> Result<JobId, JobError> {
        match self.api.create_job(request, self.progress.clone()) {
            Ok(id) => {
                self.logger.submitted(&id);
                Ok(id)
            }
            Err(e) => {
                log_failure("Job submission failed", &e);
                Err(JobError::Submit(e))
            }
        }
    }

    /// One status check. Any failure counts as not done.
    pub fn check_done(&self, id: &JobId) -> bool {
        self.check(id).is_some_and(|status| status.is_done())
    }

    /// Check status until the job is done, sleeping the policy interval
    /// between checks. Returns the number of checks made.
    pub fn poll_until_done(&mut self, id: &JobId) -> Result<u32, JobError> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let status = self.check(id);
            self.logger.poll_attempt(attempts, status.as_ref());

            if status.is_some_and(|s| s.is_done()) {
                return Ok(attempts);
            }
            if self.policy.is_exhausted(attempts) {
                return Err(JobError::TimedOut {
                    id: id.clone(),
                    attempts,
                });
            }
            thread::sleep(self.policy.interval);
        }
    }

    pub fn retrieve(&mut self, id: &JobId, kind: JobKind) -> Result<JobResult, JobError> {
        match self.api.fetch_result(id, kind, self.format) {
            Ok(result) => {
                self.logger
                    .info(&format!("Fetched {} for job {id}", result_name(kind)));
                Ok(result)
            }
            Err(source) => {
                log_failure("Result retrieval failed", &source);
                Err(JobError::Retrieve {
                    id: id.clone(),
                    source,
                })
            }
        }
    }

    fn check(&self, id: &JobId) -> Option<JobStatus> {
        match self.api.job_status(id) {
            Ok(status) => Some(status),
            Err(e) => {
                log::warn!("Status check for job {id} failed: {e}");
                None
            }
        }
    }
}

fn result_name(kind: JobKind) -> &'static str {
    match kind {
        JobKind::Transcription => "transcript",
        JobKind::Alignment => "alignment",
    }
}

fn log_failure(context: &str, error: &ApiError) {
    log::error!("{context}: {error}");
    for (name, value) in error.headers() {
        log::error!("  {name}: {value}");
    }
}
