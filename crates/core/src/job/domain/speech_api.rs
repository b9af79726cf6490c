use std::sync::Arc;

use super::api_error::ApiError;
use super::job_request::{JobKind, JobRequest};
use super::job_result::{JobResult, ResultFormat};
use super::job_status::{JobId, JobStatus};

/// Upload progress callback: `(bytes_sent, bytes_total)`.
pub type ProgressFn = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Domain interface to a batch speech recognition provider.
///
/// Each call is a single blocking request/response exchange.
pub trait SpeechApi: Send {
    fn create_job(
        &self,
        request: &JobRequest,
        progress: Option<ProgressFn>,
    ) -> Result<JobId, ApiError>;

    fn job_status(&self, id: &JobId) -> Result<JobStatus, ApiError>;

    fn fetch_result(
        &self,
        id: &JobId,
        kind: JobKind,
        format: ResultFormat,
    ) -> Result<JobResult, ApiError>;
}
