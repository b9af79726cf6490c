use thiserror::Error;

use crate::job::domain::api_error::ApiError;
use crate::job::domain::job_status::JobId;

#[derive(Error, Debug)]
pub enum JobError {
    #[error("job submission failed: {0}")]
    Submit(#[source] ApiError),
    #[error("job {id} still not done after {attempts} status checks")]
    TimedOut { id: JobId, attempts: u32 },
    #[error("fetching result for job {id} failed: {source}")]
    Retrieve {
        id: JobId,
        #[source]
        source: ApiError,
    },
}
