pub mod job_error;
pub mod job_logger;
pub mod poll_policy;
pub mod run_job_use_case;
