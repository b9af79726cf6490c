pub mod api_error;
pub mod job_status;
pub mod job_config;
pub mod job_request;
pub mod job_result;
pub mod speech_api;
