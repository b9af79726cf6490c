pub const API_BASE_URL: &str = "https://trial.asr.api.speechmatics.com/v2";

/// Recognition quality tier requested for every job.
pub const OPERATING_POINT: &str = "enhanced";

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5000;

/// Redirect hops followed before a request is abandoned.
pub const MAX_REDIRECTS: usize = 10;

pub const CONFIG_PART: &str = "config";
pub const DATA_FILE_PART: &str = "data_file";
pub const TEXT_FILE_PART: &str = "text_file";

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const OCTET_STREAM_CONTENT_TYPE: &str = "application/octet-stream";
pub const TEXT_CONTENT_TYPE: &str = "text/plain";
