use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder};
use serde_json::Value;

use super::progress_reader::ProgressReader;
use super::redirect_policy::no_downgrade;
use crate::job::domain::api_error::ApiError;
use crate::job::domain::job_config::JobConfig;
use crate::job::domain::job_request::{JobKind, JobRequest, MediaSource};
use crate::job::domain::job_result::{JobResult, ResultFormat};
use crate::job::domain::job_status::{JobId, JobStatus};
use crate::job::domain::speech_api::{ProgressFn, SpeechApi};
use crate::shared::constants::{
    API_BASE_URL, CONFIG_PART, DATA_FILE_PART, JSON_CONTENT_TYPE, OCTET_STREAM_CONTENT_TYPE,
    TEXT_CONTENT_TYPE, TEXT_FILE_PART,
};

/// Speechmatics batch API over a single blocking HTTP client.
///
/// Every request carries the bearer token and uses the no-downgrade redirect
/// policy.
pub struct SpeechmaticsClient {
    http: Client,
    base_url: String,
    token: String,
}

impl SpeechmaticsClient {
    pub fn new(token: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_base_url(token, API_BASE_URL)
    }

    pub fn with_base_url(token: impl Into<String>, base_url: &str) -> Result<Self, ApiError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let http = Client::builder()
            .redirect(no_downgrade())
            .build()
            .map_err(|source| ApiError::Transport {
                url: base_url.clone(),
                source,
            })?;
        Ok(Self {
            http,
            base_url,
            token: token.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn jobs_url(&self) -> String {
        format!("{}/jobs", self.base_url)
    }

    fn job_url(&self, id: &JobId) -> String {
        format!("{}/jobs/{id}", self.base_url)
    }

    fn result_url(&self, id: &JobId, kind: JobKind) -> String {
        match kind {
            JobKind::Transcription => format!("{}/jobs/{id}/transcript", self.base_url),
            JobKind::Alignment => format!("{}/jobs/{id}/alignment", self.base_url),
        }
    }

    fn build_form(
        &self,
        request: &JobRequest,
        progress: Option<ProgressFn>,
    ) -> Result<Form, ApiError> {
        let config = JobConfig::from_request(request);
        if let Ok(pretty) = config.to_pretty_json() {
            log::debug!("Job config:\n{pretty}");
        }
        let config_json = config.to_json().map_err(ApiError::EncodeConfig)?;
        let config_part = typed_part(Part::text(config_json), CONFIG_PART, JSON_CONTENT_TYPE)?;
        let mut form = Form::new().part(CONFIG_PART, config_part);

        if let Some(script) = request.script() {
            let text = fs::read(script).map_err(|source| ApiError::OpenFile {
                path: script.to_path_buf(),
                source,
            })?;
            let part = Part::bytes(text).file_name(file_name(script));
            form = form.part(
                TEXT_FILE_PART,
                typed_part(part, TEXT_FILE_PART, TEXT_CONTENT_TYPE)?,
            );
        }

        if let MediaSource::LocalFile(path) = request.media() {
            if let Some(part) = media_part(path, progress)? {
                form = form.part(DATA_FILE_PART, part);
            }
        }

        Ok(form)
    }

    /// Send one request and return the raw body of a successful response.
    fn send(&self, request: RequestBuilder, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let headers = response
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect();
            let body = response
                .bytes()
                .map(|b| String::from_utf8_lossy(&b).into_owned())
                .unwrap_or_default();
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                body,
                headers,
            });
        }

        let body = response.bytes().map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;
        Ok(body.to_vec())
    }

    fn send_json(&self, request: RequestBuilder, url: &str) -> Result<Value, ApiError> {
        let body = self.send(request, url)?;
        let value: Value = serde_json::from_slice(&body).map_err(|source| ApiError::Json {
            url: url.to_string(),
            source,
        })?;
        if let Ok(pretty) = serde_json::to_string_pretty(&value) {
            log::debug!("{pretty}");
        }
        Ok(value)
    }
}

impl SpeechApi for SpeechmaticsClient {
    fn create_job(
        &self,
        request: &JobRequest,
        progress: Option<ProgressFn>,
    ) -> Result<JobId, ApiError> {
        let url = self.jobs_url();
        let form = self.build_form(request, progress)?;
        log::info!("Submitting {} job to {url}", request.kind().as_str());

        let value = self.send_json(self.http.post(&url).multipart(form), &url)?;
        let id = value.get("id").and_then(Value::as_str).unwrap_or_default();
        JobId::new(id).ok_or_else(|| ApiError::MissingJobId {
            body: value.to_string(),
        })
    }

    fn job_status(&self, id: &JobId) -> Result<JobStatus, ApiError> {
        let url = self.job_url(id);
        let value = self.send_json(self.http.get(&url), &url)?;
        Ok(JobStatus::from_response(&value))
    }

    fn fetch_result(
        &self,
        id: &JobId,
        kind: JobKind,
        format: ResultFormat,
    ) -> Result<JobResult, ApiError> {
        let url = self.result_url(id, kind);
        let request = match kind {
            JobKind::Transcription => self
                .http
                .get(&url)
                .query(&[("format", format.query_value())]),
            JobKind::Alignment => self.http.get(&url),
        };
        let body = self.send(request, &url)?;
        log::debug!("Fetched {} bytes from {url}", body.len());
        Ok(JobResult::from_body(kind, format, body))
    }
}

/// The `data_file` part for a local media path. A path that cannot be read
/// as a regular file is logged and left out; the job is still submitted.
fn media_part(path: &Path, progress: Option<ProgressFn>) -> Result<Option<Part>, ApiError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            log::error!("Unable to open {}: {e}", path.display());
            return Ok(None);
        }
    };
    let total = match file.metadata() {
        Ok(meta) if meta.is_file() => meta.len(),
        Ok(_) => {
            log::error!("Unable to open {}: not a regular file", path.display());
            return Ok(None);
        }
        Err(e) => {
            log::error!("Unable to open {}: {e}", path.display());
            return Ok(None);
        }
    };

    let body: Box<dyn Read + Send> = match progress {
        Some(progress) => Box::new(ProgressReader::new(file, total, progress)),
        None => Box::new(file),
    };
    log::info!("Uploading {} ({total} bytes)", path.display());
    let part = Part::reader_with_length(body, total).file_name(file_name(path));
    typed_part(part, DATA_FILE_PART, OCTET_STREAM_CONTENT_TYPE).map(Some)
}

fn typed_part(part: Part, name: &'static str, content_type: &str) -> Result<Part, ApiError> {
    part.mime_str(content_type)
        .map_err(|source| ApiError::BuildPart { part: name, source })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
