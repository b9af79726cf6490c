use std::fmt;
use std::str::FromStr;

use super::job_request::JobKind;

/// Transcript output format requested from the provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResultFormat {
    #[default]
    Json,
    Text,
    Srt,
}

impl ResultFormat {
    /// Value of the `format` query parameter on the transcript endpoint.
    pub fn query_value(&self) -> &'static str {
        match self {
            ResultFormat::Json => "json-v2",
            ResultFormat::Text => "txt",
            ResultFormat::Srt => "srt",
        }
    }
}

impl FromStr for ResultFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" | "json-v2" => Ok(ResultFormat::Json),
            "txt" | "text" => Ok(ResultFormat::Text),
            "srt" => Ok(ResultFormat::Srt),
            other => Err(format!(
                "Result format must be one of: json, txt, srt, got '{other}'"
            )),
        }
    }
}

/// The artifact fetched once a job is done.
#[derive(Clone, Debug, PartialEq)]
pub enum JobResult {
    Transcript(serde_json::Value),
    /// Provider-defined alignment payload, exactly as received.
    Alignment(Vec<u8>),
    /// Non-JSON transcript body, exactly as received.
    Text(Vec<u8>),
}

impl JobResult {
    /// Interpret a result body. Only JSON transcripts are decoded; those that
    /// fail to parse are kept verbatim as text rather than discarded.
    pub fn from_body(kind: JobKind, format: ResultFormat, body: Vec<u8>) -> Self {
        match (kind, format) {
            (JobKind::Alignment, _) => JobResult::Alignment(body),
            (JobKind::Transcription, ResultFormat::Json) => {
                match serde_json::from_slice::<serde_json::Value>(&body) {
                    Ok(value) => JobResult::Transcript(value),
                    Err(e) => {
                        log::warn!("Transcript is not valid JSON ({e}), keeping raw body");
                        JobResult::Text(body)
                    }
                }
            }
            (JobKind::Transcription, _) => JobResult::Text(body),
        }
    }

    /// Bytes written to stdout: pretty JSON for transcripts, the body as
    /// received for everything else.
    pub fn render(&self) -> Vec<u8> {
        match self {
            JobResult::Transcript(value) => serde_json::to_vec_pretty(value)
                .unwrap_or_else(|_| value.to_string().into_bytes()),
            JobResult::Alignment(raw) | JobResult::Text(raw) => raw.clone(),
        }
    }
}

impl fmt::Display for JobResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.render()))
    }
}
