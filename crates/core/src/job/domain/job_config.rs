use serde::Serialize;

use super::job_request::{JobKind, JobRequest, MediaSource};
use crate::shared::constants::OPERATING_POINT;

/// The JSON document sent as the `config` part of a job submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JobConfig {
    Transcription {
        transcription_config: RecognitionConfig,
        #[serde(skip_serializing_if = "Option::is_none")]
        fetch_data: Option<FetchData>,
    },
    Alignment {
        alignment_config: RecognitionConfig,
        #[serde(skip_serializing_if = "Option::is_none")]
        fetch_data: Option<FetchData>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecognitionConfig {
    pub language: String,
    pub operating_point: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FetchData {
    pub url: String,
}

impl JobConfig {
    pub fn from_request(request: &JobRequest) -> Self {
        let recognition = RecognitionConfig {
            language: request.language().to_string(),
            operating_point: OPERATING_POINT.to_string(),
        };
        let fetch_data = match request.media() {
            MediaSource::RemoteUrl(url) => Some(FetchData { url: url.clone() }),
            MediaSource::LocalFile(_) => None,
        };

        match request.kind() {
            JobKind::Transcription => JobConfig::Transcription {
                transcription_config: recognition,
                fetch_data,
            },
            JobKind::Alignment => JobConfig::Alignment {
                alignment_config: recognition,
                fetch_data,
            },
        }
    }

    pub fn fetch_data(&self) -> Option<&FetchData> {
        match self {
            JobConfig::Transcription { fetch_data, .. } | JobConfig::Alignment { fetch_data, .. } => {
                fetch_data.as_ref()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    #[test]
    fn test_missing_local_path_becomes_fetch_data() {
        let request = JobRequest::resolve("nonexistent/path.wav", "en", None);
        let value = serde_json::to_value(JobConfig::from_request(&request)).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "transcription",
                "transcription_config": {"language": "en", "operating_point": "enhanced"},
                "fetch_data": {"url": "nonexistent/path.wav"}
            })
        );
    }

    #[test]
    fn test_local_upload_omits_fetch_data() {
        let request = JobRequest::new(
            "fr",
            MediaSource::LocalFile(PathBuf::from("clip.wav")),
            None,
        );
        let config = JobConfig::from_request(&request);
        assert!(config.fetch_data().is_none());

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "transcription",
                "transcription_config": {"language": "fr", "operating_point": "enhanced"}
            })
        );
    }

    #[test]
    fn test_alignment_uses_alignment_config() {
        let request = JobRequest::new(
            "en",
            MediaSource::RemoteUrl("https://example.com/talk.mp3".to_string()),
            Some(PathBuf::from("script.txt")),
        );
        let value = serde_json::to_value(JobConfig::from_request(&request)).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "alignment",
                "alignment_config": {"language": "en", "operating_point": "enhanced"},
                "fetch_data": {"url": "https://example.com/talk.mp3"}
            })
        );
    }

    #[test]
    fn test_compact_json_parses_back() {
        let request = JobRequest::resolve("https://example.com/a.mp3", "es", None);
        let config = JobConfig::from_request(&request);
        let text = config.to_json().unwrap();
        assert!(!text.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["type"], "transcription");
        assert_eq!(value["fetch_data"]["url"], "https://example.com/a.mp3");
    }
}
