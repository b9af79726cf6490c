use std::path::{Path, PathBuf};

/// What the provider is asked to do with the media.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobKind {
    Transcription,
    Alignment,
}

impl JobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::Transcription => "transcription",
            JobKind::Alignment => "alignment",
        }
    }
}

/// Where the provider gets the media from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaSource {
    /// Uploaded inline as the `data_file` part.
    LocalFile(PathBuf),
    /// Downloaded by the provider itself via `fetch_data`.
    RemoteUrl(String),
}

/// One job submission, built once per invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobRequest {
    language: String,
    media: MediaSource,
    script: Option<PathBuf>,
}

impl JobRequest {
    pub fn new(language: impl Into<String>, media: MediaSource, script: Option<PathBuf>) -> Self {
        Self {
            language: language.into(),
            media,
            script,
        }
    }

    /// Classify raw command-line inputs.
    ///
    /// A media argument naming an existing path is uploaded, anything else is
    /// treated as a URL for the provider to fetch. A script argument only
    /// turns the job into an alignment when it names an existing file.
    pub fn resolve(media: &str, language: &str, script: Option<&str>) -> Self {
        let media_path = Path::new(media);
        let media = if media_path.exists() {
            MediaSource::LocalFile(media_path.to_path_buf())
        } else {
            MediaSource::RemoteUrl(media.to_string())
        };

        let script = script.map(Path::new).filter(|p| p.is_file()).map(Path::to_path_buf);

        Self::new(language, media, script)
    }

    pub fn kind(&self) -> JobKind {
        if self.script.is_some() {
            JobKind::Alignment
        } else {
            JobKind::Transcription
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn media(&self) -> &MediaSource {
        &self.media
    }

    pub fn script(&self) -> Option<&Path> {
        self.script.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_existing_media_is_uploaded() {
        let tmp = TempDir::new().unwrap();
        let audio = tmp.path().join("clip.wav");
        fs::write(&audio, b"RIFF").unwrap();

        let req = JobRequest::resolve(audio.to_str().unwrap(), "en", None);
        assert_eq!(req.media(), &MediaSource::LocalFile(audio));
        assert_eq!(req.kind(), JobKind::Transcription);
    }

    #[test]
    fn test_missing_media_becomes_url() {
        let req = JobRequest::resolve("nonexistent/path.wav", "en", None);
        assert_eq!(
            req.media(),
            &MediaSource::RemoteUrl("nonexistent/path.wav".to_string())
        );
    }

    #[test]
    fn test_url_media_is_fetched_remotely() {
        let req = JobRequest::resolve("https://example.com/a.mp3", "de", None);
        assert_eq!(
            req.media(),
            &MediaSource::RemoteUrl("https://example.com/a.mp3".to_string())
        );
        assert_eq!(req.language(), "de");
    }

    #[test]
    fn test_existing_script_selects_alignment() {
        let tmp = TempDir::new().unwrap();
        let script = tmp.path().join("script.txt");
        fs::write(&script, "hello world").unwrap();

        let req = JobRequest::resolve("https://example.com/a.mp3", "en", script.to_str());
        assert_eq!(req.kind(), JobKind::Alignment);
        assert_eq!(req.script(), Some(script.as_path()));
    }

    #[test]
    fn test_missing_script_keeps_transcription() {
        let req = JobRequest::resolve("https://example.com/a.mp3", "en", Some("no/such/script.txt"));
        assert_eq!(req.kind(), JobKind::Transcription);
        assert!(req.script().is_none());
    }

    #[test]
    fn test_directory_script_does_not_select_alignment() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().to_str().unwrap();
        let req = JobRequest::resolve("https://example.com/a.mp3", "en", Some(dir));
        assert_eq!(req.kind(), JobKind::Transcription);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(JobKind::Transcription.as_str(), "transcription");
        assert_eq!(JobKind::Alignment.as_str(), "alignment");
    }
}
