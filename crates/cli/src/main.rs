use std::io::{self, Write};
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::Parser;

use batch_asr_core::job::domain::job_request::{JobRequest, MediaSource};
use batch_asr_core::job::domain::job_result::{JobResult, ResultFormat};
use batch_asr_core::job::domain::speech_api::ProgressFn;
use batch_asr_core::job::infrastructure::speechmatics_client::SpeechmaticsClient;
use batch_asr_core::pipeline::job_logger::StdoutJobLogger;
use batch_asr_core::pipeline::poll_policy::PollPolicy;
use batch_asr_core::pipeline::run_job_use_case::RunJobUseCase;
use batch_asr_core::shared::constants::{API_BASE_URL, DEFAULT_POLL_INTERVAL_MS};

/// Submit media for batch transcription or alignment and print the result.
#[derive(Parser, Debug)]
#[command(name = "batch-asr", version)]
struct Cli {
    /// API token, sent as a bearer token.
    token: String,

    /// Local media file to upload, or a URL for the service to fetch.
    media: String,

    /// Language code, e.g. "en".
    language: String,

    /// Text file with the spoken script; switches to alignment when it exists.
    script: Option<String>,

    /// Delay between job status checks, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    poll_interval_ms: u64,

    /// Give up after this many status checks (default: never).
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Transcript format: json, txt or srt.
    #[arg(long, default_value = "json")]
    format: String,

    /// API base URL.
    #[arg(long, default_value = API_BASE_URL)]
    base_url: String,
}

fn main() {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            e.print().ok();
            process::exit(-1);
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let format = validate(&cli)?;

    let request = JobRequest::resolve(&cli.media, &cli.language, cli.script.as_deref());
    log::info!(
        "Starting {} job ({}, language {})",
        request.kind().as_str(),
        describe_media(request.media()),
        request.language()
    );

    let api = SpeechmaticsClient::with_base_url(cli.token, &cli.base_url)?;
    let policy = PollPolicy::new(Duration::from_millis(cli.poll_interval_ms), cli.max_attempts);
    let progress: Option<ProgressFn> = match request.media() {
        MediaSource::LocalFile(_) => Some(Arc::new(upload_progress) as ProgressFn),
        MediaSource::RemoteUrl(_) => None,
    };

    let mut use_case = RunJobUseCase::new(
        Box::new(api),
        Box::new(StdoutJobLogger::new()),
        policy,
        format,
        progress,
    );
    let result = use_case.execute(&request)?;

    match &result {
        JobResult::Transcript(_) => println!("{result}"),
        JobResult::Alignment(raw) | JobResult::Text(raw) => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(raw)?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn validate(cli: &Cli) -> Result<ResultFormat, Box<dyn std::error::Error>> {
    if let Some(0) = cli.max_attempts {
        return Err("Max attempts must be at least 1".into());
    }
    if !cli.base_url.starts_with("https://") && !cli.base_url.starts_with("http://") {
        return Err(format!(
            "Base URL must start with http:// or https://, got '{}'",
            cli.base_url
        )
        .into());
    }
    Ok(cli.format.parse::<ResultFormat>()?)
}

fn describe_media(media: &MediaSource) -> String {
    match media {
        MediaSource::LocalFile(path) => format!("uploading {}", path.display()),
        MediaSource::RemoteUrl(url) => format!("fetching {url}"),
    }
}

fn upload_progress(sent: u64, total: u64) {
    if total > 0 {
        let pct = (sent as f64 / total as f64 * 100.0) as u32;
        eprint!("\rUploading media... {pct}% ({sent}/{total} bytes)");
    } else {
        eprint!("\rUploading media... {sent} bytes");
    }
    if sent >= total {
        eprintln!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("batch-asr").chain(args.iter().copied()))
    }

    #[test]
    fn test_three_positionals_use_defaults() {
        let cli = parse(&["tok", "nonexistent/path.wav", "en"]).unwrap();
        assert_eq!(cli.token, "tok");
        assert_eq!(cli.media, "nonexistent/path.wav");
        assert_eq!(cli.language, "en");
        assert!(cli.script.is_none());
        assert_eq!(cli.poll_interval_ms, 5000);
        assert!(cli.max_attempts.is_none());
        assert_eq!(cli.base_url, API_BASE_URL);
        assert_eq!(validate(&cli).unwrap(), ResultFormat::Json);
    }

    #[test]
    fn test_script_positional() {
        let cli = parse(&["tok", "a.wav", "en", "script.txt"]).unwrap();
        assert_eq!(cli.script.as_deref(), Some("script.txt"));
    }

    #[test]
    fn test_missing_positionals_are_rejected() {
        let err = parse(&["tok", "a.wav"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        let err = parse(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_optional_flags() {
        let cli = parse(&[
            "tok",
            "a.wav",
            "en",
            "--poll-interval-ms",
            "250",
            "--max-attempts",
            "3",
            "--format",
            "srt",
        ])
        .unwrap();
        assert_eq!(cli.poll_interval_ms, 250);
        assert_eq!(cli.max_attempts, Some(3));
        assert_eq!(validate(&cli).unwrap(), ResultFormat::Srt);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cli = parse(&["tok", "a.wav", "en", "--max-attempts", "0"]).unwrap();
        assert!(validate(&cli).is_err());

        let cli = parse(&["tok", "a.wav", "en", "--format", "vtt"]).unwrap();
        assert!(validate(&cli).is_err());

        let cli = parse(&["tok", "a.wav", "en", "--base-url", "ftp://host"]).unwrap();
        assert!(validate(&cli).is_err());
    }
}
