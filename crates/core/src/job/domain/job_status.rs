use std::fmt;

/// Server-issued job identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    /// Returns `None` for an empty id, which the provider never issues for a
    /// created job.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Provider-side job state, as reported by `job.status`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobStatus {
    Running,
    Done,
    Rejected,
    Deleted,
    Expired,
    Other(String),
}

impl JobStatus {
    /// Parse the raw status string. Matching is exact: `"Done"` is not done.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "running" => JobStatus::Running,
            "done" => JobStatus::Done,
            "rejected" => JobStatus::Rejected,
            "deleted" => JobStatus::Deleted,
            "expired" => JobStatus::Expired,
            other => JobStatus::Other(other.to_string()),
        }
    }

    /// Extract `job.status` from a status response body. Any missing or
    /// non-string field yields `Other("")`.
    pub fn from_response(body: &serde_json::Value) -> Self {
        body.get("job")
            .and_then(|job| job.get("status"))
            .and_then(|status| status.as_str())
            .map(Self::parse)
            .unwrap_or_else(|| JobStatus::Other(String::new()))
    }

    pub fn is_done(&self) -> bool {
        matches!(self, JobStatus::Done)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Running => f.write_str("running"),
            JobStatus::Done => f.write_str("done"),
            JobStatus::Rejected => f.write_str("rejected"),
            JobStatus::Deleted => f.write_str("deleted"),
            JobStatus::Expired => f.write_str("expired"),
            JobStatus::Other(s) => f.write_str(s),
        }
    }
}
