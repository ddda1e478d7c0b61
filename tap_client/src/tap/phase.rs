use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// UWS execution phase reported by the server for an async job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobPhase {
    Pending,
    Queued,
    Executing,
    Completed,
    Error,
    Aborted,
    Unknown,
    Held,
    Suspended,
    Archived,
    /// Anything outside the UWS vocabulary, kept verbatim
    Other(String),
}

impl JobPhase {
    /// Wire text of the phase.
    pub fn as_str(&self) -> &str {
        match self {
            JobPhase::Pending => "PENDING",
            JobPhase::Queued => "QUEUED",
            JobPhase::Executing => "EXECUTING",
            JobPhase::Completed => "COMPLETED",
            JobPhase::Error => "ERROR",
            JobPhase::Aborted => "ABORTED",
            JobPhase::Unknown => "UNKNOWN",
            JobPhase::Held => "HELD",
            JobPhase::Suspended => "SUSPENDED",
            JobPhase::Archived => "ARCHIVED",
            JobPhase::Other(s) => s,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, JobPhase::Completed)
    }

    /// Phases after which the job will never produce a result.
    pub fn is_failed(&self) -> bool {
        matches!(self, JobPhase::Error | JobPhase::Aborted)
    }

    /// Phases from which the server will not move on by itself.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobPhase::Completed | JobPhase::Error | JobPhase::Aborted | JobPhase::Archived
        )
    }
}

impl FromStr for JobPhase {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let phase = match s.trim() {
            "PENDING" => JobPhase::Pending,
            "QUEUED" => JobPhase::Queued,
            "EXECUTING" => JobPhase::Executing,
            "COMPLETED" => JobPhase::Completed,
            "ERROR" => JobPhase::Error,
            "ABORTED" => JobPhase::Aborted,
            "UNKNOWN" => JobPhase::Unknown,
            "HELD" => JobPhase::Held,
            "SUSPENDED" => JobPhase::Suspended,
            "ARCHIVED" => JobPhase::Archived,
            other => JobPhase::Other(other.to_string()),
        };
        Ok(phase)
    }
}

impl fmt::Display for JobPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
