//! Asynchronous TAP queries.
//!
//! An [`AsyncJob`] is created unsubmitted. [`AsyncJob::submit`] creates the
//! UWS job on the server and records its identifier; only then can the phase
//! be read ([`AsyncJob::status`]) and the result fetched ([`AsyncJob::get`]).
//! Every read is a fresh request: nothing from a previous call is cached.

use log::{debug, info};
use reqwest::header::LOCATION;
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;

use super::phase::JobPhase;
use super::uws::{parse_job_document, JobInfo};
use super::{endpoint_url, read_table};
use crate::config::ClientConfig;
use crate::error::{TapError, TapResult};
use crate::http::{build_client, build_submit_client, get_text, query_form};
use crate::votable::VoTable;

/// Server answer to a job submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub status: u16,
    pub reason: String,
    /// Job URL from the `Location` header
    pub location: String,
    /// Last path segment of `location`
    pub job_id: String,
}

/// Result of [`AsyncJob::get`].
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    /// The job completed and its result table was fetched
    Completed(VoTable),
    /// The job was not complete when checked; no result was requested
    NotReady(JobPhase),
}

impl JobOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, JobOutcome::Completed(_))
    }

    /// The result table, if the job completed.
    pub fn into_table(self) -> Option<VoTable> {
        match self {
            JobOutcome::Completed(table) => Some(table),
            JobOutcome::NotReady(_) => None,
        }
    }
}

/// An ADQL query run as a UWS job on a TAP service.
///
/// Connection parameters are copied from the owning service; `path` is the
/// service's async resource (`{service path}/async`).
#[derive(Debug, Clone)]
pub struct AsyncJob {
    adql: String,
    host: String,
    path: String,
    port: u16,
    config: ClientConfig,
    submission: Option<Submission>,
}

impl AsyncJob {
    /// Create an unsubmitted job.
    pub fn new(
        adql: impl Into<String>,
        host: impl Into<String>,
        path: impl Into<String>,
        port: u16,
    ) -> Self {
        Self {
            adql: adql.into(),
            host: host.into(),
            path: path.into(),
            port,
            config: ClientConfig::default(),
            submission: None,
        }
    }

    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn adql(&self) -> &str {
        &self.adql
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// URL of the async resource jobs are submitted to.
    pub fn url(&self) -> String {
        endpoint_url(&self.host, self.port, &self.path)
    }

    pub fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }

    pub fn job_id(&self) -> Option<&str> {
        self.submission.as_ref().map(|s| s.job_id.as_str())
    }

    pub fn location(&self) -> Option<&str> {
        self.submission.as_ref().map(|s| s.location.as_str())
    }

    pub fn is_submitted(&self) -> bool {
        self.submission.is_some()
    }

    /// Submit the query to the server.
    ///
    /// POSTs the query form with `phase=run` so the job starts immediately,
    /// then takes the job identifier from the `Location` header of the
    /// answer. Unless `silent` is set, status, location and job id are
    /// logged at `info` level.
    ///
    /// # Errors
    /// * `TapError::Http` - the request could not be sent
    /// * `TapError::HttpStatus` - the server rejected the submission
    /// * `TapError::MissingLocation` - the answer names no job
    pub fn submit(&mut self, silent: bool) -> TapResult<&Submission> {
        let url = self.url();
        let client = build_submit_client(&self.config)?;

        debug!("POST {}", url);
        let response = client.post(&url).form(&query_form(&self.adql)).send()?;

        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let location = match location {
            Some(location) => location,
            None if status.is_client_error() || status.is_server_error() => {
                let body = response.text().unwrap_or_default();
                return Err(TapError::HttpStatus {
                    status: status.as_u16(),
                    body: body.trim().to_string(),
                });
            }
            None => {
                return Err(TapError::MissingLocation {
                    status: status.as_u16(),
                })
            }
        };

        let job_id = match location.rfind('/') {
            Some(idx) => location[idx + 1..].to_string(),
            None => location.clone(),
        };

        let submission = Submission {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
            location,
            job_id,
        };

        if silent {
            debug!("Submitted job {} at {}", submission.job_id, submission.location);
        } else {
            info!(
                "Query Status: {} Reason: {}",
                submission.status, submission.reason
            );
            info!("Location: {}", submission.location);
            info!("Job id: {}", submission.job_id);
        }

        Ok(&*self.submission.insert(submission))
    }

    fn job_url(&self) -> TapResult<String> {
        let job_id = self.job_id().ok_or(TapError::NotSubmitted)?;
        Ok(format!("{}/{}", self.url(), job_id))
    }

    /// Fetch the job document from the server.
    pub fn job_info(&self) -> TapResult<JobInfo> {
        let url = self.job_url()?;
        let client = build_client(&self.config)?;
        let body = get_text(&client, &url)?;
        parse_job_document(&body)
    }

    /// Current phase of the job on the server.
    pub fn status(&self) -> TapResult<JobPhase> {
        Ok(self.job_info()?.phase)
    }

    /// True once the server reports the job `COMPLETED`.
    pub fn finished(&self) -> TapResult<bool> {
        Ok(self.status()?.is_completed())
    }

    /// Get the result, optionally waiting until it is ready.
    ///
    /// With `wait`, the phase is re-read every `sleep` until the job
    /// completes. A job that ends in `ERROR` or `ABORTED` stops the wait
    /// with `TapError::JobFailed`. There is no timeout.
    ///
    /// Without `wait`, a job that is not complete yields
    /// `JobOutcome::NotReady` and the result resource is not requested.
    pub fn get(&self, sleep: Duration, wait: bool) -> TapResult<JobOutcome> {
        let mut job = self.job_info()?;

        if wait {
            while !job.phase.is_completed() {
                if job.phase.is_failed() {
                    return Err(TapError::JobFailed {
                        job_id: self.job_id().unwrap_or_default().to_string(),
                        phase: job.phase,
                        message: job.error_message,
                    });
                }
                thread::sleep(sleep);
                let next = self.job_info()?;
                if next.phase != job.phase {
                    debug!("Job {:?} moved to {}", self.job_id(), next.phase);
                }
                job = next;
            }
        }

        if !job.phase.is_completed() {
            return Ok(JobOutcome::NotReady(job.phase));
        }

        self.fetch_result().map(JobOutcome::Completed)
    }

    /// Wait with the configured polling interval and return the table.
    pub fn wait_for_result(&self) -> TapResult<VoTable> {
        match self.get(self.config.poll_interval(), true)? {
            JobOutcome::Completed(table) => Ok(table),
            JobOutcome::NotReady(phase) => Err(TapError::JobFailed {
                job_id: self.job_id().unwrap_or_default().to_string(),
                phase,
                message: None,
            }),
        }
    }

    fn fetch_result(&self) -> TapResult<VoTable> {
        let url = format!("{}/results/result", self.job_url()?);
        let client = build_client(&self.config)?;

        debug!("GET {}", url);
        let response = client.get(&url).send()?;
        read_table(response)
    }

    /// Ask the server to abort the job (`PHASE=ABORT` on the phase resource).
    ///
    /// Returns the HTTP status of the answer, usually a `303` back to the job.
    pub fn abort(&self) -> TapResult<u16> {
        let url = format!("{}/phase", self.job_url()?);
        let client = build_submit_client(&self.config)?;

        debug!("POST {} PHASE=ABORT", url);
        let response = client.post(&url).form(&[("PHASE", "ABORT")]).send()?;
        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().unwrap_or_default();
            return Err(TapError::HttpStatus {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        info!("Abort requested for job {}", self.job_id().unwrap_or_default());
        Ok(status.as_u16())
    }

    /// Markdown summary of the job for notebook display.
    pub fn to_markdown(&self) -> String {
        let mut md = format!("*ADQL Query*\n```mysql\n{}\n```\n", self.adql);
        match &self.submission {
            Some(s) => {
                md.push_str(&format!(
                    "* *Status*:   `{}`, Reason `{}`\n",
                    s.status, s.reason
                ));
                md.push_str(&format!("* *Location*: {}\n", s.location));
                md.push_str(&format!("* *Job id*:   `{}`\n", s.job_id));
            }
            None => md.push_str("* *Status*:   `not submitted`\n"),
        }
        md
    }
}
