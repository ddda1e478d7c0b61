//! TAP service endpoints.

use log::debug;

use super::job::AsyncJob;
use super::{endpoint_url, read_table};
use crate::config::ClientConfig;
use crate::error::TapResult;
use crate::http::{build_client, query_form};
use crate::votable::VoTable;

/// How [`TapService::query_with`] runs a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryMode {
    #[default]
    Sync,
    Async,
}

/// Result of [`TapService::query_with`].
#[derive(Debug)]
pub enum QueryResult {
    /// Result table of a synchronous query
    Table(VoTable),
    /// Submitted job of an asynchronous query
    Job(AsyncJob),
}

impl QueryResult {
    pub fn into_table(self) -> Option<VoTable> {
        match self {
            QueryResult::Table(table) => Some(table),
            QueryResult::Job(_) => None,
        }
    }

    pub fn into_job(self) -> Option<AsyncJob> {
        match self {
            QueryResult::Job(job) => Some(job),
            QueryResult::Table(_) => None,
        }
    }
}

/// A remote TAP endpoint.
///
/// Holds connection parameters only; every query builds its own HTTP
/// client and async jobs receive copies of host, path and port.
#[derive(Debug, Clone, PartialEq)]
pub struct TapService {
    host: String,
    path: String,
    port: u16,
    config: ClientConfig,
}

impl TapService {
    /// Service at `http://{host}{path}` on port 80.
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path: path.into(),
            port: 80,
            config: ClientConfig::default(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
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

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Full URL of the service.
    pub fn tap_endpoint(&self) -> String {
        endpoint_url(&self.host, self.port, &self.path)
    }

    /// Run an ADQL query synchronously and return the result table.
    ///
    /// # Errors
    /// * `TapError::Http` - transport failure
    /// * `TapError::VoTable` - the answer is not a readable VOTable; the raw
    ///   body is available through [`TapError::raw_response`](crate::TapError::raw_response)
    /// * `TapError::QueryFailed` - the service reported `QUERY_STATUS=ERROR`
    pub fn query(&self, adql: &str) -> TapResult<VoTable> {
        let url = format!("{}/sync", self.tap_endpoint());
        let client = build_client(&self.config)?;

        debug!("POST {}", url);
        let response = client.post(&url).form(&query_form(adql)).send()?;
        read_table(response)
    }

    /// Run a query in the given mode.
    ///
    /// `QueryMode::Async` submits a job (logging its details) and returns it
    /// without waiting.
    pub fn query_with(&self, adql: &str, mode: QueryMode) -> TapResult<QueryResult> {
        match mode {
            QueryMode::Sync => self.query(adql).map(QueryResult::Table),
            QueryMode::Async => self.query_async(adql, true, false).map(QueryResult::Job),
        }
    }

    /// Create an async job for `adql` on `{path}/async`.
    ///
    /// With `submit`, the job is submitted before being returned; otherwise
    /// it can be submitted later with [`AsyncJob::submit`].
    pub fn query_async(&self, adql: &str, submit: bool, silent: bool) -> TapResult<AsyncJob> {
        let mut job = AsyncJob::new(
            adql,
            self.host.clone(),
            format!("{}/async", self.path),
            self.port,
        )
        .with_config(self.config.clone());

        if submit {
            job.submit(silent)?;
        }
        Ok(job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let service = TapService::new("tap.example.org", "/tap");
        assert_eq!(service.port(), 80);
        assert_eq!(service.tap_endpoint(), "http://tap.example.org/tap");

        let service = service.with_port(8080);
        assert_eq!(service.tap_endpoint(), "http://tap.example.org:8080/tap");
    }

    #[test]
    fn test_unsubmitted_async_job_copies_connection() {
        let service = TapService::new("tap.example.org", "/tap").with_port(8080);
        let job = service
            .query_async("SELECT TOP 1 * FROM tap_schema.tables", false, true)
            .unwrap();

        assert!(!job.is_submitted());
        assert_eq!(job.host(), "tap.example.org");
        assert_eq!(job.path(), "/tap/async");
        assert_eq!(job.port(), 8080);
        assert_eq!(job.adql(), "SELECT TOP 1 * FROM tap_schema.tables");
    }

    #[test]
    fn test_default_mode_is_sync() {
        assert_eq!(QueryMode::default(), QueryMode::Sync);
    }
}
