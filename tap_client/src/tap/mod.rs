//! Table Access Protocol client.
//!
//! A [`TapService`] runs ADQL queries against a TAP endpoint, either
//! synchronously (`{endpoint}/sync`, result returned in the response) or
//! asynchronously through an [`AsyncJob`] (`{endpoint}/async`, a UWS job
//! that is polled until the server reports it `COMPLETED`).
//!
//! # Example
//!
//! ```no_run
//! use tap_client::tap::{presets, JobOutcome};
//! use std::time::Duration;
//!
//! let gaia = presets::gaia_archive();
//! let table = gaia.query("SELECT TOP 10 source_id, ra, dec FROM gaiadr3.gaia_source")?;
//! println!("{} rows", table.num_rows());
//!
//! let job = gaia.query_async("SELECT TOP 1000 * FROM gaiadr3.gaia_source", true, false)?;
//! if let JobOutcome::Completed(table) = job.get(Duration::from_millis(200), true)? {
//!     println!("{:?}", table.column_names());
//! }
//! # Ok::<(), tap_client::TapError>(())
//! ```

pub mod job;
pub mod phase;
pub mod presets;
pub mod service;
pub mod uws;

pub use job::{AsyncJob, JobOutcome, Submission};
pub use phase::JobPhase;
pub use presets::{gaia_archive, tap_vizier, GaiaArchive, TapVizieR};
pub use service::{QueryMode, QueryResult, TapService};
pub use uws::JobInfo;

use log::debug;
use reqwest::blocking::Response;

use crate::error::{TapError, TapResult};
use crate::votable::{parse_votable, VoTable};

/// Base URL of a service path, `http://{host}{path}`.
///
/// The port is written only when it differs from the HTTP default.
pub(crate) fn endpoint_url(host: &str, port: u16, path: &str) -> String {
    if port == 80 {
        format!("http://{}{}", host, path)
    } else {
        format!("http://{}:{}{}", host, port, path)
    }
}

/// Read a VOTable result from a TAP response.
///
/// An unreadable body is returned as `TapError::VoTable` with the raw text
/// attached; a document flagged `QUERY_STATUS=ERROR` as `TapError::QueryFailed`.
pub(crate) fn read_table(response: Response) -> TapResult<VoTable> {
    let status = response.status();
    let raw = response.text()?;

    let table = parse_votable(&raw).map_err(|message| {
        debug!("Unreadable VOTable response (HTTP {}): {}", status, message);
        TapError::VoTable {
            message: format!("{} (HTTP {})", message, status.as_u16()),
            raw: raw.clone(),
        }
    })?;

    if let Some(message) = table.query_error() {
        return Err(TapError::QueryFailed { message });
    }

    Ok(table)
}
