//! Client for astronomical Table Access Protocol (TAP) services.
//!
//! Runs ADQL queries against remote catalog servers, synchronously or as
//! asynchronous UWS jobs, and reads the VOTable answers into [`VoTable`]s.
//! A Sesame name resolver and a few notebook presentation helpers
//! (formatted query strings, execution timing) come along.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`tap`] | [`TapService`], [`AsyncJob`], job phases, public service presets |
//! | [`votable`] | VOTable TABLEDATA reader and the [`VoTable`] result type |
//! | [`resolver`] | Object name to coordinates through CDS Sesame |
//! | [`display`] | [`QueryStr`](display::QueryStr), [`ExecutionTimer`](display::ExecutionTimer), display sinks |
//! | [`time`] | Human-readable durations |
//! | [`config`] | TOML client configuration |
//!
//! # Quick Start
//!
//! ```no_run
//! use tap_client::tap::presets;
//!
//! let vizier = presets::tap_vizier();
//! let table = vizier.query(r#"SELECT TOP 5 * FROM "I/239/hip_main""#)?;
//! println!("{:?} ({} rows)", table.column_names(), table.num_rows());
//! # Ok::<(), tap_client::TapError>(())
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod http;
pub mod resolver;
pub mod tap;
pub mod time;
pub mod votable;

pub use config::ClientConfig;
pub use error::{TapError, TapResult};
pub use resolver::{resolve, SesameResolver, SkyPosition};
pub use tap::{AsyncJob, JobOutcome, JobPhase, QueryMode, QueryResult, TapService};
pub use votable::VoTable;
