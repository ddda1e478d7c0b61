//! UWS job document parsing.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};

use super::phase::JobPhase;
use crate::error::{TapError, TapResult};

/// Snapshot of a UWS job document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobInfo {
    pub job_id: Option<String>,
    pub phase: JobPhase,
    /// `errorSummary/message`, present when the job failed
    pub error_message: Option<String>,
}

#[derive(Clone, Copy, PartialEq)]
enum Capture {
    None,
    JobId,
    Phase,
    ErrorMessage,
}

/// Parse the XML job document returned by `GET {async}/{jobid}`.
///
/// Elements are matched by local name so that any namespace prefix
/// (`uws:phase`, `phase`) is accepted. The first `phase` element wins.
pub fn parse_job_document(xml: &str) -> TapResult<JobInfo> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut job_id: Option<String> = None;
    let mut phase: Option<String> = None;
    let mut error_message: Option<String> = None;

    let mut in_error_summary = false;
    let mut capture = Capture::None;
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                capture = match e.local_name().as_ref() {
                    b"jobId" if job_id.is_none() => Capture::JobId,
                    b"phase" if phase.is_none() => Capture::Phase,
                    b"message" if in_error_summary && error_message.is_none() => {
                        Capture::ErrorMessage
                    }
                    b"errorSummary" => {
                        in_error_summary = true;
                        Capture::None
                    }
                    _ => Capture::None,
                };
                text.clear();
            }
            Event::Text(e) if capture != Capture::None => {
                text.push_str(&e.unescape()?);
            }
            Event::CData(e) if capture != Capture::None => {
                text.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Event::End(e) => {
                match (capture, e.local_name().as_ref()) {
                    (Capture::JobId, b"jobId") => job_id = Some(text.trim().to_string()),
                    (Capture::Phase, b"phase") => phase = Some(text.trim().to_string()),
                    (Capture::ErrorMessage, b"message") => {
                        error_message = Some(text.trim().to_string())
                    }
                    (_, b"errorSummary") => in_error_summary = false,
                    _ => {}
                }
                capture = Capture::None;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let phase = phase.ok_or_else(|| {
        TapError::Xml("UWS job document has no phase element".to_string())
    })?;

    Ok(JobInfo {
        job_id,
        phase: phase.parse().unwrap_or(JobPhase::Unknown),
        error_message: error_message.filter(|m| !m.is_empty()),
    })
}
