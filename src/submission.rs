//! Submission - Handing the selection list to the backend.
//!
//! On confirmation the wizard snapshots the selection list, pairs it with the
//! session id and POSTs it as JSON:
//!
//! ```text
//! POST {backend}/selection/priorities
//! {"sessionID":"…","priorities":["Безопасность","Экономичность"]}
//! ```
//!
//! On success the wizard moves on to the price step. Transport is behind
//! [`SubmissionChannel`]; session storage is behind [`SessionStore`].

use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::WizardConfig;
use crate::error::SubmitError;
use crate::state::PrioritySelection;

// =============================================================================
// Payload
// =============================================================================

/// Body of the priorities request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrioritiesPayload {
    #[serde(rename = "sessionID")]
    pub session_id: String,
    pub priorities: Vec<String>,
}

/// A request ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub url: String,
    pub body: String,
}

impl SubmitRequest {
    pub fn new(url: impl Into<String>, payload: &PrioritiesPayload) -> Result<Self, SubmitError> {
        Ok(Self {
            url: url.into(),
            body: serde_json::to_string(payload)?,
        })
    }
}

// =============================================================================
// Session Store
// =============================================================================

/// Where the wizard keeps the session id between steps.
pub trait SessionStore {
    fn session_id(&self) -> Option<String>;
}

/// Session store holding the id in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    session_id: Option<String>,
}

impl MemorySessionStore {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: Some(session_id.into()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn session_id(&self) -> Option<String> {
        self.session_id.clone().filter(|id| !id.is_empty())
    }
}

// =============================================================================
// Submission Channel
// =============================================================================

/// Transport for a priorities request.
pub trait SubmissionChannel {
    fn submit(&mut self, request: &SubmitRequest) -> Result<(), SubmitError>;
}

/// Writes each request as `POST <url>` followed by the JSON body on one line.
pub struct JsonLineChannel<W: Write> {
    out: W,
}

impl<W: Write> JsonLineChannel<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SubmissionChannel for JsonLineChannel<W> {
    fn submit(&mut self, request: &SubmitRequest) -> Result<(), SubmitError> {
        writeln!(self.out, "POST {}", request.url)?;
        writeln!(self.out, "{}", request.body)?;
        self.out.flush()?;
        Ok(())
    }
}

// =============================================================================
// Submit
// =============================================================================

/// Build the payload from a snapshot of the selection list.
pub fn prepare_payload(
    selection: &PrioritySelection,
    store: &impl SessionStore,
) -> Result<PrioritiesPayload, SubmitError> {
    let Some(session_id) = store.session_id() else {
        warn!("session id not found, priorities not sent");
        return Err(SubmitError::MissingSession);
    };

    Ok(PrioritiesPayload {
        session_id,
        priorities: selection.priorities(),
    })
}

/// Send the selection and return the location of the next step.
pub fn submit_priorities(
    selection: &PrioritySelection,
    store: &impl SessionStore,
    channel: &mut impl SubmissionChannel,
    config: &WizardConfig,
) -> Result<String, SubmitError> {
    let payload = prepare_payload(selection, store)?;
    let request = SubmitRequest::new(config.priorities_url(), &payload)?;

    channel.submit(&request).inspect_err(|e| {
        warn!("priorities submission failed: {e}");
    })?;

    info!(
        count = payload.priorities.len(),
        url = %request.url,
        "priorities submitted"
    );
    Ok(config.next_url())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Criterion;

    struct RecordingChannel {
        requests: Vec<SubmitRequest>,
        fail_with: Option<u16>,
    }

    impl RecordingChannel {
        fn new() -> Self {
            Self {
                requests: Vec::new(),
                fail_with: None,
            }
        }
    }

    impl SubmissionChannel for RecordingChannel {
        fn submit(&mut self, request: &SubmitRequest) -> Result<(), SubmitError> {
            if let Some(status) = self.fail_with {
                return Err(SubmitError::Rejected { status });
            }
            self.requests.push(request.clone());
            Ok(())
        }
    }

    fn setup() -> PrioritySelection {
        let selection = PrioritySelection::new();
        selection.toggle_item(Criterion::Price).unwrap();
        selection.toggle_item(Criterion::Safety).unwrap();
        selection
    }

    #[test]
    fn test_payload_json_shape() {
        let payload = PrioritiesPayload {
            session_id: "abc".to_string(),
            priorities: vec!["Цена".to_string(), "Безопасность".to_string()],
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, r#"{"sessionID":"abc","priorities":["Цена","Безопасность"]}"#);

        let back: PrioritiesPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn test_submit_sends_click_order() {
        let selection = setup();
        let store = MemorySessionStore::new("session-1");
        let mut channel = RecordingChannel::new();

        let next = submit_priorities(&selection, &store, &mut channel, &WizardConfig::default())
            .unwrap();
        assert_eq!(next, "http://localhost:8080/selection/price");

        assert_eq!(channel.requests.len(), 1);
        let request = &channel.requests[0];
        assert_eq!(request.url, "http://localhost:8080/selection/priorities");
        assert_eq!(
            request.body,
            r#"{"sessionID":"session-1","priorities":["Цена","Безопасность"]}"#
        );
    }

    #[test]
    fn test_missing_session_sends_nothing() {
        let selection = setup();
        let mut channel = RecordingChannel::new();

        let err = submit_priorities(
            &selection,
            &MemorySessionStore::empty(),
            &mut channel,
            &WizardConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SubmitError::MissingSession));
        assert!(channel.requests.is_empty());

        let err = prepare_payload(&selection, &MemorySessionStore::new("")).unwrap_err();
        assert!(matches!(err, SubmitError::MissingSession));
    }

    #[test]
    fn test_payload_is_a_snapshot() {
        let selection = setup();
        let payload = prepare_payload(&selection, &MemorySessionStore::new("s")).unwrap();

        selection.toggle_item(Criterion::Price).unwrap();
        selection.toggle_item(Criterion::Comfort).unwrap();

        assert_eq!(payload.priorities, vec!["Цена", "Безопасность"]);
        assert_eq!(selection.priorities(), vec!["Безопасность", "Комфорт"]);
    }

    #[test]
    fn test_rejected_submission() {
        let selection = setup();
        let mut channel = RecordingChannel::new();
        channel.fail_with = Some(500);

        let err = submit_priorities(
            &selection,
            &MemorySessionStore::new("s"),
            &mut channel,
            &WizardConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SubmitError::Rejected { status: 500 }));
    }

    #[test]
    fn test_json_line_channel() {
        let mut channel = JsonLineChannel::new(Vec::new());
        let request = SubmitRequest {
            url: "http://localhost:8080/selection/priorities".to_string(),
            body: "{}".to_string(),
        };
        channel.submit(&request).unwrap();

        let text = String::from_utf8(channel.into_inner()).unwrap();
        assert_eq!(text, "POST http://localhost:8080/selection/priorities\n{}\n");
    }
}
