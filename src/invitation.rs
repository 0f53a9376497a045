//! Meeting-invitation boundary.
//!
//! Client meetings can be announced through an external calendar service
//! that returns an online meeting link. The planner never awaits it:
//! callers build an [`InvitationRequest`], send it through an
//! [`InvitationService`], and hand the [`InvitationOutcome`] back to the
//! planner whenever it arrives. An event without a link is a valid
//! event; failures never touch scheduling state.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Payload sent to the invitation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvitationRequest {
    /// Event the invitation is for.
    pub event_id: String,
    pub title: String,
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Collaborator ids, with firm-wide events expanded to the whole roster.
    pub participants: Vec<String>,
    pub location: Option<String>,
    pub organizer: String,
}

/// Answer from the invitation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitationOutcome {
    pub success: bool,
    pub meeting_link: Option<String>,
    /// Failure reason, for logs.
    pub error: Option<String>,
}

impl InvitationOutcome {
    pub fn sent(meeting_link: impl Into<String>) -> Self {
        Self {
            success: true,
            meeting_link: Some(meeting_link.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            meeting_link: None,
            error: Some(error.into()),
        }
    }
}

/// External meeting-invitation provider.
///
/// Implementations own their timeout and retry policy and report failures
/// through [`InvitationOutcome::failed`] rather than erroring.
#[async_trait]
pub trait InvitationService: Send + Sync {
    async fn send_invitation(&self, request: &InvitationRequest) -> InvitationOutcome;
}

/// Sends a request and logs the result.
pub async fn dispatch_invitation(
    service: &dyn InvitationService,
    request: &InvitationRequest,
) -> InvitationOutcome {
    let outcome = service.send_invitation(request).await;
    if outcome.success {
        tracing::debug!(event_id = %request.event_id, "Invitation sent");
    } else {
        tracing::warn!(
            event_id = %request.event_id,
            error = outcome.error.as_deref().unwrap_or("unknown"),
            "Invitation failed"
        );
    }
    outcome
}
