//! Transient notifications ("toasts").
//!
//! A toast is rendered straight into the response that caused it, or parked
//! in the session when the response is a redirect and shown by the next page.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use super::session_keys;

/// Visual style of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    /// CSS modifier used by the templates (`toast--success`, `toast--error`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A notification shown once and dismissed after a few seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

/// Park a toast in the session for the next page.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_pending_toast(
    session: &Session,
    toast: &Toast,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::PENDING_TOAST, toast).await
}

/// Remove and return the parked toast, if any.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub async fn take_pending_toast(
    session: &Session,
) -> Result<Option<Toast>, tower_sessions::session::Error> {
    session.remove::<Toast>(session_keys::PENDING_TOAST).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(Toast::success("ok").kind, ToastKind::Success);
        assert_eq!(Toast::error("no").kind.as_str(), "error");
    }

    #[test]
    fn test_session_roundtrip_shape() {
        let json = serde_json::to_string(&Toast::error("Please select a city")).unwrap();
        assert_eq!(json, r#"{"kind":"error","message":"Please select a city"}"#);
    }
}
