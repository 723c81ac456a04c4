// SPDX-License-Identifier: MIT OR Apache-2.0
//! Local, extension-side errors.

use serde::Serialize;

use crate::guard::LogOnce;

/// A failure inside the extension itself; no host code, no schema.
#[derive(Debug, Clone, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ExtensionError {
    message: String,
    #[serde(skip)]
    pub(crate) logged: LogOnce,
}

impl ExtensionError {
    /// Wrap a plain message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            logged: LogOnce::new(),
        }
    }

    /// The message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Reportable;

    #[test]
    fn carries_message() {
        let err = ExtensionError::new("Unable to retrieve current tab information");
        assert_eq!(err.message(), "Unable to retrieve current tab information");
        assert_eq!(err.to_string(), err.message());
    }

    #[test]
    fn logs_once() {
        let err = ExtensionError::new("boom");
        assert!(err.mark_logged());
        assert!(!err.mark_logged());
        assert!(err.already_logged());
    }

    #[test]
    fn serializes_message_only() {
        let err = ExtensionError::new("boom");
        err.mark_logged();
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            serde_json::json!({"message": "boom"})
        );
    }
}
