// SPDX-License-Identifier: MIT OR Apache-2.0
//! The two popup error kinds and their shared reporting capability.

use serde::Serialize;

use crate::extension::ExtensionError;
use crate::host::HostError;

/// Capability shared by every reportable popup error.
pub trait Reportable: std::error::Error {
    /// One-line summary; always present.
    fn summary(&self) -> &str;

    /// Whether the error has already been reported.
    fn already_logged(&self) -> bool;

    /// Check-and-set the logged flag. Returns `true` only for the first call
    /// on this instance.
    fn mark_logged(&self) -> bool;
}

impl Reportable for HostError {
    fn summary(&self) -> &str {
        self.message()
    }

    fn already_logged(&self) -> bool {
        self.logged.is_marked()
    }

    fn mark_logged(&self) -> bool {
        self.logged.try_mark()
    }
}

impl Reportable for ExtensionError {
    fn summary(&self) -> &str {
        self.message()
    }

    fn already_logged(&self) -> bool {
        self.logged.is_marked()
    }

    fn mark_logged(&self) -> bool {
        self.logged.try_mark()
    }
}

/// Any error the popup reports.
#[derive(Debug, Clone, Serialize, thiserror::Error)]
#[serde(tag = "kind", content = "error")]
pub enum PopupError {
    /// Classified error from the native host.
    #[error(transparent)]
    #[serde(rename = "HostError")]
    Host(#[from] HostError),

    /// Local failure inside the extension.
    #[error(transparent)]
    #[serde(rename = "ExtensionError")]
    Extension(#[from] ExtensionError),
}

impl PopupError {
    /// Name of the variant (`"HostError"` or `"ExtensionError"`).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Host(_) => "HostError",
            Self::Extension(_) => "ExtensionError",
        }
    }

    /// The host error, if this is one.
    pub fn as_host(&self) -> Option<&HostError> {
        match self {
            Self::Host(e) => Some(e),
            Self::Extension(_) => None,
        }
    }

    fn reportable(&self) -> &dyn Reportable {
        match self {
            Self::Host(e) => e,
            Self::Extension(e) => e,
        }
    }
}

impl Reportable for PopupError {
    fn summary(&self) -> &str {
        self.reportable().summary()
    }

    fn already_logged(&self) -> bool {
        self.reportable().already_logged()
    }

    fn mark_logged(&self) -> bool {
        self.reportable().mark_logged()
    }
}
