// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host version decoding.
//!
//! The host reports its version as a single packed integer,
//! `major * 1_000_000 + minor * 1_000 + patch`, each component in `0..=999`.
//! Anything that is not such an integer is kept verbatim as an invalid
//! version so it can be shown for debugging.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

const MAJOR_FACTOR: u64 = 1_000_000;
const MINOR_FACTOR: u64 = 1_000;
const COMPONENT_MAX: u64 = 999;
const PACKED_MAX: u64 = COMPONENT_MAX * MAJOR_FACTOR + COMPONENT_MAX * MINOR_FACTOR + COMPONENT_MAX;

/// Errors that can occur when packing version components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VersionError {
    /// The major component does not fit in three decimal digits.
    #[error("major version {0} out of range (0..=999)")]
    MajorOutOfRange(u64),

    /// The minor component does not fit in three decimal digits.
    #[error("minor version {0} out of range (0..=999)")]
    MinorOutOfRange(u64),

    /// The patch component does not fit in three decimal digits.
    #[error("patch version {0} out of range (0..=999)")]
    PatchOutOfRange(u64),
}

/// Version reported by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostVersion {
    /// A well-formed packed version.
    Packed(u64),
    /// The raw value was missing (`None`) or not a packed integer.
    Invalid(Option<Value>),
}

impl HostVersion {
    /// Decode an untrusted `version` field. Never fails.
    ///
    /// ```
    /// # use bpx_classify::HostVersion;
    /// # use serde_json::json;
    /// let v = HostVersion::from_raw(Some(&json!(1002003)));
    /// assert_eq!(v.to_string(), "1.2.3");
    ///
    /// let bogus = HostVersion::from_raw(Some(&json!("bogus")));
    /// assert_eq!(bogus.to_string(), "\"bogus\" (invalid)");
    /// ```
    pub fn from_raw(raw: Option<&Value>) -> Self {
        let Some(value) = raw else {
            return Self::Invalid(None);
        };
        let packed = match value {
            Value::Number(n) => n.as_u64().or_else(|| match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= 0.0 && f <= PACKED_MAX as f64 => Some(f as u64),
                _ => None,
            }),
            _ => None,
        };
        match packed {
            Some(v) if v <= PACKED_MAX => Self::Packed(v),
            _ => Self::Invalid(Some(value.clone())),
        }
    }

    /// Pack explicit components.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError`] if any component exceeds 999.
    pub fn from_components(major: u64, minor: u64, patch: u64) -> Result<Self, VersionError> {
        if major > COMPONENT_MAX {
            return Err(VersionError::MajorOutOfRange(major));
        }
        if minor > COMPONENT_MAX {
            return Err(VersionError::MinorOutOfRange(minor));
        }
        if patch > COMPONENT_MAX {
            return Err(VersionError::PatchOutOfRange(patch));
        }
        Ok(Self::Packed(major * MAJOR_FACTOR + minor * MINOR_FACTOR + patch))
    }

    /// `(major, minor, patch)` when valid.
    pub fn components(&self) -> Option<(u64, u64, u64)> {
        match self {
            Self::Packed(v) => Some((
                v / MAJOR_FACTOR,
                (v % MAJOR_FACTOR) / MINOR_FACTOR,
                v % MINOR_FACTOR,
            )),
            Self::Invalid(_) => None,
        }
    }

    /// Whether the raw value decoded to a packed version.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Packed(_))
    }

    /// Textual form: `"major.minor.patch"` or `<raw> (invalid)`.
    pub fn version_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HostVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, self.components()) {
            (_, Some((major, minor, patch))) => write!(f, "{major}.{minor}.{patch}"),
            (Self::Invalid(Some(raw)), None) => write!(f, "{raw} (invalid)"),
            _ => f.write_str("<missing> (invalid)"),
        }
    }
}

impl Serialize for HostVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Packed(v) => serializer.serialize_u64(*v),
            Self::Invalid(raw) => raw.serialize(serializer),
        }
    }
}
