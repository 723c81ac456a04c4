// SPDX-License-Identifier: MIT OR Apache-2.0
//! Static schema of the error codes a native host may report.
//!
//! Every code the host emits is documented here together with a generic
//! description and the exact, ordered set of parameters the host attaches to
//! it. The table is compiled in; a host that adds a code must be matched by an
//! update to [`HostErrorCode`].

#![deny(unsafe_code)]
#![warn(missing_docs)]

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Generic description used when a response carries a code missing from the
/// table.
pub const UNKNOWN_CODE_DESCRIPTION: &str = "Unknown error code";

/// Parameter names used by the host.
pub mod param {
    /// Request action that was being served (`list`, `fetch`, ...).
    pub const ACTION: &str = "action";
    /// Underlying OS or library error text.
    pub const ERROR: &str = "error";
    /// Human-readable message accompanying every host error.
    pub const MESSAGE: &str = "message";
    /// Identifier of a user-configured password store.
    pub const STORE_ID: &str = "storeId";
    /// Filesystem path of a password store.
    pub const STORE_PATH: &str = "storePath";
    /// Display name of a password store.
    pub const STORE_NAME: &str = "storeName";
    /// Password file relative to its store.
    pub const FILE: &str = "file";
    /// Configured path of the gpg binary.
    pub const GPG_PATH: &str = "gpgPath";
}

use param::{ACTION, ERROR, FILE, GPG_PATH, STORE_ID, STORE_NAME, STORE_PATH};

const STORE_PARAMS: &[&str] = &[ACTION, ERROR, STORE_ID, STORE_PATH, STORE_NAME];
const STORE_FILE_PARAMS: &[&str] = &[ACTION, ERROR, STORE_ID, STORE_PATH, STORE_NAME, FILE];
const DEFAULT_STORE_PARAMS: &[&str] = &[ACTION, ERROR, STORE_PATH];

// ---------------------------------------------------------------------------
// ErrorCategory
// ---------------------------------------------------------------------------

/// Broad family a [`HostErrorCode`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// The browser request itself could not be understood.
    Request,
    /// A password store could not be located, read, or listed.
    Store,
    /// gpg could not be located or configured.
    Gpg,
    /// A single password file could not be resolved or decrypted.
    File,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Request => "request",
            Self::Store => "store",
            Self::Gpg => "gpg",
            Self::File => "file",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// ErrorSchema
// ---------------------------------------------------------------------------

/// Documentation of a single host error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorSchema {
    /// Generic, code-level explanation of the failure.
    pub description: &'static str,
    /// Parameters the host attaches to this error, in display order.
    pub expected_params: &'static [&'static str],
}

impl ErrorSchema {
    /// Whether `name` is one of this code's documented parameters.
    pub fn expects(&self, name: &str) -> bool {
        self.expected_params.contains(&name)
    }
}

// ---------------------------------------------------------------------------
// HostErrorCode
// ---------------------------------------------------------------------------

/// Error code reported by the native host.
///
/// On the wire a code is an integer, or occasionally its decimal string form.
/// Both serialise back to the integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum HostErrorCode {
    /// 10: request length prefix could not be parsed.
    ParseRequestLength = 10,
    /// 11: request body could not be parsed.
    ParseRequest = 11,
    /// 12: request named an action the host does not support.
    InvalidRequestAction = 12,
    /// 13: a user-configured store is not accessible.
    InaccessibleUserStore = 13,
    /// 14: the default store is not accessible.
    InaccessibleDefaultStore = 14,
    /// 15: the default store location could not be determined.
    DefaultStoreLocationUnknown = 15,
    /// 16: settings of a user-configured store could not be read.
    UserStoreSettingsUnreadable = 16,
    /// 17: settings of the default store could not be read.
    DefaultStoreSettingsUnreadable = 17,
    /// 18: files in a store could not be listed.
    ListFilesFailed = 18,
    /// 19: a file path could not be made relative to its store.
    RelativePathFailed = 19,
    /// 20: request referenced an unknown store ID.
    InvalidStoreId = 20,
    /// 21: the configured gpg path is invalid.
    InvalidGpgPath = 21,
    /// 22: no gpg binary could be found.
    GpgBinaryNotFound = 22,
    /// 23: the password file has an unexpected extension.
    InvalidFileExtension = 23,
    /// 24: the password file could not be decrypted.
    DecryptFailed = 24,
}

/// A numeric code absent from the compiled-in table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown host error code {0}")]
pub struct UnknownCode(pub u64);

impl HostErrorCode {
    /// Every known code, ordered by number.
    pub const ALL: &'static [HostErrorCode] = &[
        Self::ParseRequestLength,
        Self::ParseRequest,
        Self::InvalidRequestAction,
        Self::InaccessibleUserStore,
        Self::InaccessibleDefaultStore,
        Self::DefaultStoreLocationUnknown,
        Self::UserStoreSettingsUnreadable,
        Self::DefaultStoreSettingsUnreadable,
        Self::ListFilesFailed,
        Self::RelativePathFailed,
        Self::InvalidStoreId,
        Self::InvalidGpgPath,
        Self::GpgBinaryNotFound,
        Self::InvalidFileExtension,
        Self::DecryptFailed,
    ];

    /// Numeric wire value.
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// Look up a numeric code.
    pub fn from_u64(n: u64) -> Result<Self, UnknownCode> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| u64::from(c.as_u16()) == n)
            .ok_or(UnknownCode(n))
    }

    /// Resolve a raw, untrusted `code` field.
    ///
    /// Integers (including integral floats such as `20.0`) and canonical
    /// decimal strings (`"20"`, not `"020"` or `" 20"`) resolve; anything else
    /// is `None`.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    return Self::from_u64(u).ok();
                }
                let f = n.as_f64()?;
                if f.fract() == 0.0 && f >= 0.0 && f <= f64::from(u16::MAX) {
                    Self::from_u64(f as u64).ok()
                } else {
                    None
                }
            }
            serde_json::Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Schema entry for this code.
    pub fn schema(self) -> ErrorSchema {
        let (description, expected_params): (&'static str, &'static [&'static str]) = match self {
            Self::ParseRequestLength => ("Unable to parse browser request length", &[ERROR]),
            Self::ParseRequest => ("Unable to parse browser request", &[ERROR]),
            Self::InvalidRequestAction => ("Invalid request action", &[ACTION]),
            Self::InaccessibleUserStore => {
                ("Inaccessible user-configured password store", STORE_PARAMS)
            }
            Self::InaccessibleDefaultStore => {
                ("Inaccessible default password store", DEFAULT_STORE_PARAMS)
            }
            Self::DefaultStoreLocationUnknown => (
                "Unable to determine the location of the default password store",
                &[ACTION, ERROR],
            ),
            Self::UserStoreSettingsUnreadable => (
                "Unable to read the default settings of a user-configured password store",
                STORE_PARAMS,
            ),
            Self::DefaultStoreSettingsUnreadable => (
                "Unable to read the default settings of the default password store",
                DEFAULT_STORE_PARAMS,
            ),
            Self::ListFilesFailed => ("Unable to list files in a password store", STORE_PARAMS),
            Self::RelativePathFailed => (
                "Unable to determine a relative path for a file in a password store",
                STORE_FILE_PARAMS,
            ),
            Self::InvalidStoreId => ("Invalid password store ID", &[ACTION, STORE_ID]),
            Self::InvalidGpgPath => ("Invalid gpg path", &[ACTION, ERROR, GPG_PATH]),
            Self::GpgBinaryNotFound => {
                ("Unable to detect the location of the gpg binary", &[ACTION, ERROR])
            }
            Self::InvalidFileExtension => ("Invalid password file extension", &[ACTION, FILE]),
            Self::DecryptFailed => ("Unable to decrypt the password file", STORE_FILE_PARAMS),
        };
        ErrorSchema {
            description,
            expected_params,
        }
    }

    /// Shorthand for `self.schema().description`.
    pub fn description(self) -> &'static str {
        self.schema().description
    }

    /// Shorthand for `self.schema().expected_params`.
    pub fn expected_params(self) -> &'static [&'static str] {
        self.schema().expected_params
    }

    /// Returns the broad [`ErrorCategory`] this code belongs to.
    pub fn category(self) -> ErrorCategory {
        match self {
            Self::ParseRequestLength | Self::ParseRequest | Self::InvalidRequestAction => {
                ErrorCategory::Request
            }
            Self::InaccessibleUserStore
            | Self::InaccessibleDefaultStore
            | Self::DefaultStoreLocationUnknown
            | Self::UserStoreSettingsUnreadable
            | Self::DefaultStoreSettingsUnreadable
            | Self::ListFilesFailed
            | Self::InvalidStoreId => ErrorCategory::Store,
            Self::InvalidGpgPath | Self::GpgBinaryNotFound => ErrorCategory::Gpg,
            Self::RelativePathFailed | Self::InvalidFileExtension | Self::DecryptFailed => {
                ErrorCategory::File
            }
        }
    }
}

impl fmt::Display for HostErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

impl TryFrom<u64> for HostErrorCode {
    type Error = UnknownCode;

    fn try_from(n: u64) -> Result<Self, Self::Error> {
        Self::from_u64(n)
    }
}

impl std::str::FromStr for HostErrorCode {
    type Err = UnknownCode;

    /// Parses the canonical decimal form only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u64 = s.parse().map_err(|_| UnknownCode(0))?;
        if n.to_string() != s {
            return Err(UnknownCode(n));
        }
        Self::from_u64(n)
    }
}

impl Serialize for HostErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.as_u16())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CodeRepr {
    Int(u64),
    Str(String),
}

impl<'de> Deserialize<'de> for HostErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let resolved = match CodeRepr::deserialize(deserializer)? {
            CodeRepr::Int(n) => Self::from_u64(n),
            CodeRepr::Str(s) => s.parse(),
        };
        resolved.map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Serialisable row of the code catalog, for documentation and tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogEntry {
    /// Numeric code.
    pub code: u16,
    /// Broad family.
    pub category: ErrorCategory,
    /// Generic description.
    pub description: String,
    /// Documented parameters, in order.
    pub expected_params: Vec<String>,
}

impl From<HostErrorCode> for CatalogEntry {
    fn from(code: HostErrorCode) -> Self {
        let schema = code.schema();
        Self {
            code: code.as_u16(),
            category: code.category(),
            description: schema.description.to_string(),
            expected_params: schema
                .expected_params
                .iter()
                .map(|p| (*p).to_string())
                .collect(),
        }
    }
}

/// The whole table as catalog rows, ordered by code.
pub fn catalog() -> Vec<CatalogEntry> {
    HostErrorCode::ALL.iter().copied().map(CatalogEntry::from).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
