//! Persisted location of a published video payload.
//!
//! Records written by this service store the compact `"<bucket>,<key>"` form.
//! Records written by the legacy upload path store a virtual-hosted S3 URL
//! (`https://<bucket>.s3.<region>.amazonaws.com/<key>`). That form is only ever
//! decoded, never produced.

use std::fmt;
use thiserror::Error;

const LEGACY_URL_SCHEME: &str = "https://";
const COMPACT_SEPARATOR: char = ',';

/// Errors decoding a persisted location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Invalid location format: {0}")]
    InvalidFormat(String),

    #[error("Invalid bucket name: {0:?}")]
    InvalidBucket(String),

    #[error("Invalid object key: {0:?}")]
    InvalidKey(String),
}

/// Bucket and key of a stored object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoredLocation {
    pub bucket: String,
    pub key: String,
}

/// Which persisted form a location was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationForm {
    Compact,
    LegacyUrl,
}

impl StoredLocation {
    /// Location of a newly published object.
    ///
    /// Bucket names may not contain `,`, `:` or `/`, and keys may not contain
    /// `,`. Anything else would encode to a string that decodes differently.
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Result<Self, LocationError> {
        let bucket = bucket.into();
        let key = key.into();

        if bucket.is_empty() || bucket.contains([COMPACT_SEPARATOR, ':', '/']) {
            return Err(LocationError::InvalidBucket(bucket));
        }
        if key.is_empty() || key.contains(COMPACT_SEPARATOR) {
            return Err(LocationError::InvalidKey(key));
        }

        Ok(Self { bucket, key })
    }

    /// Encode into the compact persisted form.
    pub fn encode(&self) -> String {
        format!("{}{}{}", self.bucket, COMPACT_SEPARATOR, self.key)
    }

    /// Decode a persisted location, trying the legacy URL form first and the
    /// compact form second.
    pub fn parse(raw: &str) -> Result<Self, LocationError> {
        Self::parse_with_form(raw).map(|(location, _)| location)
    }

    /// Like [`StoredLocation::parse`], also reporting which form matched.
    pub fn parse_with_form(raw: &str) -> Result<(Self, LocationForm), LocationError> {
        if let Some(location) = Self::parse_legacy_url(raw) {
            return Ok((location, LocationForm::LegacyUrl));
        }
        if let Some(location) = Self::parse_compact(raw) {
            return Ok((location, LocationForm::Compact));
        }
        Err(LocationError::InvalidFormat(raw.to_string()))
    }

    fn parse_legacy_url(raw: &str) -> Option<Self> {
        let rest = raw.strip_prefix(LEGACY_URL_SCHEME)?;
        let (host, key) = rest.split_once('/')?;
        let bucket = host.split('.').next()?;

        Self::non_empty(bucket, key)
    }

    fn parse_compact(raw: &str) -> Option<Self> {
        let (bucket, key) = raw.split_once(COMPACT_SEPARATOR)?;
        if key.contains(COMPACT_SEPARATOR) {
            return None;
        }

        Self::non_empty(bucket, key)
    }

    fn non_empty(bucket: &str, key: &str) -> Option<Self> {
        if bucket.is_empty() || key.is_empty() {
            return None;
        }
        Some(Self {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }
}

impl fmt::Display for StoredLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}
