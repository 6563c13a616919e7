//! Error types for JID parsing and validation.

use thiserror::Error;

/// Errors that can occur when parsing or validating a JID.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JidError {
    /// The JID is empty or longer than the protocol allows.
    #[error("invalid JID length: {length} characters (expected 1 to {max})")]
    InvalidLength { length: usize, max: usize },

    /// A separator sits where it would leave a part empty.
    #[error("invalid character placement in JID: {reason}")]
    InvalidCharacterPlacement { reason: &'static str },

    /// One of the parts is empty or too long.
    #[error("invalid {part} length: {length} characters (expected 1 to {max})")]
    InvalidPartLength {
        part: JidPart,
        length: usize,
        max: usize,
    },

    /// The domain part was rejected by IDNA processing.
    #[error("invalid domain part: '{domain}'")]
    InvalidDomain { domain: String },
}

/// The three parts of a JID, used to label part-level errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JidPart {
    Local,
    Domain,
    Resource,
}

impl std::fmt::Display for JidPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JidPart::Local => f.write_str("localpart"),
            JidPart::Domain => f.write_str("domainpart"),
            JidPart::Resource => f.write_str("resourcepart"),
        }
    }
}

impl JidError {
    /// Returns true if this error concerns the length of the input or a part.
    pub fn is_length_error(&self) -> bool {
        matches!(
            self,
            JidError::InvalidLength { .. } | JidError::InvalidPartLength { .. }
        )
    }

    /// Returns true if this error indicates a misplaced `@` or `/`.
    pub fn is_placement_error(&self) -> bool {
        matches!(self, JidError::InvalidCharacterPlacement { .. })
    }

    /// Returns the part this error refers to, if it is part-specific.
    pub fn part(&self) -> Option<JidPart> {
        match self {
            JidError::InvalidPartLength { part, .. } => Some(*part),
            JidError::InvalidDomain { .. } => Some(JidPart::Domain),
            _ => None,
        }
    }
}
