//! The JID value type and its parser.

use std::borrow::Cow;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::domain;
use crate::error::{JidError, JidPart};
use crate::escape;

/// Maximum length of a raw JID.
pub const MAX_JID_LEN: usize = 3071;

/// Maximum length of the localpart and of the resourcepart.
pub const MAX_PART_LEN: usize = 1023;

#[derive(Debug)]
struct Parts {
    local: Option<String>,
    /// ASCII-compatible form, used for comparisons.
    domain: String,
    resource: Option<String>,
    /// Canonical string form, computed once.
    display: String,
}

/// An immutable, validated JID (`local@domain/resource`).
///
/// Cloning is cheap: clones share the same parsed parts. Two JIDs are equal
/// when their localpart, normalized domainpart and resourcepart are equal;
/// the display string takes no part in comparisons.
#[derive(Clone)]
pub struct Jid(Arc<Parts>);

impl Jid {
    /// Parses and normalizes a JID.
    pub fn parse(s: &str) -> Result<Self, JidError> {
        let length = s.chars().count();
        if length == 0 || length > MAX_JID_LEN {
            return Err(JidError::InvalidLength {
                length,
                max: MAX_JID_LEN,
            });
        }

        let first_slash = s.find('/');
        if s.starts_with('@') {
            return Err(JidError::InvalidCharacterPlacement {
                reason: "JID starts with '@'",
            });
        }
        if s.starts_with('/') {
            return Err(JidError::InvalidCharacterPlacement {
                reason: "JID starts with '/'",
            });
        }
        if s.ends_with('@') && first_slash.is_none() {
            return Err(JidError::InvalidCharacterPlacement {
                reason: "JID ends with '@'",
            });
        }
        if s.ends_with('/') && s.matches('/').count() < 2 {
            return Err(JidError::InvalidCharacterPlacement {
                reason: "JID ends with '/'",
            });
        }

        // An '@' that only shows up after the first '/' belongs to the
        // resourcepart, so there is no localpart.
        let at = match (s.find('@'), first_slash) {
            (Some(at), Some(slash)) if at > slash => None,
            (at, _) => at,
        };

        let (local, rest) = match at {
            Some(at) => (Some(&s[..at]), &s[at + 1..]),
            None => (None, s),
        };
        if let Some(local) = local {
            check_part_len(JidPart::Local, local)?;
        }

        let (raw_domain, resource) = match rest.split_once('/') {
            Some((domain, resource)) => (domain, Some(resource)),
            None => (rest, None),
        };
        if let Some(resource) = resource {
            check_part_len(JidPart::Resource, resource)?;
        }

        let domain = domain::to_ascii(raw_domain)?;

        Ok(Self::from_normalized(
            local.map(str::to_string),
            domain,
            resource.map(str::to_string),
        ))
    }

    /// Builds a JID from its parts and parses the result.
    ///
    /// Empty localparts and resourceparts are treated as absent.
    pub fn from_parts(
        local: Option<&str>,
        domain: &str,
        resource: Option<&str>,
    ) -> Result<Self, JidError> {
        let mut out = String::new();
        if let Some(local) = local.filter(|l| !l.is_empty()) {
            out.push_str(local);
            out.push('@');
        }
        out.push_str(domain);
        if let Some(resource) = resource.filter(|r| !r.is_empty()) {
            out.push('/');
            out.push_str(resource);
        }
        Self::parse(&out)
    }

    /// Assembles a JID from parts that have already been validated.
    fn from_normalized(local: Option<String>, domain: String, resource: Option<String>) -> Self {
        let mut display = String::with_capacity(domain.len() + 2);
        if let Some(local) = &local {
            display.push_str(local);
            display.push('@');
        }
        display.push_str(&domain::to_unicode(&domain));
        if let Some(resource) = &resource {
            display.push('/');
            display.push_str(resource);
        }

        Self(Arc::new(Parts {
            local,
            domain,
            resource,
            display,
        }))
    }

    /// Returns the localpart as written, escapes included.
    #[must_use]
    pub fn local(&self) -> Option<&str> {
        self.0.local.as_deref()
    }

    /// Returns the localpart with escaped reserved characters decoded.
    #[must_use]
    pub fn unescaped_local(&self) -> Option<Cow<'_, str>> {
        self.0.local.as_deref().map(escape::unescape_local)
    }

    /// Returns the domainpart in Unicode form.
    #[must_use]
    pub fn domain(&self) -> String {
        domain::to_unicode(&self.0.domain)
    }

    /// Returns the domainpart in the ASCII-compatible form used for comparisons.
    #[must_use]
    pub fn domain_ascii(&self) -> &str {
        &self.0.domain
    }

    #[must_use]
    pub fn resource(&self) -> Option<&str> {
        self.0.resource.as_deref()
    }

    #[must_use]
    pub fn has_local(&self) -> bool {
        self.0.local.is_some()
    }

    /// Returns true if there is no resourcepart.
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.0.resource.is_none()
    }

    /// Returns true if there is no localpart.
    #[must_use]
    pub fn is_domain(&self) -> bool {
        !self.has_local()
    }

    /// Returns this JID without its resourcepart.
    #[must_use]
    pub fn to_bare(&self) -> Self {
        if self.is_bare() {
            return self.clone();
        }
        Self::from_normalized(self.0.local.clone(), self.0.domain.clone(), None)
    }

    /// Returns the JID of the domain alone.
    #[must_use]
    pub fn to_domain_only(&self) -> Self {
        if self.is_bare() && self.is_domain() {
            return self.clone();
        }
        Self::from_normalized(None, self.0.domain.clone(), None)
    }

    /// Returns true if both JIDs have the same localpart and domainpart.
    #[must_use]
    pub fn is_same_bare(&self, other: &Jid) -> bool {
        self.0.local == other.0.local && self.0.domain == other.0.domain
    }

    /// Formats the JID with its domain in ASCII-compatible form.
    #[must_use]
    pub fn to_prepped_string(&self) -> String {
        let mut out = String::new();
        if let Some(local) = &self.0.local {
            out.push_str(local);
            out.push('@');
        }
        out.push_str(&self.0.domain);
        if let Some(resource) = &self.0.resource {
            out.push('/');
            out.push_str(resource);
        }
        out
    }

    /// Returns the canonical display form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0.display
    }

    /// Returns true if both values are the same instance, not merely equal.
    #[must_use]
    pub fn ptr_eq(a: &Jid, b: &Jid) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

fn check_part_len(part: JidPart, value: &str) -> Result<(), JidError> {
    let length = value.chars().count();
    if length == 0 || length > MAX_PART_LEN {
        return Err(JidError::InvalidPartLength {
            part,
            length,
            max: MAX_PART_LEN,
        });
    }
    Ok(())
}

impl PartialEq for Jid {
    fn eq(&self, other: &Self) -> bool {
        Jid::ptr_eq(self, other)
            || (self.0.local == other.0.local
                && self.0.domain == other.0.domain
                && self.0.resource == other.0.resource)
    }
}

impl Eq for Jid {}

impl Hash for Jid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.local.hash(state);
        self.0.domain.hash(state);
        self.0.resource.hash(state);
    }
}

impl std::fmt::Debug for Jid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Jid").field(&self.as_str()).finish()
    }
}

impl std::fmt::Display for Jid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Jid {
    type Err = JidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Jid {
    type Error = JidError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl AsRef<str> for Jid {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl serde::Serialize for Jid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for Jid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Tests
// =============================================================================
