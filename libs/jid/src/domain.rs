//! Domainpart normalization.
//!
//! Domains are stored in their ASCII-compatible form (UTS #46 processing
//! with STD3 ASCII rules) and shown to users in Unicode form.

use idna::AsciiDenyList;

use crate::error::{JidError, JidPart};

/// Maximum length of a normalized domainpart.
pub const MAX_DOMAIN_LEN: usize = 1023;

/// Normalizes a raw domainpart to its ASCII-compatible comparison form.
///
/// A single trailing `.` denotes the DNS root and is dropped after IDNA
/// mapping, so full stops such as `。` count as well. A domain that still
/// ends in `.` after that has an empty label and is rejected.
pub fn to_ascii(raw: &str) -> Result<String, JidError> {
    if raw.is_empty() {
        return Err(empty_domain());
    }

    let mut ascii = idna::domain_to_ascii_cow(raw.as_bytes(), AsciiDenyList::STD3)
        .map_err(|_| JidError::InvalidDomain {
            domain: raw.to_string(),
        })?
        .into_owned();

    if ascii.ends_with('.') {
        ascii.pop();
    }
    if ascii.is_empty() {
        return Err(empty_domain());
    }
    if ascii.ends_with('.') {
        return Err(JidError::InvalidDomain {
            domain: raw.to_string(),
        });
    }
    if ascii.len() > MAX_DOMAIN_LEN {
        return Err(JidError::InvalidPartLength {
            part: JidPart::Domain,
            length: ascii.len(),
            max: MAX_DOMAIN_LEN,
        });
    }

    Ok(ascii)
}

fn empty_domain() -> JidError {
    JidError::InvalidPartLength {
        part: JidPart::Domain,
        length: 0,
        max: MAX_DOMAIN_LEN,
    }
}

/// Renders a normalized ASCII domain in Unicode form.
///
/// The input is expected to come from [`to_ascii`]; labels that fail to
/// decode are left in their ASCII form.
pub fn to_unicode(ascii: &str) -> String {
    let (unicode, _errors) = idna::domain_to_unicode(ascii);
    unicode
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(to_ascii("example.com").unwrap(), "example.com");
    }

    #[test]
    fn test_ascii_lowercases() {
        assert_eq!(to_ascii("Example.COM").unwrap(), "example.com");
    }

    #[test]
    fn test_ascii_strips_root_dot() {
        assert_eq!(to_ascii("example.com.").unwrap(), "example.com");
    }

    #[test]
    fn test_ascii_only_dot_is_empty() {
        let err = to_ascii(".").unwrap_err();
        assert_eq!(
            err,
            JidError::InvalidPartLength {
                part: JidPart::Domain,
                length: 0,
                max: MAX_DOMAIN_LEN,
            }
        );
    }

    #[test]
    fn test_ascii_strips_mapped_root_dot() {
        assert_eq!(to_ascii("example.com\u{3002}").unwrap(), "example.com");
        assert_eq!(to_ascii("Example.COM.").unwrap(), "example.com");
    }

    #[test]
    fn test_ascii_rejects_extra_trailing_dots() {
        assert!(matches!(
            to_ascii("example.com.."),
            Err(JidError::InvalidDomain { .. })
        ));
        assert!(to_ascii("..").is_err());
        assert!(to_ascii("\u{3002}").is_err());
        assert!(to_ascii("").is_err());
    }

    #[test]
    fn test_ascii_punycode() {
        assert_eq!(to_ascii("münchen.de").unwrap(), "xn--mnchen-3ya.de");
    }

    #[test]
    fn test_ascii_rejects_std3_violations() {
        assert!(matches!(
            to_ascii("exa mple.com"),
            Err(JidError::InvalidDomain { .. })
        ));
        assert!(matches!(
            to_ascii("exa<mple.com"),
            Err(JidError::InvalidDomain { .. })
        ));
    }

    #[test]
    fn test_unicode_roundtrip() {
        assert_eq!(to_unicode("xn--mnchen-3ya.de"), "münchen.de");
        assert_eq!(to_unicode("example.com"), "example.com");
    }
}
