//! # sms2xmpp-jid
//!
//! JID parsing, validation and normalization for the sms2xmpp bridge.
//!
//! ## Design Principles
//!
//! - A [`Jid`] is immutable once parsed and cheap to share
//! - Parsing is strict: malformed input is an error, never a best-effort JID
//! - Equality and hashing use the normalized parts, not the display string
//! - Every JID has a canonical string form that parses back to an equal JID
//!
//! ## JID Format
//!
//! `[localpart@]domainpart[/resourcepart]`
//!
//! Examples:
//! - `example.com` (domain JID)
//! - `alice@example.com` (bare JID)
//! - `alice@example.com/phone` (full JID)
//!
//! The domainpart goes through IDNA processing and is compared in its
//! ASCII-compatible form, so `alice@Example.COM` and `alice@example.com` are
//! the same JID. Localparts and resourceparts are compared as written.
//!
//! [`JidCache`] keeps recently parsed JIDs so that repeated inputs are
//! parsed once.

mod cache;
mod domain;
mod error;
mod escape;
mod jid;

pub use cache::{CacheStats, CacheStatsSnapshot, JidCache, JidCacheConfig, DEFAULT_CAPACITY};
pub use error::{JidError, JidPart};
pub use escape::{unescape_local, RESERVED_CHARS};
pub use jid::{Jid, MAX_JID_LEN, MAX_PART_LEN};
