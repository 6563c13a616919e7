//! Human and JSON renderings of parse and compare results.

use serde::Serialize;
use sms2xmpp_jid::{Jid, JidError};

/// The parts and derived forms of a parsed JID.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JidDetails {
    pub display: String,
    pub local: Option<String>,
    pub unescaped_local: Option<String>,
    pub domain: String,
    pub domain_ascii: String,
    pub resource: Option<String>,
    pub bare: String,
    pub domain_only: String,
}

impl From<&Jid> for JidDetails {
    fn from(jid: &Jid) -> Self {
        Self {
            display: jid.to_string(),
            local: jid.local().map(str::to_string),
            unescaped_local: jid.unescaped_local().map(|l| l.into_owned()),
            domain: jid.domain(),
            domain_ascii: jid.domain_ascii().to_string(),
            resource: jid.resource().map(str::to_string),
            bare: jid.to_bare().to_string(),
            domain_only: jid.to_domain_only().to_string(),
        }
    }
}

/// Outcome of parsing one input.
#[derive(Debug, Clone, Serialize)]
pub struct ParseReport {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jid: Option<JidDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ParseReport {
    pub fn new(input: &str, result: &Result<Jid, JidError>) -> Self {
        match result {
            Ok(jid) => Self {
                input: input.to_string(),
                jid: Some(JidDetails::from(jid)),
                error: None,
            },
            Err(e) => Self {
                input: input.to_string(),
                jid: None,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn render_text(&self) -> String {
        let Some(jid) = &self.jid else {
            return format!(
                "{}: {}",
                self.input,
                self.error.as_deref().unwrap_or_default()
            );
        };

        [
            self.input.clone(),
            format!("  display:      {}", jid.display),
            format!("  local:        {}", or_dash(jid.local.as_deref())),
            format!("  unescaped:    {}", or_dash(jid.unescaped_local.as_deref())),
            format!("  domain:       {}", jid.domain),
            format!("  domain ascii: {}", jid.domain_ascii),
            format!("  resource:     {}", or_dash(jid.resource.as_deref())),
            format!("  bare:         {}", jid.bare),
            format!("  domain only:  {}", jid.domain_only),
        ]
        .join("\n")
    }
}

/// Outcome of matching a sender against an account.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CompareReport {
    pub sender_bare: String,
    pub account_bare: String,
    pub matches: bool,
}

impl CompareReport {
    pub fn new(sender: &Jid, account: &Jid) -> Self {
        let sender_bare = sender.to_bare();
        let account_bare = account.to_bare();
        Self {
            matches: sender_bare == account_bare,
            sender_bare: sender_bare.to_string(),
            account_bare: account_bare.to_string(),
        }
    }

    pub fn render_text(&self) -> String {
        let verdict = if self.matches { "match" } else { "no match" };
        format!("{verdict}: {} vs {}", self.sender_bare, self.account_bare)
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}
