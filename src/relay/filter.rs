use serde::Serialize;
use serde_json::Value;

use crate::relay::nip19::PublicKey;

/// NIP-23 long-form content.
pub const LONG_FORM_KIND: u16 = 30023;

/// The query sent with the one subscription opened per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub kind: u16,
    pub author: Option<PublicKey>,
    /// Maximum number of events requested. 0 means no limit.
    pub limit: u32,
}

#[derive(Serialize)]
struct WireFilter {
    kinds: [u16; 1],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    authors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
}

impl Filter {
    pub fn long_form(author: Option<PublicKey>, limit: u32) -> Self {
        Self {
            kind: LONG_FORM_KIND,
            author,
            limit,
        }
    }

    /// The limit as a bound on collected events, if one was requested.
    pub fn max_events(&self) -> Option<usize> {
        (self.limit > 0).then_some(self.limit as usize)
    }

    /// NIP-01 filter object.
    pub fn to_json(&self) -> Value {
        let wire = WireFilter {
            kinds: [self.kind],
            authors: self.author.iter().map(PublicKey::to_hex).collect(),
            limit: self.max_events().map(|_| self.limit),
        };
        serde_json::to_value(wire).unwrap_or(Value::Null)
    }
}
