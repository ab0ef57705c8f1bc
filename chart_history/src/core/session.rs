// @file: chart_history/src/core/session.rs
// @description: Opaque per-channel session tokens (quote + chart lanes).
// @author: LAS.

use std::fmt;
use uuid::Uuid;

const SUFFIX_LEN: usize = 12;


#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// `<prefix>_<first 12 hex chars of a random v4 uuid>`.
    pub fn generate(prefix: &str) -> Self {
        let raw: String = Uuid::new_v4().simple().to_string();
        SessionId(format!("{}_{}", prefix, &raw[..SUFFIX_LEN]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}


/// The two lanes the protocol multiplexes over one socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPair {
    pub quote: SessionId,
    pub chart: SessionId,
}

impl SessionPair {
    pub fn new() -> Self {
        SessionPair {
            quote: SessionId::generate("qs"),
            chart: SessionId::generate("cs"),
        }
    }
}

impl Default for SessionPair {
    fn default() -> Self {
        Self::new()
    }
}
