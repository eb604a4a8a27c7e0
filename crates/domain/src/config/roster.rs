use crate::endpoint::Endpoint;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RosterConfig {
    /// External roster file, re-read on every poll. Takes precedence over
    /// `endpoints` when set.
    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}
