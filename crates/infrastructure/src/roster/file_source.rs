use async_trait::async_trait;
use hostpulse_application::ports::RosterSource;
use hostpulse_domain::{DomainError, Endpoint};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct RosterFile {
    #[serde(default)]
    endpoints: Vec<Endpoint>,
}

/// Reads the roster from a TOML file of `[[endpoints]]` tables on every load,
/// so edits are picked up without a restart.
///
/// ```toml
/// [[endpoints]]
/// name = "desk-01"
/// address = "192.168.3.10"
/// capabilities = ["reachability", "remote_desktop"]
/// ```
#[derive(Debug, Clone)]
pub struct FileRosterSource {
    path: PathBuf,
}

impl FileRosterSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub(crate) fn parse_roster(contents: &str) -> Result<Vec<Endpoint>, DomainError> {
    let file: RosterFile =
        toml::from_str(contents).map_err(|e| DomainError::Roster(e.to_string()))?;
    Ok(file.endpoints)
}

#[async_trait]
impl RosterSource for FileRosterSource {
    async fn load_roster(&self) -> Result<Vec<Endpoint>, DomainError> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::Roster(format!("failed to read {}: {}", self.path.display(), e))
        })?;

        let endpoints = parse_roster(&contents)
            .map_err(|e| DomainError::Roster(format!("{}: {}", self.path.display(), e)))?;

        debug!(
            path = %self.path.display(),
            endpoints = endpoints.len(),
            "Roster file loaded"
        );
        Ok(endpoints)
    }
}
