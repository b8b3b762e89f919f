//! Control-plane types: bot builds, versions, and alias bindings.
//!
//! A build is an asynchronous remote operation that snapshots the bot's
//! `DRAFT` definition into an immutable numbered version. An alias is a
//! mutable named pointer to one such version, used to redirect traffic
//! without changing client-visible identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which bot definition a build snapshots.
///
/// The platform currently only builds from the working draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VersionSource {
    #[serde(rename = "DRAFT")]
    Draft,
}

impl fmt::Display for VersionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSource::Draft => write!(f, "DRAFT"),
        }
    }
}

/// Status of an asynchronous version build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildStatus {
    Building,
    Available,
    Failed,
}

impl BuildStatus {
    /// Terminal states are never left once reported.
    pub fn is_terminal(self) -> bool {
        matches!(self, BuildStatus::Available | BuildStatus::Failed)
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildStatus::Building => write!(f, "Building"),
            BuildStatus::Available => write!(f, "Available"),
            BuildStatus::Failed => write!(f, "Failed"),
        }
    }
}

impl FromStr for BuildStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Building" => Ok(BuildStatus::Building),
            "Available" => Ok(BuildStatus::Available),
            "Failed" => Ok(BuildStatus::Failed),
            other => Err(format!("invalid build status: '{other}'")),
        }
    }
}

/// An in-flight or finished version build.
///
/// The service assigns the version identifier when the build is requested;
/// the version only becomes usable once `status` reaches
/// [`BuildStatus::Available`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildJob {
    pub bot_id: String,
    /// Version identifier assigned at request time.
    pub version: String,
    pub status: BuildStatus,
    /// Literal failure reason reported by the service when `status` is
    /// `Failed`.
    pub failure_reason: Option<String>,
}

impl BuildJob {
    /// The built version, available only once the build has succeeded.
    pub fn result_version(&self) -> Option<&str> {
        match self.status {
            BuildStatus::Available => Some(&self.version),
            _ => None,
        }
    }
}

/// Status of an alias as reported by the control plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AliasStatus {
    Creating,
    Updating,
    Available,
    Failed,
}

impl fmt::Display for AliasStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AliasStatus::Creating => write!(f, "Creating"),
            AliasStatus::Updating => write!(f, "Updating"),
            AliasStatus::Available => write!(f, "Available"),
            AliasStatus::Failed => write!(f, "Failed"),
        }
    }
}

impl FromStr for AliasStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Creating" => Ok(AliasStatus::Creating),
            "Updating" => Ok(AliasStatus::Updating),
            "Available" => Ok(AliasStatus::Available),
            "Failed" => Ok(AliasStatus::Failed),
            other => Err(format!("invalid alias status: '{other}'")),
        }
    }
}

/// One entry from the alias listing.
///
/// The control plane offers no lookup-by-name primitive, so callers resolve
/// a name to an id by listing and matching. Alias ids are not assumed stable
/// across calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasSummary {
    pub alias_id: String,
    pub alias_name: String,
    /// Version the alias currently points at, if any.
    pub bound_version: Option<String>,
}

/// An alias after an update: a named pointer bound to a specific version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasBinding {
    pub alias_id: String,
    pub alias_name: String,
    pub bot_id: String,
    pub bound_version: String,
    pub status: AliasStatus,
}

/// Basic bot metadata, used for preflight checks before a release.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotInfo {
    pub bot_id: String,
    pub name: String,
    pub description: Option<String>,
    /// Raw status string as reported by the service.
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_source_display() {
        assert_eq!(VersionSource::Draft.to_string(), "DRAFT");
    }

    #[test]
    fn test_version_source_serde() {
        let json = serde_json::to_string(&VersionSource::Draft).unwrap();
        assert_eq!(json, "\"DRAFT\"");
    }

    #[test]
    fn test_build_status_roundtrip() {
        for status in [BuildStatus::Building, BuildStatus::Available, BuildStatus::Failed] {
            let s = status.to_string();
            let parsed: BuildStatus = s.parse().unwrap();
            assert_eq!(status, parsed);
        }
    }

    #[test]
    fn test_build_status_terminal() {
        assert!(!BuildStatus::Building.is_terminal());
        assert!(BuildStatus::Available.is_terminal());
        assert!(BuildStatus::Failed.is_terminal());
    }

    #[test]
    fn test_result_version_only_when_available() {
        let mut job = BuildJob {
            bot_id: "B123".to_string(),
            version: "2".to_string(),
            status: BuildStatus::Building,
            failure_reason: None,
        };
        assert_eq!(job.result_version(), None);

        job.status = BuildStatus::Available;
        assert_eq!(job.result_version(), Some("2"));

        job.status = BuildStatus::Failed;
        assert_eq!(job.result_version(), None);
    }

    #[test]
    fn test_alias_status_roundtrip() {
        for status in [
            AliasStatus::Creating,
            AliasStatus::Updating,
            AliasStatus::Available,
            AliasStatus::Failed,
        ] {
            let s = status.to_string();
            let parsed: AliasStatus = s.parse().unwrap();
            assert_eq!(status, parsed);
        }
    }
}
