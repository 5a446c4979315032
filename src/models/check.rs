use serde::Serialize;

/// A remedial action a shell can offer next to a finding.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub enum Remedy {
    /// Fetch/copy the named mod id into the installation.
    Install(String),
    /// Re-enable an already present mod file.
    Enable(String),
}

/// One diagnostic produced by a dependency/compatibility check run.
/// Ephemeral: produced fresh by each run, never persisted.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct CheckFinding {
    pub message: String,
    pub remedy: Option<Remedy>,
}

impl CheckFinding {
    pub fn new(message: impl Into<String>, remedy: Option<Remedy>) -> Self {
        Self {
            message: message.into(),
            remedy,
        }
    }
}

impl std::fmt::Display for CheckFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
