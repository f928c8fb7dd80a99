//! Artifact repository items.

/// An artifact repository referenced by dependencies and BOMs that are not
/// hosted on the default repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub name: String,
    pub url: String,
    pub snapshots_enabled: bool,
}

impl Repository {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            snapshots_enabled: false,
        }
    }

    pub fn with_snapshots(mut self) -> Self {
        self.snapshots_enabled = true;
        self
    }
}
