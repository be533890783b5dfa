use crate::artifacts::resources::resource::{Resource, ResourceKind};
use serde::{Deserialize, Serialize};

/// Every script and stylesheet observed during one check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub scripts: Vec<Resource>,
    pub styles: Vec<Resource>,
}

impl Snapshot {
    pub fn new(scripts: Vec<Resource>, styles: Vec<Resource>) -> Self {
        Snapshot { scripts, styles }
    }

    pub fn resources_of(&self, kind: ResourceKind) -> &[Resource] {
        match kind {
            ResourceKind::Script => &self.scripts,
            ResourceKind::Stylesheet => &self.styles,
        }
    }

    /// Scripts first, then stylesheets
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.scripts.iter().chain(self.styles.iter())
    }

    pub fn len(&self) -> usize {
        self.scripts.len() + self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty() && self.styles.is_empty()
    }

    /// Whether any resource carries a diff status
    pub fn has_changes(&self) -> bool {
        self.resources().any(|resource| resource.diff_status().is_some())
    }
}
