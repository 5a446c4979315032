use serde::{Deserialize, Serialize};

/// One dependency declared by a mod descriptor.
///
/// `version_range` is format-specific and opaque outside its own loader;
/// `ordering` and `side` only carry data for Forge descriptors.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ModDependency {
    pub mod_id: String,
    pub mandatory: bool,
    pub version_range: String,
    pub ordering: String,
    pub side: String,
}

impl ModDependency {
    pub fn mandatory(mod_id: impl Into<String>, version_range: impl Into<String>) -> Self {
        Self {
            mod_id: mod_id.into(),
            mandatory: true,
            version_range: version_range.into(),
            ..Default::default()
        }
    }
}
