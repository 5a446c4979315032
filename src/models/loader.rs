use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Which plugin-loading runtime a mod descriptor or a game installation targets.
///
/// Mods only ever carry `Fabric`, `Quilt` or `Forge`; installations may also be
/// `Vanilla` (unmodded client) or `Other` (unrecognized launcher setup).
#[derive(
    Serialize, Deserialize, Display, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum LoaderKind {
    #[display("fabric")]
    Fabric,
    #[display("quilt")]
    Quilt,
    #[display("forge")]
    Forge,
    #[display("vanilla")]
    Vanilla,
    #[display("other")]
    Other,
}
