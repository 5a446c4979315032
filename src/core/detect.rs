use crate::core::archive::ModArchive;
use crate::core::parser;
use crate::models::loader::LoaderKind;
use std::collections::BTreeSet;

/// Classifies which loader formats a package carries by testing for each
/// format's well-known descriptor entry. A package may match several formats
/// at once (dual fabric+forge releases are common); no precedence is implied.
/// When nothing matches the result is `{Other}`: the archive is still a mod
/// file as far as naming is concerned, just one without structured metadata.
pub fn detect_loaders(archive: &ModArchive) -> BTreeSet<LoaderKind> {
    let mut result = BTreeSet::new();
    if archive.has_entry(parser::FABRIC_DESCRIPTOR) {
        result.insert(LoaderKind::Fabric);
    }
    if archive.has_entry(parser::QUILT_DESCRIPTOR) {
        result.insert(LoaderKind::Quilt);
    }
    if archive.has_entry(parser::FORGE_DESCRIPTOR) {
        result.insert(LoaderKind::Forge);
    }
    if result.is_empty() {
        result.insert(LoaderKind::Other);
    }
    result
}
