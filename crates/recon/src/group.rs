use crate::blob::FieldExtractor;

/// Extract a group name from a blob and lowercase it for storage.
///
/// Unlike role answers, the lowercased form is what gets kept: downstream
/// matching and the exported `group` column both use it. A value that is
/// empty after trimming carries no signal and yields `None`.
pub fn normalize_group(blob: Option<&str>, extractor: &FieldExtractor) -> Option<String> {
    let name = extractor.extract(blob)?;
    if name.is_empty() {
        return None;
    }
    Some(name.to_lowercase())
}
