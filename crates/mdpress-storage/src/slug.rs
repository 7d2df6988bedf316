//! Slug derivation from post file names.

/// Length of the file extension stripped from post file names (".mdx").
const EXTENSION_LEN: usize = 4;

/// Derive the slug for a post file name.
///
/// The slug is the file name minus its trailing 4 characters, counted on
/// character boundaries. Names with 4 characters or fewer yield an empty
/// slug. No validation is performed; the slug set mirrors the directory
/// contents exactly.
#[must_use]
pub fn slug_from_file_name(name: &str) -> String {
    let keep = name.chars().count().saturating_sub(EXTENSION_LEN);
    name.chars().take(keep).collect()
}
