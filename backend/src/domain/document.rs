//! Document names and the rules a new name must satisfy.

use std::fmt;

/// Reasons a candidate document name is rejected.
///
/// Variants are listed in the order [`validate_name`] checks them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameValidationError {
    /// Candidate was empty or only whitespace.
    NameRequired,
    /// Candidate has no non-empty suffix after a `.`.
    ExtensionRequired,
    /// A document with the trimmed name already exists.
    NotUnique,
    /// Candidate would address something other than a file in the root.
    PathSeparator,
}

impl fmt::Display for NameValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameRequired => write!(f, "A name is required."),
            Self::ExtensionRequired => write!(f, "A file extension is required."),
            Self::NotUnique => write!(f, "The file name must be unique."),
            Self::PathSeparator => write!(f, "The file name must not contain a path separator."),
        }
    }
}

impl std::error::Error for NameValidationError {}

/// A validated, trimmed document file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentName(String);

impl AsRef<str> for DocumentName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DocumentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Return the suffix after the last `.` when both stem and suffix are
/// non-empty. Leading-dot names such as `.bashrc` have no extension.
pub(crate) fn extension_of(name: &str) -> Option<&str> {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
        _ => None,
    }
}

/// Check a candidate name for a new document against the names already in
/// the store.
///
/// First failure wins: blank, missing extension, duplicate, path separator.
///
/// # Examples
/// ```
/// use cms::domain::{validate_name, NameValidationError};
///
/// let existing = vec!["about.txt".to_owned()];
/// assert_eq!(validate_name("  ", &existing), Err(NameValidationError::NameRequired));
/// assert_eq!(validate_name("about", &existing), Err(NameValidationError::ExtensionRequired));
/// assert_eq!(validate_name("about.txt ", &existing), Err(NameValidationError::NotUnique));
/// assert_eq!(validate_name("notes.md", &existing).unwrap().as_ref(), "notes.md");
/// ```
pub fn validate_name(
    candidate: &str,
    existing: &[String],
) -> Result<DocumentName, NameValidationError> {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return Err(NameValidationError::NameRequired);
    }
    if extension_of(trimmed).is_none() {
        return Err(NameValidationError::ExtensionRequired);
    }
    if existing.iter().any(|name| name == trimmed) {
        return Err(NameValidationError::NotUnique);
    }
    if trimmed.contains(['/', '\\']) {
        return Err(NameValidationError::PathSeparator);
    }
    Ok(DocumentName(trimmed.to_owned()))
}
