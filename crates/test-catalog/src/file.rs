// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Test file identifiers and the input file list.

use crate::CatalogError;
use std::path::Path;

/// An opaque, path-like test file identifier.
///
/// Nothing about the path is interpreted beyond pattern matching; two files
/// are the same file iff their strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct TestFile(String);

impl TestFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TestFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TestFile {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TestFile {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::borrow::Borrow<str> for TestFile {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// The ordered list of test files handed to the scheduler.
///
/// The source artifact is a plain text file whose entries are separated by
/// any whitespace (newlines or spaces). Order is preserved; duplicates are
/// kept here and collapsed by the [`crate::Classifier`].
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FileList {
    files: Vec<TestFile>,
}

impl FileList {
    /// Parses a whitespace-delimited file list.
    pub fn parse(text: &str) -> Self {
        Self {
            files: text.split_whitespace().map(TestFile::from).collect(),
        }
    }

    /// Reads and parses a file list from disk.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let list = Self::parse(&content);
        tracing::debug!("read {} test files from '{}'", list.len(), path.display());
        Ok(list)
    }

    pub fn as_slice(&self) -> &[TestFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TestFile> {
        self.files.iter()
    }
}

impl FromIterator<TestFile> for FileList {
    fn from_iter<I: IntoIterator<Item = TestFile>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for FileList {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(TestFile::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_mixed_delimiters() {
        let list = FileList::parse("spec/a_spec.rb spec/b_spec.rb\nspec/c_spec.rb\n\n  spec/d_spec.rb ");
        let names: Vec<&str> = list.iter().map(|f| f.as_str()).collect();
        assert_eq!(
            names,
            vec!["spec/a_spec.rb", "spec/b_spec.rb", "spec/c_spec.rb", "spec/d_spec.rb"]
        );
    }

    #[test]
    fn test_parse_empty() {
        assert!(FileList::parse("").is_empty());
        assert!(FileList::parse(" \n\t ").is_empty());
    }

    #[test]
    fn test_parse_keeps_duplicates() {
        assert_eq!(FileList::parse("a a b").len(), 3);
    }

    #[test]
    fn test_from_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "spec/models/user_spec.rb spec/lib/foo_spec.rb").unwrap();
        let list = FileList::from_file(tmp.path()).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_from_missing_file() {
        let err = FileList::from_file(Path::new("/nonexistent/rspec_files")).unwrap_err();
        assert!(matches!(err, CatalogError::FileListReadError(_)));
    }

    #[test]
    fn test_file_display_and_serde() {
        let f = TestFile::new("spec/x_spec.rb");
        assert_eq!(f.to_string(), "spec/x_spec.rb");
        assert_eq!(serde_json::to_string(&f).unwrap(), "\"spec/x_spec.rb\"");
    }
}
