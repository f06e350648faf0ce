// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the test catalog.

use crate::TestCategory;

/// Errors that can occur while building rule sets or reading file lists.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The file list could not be read.
    #[error("failed to read file list: {0}")]
    FileListReadError(#[from] std::io::Error),

    /// A rule's pattern is not a valid regular expression.
    #[error("invalid pattern for category '{category}': {source}")]
    InvalidPattern {
        category: TestCategory,
        #[source]
        source: regex::Error,
    },

    /// A category was declared by more than one rule.
    #[error("category '{0}' is declared by more than one rule")]
    DuplicateCategory(TestCategory),

    /// A category name is not one of the known test levels.
    #[error("unknown test category '{0}'")]
    UnknownCategory(String),

    /// The rule set contains no rules.
    #[error("rule set contains no rules")]
    EmptyRuleSet,
}
