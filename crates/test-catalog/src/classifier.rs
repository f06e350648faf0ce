// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Ordered, consuming classification of test files into category buckets.
//!
//! # Algorithm
//!
//! The input is first collapsed into an arena of unique files (first
//! occurrence wins, input order kept). A parallel `consumed` bitmap marks
//! the files already claimed. Each rule, in declaration order, walks the
//! arena and claims every unconsumed file it matches:
//!
//! ```text
//! for rule in rules:                  O(rules)
//!     for i in 0..arena.len():        O(n)
//!         if !consumed[i] && rule.matches(arena[i]):
//!             bucket[rule].push(arena[i]); consumed[i] = true
//! ```
//!
//! A file can therefore never be assigned twice, and whatever is left
//! unconsumed after the last rule is unclassified.

use crate::{RuleSet, TestCategory, TestFile};
use std::collections::HashSet;

/// The files claimed by one category.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CategoryBucket {
    /// The category that claimed these files.
    pub category: TestCategory,
    /// Claimed files, in input order.
    pub files: Vec<TestFile>,
}

impl CategoryBucket {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Result of a classification pass.
///
/// Holds one bucket per rule (empty buckets included) in rule order, plus
/// the files no rule claimed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Classification {
    buckets: Vec<CategoryBucket>,
    unclassified: Vec<TestFile>,
    total_files: usize,
}

impl Classification {
    /// Buckets in rule declaration order.
    pub fn buckets(&self) -> &[CategoryBucket] {
        &self.buckets
    }

    /// Consumes the classification, returning its buckets and the
    /// unclassified files.
    pub fn into_parts(self) -> (Vec<CategoryBucket>, Vec<TestFile>) {
        (self.buckets, self.unclassified)
    }

    /// Returns the bucket for `category`, if a rule declared it.
    pub fn bucket(&self, category: TestCategory) -> Option<&CategoryBucket> {
        self.buckets.iter().find(|b| b.category == category)
    }

    /// Files that matched no rule.
    pub fn unclassified(&self) -> &[TestFile] {
        &self.unclassified
    }

    /// Number of unique input files.
    pub fn total_files(&self) -> usize {
        self.total_files
    }

    /// Number of files claimed by some bucket.
    pub fn classified_count(&self) -> usize {
        self.buckets.iter().map(|b| b.len()).sum()
    }
}

/// Splits file lists into disjoint category buckets.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: RuleSet,
}

impl Classifier {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Classifies `files`.
    ///
    /// Duplicate paths are collapsed to their first occurrence. Files
    /// matching several rules go to the first declared rule.
    pub fn classify(&self, files: &[TestFile]) -> Classification {
        let mut seen: HashSet<&str> = HashSet::with_capacity(files.len());
        let arena: Vec<&TestFile> = files.iter().filter(|f| seen.insert(f.as_str())).collect();

        if arena.len() < files.len() {
            tracing::debug!(
                "collapsed {} duplicate file entries",
                files.len() - arena.len(),
            );
        }

        let mut consumed = vec![false; arena.len()];
        let mut buckets = Vec::with_capacity(self.rules.len());

        for rule in self.rules.iter() {
            let mut claimed = Vec::new();
            for (i, file) in arena.iter().enumerate() {
                if !consumed[i] && rule.matches(file) {
                    consumed[i] = true;
                    claimed.push((*file).clone());
                }
            }
            tracing::debug!("category '{}' claimed {} files", rule.category(), claimed.len());
            buckets.push(CategoryBucket {
                category: rule.category(),
                files: claimed,
            });
        }

        let unclassified: Vec<TestFile> = arena
            .iter()
            .zip(&consumed)
            .filter(|(_, &taken)| !taken)
            .map(|(f, _)| (*f).clone())
            .collect();

        Classification {
            buckets,
            unclassified,
            total_files: arena.len(),
        }
    }
}
