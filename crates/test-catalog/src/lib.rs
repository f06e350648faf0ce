// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # test-catalog
//!
//! The vocabulary of the lane scheduler and its first pipeline stage.
//!
//! - [`TestFile`]: an opaque, path-like test identifier.
//! - [`FileList`]: the ordered input file list (newline- or space-delimited).
//! - [`TestCategory`]: the fixed set of test levels.
//! - [`RuleSet`]: ordered `(category, pattern)` rules, compiled once.
//! - [`Classifier`]: splits a file list into disjoint [`CategoryBucket`]s.
//!
//! # Classification Model
//!
//! Rules are applied in declaration order over a working pool of
//! unconsumed files. Each rule claims every remaining file it matches, so a
//! file matching several rules lands in the **first** one. Files that no
//! rule claims are reported as unclassified and never scheduled.
//!
//! ```text
//! pool = [a, b, c, d]
//!   migration  claims a      → pool = [b, c, d]
//!   unit       claims b, c   → pool = [d]
//!   ...
//! unclassified = [d]
//! ```
//!
//! # Example
//! ```
//! use test_catalog::{Classifier, FileList, RuleSet, TestCategory};
//!
//! let files = FileList::parse("spec/models/user_spec.rb spec/features/login_spec.rb");
//! let classifier = Classifier::new(RuleSet::gitlab_default().unwrap());
//! let classification = classifier.classify(files.as_slice());
//!
//! assert_eq!(classification.bucket(TestCategory::Unit).unwrap().len(), 1);
//! assert_eq!(classification.bucket(TestCategory::System).unwrap().len(), 1);
//! ```

mod category;
pub mod classifier;
mod error;
mod file;
pub mod rule;

pub use category::TestCategory;
pub use classifier::{CategoryBucket, Classification, Classifier};
pub use error::CatalogError;
pub use file::{FileList, TestFile};
pub use rule::{CategoryRule, RuleSet, RuleSpec};
