// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Ordered classification rules.
//!
//! A [`RuleSpec`] is the serialisable form found in configuration files; a
//! [`RuleSet`] holds the compiled rules in declaration order. Compilation
//! happens once, so an invalid pattern is reported at construction time
//! rather than halfway through a classification pass.

use crate::{CatalogError, TestCategory, TestFile};
use regex::Regex;
use std::collections::HashSet;

/// Uncompiled rule as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RuleSpec {
    /// Category claimed by files matching `pattern`.
    pub category: TestCategory,
    /// Regular expression matched against the full file path.
    pub pattern: String,
}

impl RuleSpec {
    pub fn new(category: TestCategory, pattern: impl Into<String>) -> Self {
        Self {
            category,
            pattern: pattern.into(),
        }
    }
}

/// A compiled `(category, pattern)` rule.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    category: TestCategory,
    pattern: Regex,
}

impl CategoryRule {
    /// Compiles a rule from its configuration form.
    pub fn compile(spec: &RuleSpec) -> Result<Self, CatalogError> {
        let pattern = Regex::new(&spec.pattern).map_err(|source| CatalogError::InvalidPattern {
            category: spec.category,
            source,
        })?;
        Ok(Self {
            category: spec.category,
            pattern,
        })
    }

    pub fn category(&self) -> TestCategory {
        self.category
    }

    /// Returns the pattern source.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Returns `true` if `file` belongs to this rule's category.
    pub fn matches(&self, file: &TestFile) -> bool {
        self.pattern.is_match(file.as_str())
    }
}

/// Folders holding unit-level specs in the stock layout.
const UNIT_FOLDERS: &[&str] = &[
    "bin",
    "channels",
    "click_house",
    "components",
    "config",
    "contracts",
    "db",
    "dependencies",
    "elastic",
    "elastic_integration",
    "experiments",
    "factories",
    "finders",
    "frontend",
    "graphql",
    "haml_lint",
    "helpers",
    "initializers",
    "keeps",
    "lib",
    "metrics_server",
    "models",
    "policies",
    "presenters",
    "rack_servers",
    "replicators",
    "routing",
    "rubocop",
    "scripts",
    "serializers",
    "services",
    "sidekiq",
    "sidekiq_cluster",
    "spam",
    "support_specs",
    "tasks",
    "tooling",
    "uploaders",
    "validators",
    "views",
    "workers",
];

/// Builds `^(?:ee/|jh/)?spec/(?:f1|f2|...)/` for a list of spec folders.
fn spec_folder_pattern(folders: &[&str]) -> String {
    format!("^(?:ee/|jh/)?spec/(?:{})/", folders.join("|"))
}

/// Compiled rules in declaration (priority) order.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<CategoryRule>,
}

impl RuleSet {
    /// Compiles and validates an ordered list of rule specs.
    ///
    /// # Errors
    /// - [`CatalogError::EmptyRuleSet`] if `specs` is empty.
    /// - [`CatalogError::DuplicateCategory`] if a category appears twice.
    /// - [`CatalogError::InvalidPattern`] if a pattern fails to compile.
    pub fn new(specs: &[RuleSpec]) -> Result<Self, CatalogError> {
        if specs.is_empty() {
            return Err(CatalogError::EmptyRuleSet);
        }

        let mut seen = HashSet::new();
        let mut rules = Vec::with_capacity(specs.len());
        for spec in specs {
            if !seen.insert(spec.category) {
                return Err(CatalogError::DuplicateCategory(spec.category));
            }
            rules.push(CategoryRule::compile(spec)?);
        }

        Ok(Self { rules })
    }

    /// Stock rule specs for the `spec/` + `ee/spec/` test-level layout.
    ///
    /// Background migrations live under `spec/lib/`, so they must be
    /// declared before `unit` to be claimed by their own level.
    pub fn gitlab_default_specs() -> Vec<RuleSpec> {
        vec![
            RuleSpec::new(TestCategory::Migration, spec_folder_pattern(&["migrations"])),
            RuleSpec::new(
                TestCategory::BackgroundMigration,
                spec_folder_pattern(&[
                    "lib/gitlab/background_migration",
                    "lib/ee/gitlab/background_migration",
                ]),
            ),
            RuleSpec::new(TestCategory::Unit, spec_folder_pattern(UNIT_FOLDERS)),
            RuleSpec::new(
                TestCategory::Integration,
                spec_folder_pattern(&["commands", "controllers", "mailers", "requests"]),
            ),
            RuleSpec::new(TestCategory::System, spec_folder_pattern(&["features"])),
        ]
    }

    /// The compiled stock rule set.
    pub fn gitlab_default() -> Result<Self, CatalogError> {
        Self::new(&Self::gitlab_default_specs())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates over rules in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &CategoryRule> {
        self.rules.iter()
    }

    /// Categories in priority order.
    pub fn categories(&self) -> Vec<TestCategory> {
        self.rules.iter().map(|r| r.category).collect()
    }

    /// Returns the uncompiled form of this rule set.
    pub fn to_specs(&self) -> Vec<RuleSpec> {
        self.rules
            .iter()
            .map(|r| RuleSpec::new(r.category, r.pattern()))
            .collect()
    }
}
