// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Test categories (test levels).
//!
//! The variant order below is the stock classification priority. The
//! priority actually used at runtime is the declaration order of the
//! configured [`crate::RuleSet`].

/// The level a test file belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TestCategory {
    /// Database schema migration specs.
    Migration,
    /// Background (batched) data migration specs.
    BackgroundMigration,
    /// Isolated unit specs: models, services, libraries, workers...
    Unit,
    /// Controller, request and mailer specs.
    Integration,
    /// Full-stack feature specs driven through a browser.
    System,
}

impl TestCategory {
    /// All categories in stock priority order.
    pub const ALL: [TestCategory; 5] = [
        Self::Migration,
        Self::BackgroundMigration,
        Self::Unit,
        Self::Integration,
        Self::System,
    ];

    /// Parses a category from a configuration or CLI string.
    ///
    /// Accepts snake_case (`"background_migration"`), kebab-case and a
    /// few aliases (`"feature"`, `"e2e"`).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "migration" | "migrations" => Some(Self::Migration),
            "background_migration" | "background_migrations" | "bbm" => {
                Some(Self::BackgroundMigration)
            }
            "unit" => Some(Self::Unit),
            "integration" => Some(Self::Integration),
            "system" | "feature" | "features" | "e2e" => Some(Self::System),
            _ => None,
        }
    }

    /// Returns the canonical snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Migration => "migration",
            Self::BackgroundMigration => "background_migration",
            Self::Unit => "unit",
            Self::Integration => "integration",
            Self::System => "system",
        }
    }
}

impl std::fmt::Display for TestCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TestCategory {
    type Err = crate::CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_loose(s).ok_or_else(|| crate::CatalogError::UnknownCategory(s.to_string()))
    }
}
