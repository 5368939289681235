// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Planner output consumed by the provider.
//!
//! The planner decides what has to change; zonesync only applies it. A plan is
//! a [`Changes`] value, usually read from a YAML or JSON file:
//!
//! ```yaml
//! create:
//!   - dnsName: app.example.com.
//!     target: 1.2.3.4
//!     recordType: A
//! updateNew: []
//! updateOld: []
//! delete: []
//! ```

use crate::endpoint::Endpoint;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Desired record mutations for one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Changes {
    /// Records that do not exist yet
    #[serde(default)]
    pub create: Vec<Endpoint>,
    /// Current state of records being updated (informational; Route 53 upserts)
    #[serde(default)]
    pub update_old: Vec<Endpoint>,
    /// Desired state of records being updated
    #[serde(default)]
    pub update_new: Vec<Endpoint>,
    /// Records to remove
    #[serde(default)]
    pub delete: Vec<Endpoint>,
}

impl Changes {
    /// Whether the plan contains nothing to apply.
    ///
    /// `update_old` is ignored: it only describes what `update_new` replaces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.create.is_empty() && self.update_new.is_empty() && self.delete.is_empty()
    }

    /// Parse a plan from YAML (JSON is accepted too, being a YAML subset).
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not a valid plan.
    pub fn from_yaml(document: &str) -> Result<Self> {
        serde_yaml::from_str(document).context("Failed to parse change plan")
    }

    /// Read a plan file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self> {
        let document = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read change plan {}", path.display()))?;
        Self::from_yaml(&document).with_context(|| format!("Invalid change plan {}", path.display()))
    }
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod plan_tests;
