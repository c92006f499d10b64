// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use serde::{Deserialize, Serialize};

/// A statute article the analysis relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provision {
    pub law: String,
    pub article: String,
    pub text: String,
}

/// One analysis record per detected legal issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerdictRecord {
    pub case_summary: String,
    pub legal_classification: String,
    /// Ordered; duplicates are kept as returned.
    pub related_provisions: Vec<Provision>,
    pub reasoning: String,
    /// Lay-language explanation for the user
    pub plain_explanation: String,
    pub ruling: String,
}

/// Non-empty, ordered sequence of verdict records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnalysisResult(Vec<VerdictRecord>);

impl AnalysisResult {
    /// Returns `None` for an empty list.
    pub fn new(records: Vec<VerdictRecord>) -> Option<Self> {
        if records.is_empty() {
            None
        } else {
            Some(Self(records))
        }
    }

    pub fn records(&self) -> &[VerdictRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed result.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VerdictRecord> {
        self.0.iter()
    }

    pub fn into_records(self) -> Vec<VerdictRecord> {
        self.0
    }
}

impl<'a> IntoIterator for &'a AnalysisResult {
    type Item = &'a VerdictRecord;
    type IntoIter = std::slice::Iter<'a, VerdictRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
