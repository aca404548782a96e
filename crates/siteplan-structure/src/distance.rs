//! Semantic distance provider contract.
//!
//! Computing semantic distance between two topic labels is an external
//! capability (an embedding service, an LLM judge, ...). This module
//! specifies only the contract the planner consumes, plus a deterministic
//! table-backed implementation usable in tests and before any semantic
//! service exists.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::StructureError;

/// A provider's judgement about a pair of topic labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceJudgement {
    /// Normalized semantic distance in [0, 1]; 0 = identical
    pub distance: f64,
    /// Whether the provider recommends linking the two topics
    pub should_link: bool,
    /// Provider's linking recommendation text
    pub linking_recommendation: String,
}

impl DistanceJudgement {
    /// Create a judgement.
    pub fn new(distance: f64, should_link: bool, recommendation: impl Into<String>) -> Self {
        Self {
            distance,
            should_link,
            linking_recommendation: recommendation.into(),
        }
    }
}

/// Source of pairwise semantic distances.
///
/// Implementations must be symmetric in practice
/// (`distance(a, b) == distance(b, a)`); the planner does not verify this.
/// Failures (timeouts, malformed responses) must surface as errors — the
/// planner propagates them to its caller rather than substituting a default
/// distance, which would corrupt clustering determinism.
pub trait DistanceProvider {
    /// Judge the semantic distance between two topic labels.
    fn distance(&self, label_a: &str, label_b: &str)
        -> Result<DistanceJudgement, StructureError>;
}

/// Deterministic distance provider backed by an explicit pair table.
///
/// Pairs are stored under a canonical key, so lookups are symmetric by
/// construction. Unknown pairs receive the fallback judgement.
#[derive(Debug, Clone)]
pub struct TableDistanceProvider {
    table: HashMap<(String, String), DistanceJudgement>,
    fallback: DistanceJudgement,
}

impl TableDistanceProvider {
    /// Create an empty provider with the default fallback
    /// (distance 1.0, no link).
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
            fallback: DistanceJudgement::new(1.0, false, "No relationship recorded"),
        }
    }

    /// Create a provider with a custom fallback judgement.
    pub fn with_fallback(fallback: DistanceJudgement) -> Self {
        Self {
            table: HashMap::new(),
            fallback,
        }
    }

    /// Record a judgement for a pair of labels (order-insensitive).
    pub fn insert(&mut self, label_a: &str, label_b: &str, judgement: DistanceJudgement) {
        self.table.insert(Self::key(label_a, label_b), judgement);
    }

    /// Record a plain distance with a should-link flag derived from the
    /// ideal linking band.
    pub fn insert_distance(&mut self, label_a: &str, label_b: &str, distance: f64) {
        let should_link = (0.3..=0.6).contains(&distance);
        let recommendation = if should_link {
            "Link these topics"
        } else if distance < 0.3 {
            "Consider merging; topics overlap heavily"
        } else {
            "Too distant to link"
        };
        self.insert(
            label_a,
            label_b,
            DistanceJudgement::new(distance, should_link, recommendation),
        );
    }

    fn key(label_a: &str, label_b: &str) -> (String, String) {
        if label_a <= label_b {
            (label_a.to_string(), label_b.to_string())
        } else {
            (label_b.to_string(), label_a.to_string())
        }
    }
}

impl Default for TableDistanceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DistanceProvider for TableDistanceProvider {
    fn distance(
        &self,
        label_a: &str,
        label_b: &str,
    ) -> Result<DistanceJudgement, StructureError> {
        if label_a == label_b {
            return Ok(DistanceJudgement::new(0.0, false, "Same topic"));
        }
        Ok(self
            .table
            .get(&Self::key(label_a, label_b))
            .cloned()
            .unwrap_or_else(|| self.fallback.clone()))
    }
}

/// Full pairwise distance matrix over a label list.
///
/// Self-distance is 0 by definition and never computed. Each unordered pair
/// is judged once and mirrored into both cells; the provider contract
/// requires symmetry, so the mirrored fill is observationally identical to
/// judging both directions while halving provider calls.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    distances: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// Build the matrix by querying the provider for every unordered pair.
    ///
    /// # Errors
    /// Propagates the first provider error unmodified.
    pub fn build(
        labels: &[&str],
        provider: &dyn DistanceProvider,
    ) -> Result<Self, StructureError> {
        let n = labels.len();
        let mut distances = vec![vec![0.0f64; n]; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let judgement = provider.distance(labels[i], labels[j])?;
                distances[i][j] = judgement.distance;
                distances[j][i] = judgement.distance;
            }
        }

        Ok(Self { distances })
    }

    /// Distance between the topics at positions `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.distances[i][j]
    }

    /// Number of topics covered by the matrix.
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Whether the matrix is empty.
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

/// Round to 2 decimal places, the precision reported for cluster and
/// spoke statistics.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
