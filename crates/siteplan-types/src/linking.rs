//! Linking analysis output types: cannibalization risks, hub-spoke
//! suggestions, and per-topic link candidates.

use serde::{Deserialize, Serialize};

/// Two topics similar enough to compete for the same search intent.
///
/// The pair is unordered; the detectors emit each pair once with
/// `topic_a_id` holding the earlier input topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CannibalizationRisk {
    /// First topic of the pair
    pub topic_a_id: String,
    /// Second topic of the pair
    pub topic_b_id: String,
    /// Similarity in [0, 1]; higher is more severe
    pub similarity: f64,
    /// Human-readable merge/differentiate recommendation
    pub recommendation: String,
}

impl CannibalizationRisk {
    /// Whether this risk involves the given topic (either side).
    pub fn involves(&self, topic_id: &str) -> bool {
        self.topic_a_id == topic_id || self.topic_b_id == topic_id
    }
}

/// A proposed hub topic with its selected spokes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubSpokeSuggestion {
    /// Topic selected as the central linking target
    pub hub_topic_id: String,
    /// Selected spoke topic ids, closest first
    pub spoke_topic_ids: Vec<String>,
    /// Mean hub-spoke distance, rounded to 2 decimals
    pub avg_spoke_distance: f64,
    /// Composite structure score. Nominally 0-1 but NOT clamped: the raw
    /// formula can go negative for pathological inputs, and the optimizer
    /// preserves that. Clamp at display time if needed.
    pub structure_quality_score: f64,
}

impl HubSpokeSuggestion {
    /// Number of selected spokes.
    pub fn spoke_count(&self) -> usize {
        self.spoke_topic_ids.len()
    }
}

/// A single internal-linking candidate for a target topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkCandidate {
    /// Candidate topic id
    pub topic_id: String,
    /// Semantic distance to the target
    pub distance: f64,
    /// 1 - 2*|distance - 0.5|: peaks at the band midpoint
    pub relevance_score: f64,
}
