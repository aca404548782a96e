//! Structure-planning configuration.

use serde::{Deserialize, Serialize};

use crate::error::StructureError;

/// Clustering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusteringConfig {
    /// Minimum total traffic for a multi-member cluster to count as core
    #[serde(default = "default_core_traffic_threshold")]
    pub core_traffic_threshold: f64,

    /// Distance below which two topics are considered neighbors
    #[serde(default = "default_distance_threshold")]
    pub distance_threshold: f64,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            core_traffic_threshold: default_core_traffic_threshold(),
            distance_threshold: default_distance_threshold(),
        }
    }
}

impl ClusteringConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    /// Returns `InvalidConfig` when the distance threshold is negative or
    /// not finite. A negative threshold would make every cluster a
    /// singleton; rejecting it eagerly beats returning nonsense.
    pub fn validate(&self) -> Result<(), StructureError> {
        if !self.distance_threshold.is_finite() || self.distance_threshold < 0.0 {
            return Err(StructureError::InvalidConfig(format!(
                "distance_threshold must be a non-negative finite number, got {}",
                self.distance_threshold
            )));
        }
        Ok(())
    }
}

fn default_core_traffic_threshold() -> f64 {
    50.0
}
fn default_distance_threshold() -> f64 {
    0.5
}

/// Hub-spoke optimization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubSpokeConfig {
    /// Target number of spokes per hub
    #[serde(default = "default_optimal_spoke_count")]
    pub optimal_spoke_count: usize,

    /// Maximum link candidates returned per target topic
    #[serde(default = "default_link_candidate_limit")]
    pub link_candidate_limit: usize,
}

impl Default for HubSpokeConfig {
    fn default() -> Self {
        Self {
            optimal_spoke_count: default_optimal_spoke_count(),
            link_candidate_limit: default_link_candidate_limit(),
        }
    }
}

impl HubSpokeConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    /// Returns `InvalidConfig` when either count is zero. A zero spoke
    /// count would divide by zero in the ratio score.
    pub fn validate(&self) -> Result<(), StructureError> {
        if self.optimal_spoke_count == 0 {
            return Err(StructureError::InvalidConfig(
                "optimal_spoke_count must be at least 1".to_string(),
            ));
        }
        if self.link_candidate_limit == 0 {
            return Err(StructureError::InvalidConfig(
                "link_candidate_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_optimal_spoke_count() -> usize {
    7
}
fn default_link_candidate_limit() -> usize {
    10
}
