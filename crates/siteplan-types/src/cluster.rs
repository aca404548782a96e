//! Cluster and hierarchy output types.
//!
//! Clusters are derived, ephemeral groupings; they reference member topics
//! by id and are rebuilt on every planning run. Two tagged record flavors
//! exist because the two clustering algorithms report different statistics.

use serde::{Deserialize, Serialize};

/// Whether a cluster belongs to the core topical map or its outer ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterScope {
    /// Cohesive, traffic-bearing group at the heart of the map
    Core,
    /// Small or low-traffic group on the periphery
    Outer,
}

impl ClusterScope {
    /// Stable string code for the scope.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterScope::Core => "core",
            ClusterScope::Outer => "outer",
        }
    }
}

impl std::fmt::Display for ClusterScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A cluster produced by categorical (central-entity) grouping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    /// Deterministic identifier (the grouping key; never minted)
    pub id: String,
    /// Grouping key shared by all members
    pub label: String,
    /// Member topic ids in discovery order
    pub member_topic_ids: Vec<String>,
    /// Core/outer classification derived from size and traffic
    pub scope: ClusterScope,
    /// Sum of member traffic scores
    pub total_traffic: f64,
    /// Rounded mean of member quality scores (default 50 per member)
    pub avg_quality_score: f64,
}

impl Cluster {
    /// Number of member topics.
    pub fn len(&self) -> usize {
        self.member_topic_ids.len()
    }

    /// Whether the cluster has no members. Clusters are built non-empty,
    /// so this only matters for hand-constructed values.
    pub fn is_empty(&self) -> bool {
        self.member_topic_ids.is_empty()
    }
}

/// A cluster produced by distance-threshold agglomeration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticCluster {
    /// Deterministic identifier (the seed topic's id)
    pub id: String,
    /// Representative label (the seed topic's title)
    pub label: String,
    /// Member topic ids: seed first, then absorption order
    pub member_topic_ids: Vec<String>,
    /// Mean distance over all within-cluster pairs, rounded to 2 decimals
    pub avg_pairwise_distance: f64,
    /// 1 - avg pairwise distance, rounded to 2 decimals
    pub cohesion: f64,
}

impl SemanticCluster {
    /// Number of member topics.
    pub fn len(&self) -> usize {
        self.member_topic_ids.len()
    }

    /// Whether the cluster has no members.
    pub fn is_empty(&self) -> bool {
        self.member_topic_ids.is_empty()
    }
}

/// Result of categorical clustering: clusters plus unclustered topics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityClustering {
    /// Clusters sorted descending by total traffic
    pub clusters: Vec<Cluster>,
    /// Ids of topics with no grouping key, in input order
    pub orphans: Vec<String>,
}

impl EntityClustering {
    /// Look up a cluster by label.
    pub fn cluster(&self, label: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.label == label)
    }
}

/// A proposed parent -> children relationship between clusters.
///
/// The hierarchy is a heuristic edge set, not a tree: a cluster may appear
/// under multiple parents, and inconsistent traffic data can produce cycles.
/// Consumers must treat this as a graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyEdge {
    /// Label of the parent cluster
    pub parent_cluster_label: String,
    /// Labels of proposed child clusters
    pub child_cluster_labels: Vec<String>,
}
