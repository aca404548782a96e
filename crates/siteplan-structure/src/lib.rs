//! # siteplan-structure
//!
//! Structure-planning algorithms for the Topical Structure Planner.
//!
//! Given a flat snapshot of topics, this crate groups them into clusters,
//! infers cluster hierarchy, flags near-duplicate (cannibalizing) pairs,
//! and proposes hub-and-spoke link topologies. Semantic distance between
//! two topic labels is an external capability consumed through the
//! [`DistanceProvider`] trait; everything here is a pure, synchronous,
//! deterministic batch computation over the input snapshot.
//!
//! ## Features
//! - Categorical clustering by detected central entity
//! - Distance-threshold agglomerative clustering with cohesion statistics
//! - Label-containment hierarchy inference (graph, not tree)
//! - Distance-based and lexical (Jaccard) cannibalization detection
//! - Hub-spoke optimization with an ideal linking band
//!
//! ## Usage
//!
//! ```rust
//! use siteplan_structure::{cluster_by_entity, ClusteringConfig};
//! use siteplan_types::Topic;
//!
//! let topics = vec![
//!     Topic::new("1", "Headless CMS Guide").with_central_entity("Headless CMS"),
//!     Topic::new("2", "Headless CMS Pricing").with_central_entity("Headless CMS"),
//! ];
//! let clustering = cluster_by_entity(&topics, &ClusteringConfig::default());
//! assert_eq!(clustering.clusters.len(), 1);
//! ```

pub mod cannibalization;
pub mod clustering;
pub mod config;
pub mod distance;
pub mod error;
pub mod hierarchy;
pub mod hubspoke;

pub use cannibalization::{detect_cannibalization, detect_cannibalization_lexical};
pub use clustering::{cluster_by_distance, cluster_by_entity};
pub use config::{ClusteringConfig, HubSpokeConfig};
pub use distance::{DistanceJudgement, DistanceMatrix, DistanceProvider, TableDistanceProvider};
pub use error::StructureError;
pub use hierarchy::infer_hierarchy;
pub use hubspoke::{find_link_candidates, suggest_hub_spokes};
