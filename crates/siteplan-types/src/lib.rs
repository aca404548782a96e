//! # siteplan-types
//!
//! Shared domain types for the Topical Structure Planner.
//!
//! This crate defines the plain data structures exchanged between the
//! planner's algorithms and the orchestration layer that consumes them:
//! - Topics: the immutable planning input (one per page/query)
//! - Clusters: derived topic groupings (categorical and distance-based)
//! - Hierarchy edges, cannibalization risks, hub-spoke suggestions
//! - Waves: ordered publication batches with progress read models
//!
//! All types serialize with serde; the planner itself never persists them.
//!
//! ## Usage
//!
//! ```rust
//! use siteplan_types::{Topic, TopicType};
//!
//! let topic = Topic::new("t-1", "Headless CMS Guide")
//!     .with_central_entity("Headless CMS")
//!     .with_traffic(120.0);
//! assert_eq!(topic.topic_type, TopicType::Core);
//! ```

pub mod cluster;
pub mod linking;
pub mod topic;
pub mod wave;

pub use cluster::{Cluster, ClusterScope, EntityClustering, HierarchyEdge, SemanticCluster};
pub use linking::{CannibalizationRisk, HubSpokeSuggestion, LinkCandidate};
pub use topic::{ClusterRole, RegionMetadata, Topic, TopicClass, TopicType, DEFAULT_QUALITY_SCORE};
pub use wave::{Priority, TopicAssignment, Wave, WavePlan, WaveProgress, WaveStatus};
