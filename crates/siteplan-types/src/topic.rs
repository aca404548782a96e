//! Topic input types.
//!
//! A `Topic` is the unit being planned: one prospective page with the
//! metadata the planner's algorithms read. Topics are created upstream and
//! passed in as an immutable snapshot; the planner only produces derived
//! structures referencing topic ids.

use serde::{Deserialize, Serialize};

/// Quality score applied when a topic carries none.
pub const DEFAULT_QUALITY_SCORE: f64 = 50.0;

/// Position of a topic in the site architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TopicType {
    /// Primary subject-matter topic
    #[default]
    Core,
    /// Supporting authority topic outside the core subject
    Outer,
    /// Child page under a core topic
    Child,
}

impl TopicType {
    /// Stable string code for the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicType::Core => "core",
            TopicType::Outer => "outer",
            TopicType::Child => "child",
        }
    }
}

impl std::fmt::Display for TopicType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Business intent classification of a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicClass {
    /// Commercially-oriented page (product, comparison, pricing)
    Monetization,
    /// Educational/informational page
    Informational,
}

impl TopicClass {
    /// Stable string code for the class.
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicClass::Monetization => "monetization",
            TopicClass::Informational => "informational",
        }
    }
}

impl std::fmt::Display for TopicClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Role of a topic within its cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterRole {
    /// Central pillar page of a cluster
    Pillar,
    /// Supporting content within a cluster
    ClusterContent,
}

impl ClusterRole {
    /// Stable string code for the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterRole::Pillar => "pillar",
            ClusterRole::ClusterContent => "cluster_content",
        }
    }
}

impl std::fmt::Display for ClusterRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Marker for a geography-scoped topic variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionMetadata {
    /// Region the variant targets (e.g. "de", "us-ca")
    pub region: String,
}

impl RegionMetadata {
    /// Create region metadata for the given region code.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
        }
    }
}

/// A prospective page in the content plan.
///
/// Most fields are optional; defaulting rules live here so downstream
/// algorithms never carry per-call-site fallback chains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    /// Caller-supplied unique identifier (never minted by the planner)
    pub id: String,
    /// Page title / working headline
    pub title: String,
    /// Detected central entity used as the categorical grouping key
    #[serde(default)]
    pub detected_central_entity: Option<String>,
    /// Canonical search query the page targets
    #[serde(default)]
    pub canonical_query: Option<String>,
    /// Estimated traffic signal (non-negative, 0 when unknown)
    #[serde(default)]
    pub traffic_score: f64,
    /// Quality score 0-100; absent means "assume 50"
    #[serde(default)]
    pub quality_score: Option<f64>,
    /// Position in the site architecture
    #[serde(default)]
    pub topic_type: TopicType,
    /// Business intent, when classified
    #[serde(default)]
    pub topic_class: Option<TopicClass>,
    /// Role within its cluster, when assigned
    #[serde(default)]
    pub cluster_role: Option<ClusterRole>,
    /// Non-owning back-reference to a parent topic
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Present when this topic is a geography-scoped variant
    #[serde(default)]
    pub region_metadata: Option<RegionMetadata>,
}

impl Topic {
    /// Create a topic with the given id and title and all-default metadata.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            detected_central_entity: None,
            canonical_query: None,
            traffic_score: 0.0,
            quality_score: None,
            topic_type: TopicType::default(),
            topic_class: None,
            cluster_role: None,
            parent_id: None,
            region_metadata: None,
        }
    }

    /// Set the detected central entity (categorical grouping key).
    pub fn with_central_entity(mut self, entity: impl Into<String>) -> Self {
        self.detected_central_entity = Some(entity.into());
        self
    }

    /// Set the canonical query.
    pub fn with_canonical_query(mut self, query: impl Into<String>) -> Self {
        self.canonical_query = Some(query.into());
        self
    }

    /// Set the traffic score.
    pub fn with_traffic(mut self, traffic: f64) -> Self {
        self.traffic_score = traffic;
        self
    }

    /// Set the quality score.
    pub fn with_quality(mut self, quality: f64) -> Self {
        self.quality_score = Some(quality);
        self
    }

    /// Set the topic type.
    pub fn with_type(mut self, topic_type: TopicType) -> Self {
        self.topic_type = topic_type;
        self
    }

    /// Set the topic class.
    pub fn with_class(mut self, class: TopicClass) -> Self {
        self.topic_class = Some(class);
        self
    }

    /// Set the cluster role.
    pub fn with_role(mut self, role: ClusterRole) -> Self {
        self.cluster_role = Some(role);
        self
    }

    /// Set the parent topic id.
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Mark this topic as a region-scoped variant.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region_metadata = Some(RegionMetadata::new(region));
        self
    }

    /// Quality score with the documented default applied.
    pub fn quality_or_default(&self) -> f64 {
        self.quality_score.unwrap_or(DEFAULT_QUALITY_SCORE)
    }

    /// Categorical grouping key, if any.
    pub fn grouping_key(&self) -> Option<&str> {
        self.detected_central_entity.as_deref()
    }

    /// Text used for lexical comparison: canonical query, falling back to title.
    pub fn query_text(&self) -> &str {
        self.canonical_query.as_deref().unwrap_or(&self.title)
    }

    /// Whether this topic is a region-scoped variant.
    pub fn is_regional(&self) -> bool {
        self.region_metadata.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_new_defaults() {
        let topic = Topic::new("t-1", "Headless CMS Guide");
        assert_eq!(topic.id, "t-1");
        assert_eq!(topic.topic_type, TopicType::Core);
        assert!(topic.traffic_score.abs() < f64::EPSILON);
        assert!(topic.quality_score.is_none());
        assert!((topic.quality_or_default() - 50.0).abs() < f64::EPSILON);
        assert!(!topic.is_regional());
    }

    #[test]
    fn test_query_text_fallback() {
        let plain = Topic::new("t-1", "Headless CMS Guide");
        assert_eq!(plain.query_text(), "Headless CMS Guide");

        let with_query =
            Topic::new("t-2", "Headless CMS Guide").with_canonical_query("best headless cms");
        assert_eq!(with_query.query_text(), "best headless cms");
    }

    #[test]
    fn test_grouping_key() {
        let keyed = Topic::new("t-1", "A").with_central_entity("Enterprise CMS");
        assert_eq!(keyed.grouping_key(), Some("Enterprise CMS"));
        assert_eq!(Topic::new("t-2", "B").grouping_key(), None);
    }

    #[test]
    fn test_enum_codes() {
        assert_eq!(TopicType::Core.as_str(), "core");
        assert_eq!(TopicType::Outer.as_str(), "outer");
        assert_eq!(TopicType::Child.as_str(), "child");
        assert_eq!(TopicClass::Monetization.as_str(), "monetization");
        assert_eq!(TopicClass::Informational.as_str(), "informational");
        assert_eq!(ClusterRole::Pillar.as_str(), "pillar");
        assert_eq!(ClusterRole::ClusterContent.as_str(), "cluster_content");
    }

    #[test]
    fn test_topic_serde_round_trip() {
        let topic = Topic::new("t-1", "Headless CMS Guide")
            .with_central_entity("Headless CMS")
            .with_traffic(120.0)
            .with_quality(80.0)
            .with_class(TopicClass::Monetization)
            .with_role(ClusterRole::Pillar)
            .with_region("de");

        let json = serde_json::to_string(&topic).unwrap();
        let parsed: Topic = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, topic.id);
        assert_eq!(parsed.topic_class, Some(TopicClass::Monetization));
        assert_eq!(parsed.region_metadata.unwrap().region, "de");
    }

    #[test]
    fn test_topic_deserialize_sparse() {
        // Only id and title present; every optional field defaults.
        let parsed: Topic = serde_json::from_str(r#"{"id":"t-9","title":"Sparse"}"#).unwrap();
        assert_eq!(parsed.topic_type, TopicType::Core);
        assert!(parsed.detected_central_entity.is_none());
        assert!(parsed.traffic_score.abs() < f64::EPSILON);
    }

    #[test]
    fn test_enum_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&ClusterRole::ClusterContent).unwrap(),
            "\"cluster_content\""
        );
        assert_eq!(
            serde_json::from_str::<TopicClass>("\"monetization\"").unwrap(),
            TopicClass::Monetization
        );
    }
}
