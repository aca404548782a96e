//! Shared fixtures for siteplan integration tests.

use siteplan_structure::TableDistanceProvider;
use siteplan_types::{ClusterRole, Topic, TopicClass, TopicType};

/// Build a core topic with entity, traffic, and quality in one call.
pub fn entity_topic(id: &str, title: &str, entity: &str, traffic: f64) -> Topic {
    Topic::new(id, title)
        .with_central_entity(entity)
        .with_traffic(traffic)
}

/// Build a fully classified topic for scheduling tests.
pub fn classified_topic(
    id: &str,
    topic_type: TopicType,
    class: Option<TopicClass>,
    role: Option<ClusterRole>,
) -> Topic {
    let mut topic = Topic::new(id, format!("Topic {id}")).with_type(topic_type);
    if let Some(class) = class {
        topic = topic.with_class(class);
    }
    if let Some(role) = role {
        topic = topic.with_role(role);
    }
    topic
}

/// A distance provider over a small CMS-themed corpus with distances laid
/// out so that clustering, hub-spoke, and cannibalization all have material
/// to work with.
pub fn cms_distance_provider() -> TableDistanceProvider {
    let mut provider = TableDistanceProvider::new();
    // Near-duplicates
    provider.insert_distance("Best CMS Platforms", "Top CMS Platforms", 0.1);
    // Ideal linking band
    provider.insert_distance("Best CMS Platforms", "CMS Pricing Comparison", 0.4);
    provider.insert_distance("Best CMS Platforms", "How to Migrate a CMS", 0.5);
    provider.insert_distance("Top CMS Platforms", "CMS Pricing Comparison", 0.45);
    // Unrelated
    provider.insert_distance("Best CMS Platforms", "Email Marketing Basics", 0.9);
    provider.insert_distance("Top CMS Platforms", "Email Marketing Basics", 0.9);
    provider.insert_distance("CMS Pricing Comparison", "Email Marketing Basics", 0.85);
    provider.insert_distance("How to Migrate a CMS", "Email Marketing Basics", 0.8);
    provider.insert_distance("Top CMS Platforms", "How to Migrate a CMS", 0.55);
    provider.insert_distance("CMS Pricing Comparison", "How to Migrate a CMS", 0.5);
    provider
}

/// The topic snapshot matching [`cms_distance_provider`].
pub fn cms_topics() -> Vec<Topic> {
    vec![
        Topic::new("t1", "Best CMS Platforms").with_canonical_query("best cms platforms"),
        Topic::new("t2", "Top CMS Platforms").with_canonical_query("best cms platforms list"),
        Topic::new("t3", "CMS Pricing Comparison"),
        Topic::new("t4", "How to Migrate a CMS"),
        Topic::new("t5", "Email Marketing Basics"),
    ]
}
