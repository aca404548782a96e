//! Topic clustering.
//!
//! Two independent algorithms, selected by the caller:
//!
//! - **Categorical grouping** (`cluster_by_entity`): groups topics by their
//!   detected central entity. Needs no external collaborator.
//! - **Distance-threshold agglomeration** (`cluster_by_distance`): seeds
//!   clusters from the most-connected topics and absorbs neighbors within
//!   a distance threshold. Consumes the distance provider.
//!
//! Both are deterministic: ties in every ordering fall back to original
//! input order, so repeated runs over the same snapshot produce identical
//! output.

use std::collections::HashMap;

use tracing::{debug, instrument};

use siteplan_types::{Cluster, ClusterScope, EntityClustering, SemanticCluster, Topic};

use crate::config::ClusteringConfig;
use crate::distance::{round2, DistanceMatrix, DistanceProvider};
use crate::error::StructureError;

/// Group topics by their detected central entity.
///
/// Topics without a grouping key become orphans and are never placed in a
/// cluster. A cluster is `core` iff it has at least 2 members and its total
/// traffic meets `core_traffic_threshold`; otherwise `outer`.
///
/// The returned clusters are sorted descending by total traffic. Callers
/// may depend on this ordering: the first cluster is always the
/// highest-traffic group.
#[instrument(skip(topics, config))]
pub fn cluster_by_entity(topics: &[Topic], config: &ClusteringConfig) -> EntityClustering {
    let mut key_index: HashMap<&str, usize> = HashMap::new();
    let mut clusters: Vec<Cluster> = Vec::new();
    let mut quality_sums: Vec<f64> = Vec::new();
    let mut orphans: Vec<String> = Vec::new();

    for topic in topics {
        let Some(key) = topic.grouping_key() else {
            orphans.push(topic.id.clone());
            continue;
        };

        let index = *key_index.entry(key).or_insert_with(|| {
            clusters.push(Cluster {
                id: key.to_string(),
                label: key.to_string(),
                member_topic_ids: Vec::new(),
                scope: ClusterScope::Outer,
                total_traffic: 0.0,
                avg_quality_score: 0.0,
            });
            quality_sums.push(0.0);
            clusters.len() - 1
        });

        clusters[index].member_topic_ids.push(topic.id.clone());
        clusters[index].total_traffic += topic.traffic_score;
        quality_sums[index] += topic.quality_or_default();
    }

    for (cluster, quality_sum) in clusters.iter_mut().zip(quality_sums.iter()) {
        let members = cluster.member_topic_ids.len();
        cluster.avg_quality_score = (quality_sum / members as f64).round();
        cluster.scope = if members >= 2 && cluster.total_traffic >= config.core_traffic_threshold
        {
            ClusterScope::Core
        } else {
            ClusterScope::Outer
        };
    }

    // Stable sort keeps discovery order for equal-traffic clusters.
    clusters.sort_by(|a, b| {
        b.total_traffic
            .partial_cmp(&a.total_traffic)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    debug!(
        clusters = clusters.len(),
        orphans = orphans.len(),
        "Categorical clustering complete"
    );

    EntityClustering { clusters, orphans }
}

/// Cluster topics by semantic distance to a seed.
///
/// Seeds are chosen by neighbor count (distances strictly below the
/// threshold), densest first, ties by input order. Each seed absorbs every
/// still-unassigned topic within the threshold *of the seed* — members are
/// not required to be close to each other, so a non-transitive distance
/// metric can yield loosely-cohesive clusters. That is the intended
/// behavior, reflected in the reported cohesion statistic rather than
/// corrected by full hierarchical merging.
///
/// # Errors
/// Rejects a negative or non-finite `distance_threshold`; propagates
/// provider failures unmodified.
#[instrument(skip(topics, provider, config))]
pub fn cluster_by_distance(
    topics: &[Topic],
    provider: &dyn DistanceProvider,
    config: &ClusteringConfig,
) -> Result<Vec<SemanticCluster>, StructureError> {
    config.validate()?;
    let threshold = config.distance_threshold;

    if topics.is_empty() {
        return Ok(Vec::new());
    }

    let labels: Vec<&str> = topics.iter().map(|t| t.title.as_str()).collect();
    let matrix = DistanceMatrix::build(&labels, provider)?;
    let n = topics.len();

    // Seed order: neighbor count descending, input order on ties.
    let mut order: Vec<usize> = (0..n).collect();
    let neighbor_counts: Vec<usize> = (0..n)
        .map(|i| {
            (0..n)
                .filter(|&j| j != i && matrix.get(i, j) < threshold)
                .count()
        })
        .collect();
    order.sort_by_key(|&i| (std::cmp::Reverse(neighbor_counts[i]), i));

    let mut assigned = vec![false; n];
    let mut clusters: Vec<SemanticCluster> = Vec::new();

    for &seed in &order {
        if assigned[seed] {
            continue;
        }
        assigned[seed] = true;

        let mut members = vec![seed];
        for j in 0..n {
            if !assigned[j] && matrix.get(seed, j) < threshold {
                assigned[j] = true;
                members.push(j);
            }
        }

        let avg_pairwise = average_pairwise_distance(&members, &matrix);
        debug!(
            seed = %topics[seed].id,
            members = members.len(),
            avg_pairwise,
            "Seeded semantic cluster"
        );

        clusters.push(SemanticCluster {
            id: topics[seed].id.clone(),
            label: topics[seed].title.clone(),
            member_topic_ids: members.iter().map(|&i| topics[i].id.clone()).collect(),
            avg_pairwise_distance: round2(avg_pairwise),
            cohesion: round2(1.0 - avg_pairwise),
        });
    }

    Ok(clusters)
}

/// Mean distance over all within-cluster pairs; 0 for singletons.
fn average_pairwise_distance(members: &[usize], matrix: &DistanceMatrix) -> f64 {
    if members.len() < 2 {
        return 0.0;
    }
    let mut sum = 0.0;
    let mut pairs = 0usize;
    for (a, &i) in members.iter().enumerate() {
        for &j in &members[(a + 1)..] {
            sum += matrix.get(i, j);
            pairs += 1;
        }
    }
    sum / pairs as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{DistanceJudgement, TableDistanceProvider};

    fn keyed_topic(id: &str, entity: Option<&str>, traffic: f64) -> Topic {
        let topic = Topic::new(id, format!("Topic {id}")).with_traffic(traffic);
        match entity {
            Some(e) => topic.with_central_entity(e),
            None => topic,
        }
    }

    fn cms_corpus() -> Vec<Topic> {
        vec![
            keyed_topic("1", Some("Enterprise CMS"), 100.0),
            keyed_topic("2", Some("Enterprise CMS"), 50.0),
            keyed_topic("3", Some("Headless CMS"), 200.0),
            keyed_topic("4", Some("Headless CMS"), 80.0),
            keyed_topic("5", None, 0.0),
        ]
    }

    #[test]
    fn test_entity_clustering_reference_scenario() {
        let clustering = cluster_by_entity(&cms_corpus(), &ClusteringConfig::default());

        assert_eq!(clustering.clusters.len(), 2);
        assert_eq!(clustering.orphans, vec!["5".to_string()]);

        // Sorted descending by total traffic
        assert_eq!(clustering.clusters[0].label, "Headless CMS");
        assert!((clustering.clusters[0].total_traffic - 280.0).abs() < f64::EPSILON);
        assert_eq!(clustering.clusters[1].label, "Enterprise CMS");
        assert!((clustering.clusters[1].total_traffic - 150.0).abs() < f64::EPSILON);

        // Both core: 2 members and traffic >= 50
        assert_eq!(clustering.clusters[0].scope, ClusterScope::Core);
        assert_eq!(clustering.clusters[1].scope, ClusterScope::Core);
    }

    #[test]
    fn test_entity_clustering_exclusivity() {
        let clustering = cluster_by_entity(&cms_corpus(), &ClusteringConfig::default());
        let mut seen: Vec<&str> = Vec::new();
        for cluster in &clustering.clusters {
            for id in &cluster.member_topic_ids {
                assert!(!seen.contains(&id.as_str()), "topic {id} in two clusters");
                seen.push(id);
            }
        }
        assert!(!seen.contains(&"5"));
    }

    #[test]
    fn test_entity_clustering_outer_cases() {
        // Single member with high traffic: outer (needs >= 2 members).
        // Two members below the traffic threshold: outer.
        let topics = vec![
            keyed_topic("1", Some("Solo"), 500.0),
            keyed_topic("2", Some("Quiet"), 10.0),
            keyed_topic("3", Some("Quiet"), 20.0),
        ];
        let clustering = cluster_by_entity(&topics, &ClusteringConfig::default());
        assert_eq!(clustering.cluster("Solo").unwrap().scope, ClusterScope::Outer);
        assert_eq!(clustering.cluster("Quiet").unwrap().scope, ClusterScope::Outer);
    }

    #[test]
    fn test_entity_clustering_quality_default() {
        let topics = vec![
            keyed_topic("1", Some("K"), 0.0).with_quality(80.0),
            keyed_topic("2", Some("K"), 0.0), // defaults to 50
        ];
        let clustering = cluster_by_entity(&topics, &ClusteringConfig::default());
        assert!((clustering.clusters[0].avg_quality_score - 65.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_entity_clustering_idempotent() {
        let topics = cms_corpus();
        let first = cluster_by_entity(&topics, &ClusteringConfig::default());
        let second = cluster_by_entity(&topics, &ClusteringConfig::default());
        let a = serde_json::to_string(&first).unwrap();
        let b = serde_json::to_string(&second).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_entity_clustering_empty_input() {
        let clustering = cluster_by_entity(&[], &ClusteringConfig::default());
        assert!(clustering.clusters.is_empty());
        assert!(clustering.orphans.is_empty());
    }

    fn titled(id: &str, title: &str) -> Topic {
        Topic::new(id, title)
    }

    #[test]
    fn test_distance_clustering_groups_neighbors() {
        let topics = vec![
            titled("1", "A"),
            titled("2", "B"),
            titled("3", "C"),
            titled("4", "D"),
        ];
        let mut provider = TableDistanceProvider::new();
        // A-B-C tight, D far from everything
        provider.insert_distance("A", "B", 0.2);
        provider.insert_distance("A", "C", 0.3);
        provider.insert_distance("B", "C", 0.25);

        let clusters =
            cluster_by_distance(&topics, &provider, &ClusteringConfig::default()).unwrap();
        assert_eq!(clusters.len(), 2);

        // A has 2 neighbors and wins the seed ordering tie against B by
        // input order.
        assert_eq!(clusters[0].id, "1");
        assert_eq!(
            clusters[0].member_topic_ids,
            vec!["1".to_string(), "2".to_string(), "3".to_string()]
        );
        assert_eq!(clusters[1].member_topic_ids, vec!["4".to_string()]);
    }

    #[test]
    fn test_distance_clustering_cohesion_stats() {
        let topics = vec![titled("1", "A"), titled("2", "B"), titled("3", "C")];
        let mut provider = TableDistanceProvider::new();
        provider.insert_distance("A", "B", 0.2);
        provider.insert_distance("A", "C", 0.4);
        provider.insert_distance("B", "C", 0.3);

        let clusters =
            cluster_by_distance(&topics, &provider, &ClusteringConfig::default()).unwrap();
        assert_eq!(clusters.len(), 1);
        // Mean of 0.2, 0.4, 0.3 = 0.3
        assert!((clusters[0].avg_pairwise_distance - 0.3).abs() < f64::EPSILON);
        assert!((clusters[0].cohesion - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_distance_clustering_singleton_stats() {
        let topics = vec![titled("1", "A")];
        let provider = TableDistanceProvider::new();
        let clusters =
            cluster_by_distance(&topics, &provider, &ClusteringConfig::default()).unwrap();
        assert_eq!(clusters.len(), 1);
        assert!(clusters[0].avg_pairwise_distance.abs() < f64::EPSILON);
        assert!((clusters[0].cohesion - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_distance_clustering_members_close_to_seed() {
        // Single-link to seed: B joins via A even though B-C never compared
        // against the threshold after seeding.
        let topics = vec![titled("1", "A"), titled("2", "B"), titled("3", "C")];
        let mut provider = TableDistanceProvider::new();
        provider.insert_distance("A", "B", 0.1);
        provider.insert_distance("A", "C", 0.1);
        provider.insert_distance("B", "C", 0.9);

        let clusters =
            cluster_by_distance(&topics, &provider, &ClusteringConfig::default()).unwrap();
        assert_eq!(clusters.len(), 1);
        // Every member is within threshold of the seed (A), not of each other.
        assert_eq!(clusters[0].id, "1");
        assert_eq!(clusters[0].member_topic_ids.len(), 3);
    }

    #[test]
    fn test_distance_clustering_rejects_bad_threshold() {
        let config = ClusteringConfig {
            distance_threshold: -1.0,
            ..ClusteringConfig::default()
        };
        let provider = TableDistanceProvider::new();
        let result = cluster_by_distance(&[titled("1", "A")], &provider, &config);
        assert!(matches!(result, Err(StructureError::InvalidConfig(_))));
    }

    struct FailingProvider;

    impl DistanceProvider for FailingProvider {
        fn distance(&self, _: &str, _: &str) -> Result<DistanceJudgement, StructureError> {
            Err(StructureError::Provider("service unavailable".to_string()))
        }
    }

    #[test]
    fn test_distance_clustering_propagates_provider_error() {
        let topics = vec![titled("1", "A"), titled("2", "B")];
        let result = cluster_by_distance(&topics, &FailingProvider, &ClusteringConfig::default());
        assert!(matches!(result, Err(StructureError::Provider(_))));
    }

    #[test]
    fn test_distance_clustering_empty_input() {
        let provider = TableDistanceProvider::new();
        let clusters = cluster_by_distance(&[], &provider, &ClusteringConfig::default()).unwrap();
        assert!(clusters.is_empty());
    }
}
