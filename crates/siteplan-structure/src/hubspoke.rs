//! Hub-and-spoke link topology optimization.
//!
//! Evaluates every topic as a candidate hub and selects spokes inside the
//! "ideal linking band": close enough to be relevant, far enough to not be
//! a duplicate. Also provides a per-topic linking-candidate finder for
//! callers that want link targets for one page rather than a full hub map.

use tracing::{debug, instrument};

use siteplan_types::{HubSpokeSuggestion, LinkCandidate, Topic};

use crate::config::HubSpokeConfig;
use crate::distance::{round2, DistanceProvider};
use crate::error::StructureError;

/// Lower edge of the ideal linking band.
const IDEAL_BAND_MIN: f64 = 0.3;

/// Upper edge of the ideal linking band.
const IDEAL_BAND_MAX: f64 = 0.6;

/// Band midpoint; the distance score rewards averages near it.
const IDEAL_BAND_MID: f64 = 0.45;

/// Propose a hub-spoke structure for every viable hub topic.
///
/// For each hub, candidate spokes are the other topics whose distance lies
/// in `[0.3, 0.6]`, sorted closest first and truncated to
/// `optimal_spoke_count`. Hubs with zero qualifying spokes are omitted —
/// that is an empty result, not an error.
///
/// The structure score blends spoke-count fit and band-centering:
/// `0.5 * ratio_score + 0.5 * distance_score` where
/// `ratio_score = 1 - |selected - optimal| / optimal` and
/// `distance_score = 1 - |avg - 0.45| / 0.45`. The score is nominally 0-1
/// but deliberately NOT clamped; pathological inputs can push either
/// sub-score negative and callers clamp at display time.
///
/// Output is sorted descending by structure score, stable on ties.
///
/// # Errors
/// Rejects a zero `optimal_spoke_count`; propagates provider failures
/// unmodified.
#[instrument(skip(topics, provider, config))]
pub fn suggest_hub_spokes(
    topics: &[Topic],
    provider: &dyn DistanceProvider,
    config: &HubSpokeConfig,
) -> Result<Vec<HubSpokeSuggestion>, StructureError> {
    config.validate()?;
    let optimal = config.optimal_spoke_count;

    let mut suggestions: Vec<HubSpokeSuggestion> = Vec::new();

    for (h, hub) in topics.iter().enumerate() {
        let mut candidates: Vec<(f64, &str)> = Vec::new();
        for (s, spoke) in topics.iter().enumerate() {
            if s == h {
                continue;
            }
            let judgement = provider.distance(&hub.title, &spoke.title)?;
            if (IDEAL_BAND_MIN..=IDEAL_BAND_MAX).contains(&judgement.distance) {
                candidates.push((judgement.distance, &spoke.id));
            }
        }

        if candidates.is_empty() {
            continue;
        }

        // Closest first; stable sort keeps input order on equal distances.
        candidates.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        candidates.truncate(optimal);

        let selected = candidates.len();
        let avg_raw: f64 = candidates.iter().map(|(d, _)| d).sum::<f64>() / selected as f64;
        let avg_spoke_distance = round2(avg_raw);

        let ratio_score = 1.0 - (selected as f64 - optimal as f64).abs() / optimal as f64;
        let distance_score = 1.0 - (avg_spoke_distance - IDEAL_BAND_MID).abs() / IDEAL_BAND_MID;
        let structure_quality_score = 0.5 * ratio_score + 0.5 * distance_score;

        debug!(
            hub = %hub.id,
            spokes = selected,
            avg_spoke_distance,
            structure_quality_score,
            "Evaluated hub"
        );

        suggestions.push(HubSpokeSuggestion {
            hub_topic_id: hub.id.clone(),
            spoke_topic_ids: candidates.iter().map(|(_, id)| id.to_string()).collect(),
            avg_spoke_distance,
            structure_quality_score,
        });
    }

    suggestions.sort_by(|a, b| {
        b.structure_quality_score
            .partial_cmp(&a.structure_quality_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(suggestions)
}

/// Find internal-linking candidates for a single target topic.
///
/// Keeps the other topics whose judgement carries `should_link`, scored by
/// `relevance = 1 - 2 * |distance - 0.5|` (peaks at the band midpoint 0.5,
/// reaches 0 at the band edges), sorted most relevant first and truncated
/// to `link_candidate_limit`.
///
/// # Errors
/// Rejects a zero `link_candidate_limit`; propagates provider failures
/// unmodified.
#[instrument(skip(target, topics, provider, config))]
pub fn find_link_candidates(
    target: &Topic,
    topics: &[Topic],
    provider: &dyn DistanceProvider,
    config: &HubSpokeConfig,
) -> Result<Vec<LinkCandidate>, StructureError> {
    config.validate()?;

    let mut candidates: Vec<LinkCandidate> = Vec::new();
    for topic in topics {
        if topic.id == target.id {
            continue;
        }
        let judgement = provider.distance(&target.title, &topic.title)?;
        if judgement.should_link {
            candidates.push(LinkCandidate {
                topic_id: topic.id.clone(),
                distance: judgement.distance,
                relevance_score: 1.0 - 2.0 * (judgement.distance - 0.5).abs(),
            });
        }
    }

    candidates.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(config.link_candidate_limit);

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{DistanceJudgement, TableDistanceProvider};

    fn topic(id: &str, title: &str) -> Topic {
        Topic::new(id, title)
    }

    fn corpus(n: usize) -> Vec<Topic> {
        (0..n)
            .map(|i| topic(&format!("t{i}"), &format!("Topic {i}")))
            .collect()
    }

    #[test]
    fn test_spokes_stay_in_band() {
        let topics = corpus(5);
        let mut provider = TableDistanceProvider::new();
        provider.insert_distance("Topic 0", "Topic 1", 0.1); // too close
        provider.insert_distance("Topic 0", "Topic 2", 0.3); // band edge
        provider.insert_distance("Topic 0", "Topic 3", 0.6); // band edge
        provider.insert_distance("Topic 0", "Topic 4", 0.9); // too far

        let suggestions =
            suggest_hub_spokes(&topics, &provider, &HubSpokeConfig::default()).unwrap();
        let hub0 = suggestions
            .iter()
            .find(|s| s.hub_topic_id == "t0")
            .expect("hub t0 should qualify");
        assert_eq!(
            hub0.spoke_topic_ids,
            vec!["t2".to_string(), "t3".to_string()]
        );
    }

    #[test]
    fn test_hub_without_spokes_omitted() {
        let topics = corpus(3);
        // Fallback distance is 1.0: nothing in band anywhere.
        let provider = TableDistanceProvider::new();
        let suggestions =
            suggest_hub_spokes(&topics, &provider, &HubSpokeConfig::default()).unwrap();
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_structure_quality_formula() {
        let topics = corpus(3);
        let mut provider = TableDistanceProvider::new();
        provider.insert_distance("Topic 0", "Topic 1", 0.4);
        provider.insert_distance("Topic 0", "Topic 2", 0.5);

        let config = HubSpokeConfig {
            optimal_spoke_count: 2,
            ..HubSpokeConfig::default()
        };
        let suggestions = suggest_hub_spokes(&topics, &provider, &config).unwrap();
        let hub0 = suggestions.iter().find(|s| s.hub_topic_id == "t0").unwrap();

        assert!((hub0.avg_spoke_distance - 0.45).abs() < f64::EPSILON);
        // 2 of 2 spokes: ratio 1.0; avg exactly at midpoint: distance 1.0.
        assert!((hub0.structure_quality_score - 1.0).abs() < 1e-9);

        // Recompute from returned fields, per contract.
        let ratio = 1.0 - (hub0.spoke_count() as f64 - 2.0).abs() / 2.0;
        let dist = 1.0 - (hub0.avg_spoke_distance - 0.45).abs() / 0.45;
        assert!((hub0.structure_quality_score - (0.5 * ratio + 0.5 * dist)).abs() < 1e-9);
    }

    #[test]
    fn test_structure_quality_penalizes_few_spokes() {
        let topics = corpus(2);
        let mut provider = TableDistanceProvider::new();
        provider.insert_distance("Topic 0", "Topic 1", 0.45);

        let suggestions =
            suggest_hub_spokes(&topics, &provider, &HubSpokeConfig::default()).unwrap();
        // 1 spoke of optimal 7: ratio = 1 - 6/7; avg at midpoint: dist = 1.0
        let expected = 0.5 * (1.0 - 6.0 / 7.0) + 0.5;
        assert!((suggestions[0].structure_quality_score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_spoke_cap_and_ordering() {
        let topics = corpus(5);
        let mut provider = TableDistanceProvider::new();
        provider.insert_distance("Topic 0", "Topic 1", 0.55);
        provider.insert_distance("Topic 0", "Topic 2", 0.35);
        provider.insert_distance("Topic 0", "Topic 3", 0.45);
        provider.insert_distance("Topic 0", "Topic 4", 0.5);

        let config = HubSpokeConfig {
            optimal_spoke_count: 3,
            ..HubSpokeConfig::default()
        };
        let suggestions = suggest_hub_spokes(&topics, &provider, &config).unwrap();
        let hub0 = suggestions.iter().find(|s| s.hub_topic_id == "t0").unwrap();
        // Closest three, ascending by distance.
        assert_eq!(
            hub0.spoke_topic_ids,
            vec!["t2".to_string(), "t3".to_string(), "t4".to_string()]
        );
    }

    #[test]
    fn test_suggestions_sorted_by_quality() {
        let topics = corpus(4);
        let mut provider = TableDistanceProvider::new();
        // t0 gets a perfectly centered spoke, t3 a band-edge one.
        provider.insert_distance("Topic 0", "Topic 1", 0.45);
        provider.insert_distance("Topic 3", "Topic 2", 0.6);

        let suggestions =
            suggest_hub_spokes(&topics, &provider, &HubSpokeConfig::default()).unwrap();
        for pair in suggestions.windows(2) {
            assert!(pair[0].structure_quality_score >= pair[1].structure_quality_score);
        }
        assert_eq!(suggestions[0].hub_topic_id, "t0");
    }

    #[test]
    fn test_rejects_zero_spoke_count() {
        let config = HubSpokeConfig {
            optimal_spoke_count: 0,
            ..HubSpokeConfig::default()
        };
        let provider = TableDistanceProvider::new();
        let result = suggest_hub_spokes(&corpus(2), &provider, &config);
        assert!(matches!(result, Err(StructureError::InvalidConfig(_))));
    }

    #[test]
    fn test_link_candidates_relevance_and_limit() {
        let topics = corpus(4);
        let target = topics[0].clone();
        let mut provider = TableDistanceProvider::new();
        provider.insert("Topic 0", "Topic 1", DistanceJudgement::new(0.5, true, "ok"));
        provider.insert("Topic 0", "Topic 2", DistanceJudgement::new(0.35, true, "ok"));
        provider.insert(
            "Topic 0",
            "Topic 3",
            DistanceJudgement::new(0.45, false, "no"),
        );

        let config = HubSpokeConfig {
            link_candidate_limit: 1,
            ..HubSpokeConfig::default()
        };
        let candidates = find_link_candidates(&target, &topics, &provider, &config).unwrap();

        // t3 filtered (should_link false); t1 (relevance 1.0) beats t2 (0.7);
        // limit keeps only the best.
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].topic_id, "t1");
        assert!((candidates[0].relevance_score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_link_candidates_exclude_target() {
        let topics = corpus(2);
        let mut provider = TableDistanceProvider::new();
        provider.insert("Topic 0", "Topic 1", DistanceJudgement::new(0.5, true, "ok"));

        let candidates = find_link_candidates(
            &topics[0],
            &topics,
            &provider,
            &HubSpokeConfig::default(),
        )
        .unwrap();
        assert_eq!(candidates.len(), 1);
        assert_ne!(candidates[0].topic_id, "t0");
    }

    #[test]
    fn test_empty_input() {
        let provider = TableDistanceProvider::new();
        assert!(suggest_hub_spokes(&[], &provider, &HubSpokeConfig::default())
            .unwrap()
            .is_empty());
    }
}
