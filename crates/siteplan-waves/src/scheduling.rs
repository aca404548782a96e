//! Initial wave assignment.
//!
//! Partitions a classified topic snapshot into exactly four publication
//! waves with fixed week ranges. Each strategy is a sequence of passes run
//! strictly in order; a topic assigned in an earlier pass is never
//! reconsidered, and `topic_ids` within a wave keep insertion order.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use siteplan_types::{ClusterRole, Topic, TopicClass, TopicType, Wave, WavePlan};

/// Production windows for waves 1 through 4, in weeks.
pub const WAVE_WEEK_RANGES: [(u8, u8); 4] = [(1, 3), (4, 7), (8, 11), (12, 16)];

/// Strategy controlling which topics publish first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WaveStrategy {
    /// Commercial pillars first, authority content last
    #[default]
    MonetizationFirst,
    /// Authority/outer content first, commercial pages last
    AuthorityFirst,
    /// Everything lands in Wave 1 for manual reassignment
    Custom,
}

impl WaveStrategy {
    /// Stable string code for the strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            WaveStrategy::MonetizationFirst => "monetization_first",
            WaveStrategy::AuthorityFirst => "authority_first",
            WaveStrategy::Custom => "custom",
        }
    }
}

impl std::fmt::Display for WaveStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Assign every topic to one of four publication waves.
///
/// The passes per strategy are exhaustive over the documented type/class/
/// role combinations, so `unassigned` is a safety net that stays empty in
/// practice.
#[instrument(skip(topics))]
pub fn assign_topics_to_waves(topics: &[Topic], strategy: WaveStrategy) -> WavePlan {
    let mut waves = make_waves(strategy);
    let mut assigned = vec![false; topics.len()];

    match strategy {
        WaveStrategy::MonetizationFirst => {
            // Wave 1: monetization pillars at the core of the map.
            run_pass(topics, &mut assigned, &mut waves[0], |t| {
                t.topic_type == TopicType::Core
                    && t.topic_class == Some(TopicClass::Monetization)
                    && t.cluster_role == Some(ClusterRole::Pillar)
            });
            // Wave 3: regional core variants, pulled out before the generic
            // informational pass so they don't default into Wave 2.
            run_pass(topics, &mut assigned, &mut waves[2], |t| {
                t.topic_type == TopicType::Core && t.is_regional()
            });
            // Wave 2: remaining core informational content.
            run_pass(topics, &mut assigned, &mut waves[1], |t| {
                t.topic_type == TopicType::Core
                    && t.topic_class == Some(TopicClass::Informational)
            });
            // Wave 4: outer authority topics.
            run_pass(topics, &mut assigned, &mut waves[3], |t| {
                t.topic_type == TopicType::Outer
            });
            // Fallbacks: leftover core to Wave 1, leftover children to Wave 2.
            run_pass(topics, &mut assigned, &mut waves[0], |t| {
                t.topic_type == TopicType::Core
            });
            run_pass(topics, &mut assigned, &mut waves[1], |t| {
                t.topic_type == TopicType::Child
            });
        }
        WaveStrategy::AuthorityFirst => {
            // Mirror ordering: authority content leads, monetization trails.
            run_pass(topics, &mut assigned, &mut waves[0], |t| {
                t.topic_type == TopicType::Outer
                    && t.cluster_role == Some(ClusterRole::Pillar)
            });
            run_pass(topics, &mut assigned, &mut waves[1], |t| {
                t.topic_type == TopicType::Outer
            });
            run_pass(topics, &mut assigned, &mut waves[2], |t| {
                t.topic_type == TopicType::Core
                    && t.topic_class == Some(TopicClass::Informational)
            });
            run_pass(topics, &mut assigned, &mut waves[3], |t| {
                t.topic_type == TopicType::Core
                    && t.topic_class == Some(TopicClass::Monetization)
            });
            run_pass(topics, &mut assigned, &mut waves[3], |t| {
                t.topic_type == TopicType::Core
            });
            run_pass(topics, &mut assigned, &mut waves[2], |t| {
                t.topic_type == TopicType::Child
            });
        }
        WaveStrategy::Custom => {
            run_pass(topics, &mut assigned, &mut waves[0], |_| true);
        }
    }

    let unassigned: Vec<String> = topics
        .iter()
        .zip(assigned.iter())
        .filter(|(_, &done)| !done)
        .map(|(t, _)| t.id.clone())
        .collect();

    info!(
        strategy = %strategy,
        assigned = topics.len() - unassigned.len(),
        unassigned = unassigned.len(),
        "Wave assignment complete"
    );

    WavePlan { waves, unassigned }
}

/// Assign all not-yet-assigned topics matching the predicate to the wave.
fn run_pass<F>(topics: &[Topic], assigned: &mut [bool], wave: &mut Wave, predicate: F)
where
    F: Fn(&Topic) -> bool,
{
    for (i, topic) in topics.iter().enumerate() {
        if !assigned[i] && predicate(topic) {
            assigned[i] = true;
            wave.topic_ids.push(topic.id.clone());
            debug!(topic = %topic.id, wave = wave.number, "Assigned topic");
        }
    }
}

/// Build the four empty waves with strategy-appropriate labels.
fn make_waves(strategy: WaveStrategy) -> Vec<Wave> {
    let descriptions: [&str; 4] = match strategy {
        WaveStrategy::MonetizationFirst => [
            "Monetization pillar pages",
            "Core informational support content",
            "Regional core variants",
            "Outer authority topics",
        ],
        WaveStrategy::AuthorityFirst => [
            "Outer authority pillars",
            "Remaining outer coverage",
            "Core informational content",
            "Core monetization pages",
        ],
        WaveStrategy::Custom => [
            "Full backlog for manual scheduling",
            "Reserved for manual reassignment",
            "Reserved for manual reassignment",
            "Reserved for manual reassignment",
        ],
    };

    (0..4u8)
        .map(|i| {
            let (start, end) = WAVE_WEEK_RANGES[i as usize];
            Wave::new(
                i + 1,
                format!("Wave {}", i + 1),
                descriptions[i as usize],
                start,
                end,
            )
        })
        .collect()
}
