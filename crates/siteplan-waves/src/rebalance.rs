//! Wave rebalancing.
//!
//! Re-levels an existing per-topic wave assignment: pinned topics never
//! move, and everything else is re-placed in priority order onto whichever
//! wave is currently smallest. This minimizes the maximum wave size subject
//! to priority-ordered placement; it is not a true load-balanced partition.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use siteplan_types::TopicAssignment;

use crate::error::WavesError;

/// Number of waves in a schedule.
const WAVE_COUNT: u8 = 4;

/// Rebalance topics across the four waves.
///
/// Pinned topics stay in their current wave and count toward its size
/// before the greedy pass begins. Non-pinned topics are sorted by priority
/// (critical first, unknown last; stable within equal priority) and each is
/// appended to the wave with the fewest topics, ties going to the lowest
/// wave number.
///
/// # Errors
/// Returns `InvalidInput` when a pinned topic names a wave outside 1..=4 —
/// honoring the pin would require a wave that does not exist.
#[instrument(skip(assignments))]
pub fn rebalance_waves(
    assignments: &[TopicAssignment],
) -> Result<BTreeMap<u8, Vec<String>>, WavesError> {
    let mut waves: BTreeMap<u8, Vec<String>> =
        (1..=WAVE_COUNT).map(|n| (n, Vec::new())).collect();

    for assignment in assignments.iter().filter(|a| a.pinned) {
        let Some(wave) = waves.get_mut(&assignment.wave) else {
            return Err(WavesError::InvalidInput(format!(
                "pinned topic '{}' references wave {}, expected 1..=4",
                assignment.topic_id, assignment.wave
            )));
        };
        wave.push(assignment.topic_id.clone());
    }

    // Stable sort: equal priorities keep input order, so reruns over the
    // same snapshot produce identical placements.
    let mut movable: Vec<&TopicAssignment> = assignments.iter().filter(|a| !a.pinned).collect();
    movable.sort_by_key(|a| a.priority.map(|p| p.rank()).unwrap_or(u8::MAX));

    for assignment in movable {
        // Scan order 1..=4 means the lowest wave number wins ties.
        let target = (1..=WAVE_COUNT)
            .min_by_key(|n| waves[n].len())
            .expect("wave range is non-empty");
        debug!(
            topic = %assignment.topic_id,
            wave = target,
            "Rebalanced topic"
        );
        waves.entry(target).or_default().push(assignment.topic_id.clone());
    }

    Ok(waves)
}
