//! Wave progress aggregation.
//!
//! Pure read-model computation for dashboards: completion and quality
//! roll-ups per wave from externally supplied completion and quality data.
//! Nothing here is persisted; the roll-up is recomputed on demand.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};

use siteplan_types::{Wave, WaveProgress, WaveStatus};

/// Compute the completion roll-up for a wave.
///
/// `completed_ids` is the set of topic ids considered done;
/// `quality_scores` maps topic ids to audit scores. The average covers only
/// completed topics that have a score entry (0 when none do). Status is
/// upgraded to `ready` when every page of a non-empty wave is complete;
/// otherwise the wave's own status passes through unchanged.
#[instrument(skip(wave, completed_ids, quality_scores))]
pub fn wave_progress(
    wave: &Wave,
    completed_ids: &HashSet<String>,
    quality_scores: &HashMap<String, f64>,
) -> WaveProgress {
    let total_pages = wave.topic_ids.len();
    let completed: Vec<&String> = wave
        .topic_ids
        .iter()
        .filter(|id| completed_ids.contains(*id))
        .collect();
    let completed_pages = completed.len();

    let scored: Vec<f64> = completed
        .iter()
        .filter_map(|id| quality_scores.get(*id).copied())
        .collect();
    let average_quality_score = if scored.is_empty() {
        0.0
    } else {
        scored.iter().sum::<f64>() / scored.len() as f64
    };

    let status = if total_pages > 0 && completed_pages == total_pages {
        WaveStatus::Ready
    } else {
        wave.status
    };

    debug!(
        wave = wave.number,
        completed_pages,
        total_pages,
        status = %status,
        "Computed wave progress"
    );

    WaveProgress {
        wave_id: wave.id.clone(),
        wave_number: wave.number,
        total_pages,
        completed_pages,
        average_quality_score,
        status,
    }
}
