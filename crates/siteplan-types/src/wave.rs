//! Publication wave types.
//!
//! A wave is one of four sequential batches into which topics are scheduled
//! for production. Wave status is a six-state machine driven externally;
//! the planner only writes `planning` on creation and the progress
//! aggregator may upgrade to `ready`.

use serde::{Deserialize, Serialize};

/// Production status of a wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WaveStatus {
    /// Topics assigned, work not started
    #[default]
    Planning,
    /// Content briefs being written
    Briefing,
    /// Pages being drafted
    Drafting,
    /// Drafts under quality audit
    Auditing,
    /// Every page complete
    Ready,
    /// Wave published
    Published,
}

impl WaveStatus {
    /// Stable string code for the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            WaveStatus::Planning => "planning",
            WaveStatus::Briefing => "briefing",
            WaveStatus::Drafting => "drafting",
            WaveStatus::Auditing => "auditing",
            WaveStatus::Ready => "ready",
            WaveStatus::Published => "published",
        }
    }
}

impl std::fmt::Display for WaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One publication wave.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wave {
    /// Deterministic identifier, "wave-<number>"
    pub id: String,
    /// Wave number, 1 through 4
    pub number: u8,
    /// Display name
    pub name: String,
    /// What this wave focuses on
    pub description: String,
    /// Assigned topic ids in assignment-pass insertion order
    pub topic_ids: Vec<String>,
    /// First week of the production window
    pub week_start: u8,
    /// Last week of the production window
    pub week_end: u8,
    /// Current production status
    pub status: WaveStatus,
}

impl Wave {
    /// Create an empty wave in `planning` status.
    pub fn new(
        number: u8,
        name: impl Into<String>,
        description: impl Into<String>,
        week_start: u8,
        week_end: u8,
    ) -> Self {
        Self {
            id: format!("wave-{number}"),
            number,
            name: name.into(),
            description: description.into(),
            topic_ids: Vec::new(),
            week_start,
            week_end,
            status: WaveStatus::Planning,
        }
    }

    /// Number of assigned topics.
    pub fn len(&self) -> usize {
        self.topic_ids.len()
    }

    /// Whether the wave has no topics.
    pub fn is_empty(&self) -> bool {
        self.topic_ids.is_empty()
    }

    /// Whether the wave contains the given topic.
    pub fn contains(&self, topic_id: &str) -> bool {
        self.topic_ids.iter().any(|id| id == topic_id)
    }
}

/// Result of a scheduling run: four waves plus any unassignable ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WavePlan {
    /// The four waves, in wave-number order
    pub waves: Vec<Wave>,
    /// Input topic ids absent from every wave (safety net, normally empty)
    pub unassigned: Vec<String>,
}

impl WavePlan {
    /// Look up a wave by number.
    pub fn wave(&self, number: u8) -> Option<&Wave> {
        self.waves.iter().find(|w| w.number == number)
    }

    /// Total topics assigned across all waves.
    pub fn assigned_count(&self) -> usize {
        self.waves.iter().map(Wave::len).sum()
    }
}

/// Scheduling priority for rebalancing. Lower rank schedules earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Must ship in the earliest possible slot
    Critical,
    /// Important, ahead of routine work
    High,
    /// Default weighting
    Medium,
    /// Fill-in work
    Low,
}

impl Priority {
    /// Sort rank; unknown priorities (None) sort after all of these.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Critical => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    /// Stable string code for the priority.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A topic's current wave placement, as input to rebalancing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicAssignment {
    /// Topic id
    pub topic_id: String,
    /// Current wave number (1-4)
    pub wave: u8,
    /// Scheduling priority; None sorts last
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Pinned topics never move during rebalancing
    #[serde(default)]
    pub pinned: bool,
}

impl TopicAssignment {
    /// Create an unpinned assignment with no priority.
    pub fn new(topic_id: impl Into<String>, wave: u8) -> Self {
        Self {
            topic_id: topic_id.into(),
            wave,
            priority: None,
            pinned: false,
        }
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Pin the topic to its current wave.
    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }
}

/// Per-wave completion roll-up for dashboards. Purely derived, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveProgress {
    /// Wave identifier
    pub wave_id: String,
    /// Wave number
    pub wave_number: u8,
    /// Total pages in the wave
    pub total_pages: usize,
    /// Pages present in the completion set
    pub completed_pages: usize,
    /// Mean quality over scored completed pages; 0 when none scored
    pub average_quality_score: f64,
    /// Input status, upgraded to `ready` when the wave is complete
    pub status: WaveStatus,
}
