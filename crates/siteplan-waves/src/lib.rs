//! # siteplan-waves
//!
//! Publication-wave scheduling for the Topical Structure Planner.
//!
//! Assigns classified topics into four sequential publication waves,
//! rebalances an existing assignment around pinned topics and priorities,
//! and computes per-wave progress roll-ups for dashboards. Every entry
//! point is a pure function of its input snapshot: no persistence, no
//! hidden state, deterministic output.
//!
//! ## Usage
//!
//! ```rust
//! use siteplan_types::{Topic, TopicType};
//! use siteplan_waves::{assign_topics_to_waves, WaveStrategy};
//!
//! let topics = vec![Topic::new("1", "Pricing Guide").with_type(TopicType::Core)];
//! let plan = assign_topics_to_waves(&topics, WaveStrategy::MonetizationFirst);
//! assert!(plan.wave(1).unwrap().contains("1"));
//! ```

pub mod error;
pub mod progress;
pub mod rebalance;
pub mod scheduling;

pub use error::WavesError;
pub use progress::wave_progress;
pub use rebalance::rebalance_waves;
pub use scheduling::{assign_topics_to_waves, WaveStrategy, WAVE_WEEK_RANGES};
