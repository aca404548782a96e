//! Duplicate / cannibalization detection.
//!
//! Finds topic pairs so similar that they would compete for the same
//! search intent. Two independent detectors:
//!
//! - Distance-based: consumes the distance provider and its linking
//!   recommendations.
//! - Lexical: pure Jaccard overlap over query tokens, usable before any
//!   semantic service exists. A pure function of the topic pair — identical
//!   inputs always produce identical results.

use std::collections::HashSet;

use tracing::{debug, instrument};

use siteplan_types::{CannibalizationRisk, Topic};

use crate::distance::DistanceProvider;
use crate::error::StructureError;

/// Distance below which a pair is flagged as a cannibalization risk.
const DISTANCE_RISK_THRESHOLD: f64 = 0.2;

/// Jaccard similarity above which a pair is flagged by the lexical detector.
const LEXICAL_RISK_THRESHOLD: f64 = 0.7;

/// Tokens shorter than this are discarded before comparison.
const MIN_TOKEN_CHARS: usize = 3;

/// Detect cannibalization risks using the distance provider.
///
/// Every unordered pair is judged once; a pair with distance below 0.2 is
/// flagged with the provider's own linking recommendation and
/// `similarity = 1 - distance`. Output is sorted most severe first
/// (ascending distance), stable on ties.
///
/// # Errors
/// Propagates provider failures unmodified.
#[instrument(skip(topics, provider))]
pub fn detect_cannibalization(
    topics: &[Topic],
    provider: &dyn DistanceProvider,
) -> Result<Vec<CannibalizationRisk>, StructureError> {
    let mut flagged: Vec<(f64, CannibalizationRisk)> = Vec::new();

    for (a, topic_a) in topics.iter().enumerate() {
        for topic_b in &topics[(a + 1)..] {
            let judgement = provider.distance(&topic_a.title, &topic_b.title)?;
            if judgement.distance < DISTANCE_RISK_THRESHOLD {
                debug!(
                    topic_a = %topic_a.id,
                    topic_b = %topic_b.id,
                    distance = judgement.distance,
                    "Flagged cannibalization risk"
                );
                flagged.push((
                    judgement.distance,
                    CannibalizationRisk {
                        topic_a_id: topic_a.id.clone(),
                        topic_b_id: topic_b.id.clone(),
                        similarity: 1.0 - judgement.distance,
                        recommendation: judgement.linking_recommendation,
                    },
                ));
            }
        }
    }

    // Most severe (closest) first; stable sort keeps pair order on ties.
    flagged.sort_by(|x, y| x.0.partial_cmp(&y.0).unwrap_or(std::cmp::Ordering::Equal));
    Ok(flagged.into_iter().map(|(_, risk)| risk).collect())
}

/// Detect cannibalization risks by lexical query overlap.
///
/// Tokenizes each topic's canonical query (falling back to its title) and
/// flags pairs whose Jaccard similarity exceeds 0.7, with a generated merge
/// suggestion naming both titles and the rounded overlap percentage.
/// Output is sorted most severe first (descending similarity), stable on
/// ties. Needs no external collaborator.
#[instrument(skip(topics))]
pub fn detect_cannibalization_lexical(topics: &[Topic]) -> Vec<CannibalizationRisk> {
    let token_sets: Vec<HashSet<String>> =
        topics.iter().map(|t| tokenize(t.query_text())).collect();

    let mut risks: Vec<CannibalizationRisk> = Vec::new();
    for (a, topic_a) in topics.iter().enumerate() {
        for (offset, topic_b) in topics[(a + 1)..].iter().enumerate() {
            let b = a + 1 + offset;
            let similarity = jaccard(&token_sets[a], &token_sets[b]);
            if similarity > LEXICAL_RISK_THRESHOLD {
                let overlap_pct = (similarity * 100.0).round() as i64;
                risks.push(CannibalizationRisk {
                    topic_a_id: topic_a.id.clone(),
                    topic_b_id: topic_b.id.clone(),
                    similarity,
                    recommendation: format!(
                        "Merge or differentiate '{}' and '{}': their target queries overlap by {}%",
                        topic_a.title, topic_b.title, overlap_pct
                    ),
                });
            }
        }
    }

    risks.sort_by(|x, y| {
        y.similarity
            .partial_cmp(&x.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    risks
}

/// Lowercased whitespace tokens; short tokens and stop words discarded.
fn tokenize(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .map(|token| token.to_lowercase())
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .filter(|token| !is_stop_word(token))
        .collect()
}

/// Check if a word is a stop word.
fn is_stop_word(word: &str) -> bool {
    const STOP_WORDS: &[&str] = &[
        "and", "are", "for", "from", "has", "its", "that", "the", "was", "were", "will", "with",
        "this", "they", "but", "have", "had", "what", "when", "where", "who", "which", "why",
        "how", "all", "each", "every", "both", "few", "more", "most", "other", "some", "such",
        "nor", "not", "only", "own", "same", "than", "too", "very", "can", "just", "should",
        "now", "also", "been", "being", "does", "did", "doing", "would", "could", "might",
        "must", "shall", "about", "above", "after", "again", "against", "any", "before",
        "below", "between", "into", "through", "during", "out", "over", "under", "then",
        "once", "here", "there", "else", "while", "because", "until", "you", "your", "our",
        "their", "him", "her", "them", "myself", "itself", "those", "these", "his",
    ];

    STOP_WORDS.contains(&word)
}

/// Jaccard similarity of two token sets; 0 when both are empty.
fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}
