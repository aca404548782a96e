//! Cluster hierarchy inference.
//!
//! Proposes parent -> children edges between categorical clusters using
//! label containment and traffic ordering. The output is a heuristic edge
//! set: a cluster can appear under several parents, and inconsistent
//! traffic data can produce cycles. Callers must tolerate a graph.

use tracing::{debug, instrument};

use siteplan_types::{Cluster, HierarchyEdge};

/// Infer parent -> children relationships among clusters.
///
/// A cluster `C` is proposed as a child of `P` when `C`'s label
/// case-insensitively contains `P`'s label as a substring (the child is the
/// more specific name) and `C`'s total traffic is strictly below `P`'s.
/// One edge is emitted per parent with at least one child, in input order.
#[instrument(skip(clusters))]
pub fn infer_hierarchy(clusters: &[Cluster]) -> Vec<HierarchyEdge> {
    let lowered: Vec<String> = clusters.iter().map(|c| c.label.to_lowercase()).collect();

    let mut edges = Vec::new();
    for (p, parent) in clusters.iter().enumerate() {
        let children: Vec<String> = clusters
            .iter()
            .enumerate()
            .filter(|&(c, child)| {
                c != p
                    && lowered[c].contains(&lowered[p])
                    && child.total_traffic < parent.total_traffic
            })
            .map(|(_, child)| child.label.clone())
            .collect();

        if !children.is_empty() {
            debug!(
                parent = %parent.label,
                children = children.len(),
                "Proposed hierarchy edge"
            );
            edges.push(HierarchyEdge {
                parent_cluster_label: parent.label.clone(),
                child_cluster_labels: children,
            });
        }
    }

    edges
}
