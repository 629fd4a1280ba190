//! One-way viewport reveal.

use std::collections::HashSet;
use std::hash::Hash;

/// Visible-area fraction at which a watched element reveals.
pub const REVEAL_THRESHOLD: f64 = 0.12;

/// Marker class added on reveal, never removed.
pub const REVEAL_CLASS: &str = "inview";

/// Section classes watched for reveal, enumerated once at initialization.
pub const REVEAL_TARGET_CLASSES: [&str; 5] = [
    "service-card",
    "bot-inner",
    "contact-left",
    "contact-map",
    "about-section",
];

/// Tracks which watched elements have crossed the visibility threshold.
/// Elements observed after initialization are never picked up; elements
/// that leave the viewport stay revealed.
#[derive(Clone, Debug, Default)]
pub struct RevealObserver<N> {
    watched: HashSet<N>,
    revealed: HashSet<N>,
}

impl<N: Clone + Eq + Hash> RevealObserver<N> {
    pub fn new() -> Self {
        Self {
            watched: HashSet::new(),
            revealed: HashSet::new(),
        }
    }

    pub fn observe(&mut self, node: N) {
        self.watched.insert(node);
    }

    /// Handles one intersection notification. Returns `true` exactly when
    /// the marker class should be added now.
    pub fn on_intersection(&mut self, node: &N, visible_fraction: f64) -> bool {
        if visible_fraction < REVEAL_THRESHOLD || !self.watched.contains(node) {
            return false;
        }
        if self.revealed.contains(node) {
            return false;
        }
        self.revealed.insert(node.clone());
        true
    }

    pub fn is_revealed(&self, node: &N) -> bool {
        self.revealed.contains(node)
    }

    pub fn watched_count(&self) -> usize {
        self.watched.len()
    }
}
