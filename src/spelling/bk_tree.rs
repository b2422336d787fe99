//! Burkhard-Keller tree over the quantized edit distance.
//!
//! Nodes live in a flat arena and refer to their children by index. Each node
//! has one slot per distance bucket, so descending to a child is a single
//! array lookup and no traversal ever recurses.

use std::fmt;

use log::debug;

use crate::spelling::distance::{BUCKET_COUNT, Distance, Metric, QuantizedLevenshtein};

/// Index of a node inside the tree's arena, assigned in insertion order.
type NodeId = usize;

#[derive(Debug, Clone)]
struct Node {
    term: String,
    children: [Option<NodeId>; BUCKET_COUNT],
}

impl Node {
    fn new(term: String) -> Self {
        Node {
            term,
            children: [None; BUCKET_COUNT],
        }
    }
}

/// A candidate returned from a range query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    /// Indexed term.
    pub term: &'a str,
    /// Quantized distance between the query and `term`.
    pub distance: Distance,
}

/// A metric tree supporting build-once insertion and range queries.
///
/// A node hangs off its parent in the bucket equal to the metric distance
/// between the two terms, fixed when the node is inserted. The first term
/// inserted becomes the root. Terms are not de-duplicated.
pub struct BkTree<M = QuantizedLevenshtein> {
    metric: M,
    nodes: Vec<Node>,
    depth: usize,
}

impl BkTree<QuantizedLevenshtein> {
    /// Create an empty tree over the quantized Levenshtein metric.
    pub fn new() -> Self {
        Self::with_metric(QuantizedLevenshtein)
    }
}

impl Default for BkTree<QuantizedLevenshtein> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Metric> BkTree<M> {
    /// Create an empty tree over the given metric.
    pub fn with_metric(metric: M) -> Self {
        BkTree {
            metric,
            nodes: Vec::new(),
            depth: 0,
        }
    }

    /// Build a tree by inserting every term in iteration order.
    pub fn build<I, S>(metric: M, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tree = Self::with_metric(metric);
        for term in terms {
            tree.insert(term);
        }
        debug!(
            "built BK-tree with {} nodes, depth {}",
            tree.len(),
            tree.depth()
        );
        tree
    }

    /// Insert a term.
    ///
    /// Starting at the root, follow the child in the bucket matching the
    /// distance to each visited node until that bucket is free, then attach
    /// the term there as a leaf.
    pub fn insert<S: Into<String>>(&mut self, term: S) {
        let term = term.into();
        let new_id: NodeId = self.nodes.len();

        if self.nodes.is_empty() {
            self.nodes.push(Node::new(term));
            self.depth = 1;
            return;
        }

        let mut current = 0usize;
        let mut level = 1;
        loop {
            let bucket = self.metric.distance(&self.nodes[current].term, &term).bucket();
            level += 1;
            match self.nodes[current].children[bucket] {
                Some(child) => current = child,
                None => {
                    self.nodes[current].children[bucket] = Some(new_id);
                    break;
                }
            }
        }

        self.nodes.push(Node::new(term));
        self.depth = self.depth.max(level);
    }

    /// Find every indexed term within `max_distance` of `term`.
    ///
    /// Children of a node at distance `d` from the query are only visited when
    /// their bucket lies in `[d - max_distance, d + max_distance]`.
    ///
    /// Within one node, children are visited most recently inserted first,
    /// and a node is always reported before its descendants.
    pub fn query(&self, term: &str, max_distance: Distance) -> Vec<Match<'_>> {
        let mut found = Vec::new();
        if self.nodes.is_empty() {
            return found;
        }

        let radius = max_distance.bucket();
        let mut stack: Vec<NodeId> = vec![0];

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            let distance = self.metric.distance(term, &node.term);
            if distance <= max_distance {
                found.push(Match {
                    term: &node.term,
                    distance,
                });
            }

            let low = distance.bucket().saturating_sub(radius);
            let high = (distance.bucket() + radius).min(BUCKET_COUNT - 1);
            let pushed = stack.len();
            stack.extend(node.children[low..=high].iter().flatten());
            stack[pushed..].sort_unstable();
        }

        found
    }

    /// Whether `term` is indexed exactly.
    pub fn contains(&self, term: &str) -> bool {
        self.query(term, Distance::ZERO)
            .iter()
            .any(|candidate| candidate.term == term)
    }

    /// The metric this tree was built with.
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Number of indexed terms.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no terms.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Indexed terms in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|node| node.term.as_str())
    }
}

impl<M> fmt::Debug for BkTree<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BkTree")
            .field("nodes", &self.nodes.len())
            .field("depth", &self.depth)
            .finish()
    }
}
