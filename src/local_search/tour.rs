//! Depot-padded tour with prefix path costs in both directions.

use crate::graph::Graph;

/// `depot, route[0], ..., route[n-1], depot` plus cumulative edge weights.
///
/// `fwd[k]` is the cost of walking `nodes[0..=k]` forward and `bwd[k]` the
/// cost of walking the same nodes backward, so the internal cost of any
/// sub-path in either direction is an O(1) difference. Costs may be
/// asymmetric.
pub(crate) struct Tour {
    nodes: Vec<usize>,
    fwd: Vec<i64>,
    bwd: Vec<i64>,
}

impl Tour {
    pub(crate) fn new(graph: &Graph, route: &[usize]) -> Self {
        let mut nodes = Vec::with_capacity(route.len() + 2);
        nodes.push(0);
        nodes.extend_from_slice(route);
        nodes.push(0);

        let mut fwd = vec![0; nodes.len()];
        let mut bwd = vec![0; nodes.len()];
        for k in 1..nodes.len() {
            fwd[k] = fwd[k - 1] + graph.weight(nodes[k - 1], nodes[k]);
            bwd[k] = bwd[k - 1] + graph.weight(nodes[k], nodes[k - 1]);
        }
        Self { nodes, fwd, bwd }
    }

    /// Number of nodes including both depot copies.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn node(&self, k: usize) -> usize {
        self.nodes[k]
    }

    /// Total tour cost.
    pub(crate) fn cost(&self) -> i64 {
        self.fwd[self.nodes.len() - 1]
    }

    /// Internal cost of `nodes[s..=e]`, walked backward if `reversed`.
    pub(crate) fn inner(&self, s: usize, e: usize, reversed: bool) -> i64 {
        if reversed {
            self.bwd[e] - self.bwd[s]
        } else {
            self.fwd[e] - self.fwd[s]
        }
    }

    /// Slice of nodes `s..=e`.
    pub(crate) fn segment(&self, s: usize, e: usize) -> &[usize] {
        &self.nodes[s..=e]
    }
}
