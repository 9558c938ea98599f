//! Thread Network
//!
//! Undirected multigraph of buttons and the threads between them.

use bevy_ecs::prelude::*;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;

/// Resource: The graph of buttons (nodes) and threads (edges).
///
/// Parallel threads and self-loops are kept as-is; nothing is deduplicated.
/// Each node weight is the entity of the button that owns it.
#[derive(Resource, Debug, Clone, Default)]
pub struct ThreadNetwork {
    graph: UnGraph<Entity, ()>,
}

impl ThreadNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(buttons: usize, threads: usize) -> Self {
        Self {
            graph: UnGraph::with_capacity(buttons, threads),
        }
    }

    /// Add an isolated node owned by `owner`
    pub fn add_button(&mut self, owner: Entity) -> NodeIndex {
        self.graph.add_node(owner)
    }

    /// Tie a thread between two buttons
    pub fn tie(&mut self, a: NodeIndex, b: NodeIndex) -> EdgeIndex {
        self.graph.add_edge(a, b, ())
    }

    pub fn button_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn thread_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Entity owning `node`
    pub fn owner(&self, node: NodeIndex) -> Option<Entity> {
        self.graph.node_weight(node).copied()
    }

    pub fn graph(&self) -> &UnGraph<Entity, ()> {
        &self.graph
    }

    /// Component representative of every node, indexed by node index.
    fn labeling(&self) -> Vec<usize> {
        let mut clusters = UnionFind::new(self.graph.node_count());
        for thread in self.graph.edge_references() {
            clusters.union(thread.source().index(), thread.target().index());
        }
        clusters.into_labeling()
    }

    /// Component sizes, largest first.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let labels = self.labeling();
        let mut counts = vec![0usize; labels.len()];
        for label in labels {
            counts[label] += 1;
        }

        let mut sizes: Vec<usize> = counts.into_iter().filter(|&c| c > 0).collect();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        sizes
    }

    /// Size of the largest connected component (0 for an empty network).
    pub fn largest_cluster(&self) -> usize {
        self.cluster_sizes().first().copied().unwrap_or(0)
    }

    pub fn cluster_count(&self) -> usize {
        self.cluster_sizes().len()
    }
}
