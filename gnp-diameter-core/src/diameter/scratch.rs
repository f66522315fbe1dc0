//! Per-query breadth-first search state.

use std::collections::VecDeque;

use crate::{Graph, error::GraphError};

/// Scratch buffers for breadth-first shortest-path queries.
///
/// Holds the visited markers (a vertex is visited once it has a depth) and the
/// FIFO queue. Every query starts by resetting both for the graph it is given,
/// so one scratch can serve any number of queries and graphs without earlier
/// traversals leaking into later answers.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use gnp_diameter_core::{Graph, SearchScratch};
///
/// let mut graph = Graph::empty(NonZeroUsize::new(4).expect("non-zero"));
/// for (a, b) in [(0, 1), (1, 2), (2, 3)] {
///     graph.insert_edge(a, b).expect("valid edge");
/// }
/// let mut scratch = SearchScratch::default();
/// assert_eq!(scratch.shortest_path(&graph, 0, 3), Ok(Some(3)));
/// assert_eq!(scratch.shortest_path(&graph, 0, 2), Ok(Some(2)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct SearchScratch {
    depth: Vec<Option<usize>>,
    queue: VecDeque<usize>,
}

impl SearchScratch {
    /// Creates scratch buffers pre-sized for `vertex_count` vertices.
    #[must_use]
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            depth: Vec::with_capacity(vertex_count),
            queue: VecDeque::with_capacity(vertex_count),
        }
    }

    /// Returns the number of edges on a shortest path from `start` to `end`,
    /// or `None` when `end` is unreachable.
    ///
    /// The answer is the BFS depth at which `end` is first dequeued;
    /// `start == end` yields `Some(0)`.
    ///
    /// # Errors
    /// Returns [`GraphError::OutOfBounds`] when either address is not a vertex
    /// of `graph`.
    pub fn shortest_path(
        &mut self,
        graph: &Graph,
        start: usize,
        end: usize,
    ) -> Result<Option<usize>, GraphError> {
        graph.check_vertex(start)?;
        graph.check_vertex(end)?;
        Ok(self.search(graph, start, Some(end)))
    }

    /// Runs a full search from `start` and returns the depth of every vertex,
    /// `None` marking vertices unreachable from `start`.
    ///
    /// # Errors
    /// Returns [`GraphError::OutOfBounds`] when `start` is not a vertex of
    /// `graph`.
    pub fn distances_from(
        &mut self,
        graph: &Graph,
        start: usize,
    ) -> Result<&[Option<usize>], GraphError> {
        graph.check_vertex(start)?;
        self.search(graph, start, None);
        Ok(&self.depth)
    }

    /// Level-synchronised BFS from `start`. Stops as soon as `target` is
    /// dequeued and returns its depth; without a target it drains the queue
    /// and returns `None`.
    ///
    /// Callers guarantee both addresses are in range.
    pub(super) fn search(
        &mut self,
        graph: &Graph,
        start: usize,
        target: Option<usize>,
    ) -> Option<usize> {
        self.reset(graph.vertex_count());
        self.visit(start, 0);
        while let Some(vertex) = self.queue.pop_front() {
            let depth = self.depth_of(vertex)?;
            if target == Some(vertex) {
                self.queue.clear();
                return Some(depth);
            }
            for &neighbour in graph.neighbours(vertex).unwrap_or_default() {
                self.visit(neighbour, depth + 1);
            }
        }
        None
    }

    pub(super) fn depth_of(&self, vertex: usize) -> Option<usize> {
        self.depth.get(vertex).copied().flatten()
    }

    fn reset(&mut self, vertex_count: usize) {
        self.depth.clear();
        self.depth.resize(vertex_count, None);
        self.queue.clear();
    }

    fn visit(&mut self, vertex: usize, depth: usize) {
        match self.depth.get_mut(vertex) {
            Some(slot) if slot.is_none() => {
                *slot = Some(depth);
                self.queue.push_back(vertex);
            }
            _ => {}
        }
    }
}
