//! Simple undirected graphs and the G(V, P) sampler.
//!
//! Adjacency is stored as one ascending neighbour list per vertex, so the
//! degree of a vertex is the length of its list and breadth-first search
//! expands neighbours in address order. Search state is never stored here;
//! see [`crate::SearchScratch`].

use std::{fmt, num::NonZeroUsize};

use rand::{Rng, distributions::Standard};

use crate::{error::GraphError, params::GraphParams};

/// Undirected graph without self-loops or parallel edges.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use gnp_diameter_core::Graph;
///
/// let vertices = NonZeroUsize::new(3).expect("non-zero");
/// let mut graph = Graph::empty(vertices);
/// assert_eq!(graph.insert_edge(0, 2), Ok(true));
/// assert!(graph.has_edge(2, 0));
/// assert_eq!(graph.degree(0), Some(1));
/// assert_eq!(graph.neighbours(1), Some(&[][..]));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl Graph {
    /// Creates `vertex_count` isolated vertices.
    #[must_use]
    pub fn empty(vertex_count: NonZeroUsize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count.get()],
            edge_count: 0,
        }
    }

    /// Creates a graph in which every distinct pair of vertices is adjacent.
    #[must_use]
    pub fn complete(vertex_count: NonZeroUsize) -> Self {
        let mut graph = Self::empty(vertex_count);
        for (a, b) in pairs(vertex_count.get()) {
            graph.push_ordered_edge(a, b);
        }
        graph
    }

    /// Samples a G(V, P) random graph from `rng`.
    ///
    /// Unordered pairs are visited with `a` ascending over `0..V-1` and, for
    /// each `a`, `b` ascending over `a+1..V`. Every pair consumes exactly one
    /// uniform `f64` draw from `[0, 1)` and becomes an edge when the draw is
    /// below `P`, so `P = 0` yields no edges, `P = 1` yields the complete
    /// graph, and a fixed seed always reproduces the same graph.
    ///
    /// # Examples
    /// ```
    /// use gnp_diameter_core::{Graph, GraphParams};
    /// use rand::{SeedableRng, rngs::SmallRng};
    ///
    /// let params = GraphParams::new(8, 0.3).expect("valid parameters");
    /// let first = Graph::sample(&params, &mut SmallRng::seed_from_u64(7));
    /// let second = Graph::sample(&params, &mut SmallRng::seed_from_u64(7));
    /// assert_eq!(first, second);
    /// ```
    #[must_use]
    pub fn sample<R: Rng + ?Sized>(params: &GraphParams, rng: &mut R) -> Self {
        let mut graph = Self::empty(params.vertex_count());
        let threshold = params.edge_probability().get();
        for (a, b) in pairs(graph.vertex_count()) {
            let draw: f64 = rng.sample(Standard);
            if draw < threshold {
                graph.push_ordered_edge(a, b);
            }
        }
        graph
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Degree of `vertex`, or `None` when the address is out of range.
    #[must_use]
    pub fn degree(&self, vertex: usize) -> Option<usize> {
        self.adjacency.get(vertex).map(Vec::len)
    }

    /// Neighbours of `vertex` in ascending address order.
    #[must_use]
    pub fn neighbours(&self, vertex: usize) -> Option<&[usize]> {
        self.adjacency.get(vertex).map(Vec::as_slice)
    }

    /// Returns whether `{a, b}` is an edge. Out-of-range addresses are never
    /// adjacent.
    #[must_use]
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.adjacency
            .get(a)
            .is_some_and(|neighbours| neighbours.binary_search(&b).is_ok())
    }

    /// Inserts the undirected edge `{a, b}`.
    ///
    /// Returns `Ok(true)` when the edge is new and `Ok(false)` when it already
    /// existed. A new edge is recorded on both endpoints and raises each
    /// endpoint's degree by one.
    ///
    /// # Errors
    /// Returns [`GraphError::OutOfBounds`] when either address is not below
    /// [`Graph::vertex_count`] and [`GraphError::SelfLoop`] when `a == b`.
    pub fn insert_edge(&mut self, a: usize, b: usize) -> Result<bool, GraphError> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        if a == b {
            return Err(GraphError::SelfLoop { vertex: a });
        }
        if self.has_edge(a, b) {
            return Ok(false);
        }
        insert_sorted(&mut self.adjacency, a, b);
        insert_sorted(&mut self.adjacency, b, a);
        self.edge_count += 1;
        Ok(true)
    }

    pub(crate) fn check_vertex(&self, vertex: usize) -> Result<(), GraphError> {
        if vertex < self.vertex_count() {
            Ok(())
        } else {
            Err(GraphError::OutOfBounds {
                vertex,
                vertex_count: self.vertex_count(),
            })
        }
    }

    /// Appends `{a, b}` for `a < b` arriving in the canonical pair order, which
    /// keeps every neighbour list ascending without searching.
    fn push_ordered_edge(&mut self, a: usize, b: usize) {
        debug_assert!(a < b && b < self.vertex_count());
        if let Some(row) = self.adjacency.get_mut(a) {
            debug_assert!(row.last().is_none_or(|&last| last < b));
            row.push(b);
        }
        if let Some(row) = self.adjacency.get_mut(b) {
            debug_assert!(row.last().is_none_or(|&last| last < a));
            row.push(a);
        }
        self.edge_count += 1;
    }
}

fn insert_sorted(adjacency: &mut [Vec<usize>], vertex: usize, neighbour: usize) {
    if let Some(row) = adjacency.get_mut(vertex) {
        if let Err(position) = row.binary_search(&neighbour) {
            row.insert(position, neighbour);
        }
    }
}

/// Unordered pairs `(a, b)` with `a < b < vertex_count` in canonical order.
fn pairs(vertex_count: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..vertex_count.saturating_sub(1))
        .flat_map(move |a| (a + 1..vertex_count).map(move |b| (a, b)))
}

/// One `Index: a   Degree: d` line per vertex, followed by one `Edge: a b`
/// line per incident edge.
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (vertex, neighbours) in self.adjacency.iter().enumerate() {
            writeln!(f, "Index: {vertex}   Degree: {}", neighbours.len())?;
            for neighbour in neighbours {
                writeln!(f, "Edge: {vertex} {neighbour}")?;
            }
        }
        Ok(())
    }
}
