//! Graph diameter via breadth-first shortest-path search.
//!
//! The diameter is the largest shortest-path distance over ordered pairs of
//! distinct vertices that can reach each other. Unreachable pairs never
//! contribute to the maximum; they are counted separately so disconnected
//! graphs remain visible to callers.

mod scratch;

use crate::Graph;

pub use self::scratch::SearchScratch;

/// How [`DiameterCalculator`] enumerates shortest paths.
///
/// Both strategies produce identical [`Diameter`] values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DiameterStrategy {
    /// One early-exit search per ordered pair `(start, end)`: `O(V)` per pair
    /// and `O(V³)` per graph in the worst case.
    #[default]
    PairwiseSearch,
    /// One exhaustive search per start vertex, reading every distance from the
    /// resulting depth table: `O(V · (V + E))` per graph.
    SourceSweep,
}

/// Diameter of one graph together with pair reachability counts.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use gnp_diameter_core::{DiameterCalculator, Graph};
///
/// let vertices = NonZeroUsize::new(4).expect("non-zero");
/// let mut calculator = DiameterCalculator::default();
///
/// let complete = calculator.measure(&Graph::complete(vertices));
/// assert_eq!(complete.longest(), Some(1));
/// assert!(complete.is_connected());
///
/// let edgeless = calculator.measure(&Graph::empty(vertices));
/// assert_eq!(edgeless.longest(), None);
/// assert_eq!(edgeless.unreachable_pairs(), 12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Diameter {
    longest: Option<usize>,
    reachable_pairs: u64,
    unreachable_pairs: u64,
}

impl Diameter {
    /// Largest finite distance between distinct vertices, or `None` when no
    /// pair of distinct vertices is connected (edgeless or single-vertex
    /// graphs).
    #[must_use]
    pub const fn longest(&self) -> Option<usize> {
        self.longest
    }

    /// Ordered pairs of distinct vertices joined by some path.
    #[must_use]
    pub const fn reachable_pairs(&self) -> u64 {
        self.reachable_pairs
    }

    /// Ordered pairs of distinct vertices with no path between them.
    #[must_use]
    pub const fn unreachable_pairs(&self) -> u64 {
        self.unreachable_pairs
    }

    /// Whether every vertex reaches every other vertex.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.unreachable_pairs == 0
    }

    fn record(&mut self, distance: Option<usize>) {
        match distance {
            Some(distance) => {
                self.reachable_pairs += 1;
                self.longest = Some(self.longest.map_or(distance, |best| best.max(distance)));
            }
            None => self.unreachable_pairs += 1,
        }
    }
}

/// Computes graph diameters, reusing its search buffers across graphs.
///
/// A calculator is cheap to keep per worker thread; it never shares state
/// between graphs because [`SearchScratch`] resets itself for every query.
#[derive(Clone, Debug, Default)]
pub struct DiameterCalculator {
    strategy: DiameterStrategy,
    scratch: SearchScratch,
}

impl DiameterCalculator {
    /// Creates a calculator using `strategy`.
    #[must_use]
    pub fn new(strategy: DiameterStrategy) -> Self {
        Self {
            strategy,
            scratch: SearchScratch::default(),
        }
    }

    /// Returns the configured strategy.
    #[must_use]
    pub const fn strategy(&self) -> DiameterStrategy {
        self.strategy
    }

    /// Measures the diameter of `graph`.
    pub fn measure(&mut self, graph: &Graph) -> Diameter {
        match self.strategy {
            DiameterStrategy::PairwiseSearch => self.measure_pairwise(graph),
            DiameterStrategy::SourceSweep => self.measure_by_source(graph),
        }
    }

    fn measure_pairwise(&mut self, graph: &Graph) -> Diameter {
        let vertices = graph.vertex_count();
        let mut diameter = Diameter::default();
        for start in 0..vertices {
            for end in (0..vertices).filter(|&end| end != start) {
                diameter.record(self.scratch.search(graph, start, Some(end)));
            }
        }
        diameter
    }

    fn measure_by_source(&mut self, graph: &Graph) -> Diameter {
        let vertices = graph.vertex_count();
        let mut diameter = Diameter::default();
        for start in 0..vertices {
            self.scratch.search(graph, start, None);
            for end in (0..vertices).filter(|&end| end != start) {
                diameter.record(self.scratch.depth_of(end));
            }
        }
        diameter
    }
}
