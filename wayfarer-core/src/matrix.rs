//! Request-scoped travel matrices.
//!
//! [`CostMatrix`] holds the directed travel cost optimised by the solver and
//! [`DurationMap`] the secondary duration metric used only for reporting.
//! Both are built once per request and never mutated afterwards.

use std::collections::HashMap;
use std::time::Duration;

use thiserror::Error;

/// Index of a node within a single routing request, in `[0, n)`.
pub type NodeIndex = usize;

/// Directed travel cost between two nodes.
///
/// Costs are integral because the distance service reports whole metres.
pub type Cost = u64;

/// Errors returned by [`CostMatrix::from_rows`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CostMatrixError {
    /// The matrix has no rows.
    #[error("cost matrix must contain at least one node")]
    Empty,
    /// A row length differs from the number of rows.
    #[error("cost matrix row {row} has {found} columns, expected {expected}")]
    NotSquare {
        /// Index of the offending row.
        row: usize,
        /// Expected number of columns.
        expected: usize,
        /// Actual number of columns.
        found: usize,
    },
}

/// Immutable, asymmetric `n x n` matrix of travel costs.
///
/// `cost(i, j)` is the cost of travelling from node `i` to node `j`. The
/// diagonal is never consulted.
///
/// # Examples
/// ```
/// use wayfarer_core::CostMatrix;
///
/// let matrix = CostMatrix::from_rows(vec![vec![0, 4], vec![7, 0]])?;
/// assert_eq!(matrix.cost(0, 1), Some(4));
/// assert_eq!(matrix.cost(1, 0), Some(7));
/// assert_eq!(matrix.path_cost(&[1, 0, 1]), Some(11));
/// # Ok::<(), wayfarer_core::CostMatrixError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostMatrix {
    size: usize,
    cells: Vec<Cost>,
}

impl CostMatrix {
    /// Build a matrix from row-major nested vectors.
    pub fn from_rows(rows: Vec<Vec<Cost>>) -> Result<Self, CostMatrixError> {
        let size = rows.len();
        if size == 0 {
            return Err(CostMatrixError::Empty);
        }
        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(CostMatrixError::NotSquare {
                    row,
                    expected: size,
                    found: values.len(),
                });
            }
            cells.extend(values);
        }
        Ok(Self { size, cells })
    }

    /// Build a matrix by evaluating `cost(i, j)` for every ordered pair.
    ///
    /// The diagonal is filled with zero without calling `cost`.
    pub fn from_fn<F>(size: usize, mut cost: F) -> Result<Self, CostMatrixError>
    where
        F: FnMut(NodeIndex, NodeIndex) -> Cost,
    {
        if size == 0 {
            return Err(CostMatrixError::Empty);
        }
        let cells = (0..size)
            .flat_map(|i| (0..size).map(move |j| (i, j)))
            .map(|(i, j)| if i == j { 0 } else { cost(i, j) })
            .collect();
        Ok(Self { size, cells })
    }

    /// Number of nodes covered by the matrix.
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Always `false`; construction rejects empty matrices.
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Cost from `from` to `to`, or `None` when either index is out of range.
    pub fn cost(&self, from: NodeIndex, to: NodeIndex) -> Option<Cost> {
        if from >= self.size || to >= self.size {
            return None;
        }
        self.cells.get(from * self.size + to).copied()
    }

    /// Cost from `from` to `to` for indices already known to be in range.
    ///
    /// # Panics
    ///
    /// Panics if `from` or `to` is not below [`CostMatrix::len`].
    #[expect(
        clippy::indexing_slicing,
        reason = "solver hot loops index validated nodes; out-of-range is a bug"
    )]
    pub fn edge(&self, from: NodeIndex, to: NodeIndex) -> Cost {
        assert!(
            from < self.size && to < self.size,
            "edge ({from}, {to}) outside {0}x{0} matrix",
            self.size
        );
        self.cells[from * self.size + to]
    }

    /// Total cost of visiting `path` in order.
    ///
    /// Sums consecutive edges, saturating at [`Cost::MAX`]. Returns `None` if
    /// any node is out of range.
    pub fn path_cost(&self, path: &[NodeIndex]) -> Option<Cost> {
        path.windows(2).try_fold(0, |total: Cost, pair| match pair {
            [from, to] => self
                .cost(*from, *to)
                .map(|edge| total.saturating_add(edge)),
            _ => Some(total),
        })
    }
}

/// Sparse map of travel durations between ordered node pairs.
///
/// Missing pairs read as [`Duration::ZERO`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DurationMap {
    entries: HashMap<(NodeIndex, NodeIndex), Duration>,
}

impl DurationMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the duration from `from` to `to`.
    pub fn insert(&mut self, from: NodeIndex, to: NodeIndex, duration: Duration) {
        self.entries.insert((from, to), duration);
    }

    /// Duration from `from` to `to`, or zero when the pair was never recorded.
    pub fn get(&self, from: NodeIndex, to: NodeIndex) -> Duration {
        self.entries
            .get(&(from, to))
            .copied()
            .unwrap_or(Duration::ZERO)
    }

    /// Number of recorded pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no pair has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of durations over consecutive pairs of `path`.
    pub fn path_duration(&self, path: &[NodeIndex]) -> Duration {
        path.windows(2)
            .filter_map(|pair| match pair {
                [from, to] => Some(self.get(*from, *to)),
                _ => None,
            })
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

impl FromIterator<((NodeIndex, NodeIndex), Duration)> for DurationMap {
    fn from_iter<I: IntoIterator<Item = ((NodeIndex, NodeIndex), Duration)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Travel cost and duration matrices produced for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelMatrices {
    /// Costs optimised by the solver.
    pub costs: CostMatrix,
    /// Durations aggregated for reporting.
    pub durations: DurationMap,
}
