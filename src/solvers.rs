//! Solvers for Covers

use smallvec::SmallVec;
use thiserror::Error;

use crate::deals::DealCatalog;

pub mod branch_bound;
pub mod observer;

pub use branch_bound::{BranchAndBoundSolver, SearchBudget};
pub use observer::{NoopObserver, SearchObserver};

/// Solver Errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolverError {
    /// The deal catalog was indexed for a different number of lines than given.
    #[error("deal catalog covers {catalog} lines, but {cart} quantities were given")]
    LineCountMismatch {
        /// Lines the catalog was indexed for
        catalog: usize,

        /// Quantities passed to the solver
        cart: usize,
    },

    /// A search budget with no nodes can never find a cover.
    #[error("search node budget must be greater than zero")]
    ZeroNodeBudget,

    /// Internal solver invariant was violated (this is a bug).
    #[error("solver invariant violated: {message}")]
    InvariantViolation {
        /// What invariant was violated
        message: &'static str,
    },
}

/// An exact cover: indexes into the deal catalog, in application order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cover {
    deals: SmallVec<[usize; 8]>,
}

impl Cover {
    /// Create a cover from deal indexes.
    pub fn new(deals: impl IntoIterator<Item = usize>) -> Self {
        Self {
            deals: deals.into_iter().collect(),
        }
    }

    /// Deal indexes in application order.
    pub fn deals(&self) -> &[usize] {
        &self.deals
    }

    /// Number of deal applications.
    pub fn len(&self) -> usize {
        self.deals.len()
    }

    /// Check if the cover applies no deals (only for an empty cart).
    pub fn is_empty(&self) -> bool {
        self.deals.is_empty()
    }

    /// Summed cost of the cover in minor units.
    pub fn cost_minor(&self, catalog: &DealCatalog<'_>) -> i64 {
        self.deals
            .iter()
            .filter_map(|idx| catalog.get(*idx))
            .map(|deal| deal.cost.to_minor_units())
            .sum()
    }

    /// Occurrences consumed from each line.
    pub fn consumed(&self, catalog: &DealCatalog<'_>) -> Vec<u32> {
        let mut consumed = vec![0; catalog.line_count()];

        for deal in self.deals.iter().filter_map(|idx| catalog.get(*idx)) {
            for (line, count) in deal.consumption.iter() {
                if let Some(total) = consumed.get_mut(line) {
                    *total += count;
                }
            }
        }

        consumed
    }
}

/// Result of a cover search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverResult {
    /// Cost of every retained cover in minor units
    pub cost_minor: i64,

    /// Every cover found at the best cost, in discovery order
    pub covers: Vec<Cover>,

    /// Search nodes visited
    pub nodes: u64,

    /// Whether the search budget ran out and the naive cover was returned
    pub exhausted: bool,
}

/// Trait for finding minimum-cost exact covers of a cart
pub trait Solver {
    /// Find every cheapest exact cover of `quantities` using the deals in `catalog`.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if the solver encounters an error.
    fn solve(
        &self,
        catalog: &DealCatalog<'_>,
        quantities: &[u32],
    ) -> Result<SolverResult, SolverError> {
        self.solve_with_observer(catalog, quantities, &mut NoopObserver)
    }

    /// As [`Solver::solve`], reporting search progress to `observer`.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if the solver encounters an error.
    fn solve_with_observer(
        &self,
        catalog: &DealCatalog<'_>,
        quantities: &[u32],
        observer: &mut dyn SearchObserver,
    ) -> Result<SolverResult, SolverError>;
}
