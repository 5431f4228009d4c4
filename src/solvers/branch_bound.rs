//! Branch-and-Bound Solver
//!
//! Depth-first search over the remaining quantity of every line. Each node
//! picks the lowest line with units left and tries every deal that consumes
//! it; a deal applies only if every occurrence it consumes is still available.
//! Branches already dearer than the best cover are pruned, and every cover
//! tying the best is kept.

use std::{
    ops::ControlFlow,
    time::{Duration, Instant},
};

use tracing::{debug, warn};

use crate::{
    deals::DealCatalog,
    solvers::{Cover, SearchObserver, Solver, SolverError, SolverResult},
};

/// The wall clock is only read once per this many nodes.
pub const CLOCK_CHECK_INTERVAL: u64 = 1024;

/// Limits on a single search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBudget {
    /// Most nodes the search may visit
    pub max_nodes: u64,

    /// Longest the search may run
    pub max_duration: Option<Duration>,
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self {
            max_nodes: 250_000,
            max_duration: Some(Duration::from_secs(2)),
        }
    }
}

/// Exact minimum-cost cover search with a fail-closed budget.
#[derive(Debug, Clone, Default)]
pub struct BranchAndBoundSolver {
    budget: SearchBudget,
}

impl BranchAndBoundSolver {
    /// Create a solver with the given budget.
    pub fn new(budget: SearchBudget) -> Self {
        Self { budget }
    }

    /// The search budget.
    pub fn budget(&self) -> &SearchBudget {
        &self.budget
    }
}

impl Solver for BranchAndBoundSolver {
    fn solve_with_observer(
        &self,
        catalog: &DealCatalog<'_>,
        quantities: &[u32],
        observer: &mut dyn SearchObserver,
    ) -> Result<SolverResult, SolverError> {
        if self.budget.max_nodes == 0 {
            return Err(SolverError::ZeroNodeBudget);
        }

        if catalog.line_count() != quantities.len() {
            return Err(SolverError::LineCountMismatch {
                catalog: catalog.line_count(),
                cart: quantities.len(),
            });
        }

        let naive = naive_cover(catalog, quantities)?;
        let naive_cost = naive.cost_minor(catalog);

        let mut search = Search {
            catalog,
            costs: catalog
                .deals()
                .iter()
                .map(|deal| deal.cost.to_minor_units())
                .collect(),
            remaining: quantities.to_vec(),
            path: Vec::new(),
            best: naive_cost,
            covers: Vec::new(),
            nodes: 0,
            budget: &self.budget,
            started: Instant::now(),
            observer,
        };

        if search.run().is_break() {
            warn!(
                nodes = search.nodes,
                naive_cost, "cover search budget exhausted, falling back to single items"
            );
            search.observer.on_budget_exhausted(search.nodes);

            return Ok(SolverResult {
                cost_minor: naive_cost,
                covers: vec![naive],
                nodes: search.nodes,
                exhausted: true,
            });
        }

        if search.covers.is_empty() {
            return Err(SolverError::InvariantViolation {
                message: "search finished without reaching the naive cover",
            });
        }

        debug!(
            nodes = search.nodes,
            best = search.best,
            ties = search.covers.len(),
            "cover search finished"
        );

        Ok(SolverResult {
            cost_minor: search.best,
            covers: search.covers,
            nodes: search.nodes,
            exhausted: false,
        })
    }
}

/// Every unit bought on its own, line by line.
fn naive_cover(catalog: &DealCatalog<'_>, quantities: &[u32]) -> Result<Cover, SolverError> {
    let mut deals = Vec::new();

    for (line, quantity) in quantities.iter().enumerate() {
        let single = catalog
            .single_for(line)
            .ok_or(SolverError::InvariantViolation {
                message: "order line has no single-item deal",
            })?;

        deals.extend(std::iter::repeat_n(single, *quantity as usize));
    }

    Ok(Cover::new(deals))
}

struct Search<'s, 'a> {
    catalog: &'s DealCatalog<'a>,
    costs: Vec<i64>,
    remaining: Vec<u32>,
    path: Vec<usize>,
    best: i64,
    covers: Vec<Cover>,
    nodes: u64,
    budget: &'s SearchBudget,
    started: Instant,
    observer: &'s mut dyn SearchObserver,
}

/// An open node: the line being filled, the next deal to try for it, and
/// the cost paid on the way down.
struct Frame {
    pivot: usize,
    cursor: usize,
    cost: i64,
}

impl Search<'_, '_> {
    fn out_of_budget(&self) -> bool {
        if self.nodes > self.budget.max_nodes {
            return true;
        }

        self.nodes % CLOCK_CHECK_INTERVAL == 0
            && self
                .budget
                .max_duration
                .is_some_and(|limit| self.started.elapsed() > limit)
    }

    /// Depth-first search with an explicit frame stack. Every frame but the
    /// root owns the last deal on `path` and gives it back when popped, so
    /// `path.len() + 1 == stack.len()` between iterations.
    fn run(&mut self) -> ControlFlow<()> {
        let catalog = self.catalog;
        let mut stack = Vec::new();

        if let Some(root) = self.visit(0)? {
            stack.push(root);
        }

        while let Some(frame) = stack.last_mut() {
            let candidates = catalog.consuming(frame.pivot);
            let mut next = None;

            while let Some(&idx) = candidates.get(frame.cursor) {
                frame.cursor += 1;

                let (Some(deal), Some(deal_cost)) = (catalog.get(idx), self.costs.get(idx))
                else {
                    continue;
                };

                if deal.consumption.fits(&self.remaining) {
                    next = Some((idx, deal, *deal_cost));
                    break;
                }
            }

            let cost = frame.cost;

            let Some((idx, deal, deal_cost)) = next else {
                stack.pop();

                if !stack.is_empty() {
                    self.undo();
                }

                continue;
            };

            deal.consumption.take(&mut self.remaining);
            self.path.push(idx);

            match self.visit(cost.saturating_add(deal_cost))? {
                Some(child) => stack.push(child),
                None => self.undo(),
            }
        }

        ControlFlow::Continue(())
    }

    /// Count a node and decide whether it needs expanding.
    fn visit(&mut self, cost: i64) -> ControlFlow<(), Option<Frame>> {
        self.nodes += 1;

        if self.out_of_budget() {
            return ControlFlow::Break(());
        }

        let depth = self.path.len();
        self.observer.on_node(depth, cost);

        if cost > self.best {
            self.observer.on_prune(depth, cost, self.best);
            return ControlFlow::Continue(None);
        }

        let Some(pivot) = self.remaining.iter().position(|left| *left > 0) else {
            if cost < self.best {
                self.best = cost;
                self.covers.clear();
            }

            self.covers.push(Cover::new(self.path.iter().copied()));
            self.observer.on_solution(cost, &self.path);

            return ControlFlow::Continue(None);
        };

        ControlFlow::Continue(Some(Frame {
            pivot,
            cursor: 0,
            cost,
        }))
    }

    /// Give back the most recently applied deal.
    fn undo(&mut self) {
        let catalog = self.catalog;

        if let Some(deal) = self.path.pop().and_then(|idx| catalog.get(idx)) {
            deal.consumption.give_back(&mut self.remaining);
        }
    }
}

#[cfg(test)]
mod tests {
    use smallvec::SmallVec;
    use testresult::TestResult;

    use crate::deals::{Consumption, Deal, Strategy, test_support::twd};

    use super::*;

    fn deal<'a>(cost: i64, occurrences: &[usize], strategy: Strategy) -> Deal<'a> {
        Deal {
            label: String::new(),
            cost: twd(cost),
            consumption: Consumption::from_occurrences(occurrences.iter().copied()),
            steps: SmallVec::new(),
            extras: None,
            is_upgrade: false,
            strategy,
        }
    }

    fn nuggets_catalog<'a>() -> DealCatalog<'a> {
        DealCatalog::from_deals(
            vec![
                deal(89, &[0], Strategy::Single { line: 0 }),
                deal(89, &[0, 0], Strategy::TwoForOne),
            ],
            1,
        )
    }

    #[derive(Default)]
    struct CountingObserver {
        nodes: usize,
        prunes: usize,
        solutions: Vec<i64>,
        exhausted: bool,
    }

    impl SearchObserver for CountingObserver {
        fn on_node(&mut self, _depth: usize, _cost_minor: i64) {
            self.nodes += 1;
        }

        fn on_prune(&mut self, _depth: usize, _cost_minor: i64, _best_minor: i64) {
            self.prunes += 1;
        }

        fn on_solution(&mut self, cost_minor: i64, _deals: &[usize]) {
            self.solutions.push(cost_minor);
        }

        fn on_budget_exhausted(&mut self, _nodes: u64) {
            self.exhausted = true;
        }
    }

    #[test]
    fn two_for_one_beats_singles() -> TestResult {
        let catalog = nuggets_catalog();

        let result = BranchAndBoundSolver::default().solve(&catalog, &[2])?;

        assert_eq!(result.cost_minor, twd(89).to_minor_units());
        assert_eq!(result.covers, vec![Cover::new([1])]);
        assert!(!result.exhausted);

        Ok(())
    }

    #[test]
    fn ties_are_all_retained_in_discovery_order() -> TestResult {
        let catalog = DealCatalog::from_deals(
            vec![
                deal(50, &[0], Strategy::Single { line: 0 }),
                deal(50, &[1], Strategy::Single { line: 1 }),
                deal(100, &[0, 1], Strategy::PickOne),
            ],
            2,
        );

        let result = BranchAndBoundSolver::default().solve(&catalog, &[1, 1])?;

        assert_eq!(result.covers, vec![Cover::new([0, 1]), Cover::new([2])]);

        Ok(())
    }

    #[test]
    fn every_cover_is_exact() -> TestResult {
        let catalog = DealCatalog::from_deals(
            vec![
                deal(75, &[0], Strategy::Single { line: 0 }),
                deal(45, &[1], Strategy::Single { line: 1 }),
                deal(35, &[2], Strategy::Single { line: 2 }),
                deal(109, &[0, 1, 2], Strategy::ComboTier),
                deal(60, &[1, 1], Strategy::TwoForOne),
            ],
            3,
        );
        let quantities = [2, 3, 1];

        let result = BranchAndBoundSolver::default().solve(&catalog, &quantities)?;

        for cover in &result.covers {
            assert_eq!(cover.consumed(&catalog), quantities.to_vec());
            assert_eq!(cover.cost_minor(&catalog), result.cost_minor);
        }
        // combo (109) + big mac (75) + two-for-one fries (60)
        assert_eq!(result.cost_minor, twd(244).to_minor_units());

        Ok(())
    }

    #[test]
    fn exhausted_budget_fails_closed_to_singles() -> TestResult {
        let catalog = nuggets_catalog();
        let solver = BranchAndBoundSolver::new(SearchBudget {
            max_nodes: 1,
            max_duration: None,
        });
        let mut observer = CountingObserver::default();

        let result = solver.solve_with_observer(&catalog, &[4], &mut observer)?;

        assert!(result.exhausted);
        assert!(observer.exhausted);
        assert_eq!(result.covers, vec![Cover::new([0, 0, 0, 0])]);
        assert_eq!(result.cost_minor, twd(356).to_minor_units());

        Ok(())
    }

    #[test]
    fn deep_carts_do_not_exhaust_the_stack() -> TestResult {
        let catalog =
            DealCatalog::from_deals(vec![deal(25, &[0], Strategy::Single { line: 0 })], 1);
        let solver = BranchAndBoundSolver::new(SearchBudget {
            max_nodes: 250_000,
            max_duration: None,
        });

        let result = solver.solve(&catalog, &[200_000])?;

        assert!(!result.exhausted);
        assert_eq!(result.nodes, 200_001);
        assert_eq!(result.cost_minor, twd(5_000_000).to_minor_units());
        assert_eq!(result.covers.first().map(Cover::len), Some(200_000));

        Ok(())
    }

    #[test]
    fn backtracking_restores_remaining_quantities() -> TestResult {
        let catalog = DealCatalog::from_deals(
            vec![
                deal(30, &[0], Strategy::Single { line: 0 }),
                deal(40, &[1], Strategy::Single { line: 1 }),
                deal(65, &[0, 0], Strategy::TwoForOne),
                deal(55, &[0, 1], Strategy::PickOne),
            ],
            2,
        );

        let result = BranchAndBoundSolver::default().solve(&catalog, &[3, 1])?;

        // pick-one (55) + two singles (60) undercuts the pair plus pick-one (120)
        assert_eq!(result.cost_minor, twd(115).to_minor_units());
        for cover in &result.covers {
            assert_eq!(cover.consumed(&catalog), vec![3, 1]);
        }

        Ok(())
    }

    #[test]
    fn wall_clock_budget_fails_closed_to_singles() -> TestResult {
        let catalog =
            DealCatalog::from_deals(vec![deal(25, &[0], Strategy::Single { line: 0 })], 1);
        let solver = BranchAndBoundSolver::new(SearchBudget {
            max_nodes: 250_000,
            max_duration: Some(Duration::ZERO),
        });
        let mut observer = CountingObserver::default();

        let result = solver.solve_with_observer(&catalog, &[5_000], &mut observer)?;

        assert!(result.exhausted);
        assert!(observer.exhausted);
        assert_eq!(result.nodes, CLOCK_CHECK_INTERVAL);
        assert_eq!(result.covers, vec![Cover::new(std::iter::repeat_n(0, 5_000))]);
        assert_eq!(result.cost_minor, twd(125_000).to_minor_units());

        Ok(())
    }

    #[test]
    fn observer_sees_nodes_prunes_and_solutions() -> TestResult {
        let catalog = DealCatalog::from_deals(
            vec![
                deal(89, &[0, 0], Strategy::TwoForOne),
                deal(89, &[0], Strategy::Single { line: 0 }),
            ],
            1,
        );
        let mut observer = CountingObserver::default();

        BranchAndBoundSolver::default().solve_with_observer(&catalog, &[2], &mut observer)?;

        assert!(observer.nodes > 0);
        assert!(observer.prunes > 0);
        assert_eq!(observer.solutions, vec![twd(89).to_minor_units()]);

        Ok(())
    }

    #[test]
    fn empty_cart_has_one_empty_cover() -> TestResult {
        let catalog = DealCatalog::from_deals(Vec::new(), 0);

        let result = BranchAndBoundSolver::default().solve(&catalog, &[])?;

        assert_eq!(result.cost_minor, 0);
        assert_eq!(result.covers, vec![Cover::default()]);

        Ok(())
    }

    #[test]
    fn rejects_mismatched_quantities() {
        let catalog = nuggets_catalog();

        let result = BranchAndBoundSolver::default().solve(&catalog, &[1, 1]);

        assert_eq!(
            result,
            Err(SolverError::LineCountMismatch {
                catalog: 1,
                cart: 2
            })
        );
    }

    #[test]
    fn rejects_zero_node_budget() {
        let solver = BranchAndBoundSolver::new(SearchBudget {
            max_nodes: 0,
            max_duration: None,
        });

        assert_eq!(
            solver.solve(&nuggets_catalog(), &[1]),
            Err(SolverError::ZeroNodeBudget)
        );
    }
}
