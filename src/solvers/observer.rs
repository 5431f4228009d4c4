//! Search Observer

/// Observer trait for following a cover search as it runs.
///
/// Callbacks fire at each visited node, at each pruned branch and whenever a
/// complete cover is accepted, so tests and tooling can inspect the search
/// without duplicating it. Only [`SearchObserver::on_solution`] is required.
pub trait SearchObserver {
    /// Called when a search node is entered.
    ///
    /// # Parameters
    ///
    /// - `depth`: Number of deals applied so far
    /// - `cost_minor`: Accumulated cost in minor units
    fn on_node(&mut self, _depth: usize, _cost_minor: i64) {}

    /// Called when a branch is abandoned because it already costs more than
    /// the best cover found.
    fn on_prune(&mut self, _depth: usize, _cost_minor: i64, _best_minor: i64) {}

    /// Called when an exact cover at least as cheap as the current best is found.
    ///
    /// # Parameters
    ///
    /// - `cost_minor`: Cost of the cover in minor units
    /// - `deals`: Deal indexes in application order
    fn on_solution(&mut self, cost_minor: i64, deals: &[usize]);

    /// Called once if the search stops early because its budget ran out.
    fn on_budget_exhausted(&mut self, _nodes: u64) {}
}

/// No-op observer for unobserved searches.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_solution(&mut self, _: i64, _: &[usize]) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MinimalObserver {
        solutions: usize,
    }

    impl SearchObserver for MinimalObserver {
        fn on_solution(&mut self, _cost_minor: i64, _deals: &[usize]) {
            self.solutions += 1;
        }
    }

    #[test]
    fn default_callbacks_are_optional() {
        let mut observer = MinimalObserver::default();

        observer.on_node(0, 0);
        observer.on_prune(1, 200, 100);
        observer.on_budget_exhausted(10);
        observer.on_solution(100, &[0, 1]);

        assert_eq!(observer.solutions, 1);
    }

    #[test]
    fn noop_observer_accepts_every_callback() {
        let mut observer = NoopObserver;

        observer.on_node(0, 0);
        observer.on_solution(0, &[]);
    }
}
