//! Uninformed searches: breadth first, depth first and the
//! depth limited variations of depth first search.

use log::debug;

use super::strategy::TreeSearch;
use super::{Cutoff, Fifo, Lifo, Metrics, SearchAlgorithm, SearchOptions, SearchOutcome};
use crate::errors::Result;
use crate::traits::Problem;

/// Breadth-first search, expanding the shallowest node first.
pub type BreadthFirstSearch<'p, P, St> = SearchAlgorithm<'p, P, Fifo, St>;

/// Depth-first search, expanding the deepest node first.
pub type DepthFirstSearch<'p, P, St> = SearchAlgorithm<'p, P, Lifo, St>;

/// Breadth-first search, where children are generated in the
/// order [Problem::actions] lists them.
///
/// With unit step costs, the solution has the fewest actions.
pub fn bfs<P, St>(problem: &P, strategy: St) -> BreadthFirstSearch<'_, P, St> {
    SearchAlgorithm::new(problem, Fifo, strategy)
}

/// Depth-first search, where children are generated in the
/// order [Problem::actions] lists them.
///
/// Under [TreeSearch] on a state space with cycles this may
/// never finish, set a limit with [SearchAlgorithm::with_options].
pub fn dfs<P, St>(problem: &P, strategy: St) -> DepthFirstSearch<'_, P, St> {
    SearchAlgorithm::new(problem, Lifo, strategy)
}

/// Depth-first search which does not expand nodes at `limit`.
///
/// Reports [Cutoff::Depth] when the limit stopped it. Combined
/// with graph search, a state first reached along a long path is
/// not expanded again from a shorter one, so some solutions
/// within the limit may be missed.
pub fn depth_limited<P, St>(
    problem: &P,
    limit: usize,
    strategy: St,
) -> DepthFirstSearch<'_, P, St> {
    dfs(problem, strategy).with_options(SearchOptions::default().with_depth_limit(limit))
}

/// Repeated depth limited tree searches, with limits 0, 1, 2, ...
///
/// Stops at the first limit which finds a solution or which
/// exhausts the state space without being cut off. The expansion
/// and time limits from the options cover all of the iterations
/// together, and the depth limit in the options is ignored.
#[derive(Debug)]
pub struct IterativeDeepeningSearch<'p, P> {
    problem: &'p P,
    max_depth: Option<usize>,
    options: SearchOptions,
    metrics: Metrics,
}

impl<'p, P> IterativeDeepeningSearch<'p, P>
where
    P: Problem,
{
    pub fn new(problem: &'p P) -> Self {
        Self {
            problem,
            max_depth: None,
            options: SearchOptions::default(),
            metrics: Metrics::default(),
        }
    }

    /// Stop deepening after this depth limit.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    /// Counters from the most recent call to `search`, summed
    /// across every iteration.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn search(&mut self) -> Result<SearchOutcome<P::State, P::Action>> {
        self.metrics = Metrics::default();
        let started = std::time::Instant::now();

        let mut limit = 0;
        loop {
            let mut options = self.options.clone().with_depth_limit(limit);
            if let Some(expansions) = self.options.expansion_limit {
                let remaining = expansions.saturating_sub(self.metrics.nodes_expanded);
                options.expansion_limit = Some(remaining);
            }
            if let Some(time) = self.options.time_limit {
                options.time_limit = Some(time.checked_sub(started.elapsed()).unwrap_or_default());
            }

            let mut search = dfs(self.problem, TreeSearch).with_options(options);
            let outcome = search.search()?;

            let iteration = search.metrics();
            self.metrics.nodes_expanded += iteration.nodes_expanded;
            self.metrics.frontier_size = iteration.frontier_size;
            self.metrics.max_frontier_size =
                self.metrics.max_frontier_size.max(iteration.max_frontier_size);
            self.metrics.path_cost = iteration.path_cost;

            debug!(
                "Depth {} finished: expanded={} total={}",
                limit, iteration.nodes_expanded, self.metrics.nodes_expanded
            );

            let outcome = match outcome {
                SearchOutcome::Cutoff(Cutoff::Depth(_)) if Some(limit) != self.max_depth => {
                    limit += 1;
                    continue;
                }
                // Report the configured limits, not what was left of them.
                SearchOutcome::Cutoff(Cutoff::Expansions(_)) => {
                    let limit = self.options.expansion_limit.unwrap_or_default();
                    SearchOutcome::Cutoff(Cutoff::Expansions(limit))
                }
                SearchOutcome::Cutoff(Cutoff::Time(_)) => {
                    let limit = self.options.time_limit.unwrap_or_default();
                    SearchOutcome::Cutoff(Cutoff::Time(limit))
                }
                outcome => outcome,
            };
            return Ok(outcome);
        }
    }
}
