//! Provides the building blocks for search algorithms

use std::default::Default;
use std::hash::Hash;
use std::time::{Duration, Instant};

use log::debug;

use crate::errors::Result;
use crate::evaluation::{AcceptsHeuristic, EvaluationFunction};
use crate::frontier::{FifoFrontier, Frontier, LifoFrontier, PriorityFrontier};
use crate::node::Solution;
use crate::traits::{Cost, Heuristic, Problem};

pub(crate) mod astar;
pub(crate) mod basic;
pub(crate) mod bidirectional;
pub(crate) mod cache;
pub(crate) mod dijkstra;
pub(crate) mod greedy;
pub(crate) mod strategy;

pub use strategy::SearchStrategy;

/// How often (in expansions) to log search progress.
pub(crate) const PROGRESS_INTERVAL: usize = 10_000;

/// Options which bound a search.
///
/// Every limit is off by default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    /// Nodes at this depth are not expanded. When any node is
    /// cut off this way, an exhausted search reports
    /// [Cutoff::Depth] rather than [SearchOutcome::NoSolution].
    pub depth_limit: Option<usize>,

    /// Stop after expanding this many nodes.
    pub expansion_limit: Option<usize>,

    /// Stop once the search has run this long.
    pub time_limit: Option<Duration>,

    /// Test for the goal when a node is generated, rather
    /// than when it is removed from the frontier.
    pub early_goal_test: bool,
}

impl SearchOptions {
    pub fn with_depth_limit(mut self, limit: usize) -> Self {
        self.depth_limit = Some(limit);
        self
    }

    pub fn with_expansion_limit(mut self, limit: usize) -> Self {
        self.expansion_limit = Some(limit);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_early_goal_test(mut self, early: bool) -> Self {
        self.early_goal_test = early;
        self
    }
}

/// Why a search stopped before running out of nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cutoff {
    /// Some node was not expanded because it sat at the depth limit.
    Depth(usize),

    /// The expansion limit was reached.
    Expansions(usize),

    /// The time limit was reached.
    Time(Duration),
}

/// The result of a search which ran to completion.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<S, A> {
    Found(Solution<S, A>),

    /// The frontier was exhausted without reaching a goal.
    NoSolution,

    /// A configured limit stopped the search. A deeper or
    /// longer search might still succeed.
    Cutoff(Cutoff),
}

impl<S, A> SearchOutcome<S, A> {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn solution(&self) -> Option<&Solution<S, A>> {
        match self {
            SearchOutcome::Found(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn into_solution(self) -> Option<Solution<S, A>> {
        match self {
            SearchOutcome::Found(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn cutoff(&self) -> Option<Cutoff> {
        match self {
            SearchOutcome::Cutoff(cutoff) => Some(*cutoff),
            _ => None,
        }
    }
}

/// Counters collected while searching.
///
/// These are informational only, the search does not depend on them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metrics {
    pub nodes_expanded: usize,

    /// Number of nodes left in the frontier when the search stopped.
    pub frontier_size: usize,

    pub max_frontier_size: usize,

    /// Cost of the solution, if one was found.
    pub path_cost: Option<Cost>,
}

impl Metrics {
    pub(crate) fn record_frontier(&mut self, size: usize) {
        self.frontier_size = size;
        if size > self.max_frontier_size {
            self.max_frontier_size = size;
        }
    }
}

/// Tracks the expansion and time limits for a single search.
#[derive(Debug)]
pub(crate) struct Budget {
    expansions: Option<usize>,
    time: Option<(Instant, Duration)>,
}

impl Budget {
    pub(crate) fn new(options: &SearchOptions) -> Self {
        Self {
            expansions: options.expansion_limit,
            time: options.time_limit.map(|limit| (Instant::now(), limit)),
        }
    }

    /// Returns the limit which has been reached, if any.
    pub(crate) fn exhausted(&self, expanded: usize) -> Option<Cutoff> {
        if let Some(limit) = self.expansions {
            if expanded >= limit {
                return Some(Cutoff::Expansions(limit));
            }
        }
        if let Some((start, limit)) = self.time {
            if start.elapsed() >= limit {
                return Some(Cutoff::Time(limit));
            }
        }
        None
    }
}

/// Decides the order of the frontier, by creating
/// a fresh frontier for each search.
pub trait Discipline<S, A> {
    fn frontier<'d>(&'d self) -> Box<dyn Frontier<S, A> + 'd>
    where
        S: 'd,
        A: 'd;
}

/// First-in-first-out ordering.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fifo;

impl<S, A> Discipline<S, A> for Fifo
where
    S: Clone + Eq + Hash,
    A: Clone,
{
    fn frontier<'d>(&'d self) -> Box<dyn Frontier<S, A> + 'd>
    where
        S: 'd,
        A: 'd,
    {
        Box::new(FifoFrontier::new())
    }
}

/// Last-in-first-out ordering.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lifo;

impl<S, A> Discipline<S, A> for Lifo
where
    S: Clone + Eq + Hash,
    A: Clone,
{
    fn frontier<'d>(&'d self) -> Box<dyn Frontier<S, A> + 'd>
    where
        S: 'd,
        A: 'd,
    {
        Box::new(LifoFrontier::new())
    }
}

/// Lowest score first, as scored by the evaluation function.
#[derive(Debug, Clone, Copy, Default)]
pub struct Prioritized<E>(pub E);

impl<S, A, E> Discipline<S, A> for Prioritized<E>
where
    S: Clone + Eq + Hash,
    A: Clone,
    E: EvaluationFunction<S, A>,
{
    fn frontier<'d>(&'d self) -> Box<dyn Frontier<S, A> + 'd>
    where
        S: 'd,
        A: 'd,
    {
        Box::new(PriorityFrontier::new(&self.0))
    }
}

/// Implementation of search, using generic components.
///
/// The discipline (D) picks the frontier order, and the
/// strategy (St) decides how repeated states are handled.
/// Together they provide a single foundation for every
/// search algorithm in this crate.
#[derive(Debug)]
pub struct SearchAlgorithm<'p, P, D, St> {
    problem: &'p P,
    discipline: D,
    strategy: St,
    options: SearchOptions,
    metrics: Metrics,
}

impl<'p, P, D, St> SearchAlgorithm<'p, P, D, St> {
    pub fn new(problem: &'p P, discipline: D, strategy: St) -> Self {
        SearchAlgorithm {
            problem,
            discipline,
            strategy,
            options: SearchOptions::default(),
            metrics: Metrics::default(),
        }
    }

    /// Replace the options used by this search.
    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn problem(&self) -> &P {
        self.problem
    }

    pub fn strategy(&self) -> &St {
        &self.strategy
    }

    /// Counters from the most recent call to `search`.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

impl<'p, P, D, St> SearchAlgorithm<'p, P, D, St>
where
    P: Problem,
    D: Discipline<P::State, P::Action>,
    St: SearchStrategy<P>,
{
    /// Run the search to completion.
    ///
    /// Only fails when the problem (or heuristic) fails, running
    /// out of nodes or hitting a limit is reported as an outcome.
    pub fn search(&mut self) -> Result<SearchOutcome<P::State, P::Action>> {
        self.metrics = Metrics::default();

        let outcome =
            self.strategy
                .find(self.problem, &self.discipline, &self.options, &mut self.metrics)?;

        self.metrics.path_cost = outcome.solution().map(|s| s.cost);
        debug!(
            "Search finished: found={} cutoff={:?} expanded={} max frontier={}",
            outcome.is_found(),
            outcome.cutoff(),
            self.metrics.nodes_expanded,
            self.metrics.max_frontier_size
        );
        Ok(outcome)
    }
}

/// Best first search with an arbitrary evaluation function.
pub type BestFirstSearch<'p, P, E, St> = SearchAlgorithm<'p, P, Prioritized<E>, St>;

/// Build a best first search which orders the frontier by `evaluation`.
pub fn best_first<P, E, St>(
    problem: &P,
    evaluation: E,
    strategy: St,
) -> BestFirstSearch<'_, P, E, St> {
    SearchAlgorithm::new(problem, Prioritized(evaluation), strategy)
}

impl<'p, P, E, St> SearchAlgorithm<'p, P, Prioritized<E>, St> {
    pub fn evaluation(&self) -> &E {
        &self.discipline.0
    }
}

impl<'p, P, E, St> SearchAlgorithm<'p, P, Prioritized<E>, St>
where
    P: Problem,
{
    /// Swap the heuristic used by the evaluation function.
    pub fn set_heuristic<'h>(&mut self, heuristic: Box<dyn Heuristic<P::State> + 'h>)
    where
        E: AcceptsHeuristic<'h, P::State>,
    {
        self.discipline.0.set_heuristic(heuristic);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::evaluation::PathCost;
    use crate::testing::{diamond, replay};
    use crate::GraphSearch;

    #[test]
    fn options_builder() {
        let options = SearchOptions::default()
            .with_depth_limit(3)
            .with_expansion_limit(10)
            .with_early_goal_test(true);
        assert_eq!(options.depth_limit, Some(3));
        assert_eq!(options.expansion_limit, Some(10));
        assert_eq!(options.time_limit, None);
        assert!(options.early_goal_test);
    }

    #[test]
    fn budget() {
        let budget = Budget::new(&SearchOptions::default().with_expansion_limit(2));
        assert_eq!(budget.exhausted(1), None);
        assert_eq!(budget.exhausted(2), Some(Cutoff::Expansions(2)));

        let budget = Budget::new(&SearchOptions::default().with_time_limit(Duration::from_secs(0)));
        assert_eq!(budget.exhausted(0), Some(Cutoff::Time(Duration::from_secs(0))));

        assert_eq!(Budget::new(&SearchOptions::default()).exhausted(1_000_000), None);
    }

    #[test]
    fn best_first_with_path_cost() {
        let problem = diamond();
        let mut search = best_first(&problem, PathCost, GraphSearch);
        let outcome = search.search().unwrap();

        let solution = outcome.solution().unwrap();
        assert_eq!(solution.actions, vec!['B', 'D']);
        assert_eq!(solution.cost, 2.0);
        assert_eq!(replay(&problem, solution), ('D', 2.0));

        let metrics = search.metrics();
        assert_eq!(metrics.path_cost, Some(2.0));
        assert!(metrics.nodes_expanded >= 2);
        assert!(metrics.max_frontier_size >= 2);
    }

    #[test]
    fn repeated_searches_agree() {
        let problem = crate::testing::random_graph(7, 60, 240);
        let mut search = best_first(&problem, PathCost, GraphSearch);

        let first = search.search().unwrap();
        let first_metrics = search.metrics().clone();
        let second = search.search().unwrap();

        assert_eq!(first, second);
        assert_eq!(&first_metrics, search.metrics());
    }

    #[test]
    fn outcome_accessors() {
        let outcome: SearchOutcome<char, char> = SearchOutcome::Cutoff(Cutoff::Depth(2));
        assert!(!outcome.is_found());
        assert_eq!(outcome.cutoff(), Some(Cutoff::Depth(2)));
        assert_eq!(outcome.into_solution(), None);

        let outcome: SearchOutcome<char, char> = SearchOutcome::NoSolution;
        assert_eq!(outcome.cutoff(), None);
        assert!(outcome.solution().is_none());
    }
}
