//! Generalized search algorithms over implicit state spaces.
//!
//! To use these search algorithms, implement the trait [Problem], which
//! describes the initial state, the actions available in each state, and
//! the goal. Then pick an algorithm:
//!
//! - uninformed: [bfs], [dfs], [depth_limited], [IterativeDeepeningSearch]
//!   and [uniform_cost],
//! - informed, with a [Heuristic]: [greedy], [astar] and [weighted_astar],
//! - or any [EvaluationFunction] with [best_first].
//!
//! Each algorithm also takes a strategy: [TreeSearch] re-expands repeated
//! states, [GraphSearch] expands each state once, and [BidirectionalSearch]
//! searches from both ends of a [ReversibleProblem].
//!
//! ```
//! use searcher::{uniform_cost, Graph, GraphSearch};
//!
//! let mut builder = Graph::builder();
//! builder.insert('A', 'B', 1.0);
//! builder.insert('A', 'C', 5.0);
//! builder.insert('B', 'D', 1.0);
//! builder.insert('C', 'D', 1.0);
//! let problem = builder.build().into_problem('A', 'D');
//!
//! let mut search = uniform_cost(&problem, GraphSearch);
//! let solution = search.search().unwrap().into_solution().unwrap();
//! assert_eq!(solution.actions, vec!['B', 'D']);
//! assert_eq!(solution.cost, 2.0);
//! ```

pub mod algorithm;
mod errors;
pub mod evaluation;
pub mod frontier;
pub mod graph;
mod node;
mod traits;

#[cfg(test)]
mod testing;

pub use errors::Result as SearchResult;
pub use errors::SearchError;
pub use traits::{Cost, Heuristic, Problem, ReversibleProblem};

pub use node::{Node, NodeArena, NodeId, Solution};

pub use evaluation::{
    AStarEvaluation, AcceptsHeuristic, EvaluationFunction, GreedyEvaluation, PathCost,
};
pub use frontier::{FifoFrontier, Frontier, LifoFrontier, PriorityFrontier};
pub use graph::{Graph, GraphBuilder, GraphProblem};

pub use algorithm::bidirectional::BidirectionalSearch;
pub use algorithm::cache::{Cache, ExploredStates, NoCache};
pub use algorithm::strategy::{GraphSearch, TreeSearch};
pub use algorithm::{
    best_first, BestFirstSearch, Cutoff, Discipline, Fifo, Lifo, Metrics, Prioritized,
    SearchAlgorithm, SearchOptions, SearchOutcome, SearchStrategy,
};

pub use algorithm::astar::{astar, weighted_astar, AStarSearch};
pub use algorithm::basic::{
    bfs, depth_limited, dfs, BreadthFirstSearch, DepthFirstSearch, IterativeDeepeningSearch,
};
pub use algorithm::dijkstra::{uniform_cost, UniformCostSearch};
pub use algorithm::greedy::{greedy, GreedyBestFirstSearch};
