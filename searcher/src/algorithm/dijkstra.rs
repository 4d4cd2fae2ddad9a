//! Uniform cost search, Dijkstra's algorithm over an implicit graph.

use super::{best_first, BestFirstSearch};
use crate::evaluation::PathCost;

/// Best first search ordered by path cost.
pub type UniformCostSearch<'p, P, St> = BestFirstSearch<'p, P, PathCost, St>;

/// Build a uniform cost search.
///
/// Uniform cost search always expands the cheapest path found so
/// far, even when paths have different lengths. With non-negative
/// step costs and [GraphSearch](crate::GraphSearch), the first
/// goal removed from the frontier is reached by a cheapest path.
pub fn uniform_cost<P, St>(problem: &P, strategy: St) -> UniformCostSearch<'_, P, St> {
    best_first(problem, PathCost, strategy)
}
