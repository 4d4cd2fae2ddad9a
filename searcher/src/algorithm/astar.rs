//! A* search, and its weighted variation.

use super::{best_first, BestFirstSearch};
use crate::evaluation::AStarEvaluation;
use crate::traits::{Cost, Heuristic, Problem};

/// Best first search ordered by `g(n) + w * h(n)`.
///
/// The heuristic may borrow data for as long as the problem is borrowed.
pub type AStarSearch<'p, P, St> =
    BestFirstSearch<'p, P, AStarEvaluation<'p, <P as Problem>::State>, St>;

/// Build an A* search.
///
/// With a consistent heuristic and [GraphSearch](crate::GraphSearch),
/// the solution is optimal and no state is expanded twice. An
/// admissible heuristic is enough under [TreeSearch](crate::TreeSearch).
pub fn astar<'p, P, H, St>(problem: &'p P, heuristic: H, strategy: St) -> AStarSearch<'p, P, St>
where
    P: Problem,
    H: Heuristic<P::State> + 'p,
{
    best_first(problem, AStarEvaluation::new(Box::new(heuristic)), strategy)
}

/// Build an A* search which inflates the heuristic by `weight`.
///
/// The solution costs at most `weight` times the optimal cost
/// when the heuristic is admissible.
pub fn weighted_astar<'p, P, H, St>(
    problem: &'p P,
    heuristic: H,
    weight: Cost,
    strategy: St,
) -> AStarSearch<'p, P, St>
where
    P: Problem,
    H: Heuristic<P::State> + 'p,
{
    let evaluation = AStarEvaluation::weighted(Box::new(heuristic), weight);
    best_first(problem, evaluation, strategy)
}
