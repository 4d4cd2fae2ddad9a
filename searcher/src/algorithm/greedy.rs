//! Greedy best first search.

use super::{best_first, BestFirstSearch};
use crate::evaluation::GreedyEvaluation;
use crate::traits::{Heuristic, Problem};

/// Best first search ordered by the heuristic alone.
pub type GreedyBestFirstSearch<'p, P, St> =
    BestFirstSearch<'p, P, GreedyEvaluation<'p, <P as Problem>::State>, St>;

/// Build a greedy best first search, which always expands the node
/// that appears closest to the goal. Fast, but neither optimal nor
/// (under tree search) complete.
pub fn greedy<'p, P, H, St>(
    problem: &'p P,
    heuristic: H,
    strategy: St,
) -> GreedyBestFirstSearch<'p, P, St>
where
    P: Problem,
    H: Heuristic<P::State> + 'p,
{
    best_first(problem, GreedyEvaluation::new(Box::new(heuristic)), strategy)
}
