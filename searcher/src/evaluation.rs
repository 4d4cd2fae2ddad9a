//! Evaluation functions, used to order a priority frontier.
//!
//! Lower scores are expanded first. The score of a node is
//! computed once, when it is inserted into the frontier.

use crate::errors::Result;
use crate::node::Node;
use crate::traits::{Cost, Heuristic};

/// Maps a node to the score used to order the frontier.
///
/// Implementations must be deterministic and free of side effects,
/// otherwise the frontier order (and so the search result) will
/// not be reproducible.
pub trait EvaluationFunction<S, A> {
    fn f(&self, node: &Node<S, A>) -> Result<Cost>;
}

/// Evaluation functions which depend on a heuristic.
///
/// Only these expose a way to swap the heuristic out. The heuristic
/// may borrow data (such as a distance table) for `'h`.
pub trait AcceptsHeuristic<'h, S> {
    fn set_heuristic(&mut self, heuristic: Box<dyn Heuristic<S> + 'h>);

    fn heuristic(&self) -> &(dyn Heuristic<S> + 'h);
}

/// Path cost so far, `f(n) = g(n)`.
///
/// Ordering by path cost gives uniform cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathCost;

impl<S, A> EvaluationFunction<S, A> for PathCost {
    fn f(&self, node: &Node<S, A>) -> Result<Cost> {
        Ok(node.path_cost())
    }
}

/// `f(n) = g(n) + w * h(n)`, the A* evaluation function.
///
/// With the default weight of 1 and a consistent heuristic, a
/// graph search ordered by this function is optimal. Weights
/// above 1 trade optimality for fewer expansions.
pub struct AStarEvaluation<'h, S> {
    heuristic: Box<dyn Heuristic<S> + 'h>,
    weight: Cost,
}

impl<'h, S> AStarEvaluation<'h, S> {
    pub fn new(heuristic: Box<dyn Heuristic<S> + 'h>) -> Self {
        Self::weighted(heuristic, 1.0)
    }

    pub fn weighted(heuristic: Box<dyn Heuristic<S> + 'h>, weight: Cost) -> Self {
        Self { heuristic, weight }
    }

    pub fn weight(&self) -> Cost {
        self.weight
    }
}

impl<'h, S, A> EvaluationFunction<S, A> for AStarEvaluation<'h, S> {
    fn f(&self, node: &Node<S, A>) -> Result<Cost> {
        let h = self.heuristic.estimate(node.state())?;
        Ok(node.path_cost() + self.weight * h)
    }
}

impl<'h, S> AcceptsHeuristic<'h, S> for AStarEvaluation<'h, S> {
    fn set_heuristic(&mut self, heuristic: Box<dyn Heuristic<S> + 'h>) {
        self.heuristic = heuristic;
    }

    fn heuristic(&self) -> &(dyn Heuristic<S> + 'h) {
        self.heuristic.as_ref()
    }
}

/// `f(n) = h(n)`, ignoring the cost paid so far.
pub struct GreedyEvaluation<'h, S> {
    heuristic: Box<dyn Heuristic<S> + 'h>,
}

impl<'h, S> GreedyEvaluation<'h, S> {
    pub fn new(heuristic: Box<dyn Heuristic<S> + 'h>) -> Self {
        Self { heuristic }
    }
}

impl<'h, S, A> EvaluationFunction<S, A> for GreedyEvaluation<'h, S> {
    fn f(&self, node: &Node<S, A>) -> Result<Cost> {
        Ok(self.heuristic.estimate(node.state())?)
    }
}

impl<'h, S> AcceptsHeuristic<'h, S> for GreedyEvaluation<'h, S> {
    fn set_heuristic(&mut self, heuristic: Box<dyn Heuristic<S> + 'h>) {
        self.heuristic = heuristic;
    }

    fn heuristic(&self) -> &(dyn Heuristic<S> + 'h) {
        self.heuristic.as_ref()
    }
}
