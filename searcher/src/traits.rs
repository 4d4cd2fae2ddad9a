use std::fmt::Debug;
use std::hash::Hash;

/// Numeric type used for step costs, path costs and scores.
pub type Cost = f64;

/// Provides an interface for defining search problems.
///
/// The search algorithms only see a problem through these
/// methods. Any callback may fail, in which case the error is
/// handed back to the caller of the search unchanged.
pub trait Problem {
    /// States must be hashable so that graph searches can
    /// recognize states they have already expanded.
    type State: Debug + Clone + Eq + Hash;
    type Action: Debug + Clone;

    fn initial_state(&self) -> Self::State;

    /// Actions applicable in `state`. The returned list must be
    /// finite, and its order is the order children are generated in.
    fn actions(&self, state: &Self::State) -> anyhow::Result<Vec<Self::Action>>;

    /// Deterministic transition model.
    fn result(&self, state: &Self::State, action: &Self::Action) -> anyhow::Result<Self::State>;

    /// Cost of moving from `state` to `next` via `action`. Must not
    /// be negative. Defaults to unit cost.
    #[allow(unused_variables)]
    fn step_cost(
        &self,
        state: &Self::State,
        action: &Self::Action,
        next: &Self::State,
    ) -> anyhow::Result<Cost> {
        Ok(1.0)
    }

    fn is_goal(&self, state: &Self::State) -> anyhow::Result<bool>;
}

/// A problem which can also be searched backwards from a goal.
///
/// Required by bidirectional search.
pub trait ReversibleProblem: Problem {
    /// The goal state the backward search starts from.
    fn goal_state(&self) -> Self::State;

    /// Every `(action, predecessor)` pair such that applying
    /// `action` in `predecessor` produces `state`.
    fn predecessors(
        &self,
        state: &Self::State,
    ) -> anyhow::Result<Vec<(Self::Action, Self::State)>>;
}

/// An estimate of the remaining cost from a state to the goal.
///
/// Admissibility and consistency are up to the implementor,
/// the search algorithms do not check them.
pub trait Heuristic<S> {
    fn estimate(&self, state: &S) -> anyhow::Result<Cost>;
}

impl<S, F> Heuristic<S> for F
where
    F: Fn(&S) -> Cost,
{
    fn estimate(&self, state: &S) -> anyhow::Result<Cost> {
        Ok(self(state))
    }
}
