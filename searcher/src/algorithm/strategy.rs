//! Tree and graph search: the loop which expands nodes.

use log::debug;

use super::cache::{Cache, ExploredStates, NoCache};
use super::{Budget, Cutoff, Discipline, Metrics, SearchOptions, SearchOutcome, PROGRESS_INTERVAL};
use crate::errors::Result;
use crate::node::NodeArena;
use crate::traits::Problem;

/// A way of exploring the search space with a frontier.
///
/// Strategies own the expansion loop, but not the frontier
/// order, which comes from the [Discipline].
pub trait SearchStrategy<P>
where
    P: Problem,
{
    fn find<D>(
        &self,
        problem: &P,
        discipline: &D,
        options: &SearchOptions,
        metrics: &mut Metrics,
    ) -> Result<SearchOutcome<P::State, P::Action>>
    where
        D: Discipline<P::State, P::Action>;
}

/// Searches the state space as though it were a tree.
///
/// Repeated states are not detected, so this may never finish
/// when the state space contains a reachable cycle. Use a depth
/// or expansion limit, or [GraphSearch], in that case.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeSearch;

impl<P> SearchStrategy<P> for TreeSearch
where
    P: Problem,
{
    fn find<D>(
        &self,
        problem: &P,
        discipline: &D,
        options: &SearchOptions,
        metrics: &mut Metrics,
    ) -> Result<SearchOutcome<P::State, P::Action>>
    where
        D: Discipline<P::State, P::Action>,
    {
        expand_loop::<P, D, NoCache<P::State>>(problem, discipline, options, metrics)
    }
}

/// Searches the state space, expanding each state at most once.
///
/// Always terminates on a finite state space.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphSearch;

impl<P> SearchStrategy<P> for GraphSearch
where
    P: Problem,
{
    fn find<D>(
        &self,
        problem: &P,
        discipline: &D,
        options: &SearchOptions,
        metrics: &mut Metrics,
    ) -> Result<SearchOutcome<P::State, P::Action>>
    where
        D: Discipline<P::State, P::Action>,
    {
        expand_loop::<P, D, ExploredStates<P::State>>(problem, discipline, options, metrics)
    }
}

fn expand_loop<P, D, C>(
    problem: &P,
    discipline: &D,
    options: &SearchOptions,
    metrics: &mut Metrics,
) -> Result<SearchOutcome<P::State, P::Action>>
where
    P: Problem,
    D: Discipline<P::State, P::Action>,
    C: Cache<P::State>,
{
    let mut nodes = NodeArena::new();
    let mut frontier = discipline.frontier();
    let mut cache = C::default();
    let budget = Budget::new(options);
    let mut cut_off = false;

    let root = nodes.root(problem.initial_state());
    if options.early_goal_test && problem.is_goal(nodes.get(root).state())? {
        return Ok(SearchOutcome::Found(nodes.solution(root)));
    }
    frontier.insert(&nodes, root)?;
    metrics.record_frontier(frontier.len());

    while !frontier.is_empty() {
        let id = frontier.remove_first()?;
        metrics.record_frontier(frontier.len());
        let node = nodes.get(id);

        if !options.early_goal_test && problem.is_goal(node.state())? {
            return Ok(SearchOutcome::Found(nodes.solution(id)));
        }

        if let Some(limit) = options.depth_limit {
            if node.depth() >= limit {
                cut_off = true;
                continue;
            }
        }

        if let Some(cutoff) = budget.exhausted(metrics.nodes_expanded) {
            return Ok(SearchOutcome::Cutoff(cutoff));
        }

        if !cache.check(node.state(), id) {
            continue;
        }

        let children = nodes.expand(id, problem)?;
        metrics.nodes_expanded += 1;

        for child in children {
            if options.early_goal_test && problem.is_goal(nodes.get(child).state())? {
                return Ok(SearchOutcome::Found(nodes.solution(child)));
            }
            cache.offer(frontier.as_mut(), &nodes, child)?;
        }
        metrics.record_frontier(frontier.len());

        if metrics.nodes_expanded % PROGRESS_INTERVAL == 0 {
            debug!(
                "F{} E{} N{} expanded={}",
                frontier.len(),
                cache.len(),
                nodes.len(),
                metrics.nodes_expanded
            );
        }
    }

    match options.depth_limit {
        Some(limit) if cut_off => Ok(SearchOutcome::Cutoff(Cutoff::Depth(limit))),
        _ => Ok(SearchOutcome::NoSolution),
    }
}
