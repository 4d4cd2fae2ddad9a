//! Bidirectional search: a forward search from the initial state
//! and a backward search from the goal, which stop when they meet.

use std::hash::Hash;

use log::{debug, trace};

use super::cache::{Cache, ExploredStates};
use super::{
    Budget, Cutoff, Discipline, Metrics, SearchOptions, SearchOutcome, SearchStrategy,
    PROGRESS_INTERVAL,
};
use crate::errors::Result;
use crate::frontier::Frontier;
use crate::node::{NodeArena, NodeId, Solution};
use crate::traits::{Cost, ReversibleProblem};

/// Interleaves two graph searches, one step forward then one step
/// backward, on the calling thread.
///
/// The search stops as soon as a state expanded (or generated) by one
/// direction has already been expanded by the other. When a single
/// step finds several such states, the one with the lowest combined
/// cost is used. The result is not guaranteed to be optimal.
///
/// Only the forward direction tests for the goal, and the goal test
/// always happens when a node is removed from the frontier.
///
/// Both directions order their frontier with the same discipline.
/// Heuristics estimate the distance *to* the goal, which is meaningless
/// for the backward direction, so pair this with [bfs](crate::bfs) or
/// [uniform_cost](crate::uniform_cost) rather than [astar](crate::astar)
/// or [greedy](crate::greedy).
#[derive(Debug, Clone, Copy, Default)]
pub struct BidirectionalSearch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Heading {
    Forward,
    Backward,
}

impl Heading {
    fn flip(self) -> Self {
        match self {
            Heading::Forward => Heading::Backward,
            Heading::Backward => Heading::Forward,
        }
    }
}

/// A state expanded by both directions.
#[derive(Debug, Clone, Copy)]
struct Meeting {
    forward: NodeId,
    backward: NodeId,
    cost: Cost,
}

enum Step {
    Continue,
    Goal(NodeId),
    Meet(Meeting),
    Cutoff(Cutoff),
}

struct Direction<'d, S, A> {
    heading: Heading,
    nodes: NodeArena<S, A>,
    frontier: Box<dyn Frontier<S, A> + 'd>,
    explored: ExploredStates<S>,
    cut_off: bool,
}

impl<'d, S, A> Direction<'d, S, A>
where
    S: Clone + Eq + Hash,
    A: Clone,
{
    fn new<D>(heading: Heading, discipline: &'d D, start: S) -> Result<Self>
    where
        D: Discipline<S, A>,
        S: 'd,
        A: 'd,
    {
        let mut nodes = NodeArena::new();
        let mut frontier = discipline.frontier();
        let root = nodes.root(start);
        frontier.insert(&nodes, root)?;

        Ok(Direction {
            heading,
            nodes,
            frontier,
            explored: ExploredStates::default(),
            cut_off: false,
        })
    }

    /// A meeting at node `id`, if `other` has expanded its state.
    fn meeting(&self, id: NodeId, other: &Direction<'_, S, A>) -> Option<Meeting> {
        let node = self.nodes.get(id);
        let other_id = other.explored.expanded(node.state())?;
        let cost = node.path_cost() + other.nodes.get(other_id).path_cost();

        Some(match self.heading {
            Heading::Forward => Meeting {
                forward: id,
                backward: other_id,
                cost,
            },
            Heading::Backward => Meeting {
                forward: other_id,
                backward: id,
                cost,
            },
        })
    }
}

fn step<P>(
    this: &mut Direction<'_, P::State, P::Action>,
    other: &Direction<'_, P::State, P::Action>,
    problem: &P,
    options: &SearchOptions,
    budget: &Budget,
    metrics: &mut Metrics,
) -> Result<Step>
where
    P: ReversibleProblem,
{
    let id = this.frontier.remove_first()?;
    let node = this.nodes.get(id);

    if this.heading == Heading::Forward && problem.is_goal(node.state())? {
        return Ok(Step::Goal(id));
    }

    if let Some(limit) = options.depth_limit {
        if node.depth() >= limit {
            this.cut_off = true;
            return Ok(Step::Continue);
        }
    }

    if let Some(cutoff) = budget.exhausted(metrics.nodes_expanded) {
        return Ok(Step::Cutoff(cutoff));
    }

    if !this.explored.check(node.state(), id) {
        return Ok(Step::Continue);
    }

    let mut best = this.meeting(id, other);
    let children = match this.heading {
        Heading::Forward => this.nodes.expand(id, problem)?,
        Heading::Backward => this.nodes.expand_backward(id, problem)?,
    };
    metrics.nodes_expanded += 1;

    for child in children {
        if let Some(meeting) = this.meeting(child, other) {
            trace!(
                "Directions meet at {:?} with cost {}",
                this.nodes.get(child).state(),
                meeting.cost
            );
            if best.map_or(true, |b| meeting.cost < b.cost) {
                best = Some(meeting);
            }
        }
        this.explored.offer(this.frontier.as_mut(), &this.nodes, child)?;
    }

    if metrics.nodes_expanded % PROGRESS_INTERVAL == 0 {
        debug!(
            "{:?} F{} E{} expanded={}",
            this.heading,
            this.frontier.len(),
            this.explored.len(),
            metrics.nodes_expanded
        );
    }

    Ok(best.map_or(Step::Continue, Step::Meet))
}

/// Stitch the forward path to the meeting point onto the reversed
/// backward path from the meeting point to the goal.
fn join<S, A>(
    forward: &Direction<'_, S, A>,
    backward: &Direction<'_, S, A>,
    meeting: Meeting,
) -> Solution<S, A>
where
    S: Clone + Eq + Hash,
    A: Clone,
{
    let mut solution = forward.nodes.solution(meeting.forward);
    let path = backward.nodes.path(meeting.backward);

    solution.actions.extend(
        path.iter()
            .rev()
            .filter_map(|id| backward.nodes.get(*id).action().cloned()),
    );
    solution.cost = meeting.cost;
    solution.goal = backward.nodes.get(path[0]).state().clone();
    solution
}

impl<P> SearchStrategy<P> for BidirectionalSearch
where
    P: ReversibleProblem,
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
        let budget = Budget::new(options);
        let mut forward = Direction::new(Heading::Forward, discipline, problem.initial_state())?;
        let mut backward = Direction::new(Heading::Backward, discipline, problem.goal_state())?;
        metrics.record_frontier(2);

        let mut heading = Heading::Forward;
        while !forward.frontier.is_empty() && !backward.frontier.is_empty() {
            let outcome = match heading {
                Heading::Forward => {
                    step(&mut forward, &backward, problem, options, &budget, metrics)?
                }
                Heading::Backward => {
                    step(&mut backward, &forward, problem, options, &budget, metrics)?
                }
            };
            metrics.record_frontier(forward.frontier.len() + backward.frontier.len());

            match outcome {
                Step::Continue => {}
                Step::Goal(id) => return Ok(SearchOutcome::Found(forward.nodes.solution(id))),
                Step::Meet(meeting) => {
                    debug!(
                        "Bidirectional search met after {} expansions, cost {}",
                        metrics.nodes_expanded, meeting.cost
                    );
                    return Ok(SearchOutcome::Found(join(&forward, &backward, meeting)));
                }
                Step::Cutoff(cutoff) => return Ok(SearchOutcome::Cutoff(cutoff)),
            }
            heading = heading.flip();
        }

        match options.depth_limit {
            Some(limit) if forward.cut_off || backward.cut_off => {
                Ok(SearchOutcome::Cutoff(Cutoff::Depth(limit)))
            }
            _ => Ok(SearchOutcome::NoSolution),
        }
    }
}
