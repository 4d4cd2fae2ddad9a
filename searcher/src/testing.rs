//! Fixtures shared by the unit tests.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use anyhow::{anyhow, bail};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::graph::{Graph, GraphProblem};
use crate::node::Solution;
use crate::traits::{Cost, Heuristic, Problem};

/// A->B (1), A->C (5), B->D (1), C->D (1), from A to D.
pub(crate) fn diamond() -> GraphProblem<char> {
    let mut builder = Graph::builder();
    builder.insert('A', 'B', 1.0);
    builder.insert('A', 'C', 5.0);
    builder.insert('B', 'D', 1.0);
    builder.insert('C', 'D', 1.0);
    builder.build().into_problem('A', 'D')
}

/// A and B lead to each other, the goal C is not connected.
pub(crate) fn cycle() -> GraphProblem<char> {
    let mut builder = Graph::builder();
    builder.insert('A', 'B', 1.0);
    builder.insert('B', 'A', 1.0);
    builder.node('C');
    builder.build().into_problem('A', 'C')
}

/// A->B->C, the goal Z is not connected.
pub(crate) fn unreachable() -> GraphProblem<char> {
    let mut builder = Graph::builder();
    builder.insert('A', 'B', 1.0);
    builder.insert('B', 'C', 1.0);
    builder.node('Z');
    builder.build().into_problem('A', 'Z')
}

/// A grid of unit cost moves from the top left to the bottom right
/// corner, with some cells walled off.
pub(crate) fn grid(
    width: usize,
    height: usize,
    walls: &[(usize, usize)],
) -> GraphProblem<(usize, usize)> {
    let walls: HashSet<_> = walls.iter().copied().collect();
    let mut builder = Graph::builder();

    for y in 0..height {
        for x in 0..width {
            if walls.contains(&(x, y)) {
                continue;
            }
            builder.node((x, y));
            if x + 1 < width && !walls.contains(&(x + 1, y)) {
                builder.insert_undirected((x, y), (x + 1, y), 1.0);
            }
            if y + 1 < height && !walls.contains(&(x, y + 1)) {
                builder.insert_undirected((x, y), (x, y + 1), 1.0);
            }
        }
    }
    builder.build().into_problem((0, 0), (width - 1, height - 1))
}

pub(crate) fn manhattan(a: (usize, usize), b: (usize, usize)) -> Cost {
    let dx = (a.0 as isize - b.0 as isize).abs();
    let dy = (a.1 as isize - b.1 as isize).abs();
    (dx + dy) as Cost
}

/// A random directed graph with weights in [0, 10), from node 0 to the last node.
pub(crate) fn random_graph(seed: u64, nodes: usize, edges: usize) -> GraphProblem<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = Graph::builder();
    for n in 0..nodes {
        builder.node(n);
    }
    for _ in 0..edges {
        let origin = rng.gen_range(0..nodes);
        let destination = rng.gen_range(0..nodes);
        builder.insert(origin, destination, rng.gen_range(0.0..10.0));
    }
    builder.build().into_problem(0, nodes - 1)
}

/// Cheapest cost from start to goal, by a plain Dijkstra over the
/// whole graph. Infinite when the goal can't be reached.
pub(crate) fn reference_cost<N>(problem: &GraphProblem<N>) -> Cost
where
    N: Debug + Clone + Hash + Eq,
{
    let graph = problem.graph();
    let mut distance: HashMap<N, Cost> = HashMap::new();
    let mut done: HashSet<N> = HashSet::new();
    distance.insert(problem.start(), 0.0);

    loop {
        let next = distance
            .iter()
            .filter(|(n, _)| !done.contains(*n))
            .min_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(n, d)| (n.clone(), *d));

        let (node, d) = match next {
            Some(next) => next,
            None => return Cost::INFINITY,
        };
        if node == problem.goal() {
            return d;
        }
        done.insert(node.clone());

        for (neighbor, weight) in graph.edges(&node) {
            let candidate = d + weight;
            let best = distance.entry(neighbor.clone()).or_insert(Cost::INFINITY);
            if candidate < *best {
                *best = candidate;
            }
        }
    }
}

/// Apply a solution's actions from the initial state, returning the
/// final state and the summed step costs.
pub(crate) fn replay<P>(problem: &P, solution: &Solution<P::State, P::Action>) -> (P::State, Cost)
where
    P: Problem,
{
    let mut state = problem.initial_state();
    let mut cost = 0.0;
    for action in &solution.actions {
        let next = problem.result(&state, action).unwrap();
        cost += problem.step_cost(&state, action, &next).unwrap();
        state = next;
    }
    assert!(problem.is_goal(&state).unwrap());
    (state, cost)
}

/// Counts upwards from zero forever.
#[derive(Debug)]
pub(crate) struct Counter {
    goal: u64,
}

pub(crate) fn counter(goal: u64) -> Counter {
    Counter { goal }
}

impl Problem for Counter {
    type State = u64;
    type Action = u64;

    fn initial_state(&self) -> u64 {
        0
    }

    fn actions(&self, _state: &u64) -> anyhow::Result<Vec<u64>> {
        Ok(vec![1])
    }

    fn result(&self, state: &u64, action: &u64) -> anyhow::Result<u64> {
        Ok(state + action)
    }

    fn is_goal(&self, state: &u64) -> anyhow::Result<bool> {
        Ok(*state == self.goal)
    }
}

/// A problem whose actions can never be listed.
#[derive(Debug)]
pub(crate) struct FailingProblem;

impl Problem for FailingProblem {
    type State = u32;
    type Action = u32;

    fn initial_state(&self) -> u32 {
        0
    }

    fn actions(&self, state: &u32) -> anyhow::Result<Vec<u32>> {
        bail!("actions exploded at {}", state)
    }

    fn result(&self, state: &u32, action: &u32) -> anyhow::Result<u32> {
        Ok(state + action)
    }

    fn is_goal(&self, _state: &u32) -> anyhow::Result<bool> {
        Ok(false)
    }
}

#[derive(Debug)]
pub(crate) struct FailingHeuristic;

impl<S> Heuristic<S> for FailingHeuristic {
    fn estimate(&self, _state: &S) -> anyhow::Result<Cost> {
        Err(anyhow!("heuristic exploded"))
    }
}
