//! Weighted directed graphs, and the search problem of finding a
//! path between two of their nodes.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use anyhow::{anyhow, bail};
use log::debug;

use crate::traits::{Cost, Problem, ReversibleProblem};

type Edges = Vec<(usize, Cost)>;

/// Collects edges for a [Graph].
#[derive(Debug)]
pub struct GraphBuilder<N> {
    graph: Graph<N>,
}

impl<N> Default for GraphBuilder<N> {
    fn default() -> Self {
        Self {
            graph: Graph {
                nodes: Vec::new(),
                index: HashMap::new(),
                outgoing: Vec::new(),
                incoming: Vec::new(),
            },
        }
    }
}

impl<N> GraphBuilder<N>
where
    N: Debug + Clone + Hash + Eq,
{
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with no edges. Nodes are also added
    /// implicitly by [GraphBuilder::insert].
    pub fn node(&mut self, node: N) -> &mut Self {
        self.graph.intern(node);
        self
    }

    /// Add an edge from `origin` to `destination`.
    ///
    /// Returns false when the edge was rejected: self loops and
    /// negative or non-finite weights are never added. When the
    /// edge already exists, the lower weight is kept.
    pub fn insert(&mut self, origin: N, destination: N, weight: Cost) -> bool {
        if origin == destination || !weight.is_finite() || weight < 0.0 {
            return false;
        }

        let o = self.graph.intern(origin);
        let d = self.graph.intern(destination);

        let forward = &mut self.graph.outgoing[o];
        if let Some(edge) = forward.iter_mut().find(|(n, _)| *n == d) {
            if weight < edge.1 {
                edge.1 = weight;
                if let Some(back) = self.graph.incoming[d].iter_mut().find(|(n, _)| *n == o) {
                    back.1 = weight;
                }
            }
            return true;
        }

        forward.push((d, weight));
        self.graph.incoming[d].push((o, weight));
        true
    }

    /// Add an edge in both directions.
    pub fn insert_undirected(&mut self, a: N, b: N, weight: Cost) -> bool {
        self.insert(a.clone(), b.clone(), weight) && self.insert(b, a, weight)
    }

    pub fn build(self) -> Graph<N> {
        debug!(
            "Built graph with {} nodes and {} edges",
            self.graph.len(),
            self.graph.outgoing.iter().map(Vec::len).sum::<usize>()
        );
        self.graph
    }
}

/// A weighted directed graph.
///
/// Edges are kept in the order they were first inserted, which is
/// also the order searches will generate them in.
#[derive(Debug, Clone)]
pub struct Graph<N> {
    nodes: Vec<N>,
    index: HashMap<N, usize>,
    outgoing: Vec<Edges>,
    incoming: Vec<Edges>,
}

impl<N> Graph<N>
where
    N: Debug + Clone + Hash + Eq,
{
    pub fn builder() -> GraphBuilder<N> {
        GraphBuilder::new()
    }

    fn intern(&mut self, node: N) -> usize {
        if let Some(i) = self.index.get(&node) {
            return *i;
        }
        let i = self.nodes.len();
        self.index.insert(node.clone(), i);
        self.nodes.push(node);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        i
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.iter()
    }

    fn neighbors<'g>(
        &'g self,
        edges: &'g [Edges],
        node: &N,
    ) -> impl Iterator<Item = (&'g N, Cost)> + 'g {
        self.index
            .get(node)
            .map(|i| edges[*i].as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |(n, w)| (&self.nodes[*n], *w))
    }

    /// Edges leaving `node`, as (destination, weight).
    ///
    /// Empty when `node` is not in the graph.
    pub fn edges(&self, node: &N) -> impl Iterator<Item = (&N, Cost)> {
        self.neighbors(&self.outgoing, node)
    }

    /// Edges arriving at `node`, as (origin, weight).
    pub fn predecessors(&self, node: &N) -> impl Iterator<Item = (&N, Cost)> {
        self.neighbors(&self.incoming, node)
    }

    /// Weight of the edge from `origin` to `destination`.
    pub fn weight(&self, origin: &N, destination: &N) -> Option<Cost> {
        self.edges(origin).find(|(n, _)| *n == destination).map(|(_, w)| w)
    }

    /// The problem of finding a path from `start` to `goal`.
    pub fn into_problem(self, start: N, goal: N) -> GraphProblem<N> {
        GraphProblem {
            graph: self,
            start,
            goal,
        }
    }
}

/// Find a path between two nodes of a [Graph].
///
/// Actions are the node to move to, and step costs are edge weights.
#[derive(Debug, Clone)]
pub struct GraphProblem<N> {
    graph: Graph<N>,
    start: N,
    goal: N,
}

impl<N> GraphProblem<N>
where
    N: Debug + Clone + Hash + Eq,
{
    pub fn graph(&self) -> &Graph<N> {
        &self.graph
    }

    pub fn start(&self) -> N {
        self.start.clone()
    }

    pub fn goal(&self) -> N {
        self.goal.clone()
    }

    /// The same graph, with a different goal.
    pub fn with_goal(mut self, goal: N) -> Self {
        self.goal = goal;
        self
    }
}

impl<N> Problem for GraphProblem<N>
where
    N: Debug + Clone + Hash + Eq,
{
    type State = N;
    type Action = N;

    fn initial_state(&self) -> N {
        self.start.clone()
    }

    fn actions(&self, state: &N) -> anyhow::Result<Vec<N>> {
        if !self.graph.contains_node(state) {
            bail!("{:?} is not a node", state);
        }
        Ok(self.graph.edges(state).map(|(n, _)| n.clone()).collect())
    }

    fn result(&self, state: &N, action: &N) -> anyhow::Result<N> {
        if self.graph.weight(state, action).is_none() {
            bail!("No edge from {:?} to {:?}", state, action);
        }
        Ok(action.clone())
    }

    fn step_cost(&self, state: &N, _action: &N, next: &N) -> anyhow::Result<Cost> {
        self.graph
            .weight(state, next)
            .ok_or_else(|| anyhow!("No edge from {:?} to {:?}", state, next))
    }

    fn is_goal(&self, state: &N) -> anyhow::Result<bool> {
        Ok(*state == self.goal)
    }
}

impl<N> ReversibleProblem for GraphProblem<N>
where
    N: Debug + Clone + Hash + Eq,
{
    fn goal_state(&self) -> N {
        self.goal.clone()
    }

    fn predecessors(&self, state: &N) -> anyhow::Result<Vec<(N, N)>> {
        if !self.graph.contains_node(state) {
            bail!("{:?} is not a node", state);
        }
        Ok(self
            .graph
            .predecessors(state)
            .map(|(n, _)| (state.clone(), n.clone()))
            .collect())
    }
}
