//! Search nodes, and the arena which owns them during a search.

use crate::errors::Result;
use crate::traits::{Cost, Problem, ReversibleProblem};

/// Handle to a node stored in a [NodeArena].
///
/// Handles are only meaningful for the arena which created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A state, along with how the search reached it.
///
/// Nodes are never modified after they are created. The parent
/// link is a handle into the same arena, so the chain of parents
/// always ends at the root.
#[derive(Debug, Clone)]
pub struct Node<S, A> {
    state: S,
    parent: Option<NodeId>,
    action: Option<A>,
    path_cost: Cost,
    depth: usize,
}

impl<S, A> Node<S, A> {
    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The action which produced this node from its parent,
    /// `None` for the root.
    pub fn action(&self) -> Option<&A> {
        self.action.as_ref()
    }

    /// Cost of the path from the root to this node, `g(n)`.
    pub fn path_cost(&self) -> Cost {
        self.path_cost
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Storage for every node created by a single search.
#[derive(Debug)]
pub struct NodeArena<S, A> {
    nodes: Vec<Node<S, A>>,
}

impl<S, A> Default for NodeArena<S, A> {
    fn default() -> Self {
        NodeArena { nodes: Vec::new() }
    }
}

impl<S, A> NodeArena<S, A>
where
    S: Clone,
    A: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node.
    ///
    /// Panics when given a handle from a different arena which
    /// is out of range for this one.
    pub fn get(&self, id: NodeId) -> &Node<S, A> {
        &self.nodes[id.0]
    }

    fn push(&mut self, node: Node<S, A>) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Add a root node for `state`.
    pub fn root(&mut self, state: S) -> NodeId {
        self.push(Node {
            state,
            parent: None,
            action: None,
            path_cost: 0.0,
            depth: 0,
        })
    }

    /// Add a child of `parent`, reached via `action` at `step_cost`.
    pub fn child(&mut self, parent: NodeId, action: A, state: S, step_cost: Cost) -> NodeId {
        let (path_cost, depth) = {
            let p = self.get(parent);
            (p.path_cost + step_cost, p.depth + 1)
        };
        self.push(Node {
            state,
            parent: Some(parent),
            action: Some(action),
            path_cost,
            depth,
        })
    }

    /// Create a child node for every action the problem allows
    /// from the state at `parent`, in the order the problem lists them.
    pub fn expand<P>(&mut self, parent: NodeId, problem: &P) -> Result<Vec<NodeId>>
    where
        P: Problem<State = S, Action = A> + ?Sized,
    {
        let state = self.get(parent).state.clone();
        let actions = problem.actions(&state)?;

        let mut children = Vec::with_capacity(actions.len());
        for action in actions {
            let next = problem.result(&state, &action)?;
            let cost = problem.step_cost(&state, &action, &next)?;
            children.push(self.child(parent, action, next, cost));
        }
        Ok(children)
    }

    /// Create a child node for every predecessor of the state at `parent`.
    ///
    /// Used when searching backwards from a goal: the child's action
    /// leads from the child's state to the parent's state.
    pub fn expand_backward<P>(&mut self, parent: NodeId, problem: &P) -> Result<Vec<NodeId>>
    where
        P: ReversibleProblem<State = S, Action = A> + ?Sized,
    {
        let state = self.get(parent).state.clone();
        let predecessors = problem.predecessors(&state)?;

        let mut children = Vec::with_capacity(predecessors.len());
        for (action, previous) in predecessors {
            let cost = problem.step_cost(&previous, &action, &state)?;
            children.push(self.child(parent, action, previous, cost));
        }
        Ok(children)
    }

    /// Handles from the root down to `id`, inclusive.
    pub fn path(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = self.get(id).parent;
        while let Some(parent) = current {
            path.push(parent);
            current = self.get(parent).parent;
        }
        path.reverse();
        path
    }

    /// Actions taken from the root to reach `id`.
    pub fn actions(&self, id: NodeId) -> Vec<A> {
        self.path(id)
            .into_iter()
            .filter_map(|n| self.get(n).action.clone())
            .collect()
    }

    /// Build the solution which ends at `id`.
    pub fn solution(&self, id: NodeId) -> Solution<S, A> {
        let node = self.get(id);
        Solution {
            actions: self.actions(id),
            cost: node.path_cost,
            goal: node.state.clone(),
        }
    }
}

/// A successful search result.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<S, A> {
    /// Actions from the initial state to the goal.
    pub actions: Vec<A>,

    /// Total path cost of the actions.
    pub cost: Cost,

    /// The goal state which ended the search.
    pub goal: S,
}

impl<S, A> Solution<S, A> {
    /// Number of steps in the solution.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// True when the initial state was already a goal.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::diamond;

    #[test]
    fn root() {
        let mut nodes: NodeArena<char, char> = NodeArena::new();
        let root = nodes.root('A');

        let node = nodes.get(root);
        assert!(node.is_root());
        assert_eq!(node.depth(), 0);
        assert_eq!(node.path_cost(), 0.0);
        assert_eq!(node.action(), None);
    }

    #[test]
    fn expand_accumulates_cost_and_depth() {
        let problem = diamond();
        let mut nodes = NodeArena::new();
        let root = nodes.root('A');

        let children = nodes.expand(root, &problem).unwrap();
        let states: Vec<char> = children.iter().map(|c| *nodes.get(*c).state()).collect();
        assert_eq!(states, vec!['B', 'C']);

        let c = nodes.get(children[1]);
        assert_eq!(c.parent(), Some(root));
        assert_eq!(c.depth(), 1);
        assert_eq!(c.path_cost(), 5.0);

        let grandchildren = nodes.expand(children[1], &problem).unwrap();
        let d = nodes.get(grandchildren[0]);
        assert_eq!(*d.state(), 'D');
        assert_eq!(d.depth(), 2);
        assert_eq!(d.path_cost(), 6.0);
    }

    #[test]
    fn expand_backward() {
        let problem = diamond();
        let mut nodes = NodeArena::new();
        let root = nodes.root('D');

        let children = nodes.expand_backward(root, &problem).unwrap();
        let states: Vec<char> = children.iter().map(|c| *nodes.get(*c).state()).collect();
        assert_eq!(states, vec!['B', 'C']);
        assert_eq!(nodes.get(children[1]).path_cost(), 1.0);
    }

    #[test]
    fn solution_walks_parents() {
        let problem = diamond();
        let mut nodes = NodeArena::new();
        let root = nodes.root('A');
        let children = nodes.expand(root, &problem).unwrap();
        let grandchildren = nodes.expand(children[0], &problem).unwrap();

        let goal = grandchildren[0];
        assert_eq!(nodes.path(goal), vec![root, children[0], goal]);

        let solution = nodes.solution(goal);
        assert_eq!(solution.goal, 'D');
        assert_eq!(solution.cost, 2.0);
        assert_eq!(solution.len(), 2);
        assert_eq!(solution.actions, vec!['B', 'D']);
    }
}
