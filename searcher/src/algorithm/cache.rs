//! Search cacheing support to eliminate already explored states.

use std::collections::HashMap;
use std::default::Default;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::errors::Result;
use crate::frontier::Frontier;
use crate::node::{NodeArena, NodeId};

/// Defines the behavior required of a search cache.
///
/// The cache decides whether a removed node is expanded, and
/// whether a freshly generated child joins the frontier.
pub trait Cache<S>: Default {
    /// Record that node `id` is about to expand `state`.
    ///
    /// Returns false when the state was already expanded,
    /// in which case the node should be discarded.
    fn check(&mut self, state: &S, id: NodeId) -> bool;

    /// The node which expanded `state`, if any.
    fn expanded(&self, state: &S) -> Option<NodeId>;

    /// Number of expanded states which are remembered.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Offer a generated child to the frontier. Returns true when
    /// the frontier accepted it.
    fn offer<A, F>(&self, frontier: &mut F, nodes: &NodeArena<S, A>, child: NodeId) -> Result<bool>
    where
        S: Clone,
        A: Clone,
        F: Frontier<S, A> + ?Sized;
}

/// Provides no-op caching, for tree search.
///
/// Every node is expanded and every child is queued, so repeated
/// states are searched again each time they are reached.
#[derive(Debug)]
pub struct NoCache<S>(PhantomData<S>);

impl<S> Default for NoCache<S> {
    fn default() -> Self {
        NoCache(PhantomData)
    }
}

impl<S> Cache<S> for NoCache<S> {
    fn check(&mut self, _state: &S, _id: NodeId) -> bool {
        true
    }

    fn expanded(&self, _state: &S) -> Option<NodeId> {
        None
    }

    fn len(&self) -> usize {
        0
    }

    fn offer<A, F>(&self, frontier: &mut F, nodes: &NodeArena<S, A>, child: NodeId) -> Result<bool>
    where
        S: Clone,
        A: Clone,
        F: Frontier<S, A> + ?Sized,
    {
        frontier.insert(nodes, child)?;
        Ok(true)
    }
}

/// Remembers every state which has been expanded, for graph search.
///
/// States are never forgotten. A child is only queued when its
/// state is neither explored nor already waiting in the frontier;
/// if it is waiting with a worse score, the child takes its place.
#[derive(Debug)]
pub struct ExploredStates<S> {
    explored: HashMap<S, NodeId>,
}

impl<S> Default for ExploredStates<S> {
    fn default() -> Self {
        ExploredStates {
            explored: HashMap::default(),
        }
    }
}

impl<S> Cache<S> for ExploredStates<S>
where
    S: Clone + Eq + Hash,
{
    fn check(&mut self, state: &S, id: NodeId) -> bool {
        if self.explored.contains_key(state) {
            return false;
        }
        self.explored.insert(state.clone(), id);
        true
    }

    fn expanded(&self, state: &S) -> Option<NodeId> {
        self.explored.get(state).copied()
    }

    fn len(&self) -> usize {
        self.explored.len()
    }

    fn offer<A, F>(&self, frontier: &mut F, nodes: &NodeArena<S, A>, child: NodeId) -> Result<bool>
    where
        S: Clone,
        A: Clone,
        F: Frontier<S, A> + ?Sized,
    {
        let state = nodes.get(child).state();
        if self.explored.contains_key(state) {
            return Ok(false);
        }
        if frontier.contains(state) {
            return frontier.replace_if_better(nodes, child);
        }
        frontier.insert(nodes, child)?;
        Ok(true)
    }
}
