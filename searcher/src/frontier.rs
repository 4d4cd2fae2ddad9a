//! Frontiers hold the nodes which have been generated but not yet expanded.
//!
//! The order in which a frontier hands nodes back determines the
//! search: first-in-first-out gives breadth first search,
//! last-in-first-out gives depth first search, and ordering by
//! an [EvaluationFunction] gives the best first family.

use std::cmp::{Ord, Ordering, PartialOrd};
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use std::fmt;
use std::hash::Hash;

use ordered_float::OrderedFloat;

use crate::errors::{Result, SearchError};
use crate::evaluation::EvaluationFunction;
use crate::node::{NodeArena, NodeId};
use crate::traits::Cost;

/// Trait used to implement queues of search nodes
/// which are waiting to be expanded.
pub trait Frontier<S, A> {
    fn insert(&mut self, nodes: &NodeArena<S, A>, id: NodeId) -> Result<()>;

    /// Remove the next node to expand.
    ///
    /// Fails with [SearchError::EmptyFrontier] when there is nothing left.
    fn remove_first(&mut self) -> Result<NodeId>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Is any queued node holding this state?
    fn contains(&self, state: &S) -> bool;

    /// Offer `id` as a replacement for a queued node with the same state.
    ///
    /// Returns true when a queued node scored worse than `id` and was
    /// replaced by it. Frontiers which are not ordered by a score never
    /// replace anything.
    #[allow(unused_variables)]
    fn replace_if_better(&mut self, nodes: &NodeArena<S, A>, id: NodeId) -> Result<bool> {
        Ok(false)
    }
}

/// Counts queued nodes per state.
#[derive(Debug)]
struct Membership<S> {
    counts: HashMap<S, usize>,
}

impl<S> Default for Membership<S> {
    fn default() -> Self {
        Membership {
            counts: HashMap::new(),
        }
    }
}

impl<S> Membership<S>
where
    S: Eq + Hash,
{
    fn add(&mut self, state: S) {
        *self.counts.entry(state).or_insert(0) += 1;
    }

    fn remove(&mut self, state: &S) {
        if let Some(count) = self.counts.get_mut(state) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(state);
            }
        }
    }

    fn contains(&self, state: &S) -> bool {
        self.counts.contains_key(state)
    }
}

/// First-in-first-out frontier, for breadth first search.
#[derive(Debug)]
pub struct FifoFrontier<S> {
    queue: VecDeque<(NodeId, S)>,
    members: Membership<S>,
}

impl<S> Default for FifoFrontier<S> {
    fn default() -> Self {
        FifoFrontier {
            queue: VecDeque::new(),
            members: Membership::default(),
        }
    }
}

impl<S> FifoFrontier<S> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S, A> Frontier<S, A> for FifoFrontier<S>
where
    S: Clone + Eq + Hash,
    A: Clone,
{
    fn insert(&mut self, nodes: &NodeArena<S, A>, id: NodeId) -> Result<()> {
        let state = nodes.get(id).state().clone();
        self.members.add(state.clone());
        self.queue.push_back((id, state));
        Ok(())
    }

    fn remove_first(&mut self) -> Result<NodeId> {
        let (id, state) = self.queue.pop_front().ok_or(SearchError::EmptyFrontier)?;
        self.members.remove(&state);
        Ok(id)
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn contains(&self, state: &S) -> bool {
        self.members.contains(state)
    }
}

/// Last-in-first-out frontier, for depth first search.
#[derive(Debug)]
pub struct LifoFrontier<S> {
    stack: Vec<(NodeId, S)>,
    members: Membership<S>,
}

impl<S> Default for LifoFrontier<S> {
    fn default() -> Self {
        LifoFrontier {
            stack: Vec::new(),
            members: Membership::default(),
        }
    }
}

impl<S> LifoFrontier<S> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S, A> Frontier<S, A> for LifoFrontier<S>
where
    S: Clone + Eq + Hash,
    A: Clone,
{
    fn insert(&mut self, nodes: &NodeArena<S, A>, id: NodeId) -> Result<()> {
        let state = nodes.get(id).state().clone();
        self.members.add(state.clone());
        self.stack.push((id, state));
        Ok(())
    }

    fn remove_first(&mut self) -> Result<NodeId> {
        let (id, state) = self.stack.pop().ok_or(SearchError::EmptyFrontier)?;
        self.members.remove(&state);
        Ok(id)
    }

    fn len(&self) -> usize {
        self.stack.len()
    }

    fn contains(&self, state: &S) -> bool {
        self.members.contains(state)
    }
}

/// A heap entry. Entries are ordered by score, then by insertion
/// sequence, reversed so that the max-heap pops the lowest score
/// which was inserted first.
#[derive(Debug)]
struct Entry<S> {
    score: OrderedFloat<Cost>,
    sequence: u64,
    id: NodeId,
    state: S,
}

impl<S> PartialEq for Entry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.sequence == other.sequence
    }
}

impl<S> Eq for Entry<S> {}

impl<S> Ord for Entry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .cmp(&other.score)
            .then(self.sequence.cmp(&other.sequence))
            .reverse()
    }
}

impl<S> PartialOrd for Entry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Copy)]
struct Queued {
    sequence: u64,
    score: OrderedFloat<Cost>,
}

/// Frontier which always hands back the node with the lowest score.
///
/// Nodes with equal scores come back in the order they were
/// inserted, so searches are reproducible. Replaced entries are
/// left in the heap and skipped when they reach the top.
pub struct PriorityFrontier<'e, S, A> {
    evaluation: &'e dyn EvaluationFunction<S, A>,
    heap: BinaryHeap<Entry<S>>,
    queued: HashMap<S, Vec<Queued>>,
    stale: HashSet<u64>,
    sequence: u64,
    live: usize,
}

impl<'e, S, A> PriorityFrontier<'e, S, A>
where
    S: Clone + Eq + Hash,
{
    pub fn new(evaluation: &'e dyn EvaluationFunction<S, A>) -> Self {
        Self {
            evaluation,
            heap: BinaryHeap::new(),
            queued: HashMap::new(),
            stale: HashSet::new(),
            sequence: 0,
            live: 0,
        }
    }

    fn push(&mut self, id: NodeId, state: S, score: OrderedFloat<Cost>) {
        let sequence = self.sequence;
        self.sequence += 1;

        self.queued
            .entry(state.clone())
            .or_insert_with(Vec::new)
            .push(Queued { sequence, score });
        self.heap.push(Entry {
            score,
            sequence,
            id,
            state,
        });
        self.live += 1;
    }

    fn forget(&mut self, state: &S, sequence: u64) {
        if let Some(entries) = self.queued.get_mut(state) {
            entries.retain(|q| q.sequence != sequence);
            if entries.is_empty() {
                self.queued.remove(state);
            }
        }
        self.live -= 1;
    }
}

impl<'e, S, A> fmt::Debug for PriorityFrontier<'e, S, A>
where
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityFrontier")
            .field("heap", &self.heap)
            .field("live", &self.live)
            .finish()
    }
}

impl<'e, S, A> Frontier<S, A> for PriorityFrontier<'e, S, A>
where
    S: Clone + Eq + Hash,
    A: Clone,
{
    fn insert(&mut self, nodes: &NodeArena<S, A>, id: NodeId) -> Result<()> {
        let node = nodes.get(id);
        let score = OrderedFloat(self.evaluation.f(node)?);
        self.push(id, node.state().clone(), score);
        Ok(())
    }

    fn remove_first(&mut self) -> Result<NodeId> {
        while let Some(entry) = self.heap.pop() {
            if self.stale.remove(&entry.sequence) {
                continue;
            }
            self.forget(&entry.state, entry.sequence);
            return Ok(entry.id);
        }
        Err(SearchError::EmptyFrontier)
    }

    fn len(&self) -> usize {
        self.live
    }

    fn contains(&self, state: &S) -> bool {
        self.queued.contains_key(state)
    }

    fn replace_if_better(&mut self, nodes: &NodeArena<S, A>, id: NodeId) -> Result<bool> {
        let node = nodes.get(id);
        let score = OrderedFloat(self.evaluation.f(node)?);

        let worse = self.queued.get(node.state()).and_then(|entries| {
            entries
                .iter()
                .filter(|q| q.score > score)
                .max_by_key(|q| q.score)
                .copied()
        });

        match worse {
            Some(replaced) => {
                let state = node.state().clone();
                self.stale.insert(replaced.sequence);
                self.forget(&state, replaced.sequence);
                self.push(id, state, score);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::evaluation::PathCost;

    /// One child of a shared root for each (state, path cost).
    fn arena(costs: &[(char, Cost)]) -> (NodeArena<char, char>, Vec<NodeId>) {
        let mut nodes = NodeArena::new();
        let root = nodes.root('*');
        let ids = costs
            .iter()
            .map(|(s, c)| nodes.child(root, *s, *s, *c))
            .collect();
        (nodes, ids)
    }

    fn drain<F: Frontier<char, char>>(frontier: &mut F, nodes: &NodeArena<char, char>) -> String {
        let mut order = String::new();
        while !frontier.is_empty() {
            let id = frontier.remove_first().unwrap();
            order.push(*nodes.get(id).state());
        }
        order
    }

    #[test]
    fn fifo() {
        let (nodes, ids) = arena(&[('a', 3.0), ('b', 1.0), ('c', 2.0)]);
        let mut frontier = FifoFrontier::new();
        for id in &ids {
            frontier.insert(&nodes, *id).unwrap();
        }
        assert_eq!(Frontier::<char, char>::len(&frontier), 3);
        assert_eq!(drain(&mut frontier, &nodes), "abc");
    }

    #[test]
    fn lifo() {
        let (nodes, ids) = arena(&[('a', 3.0), ('b', 1.0), ('c', 2.0)]);
        let mut frontier = LifoFrontier::new();
        for id in &ids {
            frontier.insert(&nodes, *id).unwrap();
        }
        assert_eq!(drain(&mut frontier, &nodes), "cba");
    }

    #[test]
    fn priority() {
        let (nodes, ids) = arena(&[('a', 3.0), ('b', 1.0), ('c', 2.0)]);
        let mut frontier = PriorityFrontier::new(&PathCost);
        for id in &ids {
            frontier.insert(&nodes, *id).unwrap();
        }
        assert_eq!(drain(&mut frontier, &nodes), "bca");
    }

    #[test]
    fn priority_ties_keep_insertion_order() {
        let (nodes, ids) = arena(&[
            ('d', 1.0),
            ('a', 1.0),
            ('z', 0.5),
            ('c', 1.0),
            ('b', 1.0),
        ]);
        let mut frontier = PriorityFrontier::new(&PathCost);
        for id in &ids {
            frontier.insert(&nodes, *id).unwrap();
        }
        assert_eq!(drain(&mut frontier, &nodes), "zdacb");
    }

    #[test]
    fn empty() {
        let mut fifo: FifoFrontier<char> = FifoFrontier::new();
        assert!(matches!(
            Frontier::<char, char>::remove_first(&mut fifo),
            Err(SearchError::EmptyFrontier)
        ));

        let mut lifo: LifoFrontier<char> = LifoFrontier::new();
        assert!(matches!(
            Frontier::<char, char>::remove_first(&mut lifo),
            Err(SearchError::EmptyFrontier)
        ));

        let mut priority: PriorityFrontier<char, char> = PriorityFrontier::new(&PathCost);
        assert!(priority.is_empty());
        assert!(matches!(
            priority.remove_first(),
            Err(SearchError::EmptyFrontier)
        ));
    }

    #[test]
    fn contains_tracks_duplicate_states() {
        let (nodes, ids) = arena(&[('a', 1.0), ('a', 2.0), ('b', 1.0)]);
        let mut frontier = FifoFrontier::new();
        for id in &ids {
            frontier.insert(&nodes, *id).unwrap();
        }
        assert!(Frontier::<char, char>::contains(&frontier, &'a'));

        Frontier::<char, char>::remove_first(&mut frontier).unwrap();
        assert!(Frontier::<char, char>::contains(&frontier, &'a'));

        Frontier::<char, char>::remove_first(&mut frontier).unwrap();
        assert!(!Frontier::<char, char>::contains(&frontier, &'a'));
        assert!(Frontier::<char, char>::contains(&frontier, &'b'));
    }

    #[test]
    fn unordered_frontiers_never_replace() {
        let (nodes, ids) = arena(&[('a', 5.0), ('a', 1.0)]);
        let mut frontier = LifoFrontier::new();
        frontier.insert(&nodes, ids[0]).unwrap();
        assert!(!frontier.replace_if_better(&nodes, ids[1]).unwrap());
        assert_eq!(Frontier::<char, char>::len(&frontier), 1);
    }

    #[test]
    fn decrease_key() {
        let (nodes, ids) = arena(&[('a', 5.0), ('b', 3.0), ('a', 1.0), ('a', 9.0)]);
        let mut frontier = PriorityFrontier::new(&PathCost);
        frontier.insert(&nodes, ids[0]).unwrap();
        frontier.insert(&nodes, ids[1]).unwrap();

        // A worse entry does not replace the queued one.
        assert!(!frontier.replace_if_better(&nodes, ids[3]).unwrap());
        assert!(frontier.replace_if_better(&nodes, ids[2]).unwrap());
        assert_eq!(frontier.len(), 2);
        assert!(frontier.contains(&'a'));

        assert_eq!(frontier.remove_first().unwrap(), ids[2]);
        assert!(!frontier.contains(&'a'));
        assert_eq!(frontier.remove_first().unwrap(), ids[1]);

        // The replaced entry is skipped.
        assert!(frontier.is_empty());
        assert!(matches!(
            frontier.remove_first(),
            Err(SearchError::EmptyFrontier)
        ));
    }
}
