//! An incremental uniform-cost (Dijkstra) search over any graph whose successors can be
//! generated on demand. Each call to [UniformCostSearch::step] settles exactly one node so
//! the caller can interleave rendering, cancellation checks or bookkeeping between steps.
use fxhash::{FxBuildHasher, FxHashMap, FxHashSet};
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;
use smallvec::SmallVec;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

use crate::N_NEIGHBOURS;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Heap entry pointing at a node in the distance table by index.
struct FrontierEntry<C> {
    distance: C,
    sequence: usize,
    index: usize,
}

impl<C: PartialEq> Eq for FrontierEntry<C> {}

impl<C: PartialEq> PartialEq for FrontierEntry<C> {
    fn eq(&self, other: &Self) -> bool {
        self.distance.eq(&other.distance) && self.sequence == other.sequence
    }
}

impl<C: Ord> PartialOrd for FrontierEntry<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for FrontierEntry<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: reversed so the smallest distance pops first, and among
        // equal distances the earliest enqueued.
        match other.distance.cmp(&self.distance) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

/// Bookkeeping of one search run. Nodes without a distance entry are at +∞.
#[derive(Clone, Debug)]
pub struct SearchState<N: Eq + Hash, C> {
    distance: FxIndexMap<N, C>,
    predecessor: FxHashMap<N, N>,
    frontier_membership: FxHashSet<N>,
    sequence: usize,
    complete: bool,
}

impl<N: Eq + Hash + Clone, C: Copy> SearchState<N, C> {
    fn new(start: N, zero: C) -> Self {
        let mut distance = FxIndexMap::default();
        distance.insert(start.clone(), zero);
        let mut frontier_membership = FxHashSet::default();
        frontier_membership.insert(start);
        SearchState {
            distance,
            predecessor: FxHashMap::default(),
            frontier_membership,
            sequence: 1,
            complete: false,
        }
    }
    /// Best known distance, or [None] while the node is unreached.
    pub fn distance(&self, node: &N) -> Option<C> {
        self.distance.get(node).copied()
    }
    pub fn predecessor(&self, node: &N) -> Option<&N> {
        self.predecessor.get(node)
    }
    pub fn predecessors(&self) -> &FxHashMap<N, N> {
        &self.predecessor
    }
    /// All nodes with a finite distance, in the order they were first reached.
    pub fn reached(&self) -> impl Iterator<Item = (&N, &C)> {
        self.distance.iter()
    }
    pub fn in_frontier(&self, node: &N) -> bool {
        self.frontier_membership.contains(node)
    }
    pub fn frontier_len(&self) -> usize {
        self.frontier_membership.len()
    }
    /// Number of frontier insertions handed out so far. The start node took sequence 0.
    pub fn sequence(&self) -> usize {
        self.sequence
    }
    /// Whether the run ended on its own (goal reached or frontier exhausted). A state taken
    /// out of a cancelled run is incomplete and its predecessors do not describe a path.
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

/// Result of settling one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step<N> {
    /// `node` was settled; `enqueued` lists the successors that newly joined the frontier,
    /// in the order they were generated.
    Expanded {
        node: N,
        enqueued: SmallVec<[N; N_NEIGHBOURS]>,
    },
    /// The goal came off the frontier.
    Reached(N),
    /// The frontier ran dry without reaching the goal.
    Exhausted,
}

/// Uniform-cost search from a single start to a single goal. Edge costs come from the
/// successor function passed to [step](Self::step), so unit grids and weighted graphs run
/// through the same relaxation.
pub struct UniformCostSearch<N: Eq + Hash, C> {
    frontier: BinaryHeap<FrontierEntry<C>>,
    state: SearchState<N, C>,
    goal: N,
}

impl<N, C> UniformCostSearch<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
{
    pub fn new(start: N, goal: N) -> Self {
        let mut frontier = BinaryHeap::new();
        frontier.push(FrontierEntry {
            distance: Zero::zero(),
            sequence: 0,
            index: 0,
        });
        UniformCostSearch {
            frontier,
            state: SearchState::new(start, Zero::zero()),
            goal,
        }
    }

    pub fn state(&self) -> &SearchState<N, C> {
        &self.state
    }
    pub fn into_state(self) -> SearchState<N, C> {
        self.state
    }
    pub fn goal(&self) -> &N {
        &self.goal
    }

    fn push(&mut self, distance: C, index: usize) {
        let sequence = self.state.sequence;
        self.state.sequence += 1;
        self.frontier.push(FrontierEntry {
            distance,
            sequence,
            index,
        });
    }

    /// Settles the next node. Once [Step::Reached] or [Step::Exhausted] has been returned
    /// the state is complete and further calls keep reporting [Step::Exhausted].
    pub fn step<FN, IN>(&mut self, mut successors: FN) -> Step<N>
    where
        FN: FnMut(&N) -> IN,
        IN: IntoIterator<Item = (N, C)>,
    {
        while let Some(FrontierEntry {
            distance, index, ..
        }) = self.frontier.pop()
        {
            let (node, best) = match self.state.distance.get_index(index) {
                Some((node, &best)) => (node.clone(), best),
                None => continue,
            };
            // A node re-keyed with a better distance leaves its old entry behind.
            if distance > best {
                continue;
            }
            self.state.frontier_membership.remove(&node);
            if node == self.goal {
                self.state.complete = true;
                self.frontier.clear();
                return Step::Reached(node);
            }

            let mut enqueued = SmallVec::new();
            for (successor, move_cost) in successors(&node) {
                let candidate = best + move_cost;
                let index = match self.state.distance.entry(successor.clone()) {
                    Vacant(e) => {
                        let index = e.index();
                        e.insert(candidate);
                        index
                    }
                    Occupied(mut e) => {
                        if candidate < *e.get() {
                            e.insert(candidate);
                            e.index()
                        } else {
                            continue;
                        }
                    }
                };
                self.state
                    .predecessor
                    .insert(successor.clone(), node.clone());
                let newly_queued = self.state.frontier_membership.insert(successor.clone());
                // A node already waiting gets a second entry with its better key. With unit
                // costs a queued node is never improved, so this stays one entry per node.
                self.push(candidate, index);
                if newly_queued {
                    enqueued.push(successor);
                }
            }
            return Step::Expanded { node, enqueued };
        }
        self.state.complete = true;
        Step::Exhausted
    }

    /// Steps until the goal is reached or the frontier is exhausted.
    pub fn run<FN, IN>(&mut self, mut successors: FN) -> Option<C>
    where
        FN: FnMut(&N) -> IN,
        IN: IntoIterator<Item = (N, C)>,
    {
        loop {
            match self.step(&mut successors) {
                Step::Expanded { .. } => {}
                Step::Reached(goal) => return self.state.distance(&goal),
                Step::Exhausted => return None,
            }
        }
    }
}
