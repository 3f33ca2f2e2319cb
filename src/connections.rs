//! Connection generators: algorithms producing synaptic topologies between
//! two neuron populations.
//!
//! Each strategy is a validated, immutable parameter struct with its own
//! `connect` method. [`ConnectionStrategy`] wraps them in a closed sum type
//! for callers that select a strategy at runtime.
pub mod all_to_all;
pub mod distance_based;
pub mod fixed_degree;
pub mod one_to_one;
pub mod radial_gaussian;
pub mod radial_probabilistic;
pub mod radial_simple;
pub mod sparse;
pub mod utils;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::neuron::Neuron;
use crate::synapse::Synapse;

pub use all_to_all::AllToAll;
pub use distance_based::{DecayFunction, DistanceBased};
pub use fixed_degree::FixedDegree;
pub use one_to_one::OneToOne;
pub use radial_gaussian::RadialGaussian;
pub use radial_probabilistic::RadialProbabilistic;
pub use radial_simple::{ConnectStyle, RadialSimple};
pub use sparse::Sparse;
pub use utils::{polarize_synapses, randomize_and_polarize_synapses, WeightSampler};

/// Whether the driving population sends or receives the generated synapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Each driving neuron receives synapses from chosen candidates.
    In,
    /// Each driving neuron sends synapses to chosen candidates.
    Out,
}

/// The result of running a connection strategy.
///
/// Most strategies produce a flat list of new synapses. The sparse strategy
/// distinguishes incremental changes against an existing edge set from a full
/// replacement, so that repeated invocations converge toward the requested
/// density instead of regenerating the whole topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EdgeChangeSet {
    /// Newly created synapses, to be inserted alongside whatever exists.
    New(Vec<Synapse>),
    /// Incremental adjustment: synapses to insert and existing synapses to remove.
    Delta {
        add: Vec<Synapse>,
        remove: Vec<Synapse>,
    },
    /// A full replacement for the edges between the two populations.
    Replace(Vec<Synapse>),
}

impl EdgeChangeSet {
    /// The synapses to be inserted.
    pub fn added(&self) -> &[Synapse] {
        match self {
            EdgeChangeSet::New(syns) => syns,
            EdgeChangeSet::Delta { add, .. } => add,
            EdgeChangeSet::Replace(syns) => syns,
        }
    }

    /// The existing synapses marked for removal. Empty except for sparse deltas.
    pub fn removed(&self) -> &[Synapse] {
        match self {
            EdgeChangeSet::Delta { remove, .. } => remove,
            _ => &[],
        }
    }

    /// Returns true if the change set replaces all edges between the populations.
    pub fn is_replacement(&self) -> bool {
        matches!(self, EdgeChangeSet::Replace(_))
    }

    /// Consume the change set, keeping only the synapses to insert.
    pub fn into_added(self) -> Vec<Synapse> {
        match self {
            EdgeChangeSet::New(syns) => syns,
            EdgeChangeSet::Delta { add, .. } => add,
            EdgeChangeSet::Replace(syns) => syns,
        }
    }
}

/// A closed union of all connection strategies, dispatched by pattern matching.
///
/// Every variant carries its own immutable parameter struct; strategies share
/// no state and a configuration can be reused across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConnectionStrategy {
    AllToAll(AllToAll),
    OneToOne(OneToOne),
    FixedDegree(FixedDegree),
    DistanceBased(DistanceBased),
    RadialGaussian(RadialGaussian),
    RadialProbabilistic(RadialProbabilistic),
    RadialSimple(RadialSimple),
    Sparse(Sparse),
}

impl ConnectionStrategy {
    /// Generate the synaptic topology between `source` and `target`.
    ///
    /// `existing` is only inspected by the sparse strategy, which adjusts the
    /// density of the supplied edge set incrementally; all other strategies
    /// ignore it and return freshly created synapses.
    pub fn connect<R: Rng>(
        &self,
        source: &[Neuron],
        target: &[Neuron],
        existing: &[Synapse],
        rng: &mut R,
    ) -> EdgeChangeSet {
        match self {
            ConnectionStrategy::AllToAll(c) => EdgeChangeSet::New(c.connect(source, target)),
            ConnectionStrategy::OneToOne(c) => EdgeChangeSet::New(c.connect(source, target)),
            ConnectionStrategy::FixedDegree(c) => {
                EdgeChangeSet::New(c.connect(source, target, rng))
            }
            ConnectionStrategy::DistanceBased(c) => {
                EdgeChangeSet::New(c.connect(source, target, rng))
            }
            ConnectionStrategy::RadialGaussian(c) => {
                EdgeChangeSet::New(c.connect(source, target, rng))
            }
            ConnectionStrategy::RadialProbabilistic(c) => {
                EdgeChangeSet::New(c.connect(source, target, rng))
            }
            ConnectionStrategy::RadialSimple(c) => {
                EdgeChangeSet::New(c.connect(source, target, rng))
            }
            ConnectionStrategy::Sparse(c) => c.connect(source, target, existing, rng),
        }
    }
}
