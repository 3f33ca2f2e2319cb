//! All-to-all connection strategy.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::neuron::Neuron;
use crate::synapse::Synapse;
use crate::DEFAULT_EXCITATORY_STRENGTH;

/// Connects every source neuron to every target neuron: the complete
/// bipartite topology, or the self-excluding complete topology when the two
/// populations overlap and self-connections are disallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AllToAll {
    allow_self_connection: bool,
}

impl AllToAll {
    pub fn new(allow_self_connection: bool) -> Self {
        AllToAll {
            allow_self_connection,
        }
    }

    pub fn allow_self_connection(&self) -> bool {
        self.allow_self_connection
    }

    /// Connect the two populations. The topology is deterministic; strengths
    /// get the source-polarity default and are typically rebalanced afterwards
    /// with [`polarize_synapses`](crate::connections::polarize_synapses).
    pub fn connect(&self, source: &[Neuron], target: &[Neuron]) -> Vec<Synapse> {
        source
            .iter()
            .cartesian_product(target.iter())
            .filter(|(src, tar)| self.allow_self_connection || src.id() != tar.id())
            .map(|(src, tar)| {
                let strength = src.polarity().value(DEFAULT_EXCITATORY_STRENGTH);
                Synapse::new(src.id(), tar.id(), strength)
            })
            .collect()
    }
}
