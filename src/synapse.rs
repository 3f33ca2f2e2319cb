//! Module implementing the concept of a synapse between two neurons.

use serde::{Deserialize, Serialize};

/// A directed weighted connection from a source to a target neuron.
/// Synapses are created by the connection generators and handed to the caller,
/// who is responsible for registering them into a network model.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Synapse {
    source_id: usize,
    target_id: usize,
    /// Signed strength: positive for excitatory, negative for inhibitory.
    strength: f64,
}

impl Synapse {
    /// Create a new synapse with the specified parameters.
    pub fn new(source_id: usize, target_id: usize, strength: f64) -> Self {
        Synapse {
            source_id,
            target_id,
            strength,
        }
    }

    /// Returns the ID of the source neuron.
    pub fn source_id(&self) -> usize {
        self.source_id
    }

    /// Returns the ID of the target neuron.
    pub fn target_id(&self) -> usize {
        self.target_id
    }

    /// Returns the strength of the synapse.
    pub fn strength(&self) -> f64 {
        self.strength
    }

    /// Set the strength of the synapse.
    pub fn set_strength(&mut self, strength: f64) {
        self.strength = strength;
    }

    /// Returns true if the synapse is excitatory (positive strength).
    pub fn is_excitatory(&self) -> bool {
        self.strength > 0.0
    }

    /// Returns true if the synapse is inhibitory (negative strength).
    pub fn is_inhibitory(&self) -> bool {
        self.strength < 0.0
    }

    /// Returns true if the synapse connects a neuron to itself.
    pub fn is_self_connection(&self) -> bool {
        self.source_id == self.target_id
    }
}
