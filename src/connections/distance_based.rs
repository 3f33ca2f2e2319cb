//! Distance-based connection strategy with a pluggable decay function.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConnectError;
use crate::neuron::Neuron;
use crate::synapse::Synapse;
use crate::DEFAULT_EXCITATORY_STRENGTH;

/// Maps a Euclidean distance to a connection-probability scaling factor in
/// [0, 1]. All variants are monotonically non-increasing in distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DecayFunction {
    /// `exp(-d^2 / (2 sigma^2))`.
    Gaussian { sigma: f64 },
    /// `exp(-d / scale)`.
    Exponential { scale: f64 },
    /// `max(0, 1 - d / cutoff)`: linear drop-off with a hard cutoff.
    Linear { cutoff: f64 },
}

impl DecayFunction {
    pub fn gaussian(sigma: f64) -> Result<Self, ConnectError> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(ConnectError::InvalidParameter(format!(
                "The Gaussian length scale must be positive and finite, got {}",
                sigma
            )));
        }
        Ok(DecayFunction::Gaussian { sigma })
    }

    pub fn exponential(scale: f64) -> Result<Self, ConnectError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ConnectError::InvalidParameter(format!(
                "The exponential length scale must be positive and finite, got {}",
                scale
            )));
        }
        Ok(DecayFunction::Exponential { scale })
    }

    pub fn linear(cutoff: f64) -> Result<Self, ConnectError> {
        if !cutoff.is_finite() || cutoff <= 0.0 {
            return Err(ConnectError::InvalidParameter(format!(
                "The linear cutoff must be positive and finite, got {}",
                cutoff
            )));
        }
        Ok(DecayFunction::Linear { cutoff })
    }

    /// Evaluate the decay factor at the given distance.
    pub fn eval(&self, distance: f64) -> f64 {
        match self {
            DecayFunction::Gaussian { sigma } => {
                (-(distance * distance) / (2.0 * sigma * sigma)).exp()
            }
            DecayFunction::Exponential { scale } => (-distance / scale).exp(),
            DecayFunction::Linear { cutoff } => (1.0 - distance / cutoff).max(0.0),
        }
    }
}

/// Connects each (source, target) pair with a probability given by a decay
/// function of their Euclidean distance. Self-pairs are always excluded;
/// coincident but distinct neurons are legal and connect with the maximal
/// probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceBased {
    decay: DecayFunction,
}

impl DistanceBased {
    pub fn new(decay: DecayFunction) -> Self {
        DistanceBased { decay }
    }

    pub fn decay(&self) -> DecayFunction {
        self.decay
    }

    pub fn connect<R: Rng>(
        &self,
        source: &[Neuron],
        target: &[Neuron],
        rng: &mut R,
    ) -> Vec<Synapse> {
        let mut synapses = Vec::new();
        for src in source {
            for tar in target {
                if src.id() == tar.id() {
                    continue;
                }
                let probability = self.decay.eval(src.distance_to(tar)).clamp(0.0, 1.0);
                if rng.gen::<f64>() < probability {
                    let strength = src.polarity().value(DEFAULT_EXCITATORY_STRENGTH);
                    synapses.push(Synapse::new(src.id(), tar.id(), strength));
                }
            }
        }
        synapses
    }
}
