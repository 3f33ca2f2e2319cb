//! Fixed-degree connection strategy.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Direction, WeightSampler};
use crate::error::ConnectError;
use crate::neuron::Neuron;
use crate::synapse::Synapse;

/// Gives every neuron of the driving population a fixed number of connections,
/// chosen uniformly at random from the opposite population.
///
/// With [`Direction::Out`] each source neuron sends `degree` synapses to
/// randomly chosen targets; with [`Direction::In`] each target neuron receives
/// `degree` synapses from randomly chosen sources. An optional radius
/// restricts the candidate pool to neurons within Euclidean distance of the
/// driving neuron. When the filtered pool is smaller than `degree`, all
/// available candidates are used and the effective degree is simply lower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedDegree {
    degree: usize,
    direction: Direction,
    radius: Option<f64>,
    allow_self_connection: bool,
    weights: WeightSampler,
}

impl FixedDegree {
    /// Create a fixed-degree configuration. Returns an error if the radius is
    /// negative or not finite.
    pub fn new(
        degree: usize,
        direction: Direction,
        radius: Option<f64>,
        allow_self_connection: bool,
        weights: WeightSampler,
    ) -> Result<Self, ConnectError> {
        if let Some(radius) = radius {
            if !radius.is_finite() || radius < 0.0 {
                return Err(ConnectError::InvalidParameter(format!(
                    "The radius must be non-negative and finite, got {}",
                    radius
                )));
            }
        }
        Ok(FixedDegree {
            degree,
            direction,
            radius,
            allow_self_connection,
            weights,
        })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Connect the two populations. Strengths are drawn from the configured
    /// weight sampler and sign-mapped by the polarity of each edge's source.
    pub fn connect<R: Rng>(
        &self,
        source: &[Neuron],
        target: &[Neuron],
        rng: &mut R,
    ) -> Vec<Synapse> {
        let (drivers, pool) = match self.direction {
            Direction::Out => (source, target),
            Direction::In => (target, source),
        };

        let mut synapses = Vec::with_capacity(drivers.len() * self.degree);
        for driver in drivers {
            let mut candidates: Vec<&Neuron> = pool
                .iter()
                .filter(|other| self.allow_self_connection || other.id() != driver.id())
                .filter(|other| match self.radius {
                    Some(radius) => driver.distance_to(other) <= radius,
                    None => true,
                })
                .collect();
            candidates.shuffle(rng);
            if candidates.len() < self.degree {
                debug!(
                    "neuron {}: candidate pool ({}) smaller than requested degree ({})",
                    driver.id(),
                    candidates.len(),
                    self.degree
                );
            }

            for other in candidates.into_iter().take(self.degree) {
                let (src, tar) = match self.direction {
                    Direction::Out => (driver, other),
                    Direction::In => (other, driver),
                };
                let strength = src.polarity().value(self.weights.sample(rng));
                synapses.push(Synapse::new(src.id(), tar.id(), strength));
            }
        }
        synapses
    }
}
