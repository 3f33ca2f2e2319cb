//! Radial simple connection strategy: radius-scoped connections chosen either
//! probabilistically or as an exact per-neighborhood count.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Direction;
use crate::error::ConnectError;
use crate::neuron::{Neuron, Polarity};
use crate::synapse::Synapse;

/// How connections are chosen within a neighborhood: stochastically with a
/// per-candidate probability, or deterministically with an exact count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectStyle {
    Probabilistic,
    Deterministic,
}

/// Default per-candidate probability for excitatory (or non-polar) neighbors.
pub const DEFAULT_EXCITATORY_PROBABILITY: f64 = 0.8;
/// Default per-candidate probability for inhibitory neighbors.
pub const DEFAULT_INHIBITORY_PROBABILITY: f64 = 0.8;
/// Default radius for excitatory (or non-polar) neighbors.
pub const DEFAULT_EXCITATORY_RADIUS: f64 = 100.0;
/// Default radius for inhibitory neighbors.
pub const DEFAULT_INHIBITORY_RADIUS: f64 = 80.0;
/// Default exact connection count per excitatory neighborhood.
pub const DEFAULT_EXCITATORY_COUNT: usize = 5;
/// Default exact connection count per inhibitory neighborhood.
pub const DEFAULT_INHIBITORY_COUNT: usize = 5;

/// For each driving neuron, considers the neurons within an excitatory and an
/// inhibitory radius of it and connects to them separately per polarity
/// class. In [`ConnectStyle::Probabilistic`] mode each in-radius candidate is
/// an independent Bernoulli trial; in [`ConnectStyle::Deterministic`] mode an
/// exact number of connections per class is made by shuffling the in-radius
/// pool and taking the first `excitatory_count` / `inhibitory_count` (capped
/// at the pool size).
///
/// With [`Direction::Out`] the driving population is the source list and
/// edges radiate out from each driver; with [`Direction::In`] the driving
/// population is the target list and edges are sent in to each driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialSimple {
    connect_style: ConnectStyle,
    selection: Direction,
    excitatory_probability: f64,
    inhibitory_probability: f64,
    excitatory_radius: f64,
    inhibitory_radius: f64,
    excitatory_count: usize,
    inhibitory_count: usize,
    allow_self_connection: bool,
}

impl Default for RadialSimple {
    fn default() -> Self {
        RadialSimple {
            connect_style: ConnectStyle::Probabilistic,
            selection: Direction::In,
            excitatory_probability: DEFAULT_EXCITATORY_PROBABILITY,
            inhibitory_probability: DEFAULT_INHIBITORY_PROBABILITY,
            excitatory_radius: DEFAULT_EXCITATORY_RADIUS,
            inhibitory_radius: DEFAULT_INHIBITORY_RADIUS,
            excitatory_count: DEFAULT_EXCITATORY_COUNT,
            inhibitory_count: DEFAULT_INHIBITORY_COUNT,
            allow_self_connection: false,
        }
    }
}

impl RadialSimple {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        connect_style: ConnectStyle,
        selection: Direction,
        excitatory_probability: f64,
        inhibitory_probability: f64,
        excitatory_radius: f64,
        inhibitory_radius: f64,
        excitatory_count: usize,
        inhibitory_count: usize,
        allow_self_connection: bool,
    ) -> Result<Self, ConnectError> {
        for (name, p) in [
            ("excitatory", excitatory_probability),
            ("inhibitory", inhibitory_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConnectError::InvalidParameter(format!(
                    "The {} probability must be between 0 and 1, got {}",
                    name, p
                )));
            }
        }
        for (name, radius) in [
            ("excitatory", excitatory_radius),
            ("inhibitory", inhibitory_radius),
        ] {
            if !radius.is_finite() || radius < 0.0 {
                return Err(ConnectError::InvalidParameter(format!(
                    "The {} radius must be non-negative and finite, got {}",
                    name, radius
                )));
            }
        }
        Ok(RadialSimple {
            connect_style,
            selection,
            excitatory_probability,
            inhibitory_probability,
            excitatory_radius,
            inhibitory_radius,
            excitatory_count,
            inhibitory_count,
            allow_self_connection,
        })
    }

    pub fn connect<R: Rng>(
        &self,
        source: &[Neuron],
        target: &[Neuron],
        rng: &mut R,
    ) -> Vec<Synapse> {
        let (drivers, pool) = match self.selection {
            Direction::Out => (source, target),
            Direction::In => (target, source),
        };

        let mut synapses = Vec::new();
        for driver in drivers {
            let excitatory: Vec<&Neuron> =
                self.in_radius(driver, pool, self.excitatory_radius, |p| {
                    p != Polarity::Inhibitory
                });
            let inhibitory: Vec<&Neuron> =
                self.in_radius(driver, pool, self.inhibitory_radius, |p| {
                    p == Polarity::Inhibitory
                });

            match self.connect_style {
                ConnectStyle::Probabilistic => {
                    self.connect_probabilistic(
                        driver,
                        &excitatory,
                        self.excitatory_probability,
                        &mut synapses,
                        rng,
                    );
                    self.connect_probabilistic(
                        driver,
                        &inhibitory,
                        self.inhibitory_probability,
                        &mut synapses,
                        rng,
                    );
                }
                ConnectStyle::Deterministic => {
                    self.connect_deterministic(
                        driver,
                        excitatory,
                        self.excitatory_count,
                        &mut synapses,
                        rng,
                    );
                    self.connect_deterministic(
                        driver,
                        inhibitory,
                        self.inhibitory_count,
                        &mut synapses,
                        rng,
                    );
                }
            }
        }
        synapses
    }

    fn in_radius<'a>(
        &self,
        driver: &Neuron,
        pool: &'a [Neuron],
        radius: f64,
        class: impl Fn(Polarity) -> bool,
    ) -> Vec<&'a Neuron> {
        pool.iter()
            .filter(|other| self.allow_self_connection || other.id() != driver.id())
            .filter(|other| class(other.polarity()))
            .filter(|other| driver.distance_to(other) <= radius)
            .collect()
    }

    /// Independent Bernoulli trial per in-radius candidate.
    fn connect_probabilistic<R: Rng>(
        &self,
        driver: &Neuron,
        candidates: &[&Neuron],
        probability: f64,
        synapses: &mut Vec<Synapse>,
        rng: &mut R,
    ) {
        for other in candidates {
            if rng.gen::<f64>() < probability {
                synapses.push(self.make_synapse(driver, other, rng));
            }
        }
    }

    /// Exact number of connections, chosen by shuffling the in-radius pool.
    fn connect_deterministic<R: Rng>(
        &self,
        driver: &Neuron,
        mut candidates: Vec<&Neuron>,
        count: usize,
        synapses: &mut Vec<Synapse>,
        rng: &mut R,
    ) {
        candidates.shuffle(rng);
        for other in candidates.into_iter().take(count) {
            synapses.push(self.make_synapse(driver, other, rng));
        }
    }

    fn make_synapse<R: Rng>(&self, driver: &Neuron, other: &Neuron, rng: &mut R) -> Synapse {
        let (src, tar) = match self.selection {
            Direction::Out => (driver, other),
            Direction::In => (other, driver),
        };
        let strength = src.polarity().value(rng.gen::<f64>());
        Synapse::new(src.id(), tar.id(), strength)
    }
}
