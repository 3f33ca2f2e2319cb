//! Radial probabilistic connection strategy: flat probabilities within hard
//! radius cutoffs.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConnectError;
use crate::neuron::{Neuron, Polarity};
use crate::synapse::Synapse;

/// Default probability of connecting to a neighboring excitatory (or
/// non-polar) neuron.
pub const DEFAULT_EXCITATORY_PROBABILITY: f64 = 0.8;
/// Default probability of connecting to a neighboring inhibitory neuron.
pub const DEFAULT_INHIBITORY_PROBABILITY: f64 = 0.8;
/// Default radius within which excitatory (or non-polar) neighbors are considered.
pub const DEFAULT_EXCITATORY_RADIUS: f64 = 100.0;
/// Default radius within which inhibitory neighbors are considered.
pub const DEFAULT_INHIBITORY_RADIUS: f64 = 80.0;

/// Connects each source to the targets within a radius of it, with a flat
/// per-pair probability. Inhibitory targets use the inhibitory radius and
/// probability; excitatory and non-polar targets use the excitatory pair.
/// Outside the radius the probability is zero: a hard cutoff, not a decay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadialProbabilistic {
    excitatory_probability: f64,
    inhibitory_probability: f64,
    excitatory_radius: f64,
    inhibitory_radius: f64,
    allow_self_connection: bool,
}

impl Default for RadialProbabilistic {
    fn default() -> Self {
        RadialProbabilistic {
            excitatory_probability: DEFAULT_EXCITATORY_PROBABILITY,
            inhibitory_probability: DEFAULT_INHIBITORY_PROBABILITY,
            excitatory_radius: DEFAULT_EXCITATORY_RADIUS,
            inhibitory_radius: DEFAULT_INHIBITORY_RADIUS,
            allow_self_connection: false,
        }
    }
}

impl RadialProbabilistic {
    /// Create a configuration. Probabilities must lie in [0, 1] and radii
    /// must be non-negative and finite.
    pub fn new(
        excitatory_probability: f64,
        inhibitory_probability: f64,
        excitatory_radius: f64,
        inhibitory_radius: f64,
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
        Ok(RadialProbabilistic {
            excitatory_probability,
            inhibitory_probability,
            excitatory_radius,
            inhibitory_radius,
            allow_self_connection,
        })
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
                if !self.allow_self_connection && src.id() == tar.id() {
                    continue;
                }
                let (radius, probability) = if tar.polarity() == Polarity::Inhibitory {
                    (self.inhibitory_radius, self.inhibitory_probability)
                } else {
                    (self.excitatory_radius, self.excitatory_probability)
                };
                if src.distance_to(tar) > radius {
                    continue;
                }
                if rng.gen::<f64>() < probability {
                    let strength = src.polarity().value(rng.gen::<f64>());
                    synapses.push(Synapse::new(src.id(), tar.id(), strength));
                }
            }
        }
        synapses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    const SEED: u64 = 42;

    #[test]
    fn test_hard_radius_cutoff() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let source = vec![Neuron::new(0, 0.0, 0.0, Polarity::NonPolar)];
        let target = vec![
            Neuron::new(1, 50.0, 0.0, Polarity::Excitatory),
            Neuron::new(2, 500.0, 0.0, Polarity::Excitatory),
        ];
        let connector = RadialProbabilistic::new(1.0, 1.0, 100.0, 80.0, false).unwrap();
        let synapses = connector.connect(&source, &target, &mut rng);

        assert_eq!(synapses.len(), 1);
        assert_eq!(synapses[0].target_id(), 1);
    }

    #[test]
    fn test_radius_chosen_by_target_polarity() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let source = vec![Neuron::new(0, 0.0, 0.0, Polarity::NonPolar)];
        // At distance 90: inside the excitatory radius, outside the inhibitory one.
        let target = vec![
            Neuron::new(1, 90.0, 0.0, Polarity::Excitatory),
            Neuron::new(2, 90.0, 0.0, Polarity::Inhibitory),
        ];
        let connector = RadialProbabilistic::new(1.0, 1.0, 100.0, 80.0, false).unwrap();
        let synapses = connector.connect(&source, &target, &mut rng);

        assert_eq!(synapses.len(), 1);
        assert_eq!(synapses[0].target_id(), 1);
    }

    #[test]
    fn test_zero_probability_never_connects() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let neurons: Vec<Neuron> = (0..10)
            .map(|i| Neuron::new(i, i as f64, 0.0, Polarity::Excitatory))
            .collect();
        let connector = RadialProbabilistic::new(0.0, 0.0, 100.0, 100.0, false).unwrap();
        assert!(connector.connect(&neurons, &neurons, &mut rng).is_empty());
    }

    #[test]
    fn test_no_self_connections() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let neurons: Vec<Neuron> = (0..10)
            .map(|i| Neuron::new(i, i as f64, 0.0, Polarity::NonPolar))
            .collect();
        let connector = RadialProbabilistic::new(1.0, 1.0, 100.0, 100.0, false).unwrap();
        let synapses = connector.connect(&neurons, &neurons, &mut rng);
        assert_eq!(synapses.len(), 90);
        assert!(synapses.iter().all(|s| !s.is_self_connection()));
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(RadialProbabilistic::new(1.5, 0.5, 100.0, 100.0, false).is_err());
        assert!(RadialProbabilistic::new(0.5, 0.5, -1.0, 100.0, false).is_err());
    }
}
