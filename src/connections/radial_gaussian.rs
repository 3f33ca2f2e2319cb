//! Radial Gaussian connection strategy with per-polarity-pair constants.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConnectError;
use crate::neuron::{Neuron, Polarity};
use crate::synapse::Synapse;
use crate::{DEFAULT_EXCITATORY_STRENGTH, DEFAULT_INHIBITORY_STRENGTH};

/// Default constant for connections between two excitatory neurons.
pub const DEFAULT_EE_CONST: f64 = 0.2;
/// Default constant for excitatory-to-inhibitory connections.
pub const DEFAULT_EI_CONST: f64 = 0.3;
/// Default constant for inhibitory-to-excitatory connections.
pub const DEFAULT_IE_CONST: f64 = 0.4;
/// Default constant for connections between two inhibitory neurons.
pub const DEFAULT_II_CONST: f64 = 0.1;
/// Default constant for pairs involving a non-polar neuron.
pub const DEFAULT_NON_POLAR_CONST: f64 = 0.25;
/// Default distance drop-off, roughly the average connection distance.
pub const DEFAULT_LAMBDA: f64 = 200.0;

/// Makes distance-decayed connections with a probability law that depends on
/// the polarities of both endpoints:
///
/// `P(a, b) = min(C_xy * exp(-D(a, b)^2 / lambda^2), 1)`
///
/// where `D` is the Euclidean distance, `C_xy` is the constant for the
/// (source polarity, target polarity) pair and `lambda` roughly represents
/// the average connection distance. Pairs at the exact same location have
/// their Gaussian factor forced to zero: same location is treated as the same
/// neuron, which suppresses self-connections without an identity check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadialGaussian {
    ee_const: f64,
    ei_const: f64,
    ie_const: f64,
    ii_const: f64,
    non_polar_const: f64,
    lambda: f64,
}

impl Default for RadialGaussian {
    fn default() -> Self {
        RadialGaussian {
            ee_const: DEFAULT_EE_CONST,
            ei_const: DEFAULT_EI_CONST,
            ie_const: DEFAULT_IE_CONST,
            ii_const: DEFAULT_II_CONST,
            non_polar_const: DEFAULT_NON_POLAR_CONST,
            lambda: DEFAULT_LAMBDA,
        }
    }
}

impl RadialGaussian {
    /// Create a radial Gaussian configuration. The four polarity-pair
    /// constants and the non-polar constant must lie in [0, 1]; lambda must
    /// be positive.
    pub fn new(
        ee_const: f64,
        ei_const: f64,
        ie_const: f64,
        ii_const: f64,
        non_polar_const: f64,
        lambda: f64,
    ) -> Result<Self, ConnectError> {
        for (name, value) in [
            ("ee", ee_const),
            ("ei", ei_const),
            ("ie", ie_const),
            ("ii", ii_const),
            ("non-polar", non_polar_const),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConnectError::InvalidParameter(format!(
                    "The {} connection constant must be between 0 and 1, got {}",
                    name, value
                )));
            }
        }
        if !lambda.is_finite() || lambda <= 0.0 {
            return Err(ConnectError::InvalidParameter(format!(
                "Lambda must be positive and finite, got {}",
                lambda
            )));
        }
        Ok(RadialGaussian {
            ee_const,
            ei_const,
            ie_const,
            ii_const,
            non_polar_const,
            lambda,
        })
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// The probability of connecting `src` to `tar`. Zero for coincident
    /// positions (treated as a self-pair).
    pub fn probability(&self, src: &Neuron, tar: &Neuron) -> f64 {
        let constant = match (src.polarity(), tar.polarity()) {
            (Polarity::Excitatory, Polarity::Excitatory) => self.ee_const,
            (Polarity::Excitatory, Polarity::Inhibitory) => self.ei_const,
            (Polarity::Inhibitory, Polarity::Excitatory) => self.ie_const,
            (Polarity::Inhibitory, Polarity::Inhibitory) => self.ii_const,
            _ => self.non_polar_const,
        };
        let mut gauss = (-src.squared_distance_to(tar) / (self.lambda * self.lambda)).exp();
        if gauss == 1.0 {
            // Same location means same neuron: suppress the self-connection.
            gauss = 0.0;
        }
        (constant * gauss).min(1.0)
    }

    pub fn connect<R: Rng>(
        &self,
        source: &[Neuron],
        target: &[Neuron],
        rng: &mut R,
    ) -> Vec<Synapse> {
        let mut synapses = Vec::with_capacity(source.len() * target.len() / 4);
        for src in source {
            for tar in target {
                if rng.gen::<f64>() < self.probability(src, tar) {
                    let strength = if src.polarity() == Polarity::Inhibitory {
                        DEFAULT_INHIBITORY_STRENGTH
                    } else {
                        DEFAULT_EXCITATORY_STRENGTH
                    };
                    synapses.push(Synapse::new(src.id(), tar.id(), strength));
                }
            }
        }
        debug!(
            "radial gaussian: {} synapses out of {} candidate pairs",
            synapses.len(),
            source.len() * target.len()
        );
        synapses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    const SEED: u64 = 42;

    fn at(id: usize, x: f64, polarity: Polarity) -> Neuron {
        Neuron::new(id, x, 0.0, polarity)
    }

    #[test]
    fn test_probability_non_increasing_with_distance() {
        let connector = RadialGaussian::default();
        let lambda = connector.lambda();
        let src = at(0, 0.0, Polarity::Excitatory);

        let probabilities: Vec<f64> = [lambda / 10.0, lambda, 2.0 * lambda, 10.0 * lambda]
            .iter()
            .map(|d| connector.probability(&src, &at(1, *d, Polarity::Excitatory)))
            .collect();
        assert!(probabilities.windows(2).all(|w| w[0] >= w[1]));
        assert!(probabilities[3] < 1e-6);
    }

    #[test]
    fn test_coincident_pair_suppressed() {
        let connector = RadialGaussian::default();
        let src = at(0, 0.0, Polarity::Excitatory);
        let tar = at(1, 0.0, Polarity::Excitatory);
        assert_eq!(connector.probability(&src, &tar), 0.0);

        let mut rng = StdRng::seed_from_u64(SEED);
        assert!(connector.connect(&[src], &[tar], &mut rng).is_empty());
    }

    #[test]
    fn test_polarity_pair_constants() {
        let connector = RadialGaussian::new(1.0, 0.0, 0.0, 0.0, 0.0, 100.0).unwrap();
        let exc = at(0, 0.0, Polarity::Excitatory);
        let inh = at(1, 10.0, Polarity::Inhibitory);
        let other_exc = at(2, 10.0, Polarity::Excitatory);

        // Only the EE pairing has a nonzero constant.
        assert!(connector.probability(&exc, &other_exc) > 0.9);
        assert_eq!(connector.probability(&exc, &inh), 0.0);
        assert_eq!(connector.probability(&inh, &other_exc), 0.0);
    }

    #[test]
    fn test_strength_sign_follows_source_polarity() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let connector = RadialGaussian::new(1.0, 1.0, 1.0, 1.0, 1.0, 1000.0).unwrap();
        let source = vec![at(0, 0.0, Polarity::Inhibitory)];
        let target: Vec<Neuron> = (1..20)
            .map(|i| at(i, i as f64, Polarity::Excitatory))
            .collect();

        let synapses = connector.connect(&source, &target, &mut rng);
        assert!(!synapses.is_empty());
        assert!(synapses.iter().all(|s| s.strength() == -1.0));
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(RadialGaussian::new(1.5, 0.1, 0.1, 0.1, 0.1, 10.0).is_err());
        assert!(RadialGaussian::new(0.1, 0.1, 0.1, 0.1, 0.1, 0.0).is_err());
        assert!(RadialGaussian::new(0.1, 0.1, 0.1, 0.1, -0.2, 10.0).is_err());
    }
}
