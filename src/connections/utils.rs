//! Shared utilities for adjusting the strength and polarity of generated synapses.

use std::collections::HashMap;

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::error::ConnectError;
use crate::neuron::{Neuron, Polarity};
use crate::synapse::Synapse;
use crate::{DEFAULT_EXCITATORY_STRENGTH, DEFAULT_INHIBITORY_STRENGTH};

/// A magnitude distribution for synapse strengths. The sign of a sampled
/// value is decided by the polarity logic of the caller, not the sampler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WeightSampler {
    /// Always the same magnitude.
    Constant(f64),
    /// Uniform on [low, high].
    Uniform { low: f64, high: f64 },
    /// Gaussian with the given mean and standard deviation.
    Normal { mean: f64, std_dev: f64 },
}

impl WeightSampler {
    pub fn constant(value: f64) -> Self {
        WeightSampler::Constant(value)
    }

    /// Create a uniform sampler. Returns an error if the bounds are not finite
    /// or the minimum exceeds the maximum.
    pub fn uniform(low: f64, high: f64) -> Result<Self, ConnectError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(ConnectError::InvalidParameter(
                "Weight bounds must be finite".to_string(),
            ));
        }
        if low > high {
            return Err(ConnectError::InvalidParameter(
                "The minimum weight must be less than the maximum weight".to_string(),
            ));
        }
        Ok(WeightSampler::Uniform { low, high })
    }

    /// Create a Gaussian sampler. Returns an error if the standard deviation
    /// is negative or a parameter is not finite.
    pub fn normal(mean: f64, std_dev: f64) -> Result<Self, ConnectError> {
        if !mean.is_finite() || !std_dev.is_finite() {
            return Err(ConnectError::InvalidParameter(
                "Weight distribution parameters must be finite".to_string(),
            ));
        }
        if std_dev < 0.0 {
            return Err(ConnectError::InvalidParameter(
                "The weight standard deviation must be non-negative".to_string(),
            ));
        }
        Ok(WeightSampler::Normal { mean, std_dev })
    }

    /// Sample a magnitude from the distribution.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        match self {
            WeightSampler::Constant(value) => *value,
            WeightSampler::Uniform { low, high } => rng.gen_range(*low..=*high),
            WeightSampler::Normal { mean, std_dev } => {
                let z: f64 = rng.sample(StandardNormal);
                mean + std_dev * z
            }
        }
    }
}

/// Changes the signs of the given synapses such that `percent_excitatory` of
/// them are excitatory, assigning the default strengths
/// [`DEFAULT_EXCITATORY_STRENGTH`] and [`DEFAULT_INHIBITORY_STRENGTH`].
///
/// The sign implied by a polarized source neuron is never overridden: only
/// synapses whose source is non-polar are free to be reassigned. The realized
/// excitatory count is exact (`round(n * percent / 100)`), not a per-synapse
/// coin flip. If the polarized sources make the requested ratio unreachable,
/// the function fails with [`ConnectError::UnsatisfiableRatio`] and leaves the
/// synapses untouched.
pub fn polarize_synapses<R: Rng>(
    synapses: &mut [Synapse],
    sources: &[Neuron],
    percent_excitatory: f64,
    rng: &mut R,
) -> Result<(), ConnectError> {
    randomize_and_polarize_synapses(synapses, sources, percent_excitatory, None, None, rng)
}

/// Like [`polarize_synapses`], but excitatory and inhibitory strengths are
/// drawn from the given samplers instead of the ±1 defaults. The absolute
/// value of each sample is taken, so the samplers control magnitudes only.
pub fn randomize_and_polarize_synapses<R: Rng>(
    synapses: &mut [Synapse],
    sources: &[Neuron],
    percent_excitatory: f64,
    excitatory_weights: Option<&WeightSampler>,
    inhibitory_weights: Option<&WeightSampler>,
    rng: &mut R,
) -> Result<(), ConnectError> {
    if !(0.0..=100.0).contains(&percent_excitatory) {
        return Err(ConnectError::InvalidParameter(format!(
            "The excitatory percentage must be between 0 and 100, got {}",
            percent_excitatory
        )));
    }

    let polarities: HashMap<usize, Polarity> =
        sources.iter().map(|n| (n.id(), n.polarity())).collect();

    let num_synapses = synapses.len();
    let target_excitatory = (num_synapses as f64 * percent_excitatory / 100.0).round() as usize;

    // Partition by source polarity: synapses with a polarized source keep
    // their sign, the rest form the free pool.
    let mut fixed_excitatory: Vec<usize> = Vec::new();
    let mut fixed_inhibitory: Vec<usize> = Vec::new();
    let mut free: Vec<usize> = Vec::new();
    for (i, synapse) in synapses.iter().enumerate() {
        let polarity = polarities
            .get(&synapse.source_id())
            .ok_or(ConnectError::UnknownNeuron(synapse.source_id()))?;
        match polarity {
            Polarity::Excitatory => fixed_excitatory.push(i),
            Polarity::Inhibitory => fixed_inhibitory.push(i),
            Polarity::NonPolar => free.push(i),
        }
    }

    if fixed_excitatory.len() > target_excitatory
        || fixed_inhibitory.len() > num_synapses - target_excitatory
    {
        return Err(ConnectError::UnsatisfiableRatio {
            target_excitatory,
            fixed_excitatory: fixed_excitatory.len(),
            fixed_inhibitory: fixed_inhibitory.len(),
        });
    }

    let needed_excitatory = target_excitatory - fixed_excitatory.len();
    free.shuffle(rng);
    debug!(
        "polarizing {} synapses: {} excitatory requested, {}/{} fixed, {} free",
        num_synapses,
        target_excitatory,
        fixed_excitatory.len(),
        fixed_inhibitory.len(),
        free.len()
    );

    let sample_excitatory = |rng: &mut R| match excitatory_weights {
        Some(sampler) => sampler.sample(rng).abs(),
        None => DEFAULT_EXCITATORY_STRENGTH,
    };
    let sample_inhibitory = |rng: &mut R| match inhibitory_weights {
        Some(sampler) => -sampler.sample(rng).abs(),
        None => DEFAULT_INHIBITORY_STRENGTH,
    };

    for &i in fixed_excitatory.iter().chain(&free[..needed_excitatory]) {
        let strength = sample_excitatory(rng);
        synapses[i].set_strength(strength);
    }
    for &i in fixed_inhibitory.iter().chain(&free[needed_excitatory..]) {
        let strength = sample_inhibitory(rng);
        synapses[i].set_strength(strength);
    }

    Ok(())
}

/// Returns the synapses that are excitatory, either by strength or by the
/// polarity of their source neuron.
pub fn excitatory_synapses<'a>(synapses: &'a [Synapse], sources: &[Neuron]) -> Vec<&'a Synapse> {
    let polarities: HashMap<usize, Polarity> =
        sources.iter().map(|n| (n.id(), n.polarity())).collect();
    synapses
        .iter()
        .filter(|s| {
            s.is_excitatory() || polarities.get(&s.source_id()) == Some(&Polarity::Excitatory)
        })
        .collect()
}

/// Returns the synapses that are inhibitory, either by strength or by the
/// polarity of their source neuron.
pub fn inhibitory_synapses<'a>(synapses: &'a [Synapse], sources: &[Neuron]) -> Vec<&'a Synapse> {
    let polarities: HashMap<usize, Polarity> =
        sources.iter().map(|n| (n.id(), n.polarity())).collect();
    synapses
        .iter()
        .filter(|s| {
            s.is_inhibitory() || polarities.get(&s.source_id()) == Some(&Polarity::Inhibitory)
        })
        .collect()
}

/// Redraw the strengths of the excitatory synapses in the batch, leaving the
/// inhibitory ones untouched. A synapse counts as excitatory if its strength
/// is positive or its source neuron is excitatory.
pub fn randomize_excitatory_synapses<R: Rng>(
    synapses: &mut [Synapse],
    sources: &[Neuron],
    weights: &WeightSampler,
    rng: &mut R,
) {
    let polarities: HashMap<usize, Polarity> =
        sources.iter().map(|n| (n.id(), n.polarity())).collect();
    for synapse in synapses.iter_mut() {
        if synapse.is_excitatory()
            || polarities.get(&synapse.source_id()) == Some(&Polarity::Excitatory)
        {
            let strength = weights.sample(rng).abs();
            synapse.set_strength(strength);
        }
    }
}

/// Redraw the strengths of the inhibitory synapses in the batch, leaving the
/// excitatory ones untouched. A synapse counts as inhibitory if its strength
/// is negative or its source neuron is inhibitory.
pub fn randomize_inhibitory_synapses<R: Rng>(
    synapses: &mut [Synapse],
    sources: &[Neuron],
    weights: &WeightSampler,
    rng: &mut R,
) {
    let polarities: HashMap<usize, Polarity> =
        sources.iter().map(|n| (n.id(), n.polarity())).collect();
    for synapse in synapses.iter_mut() {
        if synapse.is_inhibitory()
            || polarities.get(&synapse.source_id()) == Some(&Polarity::Inhibitory)
        {
            let strength = -weights.sample(rng).abs();
            synapse.set_strength(strength);
        }
    }
}
