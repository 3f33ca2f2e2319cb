//! Sparse connection strategy: a global density target with incremental
//! add/remove semantics.

use std::collections::HashSet;

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::EdgeChangeSet;
use crate::error::ConnectError;
use crate::neuron::Neuron;
use crate::synapse::Synapse;
use crate::DEFAULT_EXCITATORY_STRENGTH;

/// The default connection density (between 0 and 1).
pub const DEFAULT_CONNECTION_DENSITY: f64 = 0.1;

/// Realizes a requested fraction of all possible source-target pairs.
///
/// In the default (non-equalized) mode the strategy works incrementally: it
/// compares the requested density against the density of the caller-supplied
/// existing edges and returns only the difference, as edges to add or edges
/// to remove. Calling it repeatedly with the updated edge set converges to
/// the requested density instead of regenerating the whole topology.
///
/// With `equalize_efferents` every source neuron gets exactly the same number
/// of efferent synapses and the result is a full replacement edge set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sparse {
    connection_density: f64,
    allow_self_connection: bool,
    equalize_efferents: bool,
}

impl Default for Sparse {
    fn default() -> Self {
        Sparse {
            connection_density: DEFAULT_CONNECTION_DENSITY,
            allow_self_connection: false,
            equalize_efferents: false,
        }
    }
}

impl Sparse {
    /// Create a sparse configuration. The density must lie in [0, 1]; out of
    /// range values are rejected rather than clamped.
    pub fn new(
        connection_density: f64,
        allow_self_connection: bool,
        equalize_efferents: bool,
    ) -> Result<Self, ConnectError> {
        if !(0.0..=1.0).contains(&connection_density) {
            return Err(ConnectError::InvalidParameter(format!(
                "The connection density must be between 0 and 1, got {}",
                connection_density
            )));
        }
        Ok(Sparse {
            connection_density,
            allow_self_connection,
            equalize_efferents,
        })
    }

    pub fn connection_density(&self) -> f64 {
        self.connection_density
    }

    pub fn equalize_efferents(&self) -> bool {
        self.equalize_efferents
    }

    /// Connect the two populations. `existing` is the caller's current edge
    /// set between them; it is only inspected in the non-equalized mode.
    pub fn connect<R: Rng>(
        &self,
        source: &[Neuron],
        target: &[Neuron],
        existing: &[Synapse],
        rng: &mut R,
    ) -> EdgeChangeSet {
        if self.equalize_efferents {
            EdgeChangeSet::Replace(self.connect_equalized(source, target, rng))
        } else {
            self.adjust_density(source, target, existing, rng)
        }
    }

    /// Every source gets the same number of efferent synapses, drawn without
    /// replacement from its candidate targets.
    fn connect_equalized<R: Rng>(
        &self,
        source: &[Neuron],
        target: &[Neuron],
        rng: &mut R,
    ) -> Vec<Synapse> {
        if source.is_empty() || target.is_empty() {
            return Vec::new();
        }
        let available = if is_recurrent(source, target) && !self.allow_self_connection {
            target.len() - 1
        } else {
            target.len()
        };
        let per_source = (self.connection_density * available as f64).round() as usize;

        let mut synapses = Vec::with_capacity(per_source * source.len());
        for src in source {
            let mut candidates: Vec<&Neuron> = target
                .iter()
                .filter(|tar| self.allow_self_connection || tar.id() != src.id())
                .collect();
            candidates.shuffle(rng);
            for tar in candidates.into_iter().take(per_source) {
                let strength = src.polarity().value(DEFAULT_EXCITATORY_STRENGTH);
                synapses.push(Synapse::new(src.id(), tar.id(), strength));
            }
        }
        synapses
    }

    /// Compare the requested density against the current one and return the
    /// difference as edges to add or remove.
    fn adjust_density<R: Rng>(
        &self,
        source: &[Neuron],
        target: &[Neuron],
        existing: &[Synapse],
        rng: &mut R,
    ) -> EdgeChangeSet {
        let possible: Vec<(&Neuron, &Neuron)> = source
            .iter()
            .flat_map(|src| target.iter().map(move |tar| (src, tar)))
            .filter(|(src, tar)| self.allow_self_connection || src.id() != tar.id())
            .collect();
        let num_possible = possible.len();
        if num_possible == 0 {
            return EdgeChangeSet::Delta {
                add: Vec::new(),
                remove: Vec::new(),
            };
        }

        // Only the edges between these two populations count toward the
        // current density.
        let source_ids: HashSet<usize> = source.iter().map(|n| n.id()).collect();
        let target_ids: HashSet<usize> = target.iter().map(|n| n.id()).collect();
        let current: Vec<&Synapse> = existing
            .iter()
            .filter(|s| source_ids.contains(&s.source_id()) && target_ids.contains(&s.target_id()))
            .collect();

        let current_density = current.len() as f64 / num_possible as f64;
        let delta = self.connection_density - current_density;
        debug!(
            "sparse: {} existing edges over {} possible pairs (density {:.3}), requested {:.3}",
            current.len(),
            num_possible,
            current_density,
            self.connection_density
        );

        if delta >= 0.0 {
            let num_to_add = (delta * num_possible as f64).round() as usize;
            let connected: HashSet<(usize, usize)> = current
                .iter()
                .map(|s| (s.source_id(), s.target_id()))
                .collect();
            let mut unconnected: Vec<(&Neuron, &Neuron)> = possible
                .into_iter()
                .filter(|(src, tar)| !connected.contains(&(src.id(), tar.id())))
                .collect();
            unconnected.shuffle(rng);
            let add = unconnected
                .into_iter()
                .take(num_to_add)
                .map(|(src, tar)| {
                    let strength = src.polarity().value(DEFAULT_EXCITATORY_STRENGTH);
                    Synapse::new(src.id(), tar.id(), strength)
                })
                .collect();
            EdgeChangeSet::Delta {
                add,
                remove: Vec::new(),
            }
        } else {
            let num_to_remove = (-delta * num_possible as f64).round() as usize;
            let mut pool = current;
            pool.shuffle(rng);
            let remove = pool
                .into_iter()
                .take(num_to_remove)
                .cloned()
                .collect();
            EdgeChangeSet::Delta {
                add: Vec::new(),
                remove,
            }
        }
    }
}

/// Whether the source and target lists denote the same population: same
/// length and pairwise-equal ids.
pub fn is_recurrent(source: &[Neuron], target: &[Neuron]) -> bool {
    source.len() == target.len()
        && source
            .iter()
            .zip(target.iter())
            .all(|(a, b)| a.id() == b.id())
}
