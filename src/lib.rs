//! This crate provides connection strategies for wiring populations of spatially
//! embedded neurons into synaptic topologies.
//!
//! # Connecting Populations
//!
//! ## Deterministic Strategies
//!
//! ```rust
//! use synaptogen::connections::AllToAll;
//! use synaptogen::neuron::{Neuron, Polarity};
//!
//! let source: Vec<Neuron> = (0..4)
//!     .map(|i| Neuron::new(i, i as f64 * 10.0, 0.0, Polarity::Excitatory))
//!     .collect();
//! let target: Vec<Neuron> = (4..10)
//!     .map(|i| Neuron::new(i, i as f64 * 10.0, 50.0, Polarity::Excitatory))
//!     .collect();
//!
//! // Connect every source neuron to every target neuron
//! let synapses = AllToAll::new(false).connect(&source, &target);
//! assert_eq!(synapses.len(), 24);
//! ```
//!
//! ## Stochastic Strategies
//!
//! Stochastic strategies take the random number generator as an argument, so
//! that seeded runs are reproducible.
//!
//! ```rust
//! use synaptogen::connections::Sparse;
//! use synaptogen::neuron::{Neuron, Polarity};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let source: Vec<Neuron> = (0..10)
//!     .map(|i| Neuron::new(i, i as f64, 0.0, Polarity::Excitatory))
//!     .collect();
//! let target: Vec<Neuron> = (10..20)
//!     .map(|i| Neuron::new(i, i as f64, 50.0, Polarity::Excitatory))
//!     .collect();
//!
//! // Realize half of the 100 possible source-target pairs
//! let mut rng = StdRng::seed_from_u64(42);
//! let changes = Sparse::new(0.5, false, false)
//!     .unwrap()
//!     .connect(&source, &target, &[], &mut rng);
//! assert_eq!(changes.added().len(), 50);
//! ```
//!
//! # Polarizing Synapses
//!
//! ```rust
//! use synaptogen::connections::{polarize_synapses, AllToAll};
//! use synaptogen::neuron::{Neuron, Polarity};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let neurons: Vec<Neuron> = (0..10)
//!     .map(|i| Neuron::new(i, i as f64, 0.0, Polarity::NonPolar))
//!     .collect();
//! let mut synapses = AllToAll::new(false).connect(&neurons, &neurons);
//!
//! // Make 80% of the synapses excitatory and the rest inhibitory
//! let mut rng = StdRng::seed_from_u64(42);
//! polarize_synapses(&mut synapses, &neurons, 80.0, &mut rng).unwrap();
//!
//! let num_excitatory = synapses.iter().filter(|s| s.is_excitatory()).count();
//! assert_eq!(num_excitatory, 72);
//! ```

pub mod connections;
pub mod error;
pub mod neuron;
pub mod synapse;

/// The default strength of a new excitatory synapse.
pub const DEFAULT_EXCITATORY_STRENGTH: f64 = 1.0;
/// The default strength of a new inhibitory synapse.
pub const DEFAULT_INHIBITORY_STRENGTH: f64 = -1.0;
