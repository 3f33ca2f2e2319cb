//! Error module for the synaptogen library.
use std::error::Error;
use std::fmt;

/// Error types for the library.
#[derive(Debug, PartialEq)]
pub enum ConnectError {
    /// Error for invalid parameters, e.g., a connection density outside [0, 1].
    InvalidParameter(String),
    /// Error for a polarization request that cannot be satisfied because too many
    /// synapses have polarized source neurons whose sign cannot be reassigned.
    UnsatisfiableRatio {
        target_excitatory: usize,
        fixed_excitatory: usize,
        fixed_inhibitory: usize,
    },
    /// Error for a synapse referencing a source neuron absent from the supplied population.
    UnknownNeuron(usize),
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConnectError::InvalidParameter(e) => write!(f, "Invalid parameter: {}", e),
            ConnectError::UnsatisfiableRatio {
                target_excitatory,
                fixed_excitatory,
                fixed_inhibitory,
            } => write!(
                f,
                "Unsatisfiable excitatory ratio: {} excitatory synapses requested, but {} synapses have excitatory and {} have inhibitory source neurons",
                target_excitatory, fixed_excitatory, fixed_inhibitory
            ),
            ConnectError::UnknownNeuron(id) => {
                write!(
                    f,
                    "Unknown neuron: no neuron with id {} in the supplied population",
                    id
                )
            }
        }
    }
}

impl Error for ConnectError {}
