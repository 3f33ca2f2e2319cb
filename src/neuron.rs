//! Module implementing the neurons seen by the connection generators:
//! a point in space with a polarity.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// The polarity of a neuron, constraining the sign of its efferent synapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    /// All efferent synapses are excitatory (positive strength).
    Excitatory,
    /// All efferent synapses are inhibitory (negative strength).
    Inhibitory,
    /// Efferent synapses can take either sign.
    NonPolar,
}

impl Polarity {
    /// Map a sampled magnitude to the sign implied by the polarity.
    /// Non-polar neurons leave the sample untouched.
    pub fn value(&self, magnitude: f64) -> f64 {
        match self {
            Polarity::Excitatory => magnitude.abs(),
            Polarity::Inhibitory => -magnitude.abs(),
            Polarity::NonPolar => magnitude,
        }
    }

    /// Returns true if the polarity constrains the sign of efferent synapses.
    pub fn is_polarized(&self) -> bool {
        !matches!(self, Polarity::NonPolar)
    }
}

/// A neuron as consumed by the connection generators. Neurons are owned by the
/// caller; the generators only read the id, position and polarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neuron {
    id: usize,
    position: Point3<f64>,
    polarity: Polarity,
}

impl Neuron {
    /// Create a neuron in the plane (z = 0).
    pub fn new(id: usize, x: f64, y: f64, polarity: Polarity) -> Self {
        Neuron {
            id,
            position: Point3::new(x, y, 0.0),
            polarity,
        }
    }

    /// Create a neuron at a 3D position.
    pub fn new_3d(id: usize, x: f64, y: f64, z: f64, polarity: Polarity) -> Self {
        Neuron {
            id,
            position: Point3::new(x, y, z),
            polarity,
        }
    }

    /// Returns the ID of the neuron. The ID is unique within a population.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn z(&self) -> f64 {
        self.position.z
    }

    /// Returns the position of the neuron.
    pub fn position(&self) -> &Point3<f64> {
        &self.position
    }

    /// Returns the polarity of the neuron.
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Euclidean distance to another neuron (z included).
    pub fn distance_to(&self, other: &Neuron) -> f64 {
        nalgebra::distance(&self.position, &other.position)
    }

    /// Squared Euclidean distance to another neuron.
    pub fn squared_distance_to(&self, other: &Neuron) -> f64 {
        nalgebra::distance_squared(&self.position, &other.position)
    }
}
