//! One-to-one connection strategy.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::neuron::Neuron;
use crate::synapse::Synapse;
use crate::DEFAULT_EXCITATORY_STRENGTH;

/// The dominant spatial axis of a population, read off its bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Pairs source and target neurons one to one after sorting each population
/// along its dominant spatial axis (a taller-than-wide group is ordered by y,
/// otherwise by x). When the two groups have different dominant axes and
/// their centers are diagonally opposed, the target ordering is reversed so
/// that the pairing mirrors visually.
///
/// If the lists have different lengths, pairing stops at the shorter list and
/// the surplus neurons are left unconnected. This is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OneToOne {
    bidirectional: bool,
}

impl OneToOne {
    pub fn new(bidirectional: bool) -> Self {
        OneToOne { bidirectional }
    }

    pub fn bidirectional(&self) -> bool {
        self.bidirectional
    }

    /// Connect the two populations pairwise.
    pub fn connect(&self, source: &[Neuron], target: &[Neuron]) -> Vec<Synapse> {
        if source.is_empty() || target.is_empty() {
            return Vec::new();
        }

        let source_axis = dominant_axis(source);
        let target_axis = dominant_axis(target);

        let mut sorted_source: Vec<&Neuron> = source.iter().collect();
        let mut sorted_target: Vec<&Neuron> = target.iter().collect();
        sort_along(&mut sorted_source, source_axis);
        sort_along(&mut sorted_target, target_axis);

        if source_axis != target_axis && diagonally_opposed(center(source), center(target)) {
            sorted_target.reverse();
        }

        let mut synapses = Vec::with_capacity(if self.bidirectional {
            2 * source.len().min(target.len())
        } else {
            source.len().min(target.len())
        });
        for (src, tar) in sorted_source.iter().zip(sorted_target.iter()) {
            let strength = src.polarity().value(DEFAULT_EXCITATORY_STRENGTH);
            synapses.push(Synapse::new(src.id(), tar.id(), strength));
            if self.bidirectional {
                let strength = tar.polarity().value(DEFAULT_EXCITATORY_STRENGTH);
                synapses.push(Synapse::new(tar.id(), src.id(), strength));
            }
        }
        synapses
    }
}

fn dominant_axis(neurons: &[Neuron]) -> Axis {
    let (min_x, max_x) = min_max(neurons.iter().map(|n| n.x()));
    let (min_y, max_y) = min_max(neurons.iter().map(|n| n.y()));
    if max_y - min_y > max_x - min_x {
        Axis::Vertical
    } else {
        Axis::Horizontal
    }
}

fn sort_along(neurons: &mut [&Neuron], axis: Axis) {
    neurons.sort_by(|a, b| {
        let (ka, kb) = match axis {
            Axis::Horizontal => (a.x(), b.x()),
            Axis::Vertical => (a.y(), b.y()),
        };
        ka.partial_cmp(&kb).unwrap_or(Ordering::Equal)
    });
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
        (min.min(v), max.max(v))
    })
}

fn center(neurons: &[Neuron]) -> (f64, f64) {
    let n = neurons.len() as f64;
    let x = neurons.iter().map(|n| n.x()).sum::<f64>() / n;
    let y = neurons.iter().map(|n| n.y()).sum::<f64>() / n;
    (x, y)
}

/// The target group sits up-left or down-right of the source group.
fn diagonally_opposed(source_center: (f64, f64), target_center: (f64, f64)) -> bool {
    (target_center.0 - source_center.0) * (target_center.1 - source_center.1) > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neuron::Polarity;

    fn row(offset: usize, n: usize, y: f64) -> Vec<Neuron> {
        (0..n)
            .map(|i| Neuron::new(offset + i, i as f64, y, Polarity::NonPolar))
            .collect()
    }

    fn column(offset: usize, n: usize, x: f64) -> Vec<Neuron> {
        (0..n)
            .map(|i| Neuron::new(offset + i, x, i as f64, Polarity::NonPolar))
            .collect()
    }

    #[test]
    fn test_parallel_rows_pair_by_index() {
        // 10 sources at (0,0)..(9,0), 10 targets at (0,100)..(9,100).
        let source = row(0, 10, 0.0);
        let target = row(10, 10, 100.0);
        let synapses = OneToOne::new(false).connect(&source, &target);

        assert_eq!(synapses.len(), 10);
        for (i, synapse) in synapses.iter().enumerate() {
            assert_eq!(synapse.source_id(), i);
            assert_eq!(synapse.target_id(), i + 10);
        }
    }

    #[test]
    fn test_bidirectional_doubles_edges() {
        let source = row(0, 5, 0.0);
        let target = row(5, 5, 10.0);
        let synapses = OneToOne::new(true).connect(&source, &target);

        assert_eq!(synapses.len(), 10);
        assert_eq!(synapses[0].source_id(), 0);
        assert_eq!(synapses[0].target_id(), 5);
        assert_eq!(synapses[1].source_id(), 5);
        assert_eq!(synapses[1].target_id(), 0);
    }

    #[test]
    fn test_length_mismatch_truncates() {
        let source = row(0, 8, 0.0);
        let target = row(8, 3, 10.0);
        assert_eq!(OneToOne::new(false).connect(&source, &target).len(), 3);
        assert_eq!(OneToOne::new(true).connect(&source, &target).len(), 6);
    }

    #[test]
    fn test_vertical_group_sorted_by_y() {
        let source = column(0, 4, 0.0);
        let target = column(4, 4, 50.0);
        let synapses = OneToOne::new(false).connect(&source, &target);
        for (i, synapse) in synapses.iter().enumerate() {
            assert_eq!(synapse.source_id(), i);
            assert_eq!(synapse.target_id(), i + 4);
        }
    }

    #[test]
    fn test_mixed_orientation_mirrors_when_diagonal() {
        // Horizontal source row at the origin, vertical target column down-right
        // of it: centers are diagonally opposed, so the target order flips.
        let source = row(0, 4, 0.0);
        let target: Vec<Neuron> = (0..4)
            .map(|i| Neuron::new(4 + i, 50.0, 10.0 + i as f64, Polarity::NonPolar))
            .collect();
        let synapses = OneToOne::new(false).connect(&source, &target);

        assert_eq!(synapses.len(), 4);
        assert_eq!(synapses[0].source_id(), 0);
        assert_eq!(synapses[0].target_id(), 7);
        assert_eq!(synapses[3].source_id(), 3);
        assert_eq!(synapses[3].target_id(), 4);
    }

    #[test]
    fn test_empty_population() {
        let target = row(0, 3, 0.0);
        assert!(OneToOne::new(false).connect(&[], &target).is_empty());
    }
}
