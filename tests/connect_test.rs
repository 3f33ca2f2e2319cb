use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use synaptogen::connections::{
    polarize_synapses, AllToAll, ConnectStyle, ConnectionStrategy, Direction, FixedDegree,
    OneToOne, RadialGaussian, RadialProbabilistic, RadialSimple, Sparse, WeightSampler,
};
use synaptogen::error::ConnectError;
use synaptogen::neuron::{Neuron, Polarity};
use synaptogen::synapse::Synapse;

const SEED: u64 = 42;

fn grid(offset: usize, rows: usize, cols: usize, polarity: Polarity) -> Vec<Neuron> {
    (0..rows * cols)
        .map(|i| {
            let x = (i % cols) as f64 * 10.0;
            let y = (i / cols) as f64 * 10.0;
            Neuron::new(offset + i, x, y, polarity)
        })
        .collect()
}

fn row(offset: usize, n: usize, y: f64, polarity: Polarity) -> Vec<Neuron> {
    (0..n)
        .map(|i| Neuron::new(offset + i, i as f64 * 10.0, y, polarity))
        .collect()
}

#[test]
fn test_generators_respect_self_connection_ban() {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let neurons = grid(0, 4, 5, Polarity::Excitatory);

    let strategies = vec![
        ConnectionStrategy::AllToAll(AllToAll::new(false)),
        ConnectionStrategy::FixedDegree(
            FixedDegree::new(3, Direction::Out, None, false, WeightSampler::constant(1.0)).unwrap(),
        ),
        ConnectionStrategy::Sparse(Sparse::new(0.7, false, false).unwrap()),
        ConnectionStrategy::RadialProbabilistic(
            RadialProbabilistic::new(1.0, 1.0, 100.0, 100.0, false).unwrap(),
        ),
        ConnectionStrategy::RadialSimple(RadialSimple::default()),
    ];

    for strategy in &strategies {
        let changes = strategy.connect(&neurons, &neurons, &[], &mut rng);
        assert!(
            changes.added().iter().all(|s| !s.is_self_connection()),
            "{:?} produced a self-connection",
            strategy
        );
    }
}

#[test]
fn test_all_to_all_is_complete() {
    let source = grid(0, 2, 3, Polarity::Excitatory);
    let target = grid(6, 2, 4, Polarity::Excitatory);

    let synapses = AllToAll::new(false).connect(&source, &target);
    assert_eq!(synapses.len(), 48);

    let pairs: HashSet<(usize, usize)> = synapses
        .iter()
        .map(|s| (s.source_id(), s.target_id()))
        .collect();
    assert_eq!(pairs.len(), 48);
    for src in &source {
        for tar in &target {
            assert!(pairs.contains(&(src.id(), tar.id())));
        }
    }
}

#[test]
fn test_one_to_one_pairs_aligned_rows() {
    let source = row(0, 10, 0.0, Polarity::Excitatory);
    let target = row(10, 10, 50.0, Polarity::Excitatory);

    let synapses = OneToOne::new(false).connect(&source, &target);
    assert_eq!(synapses.len(), 10);
    for s in &synapses {
        assert_eq!(s.target_id(), s.source_id() + 10);
    }

    let synapses = OneToOne::new(true).connect(&source, &target);
    assert_eq!(synapses.len(), 20);
    let pairs: HashSet<(usize, usize)> = synapses
        .iter()
        .map(|s| (s.source_id(), s.target_id()))
        .collect();
    for i in 0..10 {
        assert!(pairs.contains(&(i, i + 10)));
        assert!(pairs.contains(&(i + 10, i)));
    }
}

#[test]
fn test_fixed_degree_out_degree_is_exact() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let source = grid(0, 3, 4, Polarity::Excitatory);
    let target = grid(12, 3, 4, Polarity::Excitatory);

    let strategy =
        FixedDegree::new(5, Direction::Out, None, false, WeightSampler::constant(1.0)).unwrap();
    let synapses = strategy.connect(&source, &target, &mut rng);

    let mut out_degrees: HashMap<usize, usize> = HashMap::new();
    for s in &synapses {
        *out_degrees.entry(s.source_id()).or_default() += 1;
    }
    assert_eq!(out_degrees.len(), 12);
    assert!(out_degrees.values().all(|d| *d == 5));
}

#[test]
fn test_fixed_degree_in_degree_is_exact() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let source = grid(0, 3, 4, Polarity::Excitatory);
    let target = grid(12, 3, 4, Polarity::Excitatory);

    let strategy =
        FixedDegree::new(5, Direction::In, None, false, WeightSampler::constant(1.0)).unwrap();
    let synapses = strategy.connect(&source, &target, &mut rng);

    let mut in_degrees: HashMap<usize, usize> = HashMap::new();
    for s in &synapses {
        *in_degrees.entry(s.target_id()).or_default() += 1;
    }
    assert_eq!(in_degrees.len(), 12);
    assert!(in_degrees.values().all(|d| *d == 5));
}

#[test]
fn test_fixed_degree_radius_limits_candidates() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let neurons = row(0, 20, 0.0, Polarity::Excitatory);
    let by_id: HashMap<usize, &Neuron> = neurons.iter().map(|n| (n.id(), n)).collect();

    let strategy = FixedDegree::new(
        5,
        Direction::Out,
        Some(15.0),
        false,
        WeightSampler::constant(1.0),
    )
    .unwrap();
    let synapses = strategy.connect(&neurons, &neurons, &mut rng);

    assert!(!synapses.is_empty());
    for s in &synapses {
        let src = by_id[&s.source_id()];
        let tar = by_id[&s.target_id()];
        assert!(src.distance_to(tar) <= 15.0);
    }
}

#[test]
fn test_polarization_exact_counts() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let neurons = grid(0, 3, 5, Polarity::NonPolar);
    let mut synapses = AllToAll::new(false).connect(&neurons, &neurons);
    assert_eq!(synapses.len(), 210);

    polarize_synapses(&mut synapses, &neurons, 70.0, &mut rng).unwrap();

    let num_excitatory = synapses.iter().filter(|s| s.is_excitatory()).count();
    assert_eq!(num_excitatory, 147);
    assert_eq!(synapses.len() - num_excitatory, 63);
}

#[test]
fn test_polarization_respects_fixed_polarities() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut neurons = Vec::new();
    neurons.extend(row(0, 3, 0.0, Polarity::Excitatory));
    neurons.extend(row(3, 3, 10.0, Polarity::Inhibitory));
    neurons.extend(row(6, 4, 20.0, Polarity::NonPolar));

    let mut synapses = AllToAll::new(false).connect(&neurons, &neurons);
    assert_eq!(synapses.len(), 90);

    polarize_synapses(&mut synapses, &neurons, 50.0, &mut rng).unwrap();

    for s in &synapses {
        match s.source_id() {
            0..=2 => assert!(s.is_excitatory()),
            3..=5 => assert!(s.is_inhibitory()),
            _ => {}
        }
    }
    let num_excitatory = synapses.iter().filter(|s| s.is_excitatory()).count();
    assert_eq!(num_excitatory, 45);
}

#[test]
fn test_polarization_unsatisfiable_ratio() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let neurons = row(0, 5, 0.0, Polarity::Inhibitory);
    let mut synapses = AllToAll::new(false).connect(&neurons, &neurons);

    let result = polarize_synapses(&mut synapses, &neurons, 100.0, &mut rng);
    assert!(matches!(
        result,
        Err(ConnectError::UnsatisfiableRatio { .. })
    ));
}

#[test]
fn test_sparse_density_converges() {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let source = row(0, 10, 0.0, Polarity::Excitatory);
    let target = row(10, 10, 50.0, Polarity::Excitatory);

    let edges: Vec<Synapse> = Sparse::new(0.5, false, false)
        .unwrap()
        .connect(&source, &target, &[], &mut rng)
        .into_added();
    assert_eq!(edges.len(), 50);

    // Re-running at the same density changes nothing.
    let changes = Sparse::new(0.5, false, false)
        .unwrap()
        .connect(&source, &target, &edges, &mut rng);
    assert!(changes.added().is_empty());
    assert!(changes.removed().is_empty());

    // Lowering the density removes the surplus from the existing edges.
    let changes = Sparse::new(0.2, false, false)
        .unwrap()
        .connect(&source, &target, &edges, &mut rng);
    assert!(changes.added().is_empty());
    assert_eq!(changes.removed().len(), 30);
    assert!(changes.removed().iter().all(|s| edges.contains(s)));
}

#[test]
fn test_radial_gaussian_prefers_nearby_pairs() {
    let strategy = RadialGaussian::default();

    let a = Neuron::new(0, 0.0, 0.0, Polarity::Excitatory);
    let probabilities: Vec<f64> = [20.0, 200.0, 400.0, 2000.0]
        .iter()
        .map(|&x| {
            let b = Neuron::new(1, x, 0.0, Polarity::Excitatory);
            strategy.probability(&a, &b)
        })
        .collect();
    assert!(probabilities.windows(2).all(|w| w[0] > w[1]));
    assert!(probabilities.iter().all(|p| (0.0..=1.0).contains(p)));

    // Coincident pairs are suppressed entirely.
    let twin = Neuron::new(3, 0.0, 0.0, Polarity::Excitatory);
    assert_eq!(strategy.probability(&a, &twin), 0.0);
}

#[test]
fn test_radial_simple_deterministic_counts_on_grid() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let neurons = grid(0, 10, 10, Polarity::Excitatory);

    let strategy = RadialSimple::new(
        ConnectStyle::Deterministic,
        Direction::Out,
        0.8,
        0.8,
        100.0,
        80.0,
        3,
        3,
        false,
    )
    .unwrap();
    let synapses = strategy.connect(&neurons, &neurons, &mut rng);

    // Every neuron on a 10x10 grid has at least 3 neighbors within the radius.
    let mut out_degrees: HashMap<usize, usize> = HashMap::new();
    for s in &synapses {
        *out_degrees.entry(s.source_id()).or_default() += 1;
    }
    assert_eq!(out_degrees.len(), 100);
    assert!(out_degrees.values().all(|d| *d == 3));
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let source = grid(0, 4, 5, Polarity::Excitatory);
    let target = grid(20, 4, 5, Polarity::Inhibitory);

    let strategy = ConnectionStrategy::FixedDegree(
        FixedDegree::new(
            4,
            Direction::Out,
            None,
            false,
            WeightSampler::uniform(0.1, 1.0).unwrap(),
        )
        .unwrap(),
    );

    let mut rng_a = StdRng::seed_from_u64(SEED);
    let mut rng_b = StdRng::seed_from_u64(SEED);
    let run_a = strategy.connect(&source, &target, &[], &mut rng_a);
    let run_b = strategy.connect(&source, &target, &[], &mut rng_b);
    assert_eq!(run_a, run_b);

    let mut rng_c = StdRng::seed_from_u64(SEED + 1);
    let run_c = strategy.connect(&source, &target, &[], &mut rng_c);
    assert_ne!(run_a, run_c);
}
