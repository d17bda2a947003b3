use itertools::iproduct;
use rand::Rng;

use pairdist::{
    DenseFeatures, DistanceMetric, JensenShannon, MetricKind, Minkowski, PairwiseDistance,
};

fn random_features(count: usize, dim: usize) -> DenseFeatures<f64> {
    let mut rng = rand::rng();
    let data = (0..count * dim).map(|_| rng.random_range(0.0..10.0)).collect();

    DenseFeatures::from_flat(data, dim)
}

#[test]
fn full_distance_matrix_matches_direct_evaluation() {
    let lhs = random_features(16, 4);
    let rhs = random_features(8, 4);
    let metric = Minkowski::new(3.0);

    let dist = PairwiseDistance::bound(metric, &lhs, &rhs).unwrap();

    for (i, j) in iproduct!(0..16, 0..8) {
        let a = lhs.vector(i);
        let b = rhs.vector(j);
        let expected = metric.dist(&a, &b);
        drop(b);
        drop(a);

        assert_eq!(dist.compute(i, j), expected);
    }
}

#[test]
fn no_vectors_leak_across_repeated_computes() {
    let lhs = random_features(4, 8);
    let rhs = random_features(4, 8);

    let dist: PairwiseDistance<f64, _> =
        PairwiseDistance::bound(JensenShannon {}, &lhs, &rhs).unwrap();

    for round in 0..100 {
        dist.compute(round % 4, (round + 1) % 4);
        assert_eq!(lhs.outstanding_vectors(), 0);
        assert_eq!(rhs.outstanding_vectors(), 0);
    }
}

#[test]
fn vectors_are_released_even_when_compute_panics() {
    let lhs = random_features(2, 3);
    let rhs = random_features(2, 5);

    let dist = PairwiseDistance::bound(Minkowski::new(2.0), &lhs, &rhs).unwrap();

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| dist.compute(0, 0)));
    assert!(outcome.is_err());

    assert_eq!(lhs.outstanding_vectors(), 0);
    assert_eq!(rhs.outstanding_vectors(), 0);
}

#[test]
fn symmetric_metrics_agree_on_swapped_indices() {
    let features = random_features(12, 6);

    let minkowski = PairwiseDistance::bound(Minkowski::new(1.5), &features, &features).unwrap();
    let js: PairwiseDistance<f64, _> =
        PairwiseDistance::bound(JensenShannon {}, &features, &features).unwrap();

    for (i, j) in iproduct!(0..12, 0..12) {
        assert_eq!(minkowski.compute(i, j), minkowski.compute(j, i));
        assert!((js.compute(i, j) - js.compute(j, i)).abs() < 1e-9);
    }
}

#[test]
fn parameters_survive_a_save_load_round_trip_through_the_binding() {
    let features = random_features(4, 4);

    let saved = PairwiseDistance::bound(Minkowski::new(4.25), &features, &features).unwrap();
    let mut buf: Vec<u8> = Vec::new();
    saved.save_params(&mut buf).unwrap();

    let mut restored = PairwiseDistance::bound(Minkowski::new(1.0), &features, &features).unwrap();
    restored.load_params(&mut buf.as_slice()).unwrap();

    assert_eq!(restored.metric().k(), 4.25);
    assert_eq!(restored.compute(0, 1), saved.compute(0, 1));
}

#[test]
fn binding_reports_its_formula_kind() {
    let features = random_features(2, 2);

    let minkowski = PairwiseDistance::bound(Minkowski::new(2.0), &features, &features).unwrap();
    let js: PairwiseDistance<f64, _> =
        PairwiseDistance::bound(JensenShannon {}, &features, &features).unwrap();

    assert_eq!(minkowski.kind(), MetricKind::Minkowski);
    assert_eq!(js.kind(), MetricKind::JensenShannon);
    assert_eq!(js.kind().to_string(), "Jensen-Shannon");
}

#[test]
fn a_failed_bind_leaves_the_binding_unusable_until_rebound() {
    let good = random_features(3, 2);
    let foreign = DenseFeatures::from_flat(vec![1.0f32, 2.0], 2);

    let mut dist = PairwiseDistance::new(Minkowski::new(2.0f64));
    assert!(dist.bind(&good, &foreign).is_err());
    assert!(!dist.is_bound());

    let recovered = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| dist.compute(0, 0)));
    assert!(recovered.is_err());

    dist.bind(&good, &good).unwrap();
    assert_eq!(dist.compute(1, 1), 0.0);
}
