use super::kernel::argmin_first;
use super::*;
use crate::geometry::{Point3D, PointSet};
use approx::assert_relative_eq;

fn points(coords: &[(f64, f64, f64)]) -> PointSet {
    coords.iter().copied().map(Point3D::from).collect()
}

/// Deterministic scattered points for the property-style checks
fn scattered(n: usize, seed: u64, scale: f64) -> PointSet {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 11) as f64 / (1u64 << 53) as f64 - 0.5) * scale
    };
    (0..n).map(|_| Point3D::new(next(), next(), next())).collect()
}

fn centroid_path(m: usize) -> PointSet {
    (0..m)
        .map(|j| {
            let t = j as f64;
            Point3D::new(t * 2.0, (t * 0.3).sin() * 5.0, (t * 0.1).cos() * 3.0)
        })
        .collect()
}

#[test]
fn test_scenario_two_point_centroid_ties_to_smaller_index() {
    let centroid = points(&[(0.0, 0.0, 0.0), (10.0, 0.0, 0.0)]);
    let bundle = points(&[(1.0, 0.0, 0.0), (9.0, 0.0, 0.0), (5.0, 0.0, 0.0)]);

    let result = NearestCentroidAssigner::new()
        .compute(&bundle, &centroid)
        .unwrap();

    assert_eq!(result.labels(), &[1, 2, 1]);
    assert_eq!(result.distances(), &[1.0, 1.0, 5.0]);
}

#[test]
fn test_bundle_identical_to_centroid() {
    let centroid = centroid_path(25);
    let bundle = centroid.clone();

    let result = NearestCentroidAssigner::new()
        .compute(&bundle, &centroid)
        .unwrap();

    let expected: Vec<u32> = (1..=25).collect();
    assert_eq!(result.labels(), expected.as_slice());
    assert!(result.distances().iter().all(|&d| d == 0.0));
}

#[test]
fn test_far_point_uses_true_nearest() {
    // An L-shaped centroid: the far point projects onto the first leg along x
    // but is closest to the end of the second leg.
    let centroid = points(&[
        (0.0, 0.0, 0.0),
        (5.0, 0.0, 0.0),
        (10.0, 0.0, 0.0),
        (10.0, 5.0, 0.0),
        (10.0, 10.0, 0.0),
    ]);
    let bundle = points(&[(100.0, 100.0, 50.0)]);

    let result = NearestCentroidAssigner::new()
        .compute(&bundle, &centroid)
        .unwrap();

    assert_eq!(result.labels(), &[5]);
    let expected = (90.0f64 * 90.0 + 90.0 * 90.0 + 50.0 * 50.0).sqrt();
    assert_relative_eq!(result.distances()[0], expected, epsilon = 1e-12);
}

#[test]
fn test_single_point_centroid() {
    let centroid = points(&[(1.0, 2.0, 3.0)]);
    let bundle = scattered(300, 7, 40.0);

    let result = NearestCentroidAssigner::new()
        .chunk_size(64)
        .compute(&bundle, &centroid)
        .unwrap();

    assert!(result.labels().iter().all(|&l| l == 1));
    for (p, &d) in bundle.iter().zip(result.distances()) {
        assert_eq!(d, p.distance(&centroid.as_slice()[0]));
    }
}

#[test]
fn test_labels_in_range_and_self_consistent() {
    let centroid = centroid_path(40);
    let bundle = scattered(2_000, 11, 80.0);

    let result = NearestCentroidAssigner::new()
        .chunk_size(333)
        .compute(&bundle, &centroid)
        .unwrap();

    assert_eq!(result.len(), bundle.len());
    for (i, p) in bundle.iter().enumerate() {
        let (label, distance) = result.get(i).unwrap();
        assert!(label >= 1 && label as usize <= centroid.len());

        let winner = centroid.get(label as usize - 1).unwrap();
        assert_eq!(distance, p.distance(winner));
        for c in centroid.iter() {
            assert!(distance <= p.distance(c));
        }
    }
}

#[test]
fn test_result_is_deterministic() {
    let centroid = centroid_path(30);
    let bundle = scattered(1_500, 3, 60.0);
    let assigner = NearestCentroidAssigner::new();

    let first = assigner.compute(&bundle, &centroid).unwrap();
    let second = assigner.compute(&bundle, &centroid).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_chunk_size_and_workers_do_not_change_result() {
    let centroid = centroid_path(50);
    let bundle = scattered(5_003, 19, 120.0);

    let reference = NearestCentroidAssigner::new()
        .chunk_size(bundle.len())
        .workers(1)
        .compute(&bundle, &centroid)
        .unwrap();

    for &(chunk_size, workers) in &[(1, 1), (7, 2), (256, 4), (4096, 0), (10_000, 3)] {
        let result = NearestCentroidAssigner::new()
            .chunk_size(chunk_size)
            .workers(workers)
            .compute(&bundle, &centroid)
            .unwrap();
        assert_eq!(
            result, reference,
            "chunk_size={chunk_size} workers={workers} diverged"
        );
    }
}

#[test]
fn test_inputs_are_not_mutated() {
    let centroid = centroid_path(10);
    let bundle = scattered(100, 5, 20.0);
    let (bundle_before, centroid_before) = (bundle.clone(), centroid.clone());

    NearestCentroidAssigner::new()
        .compute(&bundle, &centroid)
        .unwrap();

    assert_eq!(bundle, bundle_before);
    assert_eq!(centroid, centroid_before);
}

#[test]
fn test_empty_bundle_rejected() {
    let result = NearestCentroidAssigner::new().compute(&PointSet::new(), &centroid_path(3));

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("bundle"));
}

#[test]
fn test_empty_centroid_rejected() {
    let result = NearestCentroidAssigner::new().compute(&centroid_path(3), &PointSet::new());

    let err = result.unwrap_err();
    assert!(matches!(err, AssignError::InvalidInput(_)));
    assert!(err.to_string().contains("centroid"));
}

#[test]
fn test_zero_chunk_size_is_clamped() {
    let assigner = NearestCentroidAssigner::new().chunk_size(0);
    assert_eq!(assigner.config().chunk_size, 1);

    let assigner = NearestCentroidAssigner::with_config(AssignerConfig {
        chunk_size: 0,
        workers: 1,
    });
    assert_eq!(assigner.config().chunk_size, 1);

    let centroid = points(&[(0.0, 0.0, 0.0), (10.0, 0.0, 0.0)]);
    let bundle = points(&[(8.0, 0.0, 0.0), (2.0, 0.0, 0.0)]);
    let result = assigner.compute(&bundle, &centroid).unwrap();
    assert_eq!(result.labels(), &[2, 1]);
}

#[test]
fn test_default_config() {
    let config = AssignerConfig::default();
    assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
    assert_eq!(config.workers, 0);
}

#[test]
fn test_argmin_first_keeps_earliest_tie() {
    assert_eq!(argmin_first(&[3.0, 1.0, 1.0, 2.0]), (1, 1.0));
    assert_eq!(argmin_first(&[0.5]), (0, 0.5));
    assert_eq!(argmin_first(&[2.0, 2.0, 2.0]), (0, 2.0));
}

#[test]
fn test_label_counts_and_summary() {
    let centroid = points(&[(0.0, 0.0, 0.0), (10.0, 0.0, 0.0), (20.0, 0.0, 0.0)]);
    let bundle = points(&[(1.0, 0.0, 0.0), (2.0, 0.0, 0.0), (19.0, 0.0, 0.0)]);

    let result = NearestCentroidAssigner::new()
        .compute(&bundle, &centroid)
        .unwrap();

    assert_eq!(result.label_counts(3), vec![2, 0, 1]);

    let summary = result.distance_summary().unwrap();
    assert_relative_eq!(summary.min, 1.0);
    assert_relative_eq!(summary.max, 2.0);
    assert_relative_eq!(summary.mean, 4.0 / 3.0);
}

#[test]
fn test_into_parts_keeps_alignment() {
    let centroid = points(&[(0.0, 0.0, 0.0), (4.0, 0.0, 0.0)]);
    let bundle = points(&[(3.0, 0.0, 0.0), (0.0, 2.0, 0.0)]);

    let (labels, distances) = NearestCentroidAssigner::new()
        .compute(&bundle, &centroid)
        .unwrap()
        .into_parts();

    assert_eq!(labels, vec![2, 1]);
    assert_eq!(distances, vec![1.0, 2.0]);
}
