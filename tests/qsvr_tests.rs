// tests/qsvr_tests.rs
//! End-to-end tests for the quantum-kernel support vector regressor

use ndarray::{array, Array1, Array2};
use serde::{Deserialize, Serialize};

use qkernel::machine_learning::prelude::*;

const EXPECTED_MSE: f64 = 0.04964456790383482;

fn train_samples() -> Array2<f64> {
    array![
        [-0.36572221, 0.90579879],
        [-0.41816432, 0.03011426],
        [-0.48806982, 0.87208714],
        [-0.67078436, -0.91017876],
        [-0.12980588, 0.98475113],
        [0.78335453, 0.49721604],
        [0.78158498, 0.78689328],
        [0.03771672, -0.3681419],
        [0.54402486, 0.32332253],
        [-0.25268454, -0.81106666]
    ]
}

fn train_labels() -> Array1<f64> {
    array![
        0.07045477, 0.80047778, 0.04493319, -0.30427998, -0.02430856, 0.17224315, -0.26474769,
        0.83097582, 0.60943777, 0.31577759
    ]
}

fn test_samples() -> Array2<f64> {
    array![
        [-0.60713067, -0.37935265],
        [0.55480968, 0.94365285],
        [0.00148237, -0.71220499],
        [-0.97212742, -0.54068794]
    ]
}

fn test_labels() -> Array1<f64> {
    array![0.45066614, -0.18052862, 0.4549451, -0.23674218]
}

fn fixture_kernel() -> FidelityQuantumKernel {
    FidelityQuantumKernel::new(ZzFeatureMap::new(2, 2))
}

fn fit_and_score(mut qsvr: Qsvr) -> f64 {
    qsvr.fit(&train_samples(), &train_labels()).unwrap();
    let predictions = qsvr.predict(&test_samples()).unwrap();
    mean_squared_error(&test_labels(), &predictions).unwrap()
}

#[test]
fn test_qsvr() {
    let qsvr = Qsvr::with_quantum_kernel(fixture_kernel());
    let mse = fit_and_score(qsvr);
    assert!(
        (mse - EXPECTED_MSE).abs() < 1e-4,
        "mse {} deviates from expected {}",
        mse,
        EXPECTED_MSE
    );
}

#[test]
fn test_change_kernel() {
    // Assigning the kernel after construction gives the same result as
    // passing it to the constructor
    let mut qsvr = Qsvr::new();
    qsvr.set_quantum_kernel(fixture_kernel());
    let mse = fit_and_score(qsvr);
    assert!((mse - EXPECTED_MSE).abs() < 1e-4);
}

#[test]
fn test_qsvr_parameters() {
    // Spelling out the default tolerance and regularization must not change
    // the numeric outcome
    let mut qsvr = Qsvr::with_params(SvrParams {
        kernel: KernelType::Precomputed,
        tol: 1e-3,
        c: 1.0,
        ..Default::default()
    });
    qsvr.set_quantum_kernel(fixture_kernel());
    let mse = fit_and_score(qsvr);
    assert!((mse - EXPECTED_MSE).abs() < 1e-4);
}

#[test]
fn test_qsvr_to_string() {
    let qsvr = Qsvr::new();
    let _ = qsvr.to_string();
}

#[test]
fn test_with_kernel_parameter() {
    // A classical kernel passed through the params is discarded with a
    // warning; construction succeeds and the precomputed path remains
    let qsvr = Qsvr::with_params(SvrParams {
        kernel: KernelType::Rbf { gamma: 1.0 },
        ..Default::default()
    });
    assert_eq!(qsvr.params().kernel, KernelType::Precomputed);
}

#[test]
fn test_fit_rejects_mismatched_label_count() {
    let mut qsvr = Qsvr::with_quantum_kernel(fixture_kernel());
    let labels = array![0.1, 0.2, 0.3];
    assert!(matches!(
        qsvr.fit(&train_samples(), &labels),
        Err(ModelError::InvalidInput(_))
    ));
}

#[test]
fn test_predict_requires_fit() {
    let qsvr = Qsvr::with_quantum_kernel(fixture_kernel());
    assert_eq!(
        qsvr.predict(&test_samples()).unwrap_err(),
        ModelError::NotFitted
    );
}

#[derive(Debug, Serialize, Deserialize)]
struct FakeModel {
    weights: Vec<f64>,
}

impl SerializableModel for FakeModel {
    const MODEL_TYPE: &'static str = "fake-model";
}

#[test]
fn test_save_load() {
    let features = array![[0.0, 0.0], [0.1, 0.1], [0.4, 0.4], [1.0, 1.0]];
    let labels = array![0.0, 0.1, 0.4, 1.0];

    let mut regressor = Qsvr::with_quantum_kernel(FidelityQuantumKernel::new(ZzFeatureMap::new(2, 2)));
    regressor.fit(&features, &labels).unwrap();

    let query = array![[0.5, 0.5]];
    let original_predictions = regressor.predict(&query).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("qsvr.model");
    regressor.save(&path).unwrap();

    let loaded = Qsvr::load(&path).unwrap();
    let loaded_predictions = loaded.predict(&query).unwrap();

    for (a, b) in original_predictions.iter().zip(loaded_predictions.iter()) {
        assert!((a - b).abs() < 1e-10);
    }

    // Arbitrary compatible samples agree as well
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    let mut random_samples = Array2::zeros((8, 2));
    for value in random_samples.iter_mut() {
        *value = rng.gen_range(-1.0..1.0);
    }
    let original = regressor.predict(&random_samples).unwrap();
    let restored = loaded.predict(&random_samples).unwrap();
    for (a, b) in original.iter().zip(restored.iter()) {
        assert!((a - b).abs() < 1e-10);
    }

    // Loading into an unrelated model type is a type mismatch
    let err = FakeModel::load(&path).unwrap_err();
    assert!(matches!(
        err,
        PersistenceError::ModelTypeMismatch { .. }
    ));
}
