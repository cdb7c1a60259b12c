use std::fs;

use marks_predictor::{
    dataset::RawDataset,
    features::{attendance, FeatureVector, Weights},
    predictor::{scaled_score, Predictor, TARGET_MAX},
    store::{FileModelStore, ModelStore},
    training::Trainer,
    PredictorErr,
};

const HEADER: &str = "assignments_avg,quiz_avg,attendance_percent,project_score,final_score\n";

fn write_csv(dir: &tempfile::TempDir, rows: &[[f64; 5]]) -> std::path::PathBuf {
    let mut csv = String::from(HEADER);
    for [a, q, att, p, y] in rows {
        csv.push_str(&format!("{a},{q},{att},{p},{y}\n"));
    }

    let path = dir.path().join("marks.csv");
    fs::write(&path, csv).unwrap();
    path
}

#[test]
fn three_students_end_to_end() {
    let rows = [
        [8., 7., 90., 15., 38.],
        [6., 5., 70., 10., 25.],
        [9., 9., 98., 18., 44.],
    ];
    let points: Vec<u8> = rows.iter().map(|row| attendance::points(row[2])).collect();
    assert_eq!(points, [4, 0, 5]);

    let dir = tempfile::tempdir().unwrap();
    let dataset = RawDataset::from_path(write_csv(&dir, &rows)).unwrap();
    let mut store = FileModelStore::new(dir.path().join("weights.txt"));

    let report = Trainer::new(&mut store).train(&dataset).unwrap();
    assert_eq!(report.samples, 3);
    assert!(report.mae.is_finite() && report.mae >= 0.);

    let features = FeatureVector::new(8., 7., 90., 15.);
    let expected = scaled_score(&report.weights, &features);
    let score = Predictor::new(&store).predict(8., 7., 90., 15.).unwrap();
    assert!((score - expected).abs() < 1e-9, "{score} vs {expected}");
}

#[test]
fn saved_weights_survive_a_new_session() {
    let truth = Weights::new([4., 1.2, 0.9, 1.5, 0.7]);
    let rows: Vec<[f64; 5]> = [
        [8., 7., 90., 15.],
        [6., 5., 70., 10.],
        [9., 9., 98., 18.],
        [4., 8., 82., 12.],
        [7., 3., 77., 16.],
        [5., 6., 93., 8.],
    ]
    .iter()
    .map(|&[a, q, att, p]| [a, q, att, p, truth.apply(&FeatureVector::new(a, q, att, p))])
    .collect();

    let dir = tempfile::tempdir().unwrap();
    let weights_path = dir.path().join("weights.txt");
    let dataset = RawDataset::from_path(write_csv(&dir, &rows)).unwrap();

    let mut store = FileModelStore::new(&weights_path);
    Trainer::new(&mut store).train(&dataset).unwrap();
    let before = Predictor::new(&store).predict(7., 6., 88., 14.).unwrap();

    let reopened = FileModelStore::new(&weights_path);
    let after = Predictor::new(&reopened).predict(7., 6., 88., 14.).unwrap();

    assert_eq!(before, after);
    assert!(after > 0. && after < TARGET_MAX);
}

#[test]
fn zero_weights_predict_zero() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileModelStore::new(dir.path().join("weights.txt"));
    store.save(&Weights::new([0.; 5])).unwrap();

    let score = Predictor::new(&store).predict(10., 10., 100., 20.).unwrap();
    assert_eq!(score, 0.);
}

#[test]
fn collinear_dataset_keeps_previous_weights() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileModelStore::new(dir.path().join("weights.txt"));
    let previous = Weights::new([1., 2., 3., 4., 5.]);
    store.save(&previous).unwrap();

    // Every row has the same quiz average, which duplicates the bias column.
    let rows = [
        [8., 5., 90., 15., 38.],
        [6., 5., 70., 10., 25.],
        [9., 5., 98., 18., 44.],
        [4., 5., 82., 12., 30.],
        [7., 5., 77., 16., 35.],
        [5., 5., 93., 8., 29.],
    ];
    let dataset = RawDataset::from_path(write_csv(&dir, &rows)).unwrap();

    let err = Trainer::new(&mut store).train(&dataset).unwrap_err();
    assert!(matches!(err, PredictorErr::SingularMatrix { .. }), "{err}");
    assert_eq!(store.load().unwrap(), previous);
}

#[test]
fn truncated_weights_file_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("weights.txt");
    fs::write(&path, "3.5 1.25").unwrap();

    let store = FileModelStore::new(&path);
    let err = Predictor::new(&store).predict(5., 5., 80., 10.).unwrap_err();
    assert!(matches!(err, PredictorErr::CorruptWeights { .. }), "{err}");
}

#[test]
fn untrained_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileModelStore::new(dir.path().join("weights.txt"));

    assert!(matches!(
        Predictor::new(&store).predict(5., 5., 80., 10.),
        Err(PredictorErr::ModelNotTrained)
    ));
}
