use std::{fs, io::Cursor, path::Path};

use marks_predictor::{
    features::{FeatureVector, Weights},
    linalg::GaussJordan,
    shell::Shell,
    store::{FileModelStore, ModelStore},
};

fn session(input: &str, weights: &Path, dataset: &Path) -> String {
    let mut output = Vec::new();
    Shell::new(
        Cursor::new(input.to_string()),
        &mut output,
        FileModelStore::new(weights),
        GaussJordan::default(),
        dataset,
    )
    .run()
    .unwrap();

    String::from_utf8(output).unwrap()
}

fn write_dataset(path: &Path) {
    let weights = Weights::new([5., 1., 1., 1., 1.]);
    let mut csv =
        String::from("final_score,project_score,attendance_percent,quiz_avg,assignments_avg\n");

    for (a, q, att, p) in [
        (8., 7., 90., 15.),
        (6., 5., 70., 10.),
        (9., 9., 98., 18.),
        (4., 8., 82., 12.),
        (7., 3., 77., 16.),
        (5., 6., 93., 8.),
        (10., 2., 86., 19.),
    ] {
        let y = weights.apply(&FeatureVector::new(a, q, att, p));
        csv.push_str(&format!("{y},{p},{att},{q},{a}\n"));
    }

    fs::write(path, csv).unwrap();
}

#[test]
fn train_in_one_session_predict_in_the_next() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = dir.path().join("marks.csv");
    let weights = dir.path().join("model_weights.txt");
    write_dataset(&dataset);

    let out = session("predict\nexit\n", &weights, &dataset);
    assert!(out.contains("Model not trained yet. Run 'train' first."));

    let out = session("train\nexit\n", &weights, &dataset);
    assert!(out.contains("Training completed."), "{out}");
    assert!(out.contains("MAE: 0.00"), "{out}");
    assert!(out.contains(&format!("Weights saved to: {}", weights.display())));
    assert!(FileModelStore::new(&weights).is_trained());

    let out = session("predict\n4\n6\n82\n8\nexit\n", &weights, &dataset);
    assert!(out.contains("Predicted Final Score (out of 45): 22.50"), "{out}");
}

#[test]
fn failed_training_keeps_the_session_alive() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = dir.path().join("marks.csv");
    let weights = dir.path().join("model_weights.txt");
    fs::write(&dataset, "assignments_avg,quiz_avg,final_score\n1,2,3\n").unwrap();

    let out = session("train\nhelp\nexit\n", &weights, &dataset);

    assert!(out.contains("Training failed: missing column 'attendance_percent' in dataset"), "{out}");
    assert!(out.contains("Unknown command."));
    assert!(!weights.exists());
}

#[test]
fn corrupt_weights_are_reported_on_predict() {
    let dir = tempfile::tempdir().unwrap();
    let weights = dir.path().join("model_weights.txt");
    fs::write(&weights, "1 2 x 4 5").unwrap();

    let out = session(
        "predict\n5\n5\n80\n10\nexit\n",
        &weights,
        &dir.path().join("unused.csv"),
    );

    assert!(out.contains("Prediction failed:"), "{out}");
    assert!(!out.contains("Predicted Final Score"));
}
