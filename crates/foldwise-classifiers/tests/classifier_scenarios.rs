use foldwise_classifiers::error::ClassifierError;
use foldwise_classifiers::math::Array2;
use foldwise_classifiers::models::classifier_trait::ClassifierModel;
use foldwise_classifiers::models::knn::KnnClassifier;
use foldwise_classifiers::models::logistic::LogisticClassifier;
use foldwise_classifiers::stats::accuracy;

fn column(values: &[f64]) -> Array2<f64> {
    let rows = values.iter().map(|&v| vec![v]).collect();
    Array2::from_rows(rows).unwrap()
}

#[test]
fn logistic_separates_two_clusters_with_defaults() {
    let x = Array2::from_rows(vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![5.0, 5.0],
        vec![5.0, 6.0],
    ])
    .unwrap();
    let y = vec![0u8, 0, 1, 1];

    let mut model = LogisticClassifier::new();
    model.fit(&x, &y).unwrap();

    let queries = vec![vec![0.0, 0.5], vec![5.0, 5.5]];
    let queries = Array2::from_rows(queries).unwrap();
    assert_eq!(model.predict(&queries).unwrap(), vec![0, 1]);
}

#[test]
fn knn_majority_of_three_wins() {
    let x = column(&[0.0, 1.0, 1.5, 10.0, 11.0]);
    let y = ["A", "B", "B", "A", "A"];

    let mut model = KnnClassifier::new(3).unwrap();
    model.fit(&x, &y[..]).unwrap();
    assert_eq!(model.predict(&column(&[0.1])).unwrap(), vec!["B"]);
}

#[test]
fn knn_count_tie_goes_to_closer_label() {
    let x = column(&[1.0, 2.0]);
    let y = ["A", "B"];

    let mut model = KnnClassifier::new(2).unwrap();
    model.fit(&x, &y[..]).unwrap();
    assert_eq!(model.predict(&column(&[0.0])).unwrap(), vec!["A"]);
}

#[test]
fn knn_with_k_one_returns_nearest_label() {
    let x = column(&[-4.0, 0.0, 3.0, 9.0]);
    let y = [10u8, 20, 30, 40];

    let mut model = KnnClassifier::new(1).unwrap();
    model.fit(&x, &y[..]).unwrap();
    let predicted = model.predict(&column(&[2.4, -10.0, 7.0])).unwrap();
    assert_eq!(predicted, vec![30, 10, 40]);
}

#[test]
fn knn_predict_before_fit_fails() {
    let model: KnnClassifier<String> = KnnClassifier::new(3).unwrap();
    assert_eq!(
        model.predict(&column(&[1.0])).unwrap_err(),
        ClassifierError::NotFitted("predict")
    );
}

#[test]
fn accuracy_bounds() {
    let truth = [1u8, 0, 1, 1];
    assert_eq!(accuracy(&truth, &truth).unwrap(), 1.0);
    assert_eq!(accuracy(&truth, &[0, 1, 0, 0]).unwrap(), 0.0);
    let partial = accuracy(&truth, &[1, 1, 1, 0]).unwrap();
    assert!((0.0..=1.0).contains(&partial));
    assert_eq!(partial, 0.5);
}
