pub mod classifier_trait;
pub mod distance;
pub mod factory;
pub mod knn;
pub mod logistic;
pub mod neighbors;
pub mod tie_break;
