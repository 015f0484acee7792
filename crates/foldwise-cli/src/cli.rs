use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, ValueHint};

use crate::datasets::DatasetId;

/// The `foldwise` command line.
///
/// Numeric flags carry no clap defaults so that values from `--config`
/// survive unless a flag is given explicitly.
pub fn build_cli() -> Command {
    Command::new("foldwise")
        .version(clap::crate_version!())
        .about("Cross-validate logistic regression and kNN classifiers on UCI datasets")
        .arg_required_else_help(true)
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .help("Model to evaluate")
                .value_parser(["logistic", "knn"])
                .required_unless_present("config")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("dataset")
                .short('d')
                .long("dataset")
                .help("Dataset to load from the data directory [default: adult]")
                .value_parser(DatasetId::NAMES)
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("folds")
                .short('f')
                .long("folds")
                .help("Number of cross-validation folds [default: 5]")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("lr")
                .long("lr")
                .help("Learning rate for logistic regression [default: 0.01]")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("iters")
                .long("iters")
                .help("Maximum gradient descent iterations [default: 1000]")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("k")
                .short('k')
                .long("k")
                .help("Number of neighbors for kNN [default: 5]")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("metric")
                .long("metric")
                .help("Distance metric for kNN [default: euclidean]")
                .value_parser(["euclidean", "manhattan"])
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Shuffle rows with this seed before splitting into folds")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("positive_label")
                .long("positive-label")
                .help("Class mapped to 1 for logistic regression, others map to 0")
                .value_parser(clap::builder::NonEmptyStringValueParser::new()),
        )
        .arg(
            Arg::new("data_dir")
                .long("data-dir")
                .help("Directory holding the dataset files [default: data]")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::DirPath),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("JSON run configuration; explicit flags override its values")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the report as JSON")
                .action(ArgAction::SetTrue),
        )
}
