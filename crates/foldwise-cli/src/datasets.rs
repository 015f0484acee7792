//! Known benchmark datasets and where their files live.
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use foldwise_classifiers::io::ReaderConfig;

/// UCI datasets the evaluator knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetId {
    #[default]
    Adult,
    Rice,
    Mushroom,
    Iris,
    Ionosphere,
}

impl DatasetId {
    pub const NAMES: [&'static str; 5] = ["adult", "rice", "mushroom", "iris", "ionosphere"];

    pub fn name(&self) -> &'static str {
        match self {
            DatasetId::Adult => "adult",
            DatasetId::Rice => "rice",
            DatasetId::Mushroom => "mushroom",
            DatasetId::Iris => "iris",
            DatasetId::Ionosphere => "ionosphere",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            DatasetId::Adult => "adult.data",
            DatasetId::Rice => "Rice_Cammeo_Osmancik.arff.txt",
            DatasetId::Mushroom => "agaricus-lepiota.data",
            DatasetId::Iris => "iris.data",
            DatasetId::Ionosphere => "ionosphere.data",
        }
    }

    pub fn path_in<P: AsRef<Path>>(&self, data_dir: P) -> PathBuf {
        data_dir.as_ref().join(self.file_name())
    }

    /// Fill reader settings this dataset needs and the caller left unset.
    ///
    /// The mushroom file stores its class in the first column. Iris has
    /// three classes, so logistic regression treats setosa as the positive
    /// class unless told otherwise.
    pub fn reader_defaults(&self, reader: &ReaderConfig) -> ReaderConfig {
        let mut reader = reader.clone();
        match self {
            DatasetId::Mushroom => {
                reader.label_column.get_or_insert(0);
            }
            DatasetId::Iris => {
                reader
                    .positive_label
                    .get_or_insert_with(|| "Iris-setosa".to_string());
            }
            _ => {}
        }
        reader
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DatasetId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "adult" => Ok(DatasetId::Adult),
            "rice" => Ok(DatasetId::Rice),
            "mushroom" => Ok(DatasetId::Mushroom),
            "iris" => Ok(DatasetId::Iris),
            "ionosphere" => Ok(DatasetId::Ionosphere),
            _ => Err(format!(
                "Unknown dataset: {}. Expected one of: {}",
                s,
                Self::NAMES.join(", ")
            )),
        }
    }
}
