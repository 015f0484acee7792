pub mod delimited;

pub use delimited::{load_numeric, load_raw, ReaderConfig};
