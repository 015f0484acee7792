pub mod cli;
pub mod datasets;
pub mod evaluate;
