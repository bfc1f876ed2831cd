pub mod batch;
pub mod cli;
pub mod config;
pub mod decode;
pub mod error;
pub mod hamming;
pub mod hash;
pub mod scorer;
pub mod table;
pub mod utils;

pub use config::Opts;
pub use error::{Error, Result};
pub use scorer::{Comparison, compare};
