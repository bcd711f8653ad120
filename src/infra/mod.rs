//! Loading of model parameters and deal exports from outside the binary.

pub mod deals;
pub mod model_store;

pub use deals::{load_deals, parse_deals, DealLoadError};
pub use model_store::{bundled_model, load_model, model_from_file, ModelLoadError};
