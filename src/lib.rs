//! Valuation engine behind the SEE:REAL redevelopment portal.
//!
//! Pure pricing formulas (trend projection, regression price prediction,
//! stage-based projection, loan amortization) plus the loaders and the
//! command-line front end that drive them.

pub mod app;
pub mod domain;
pub mod error;
pub mod infra;
pub mod util;

pub use error::{Result, ValuationError};
