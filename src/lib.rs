//! FeOs-MultiFluid - Residual Helmholtz energy of mixtures from multi-fluid (GERG-type) models.
//!
//! A multi-fluid model combines
//! - the pure-fluid residual Helmholtz energies of all components, evaluated at the
//!   reduced state of the mixture (corresponding states),
//! - binary departure functions scaled by an interaction factor `F_ij`, and
//! - a reducing function that maps the composition to a reducing temperature
//!   and a reducing density.
//!
//! Evaluations are generic over [num_dual::DualNum], so derivatives of any order
//! are available by calling the same function with dual numbers.
//!
//! # Example: model from records
//!
//! ```
//! # use feos_multifluid::MultiFluidError;
//! use feos_multifluid::parameter::{BuildOptions, FluidRecord};
//! use feos_multifluid::{build_multifluid_model_from_records, ResidualModel};
//! use nalgebra::dvector;
//!
//! let fluid = |tc: f64, rhoc: f64| -> FluidRecord {
//!     serde_json::from_value(serde_json::json!({
//!         "EOS": [{
//!             "alphar": [{"type": "ResidualHelmholtzPower", "n": [0.5, -1.2], "t": [0.25, 1.0], "d": [1, 2], "l": [0, 1]}],
//!             "STATES": {"reducing": {"T": tc, "rhomolar": rhoc}}
//!         }]
//!     }))
//!     .unwrap()
//! };
//! let model = build_multifluid_model_from_records(
//!     &["A", "B"],
//!     &[fluid(190.6, 10139.0), fluid(305.3, 6870.0)],
//!     &[],
//!     &[],
//!     &BuildOptions::new().estimate(true),
//! )?;
//! let alphar = model.alphar(250.0, 3000.0, &dvector![0.4, 0.6]);
//! assert!(alphar.is_finite());
//! # Ok::<(), MultiFluidError>(())
//! ```
#![warn(clippy::all)]
#![warn(clippy::allow_attributes)]

/// Print messages with level `Verbosity::Iter` or higher.
#[macro_export]
macro_rules! log_iter {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::Verbosity::Iter {
            println!($($arg)*);
        }
    }
}

/// Print messages with level `Verbosity::Result` or higher.
#[macro_export]
macro_rules! log_result {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::Verbosity::Result {
            println!($($arg)*);
        }
    }
}

mod builder;
mod contributions;
mod errors;
mod model;
pub mod parameter;
mod reducing;
pub mod terms;

pub use builder::{
    build_departure_function, build_eos_terms, build_multifluid_model,
    build_multifluid_model_from_records, build_multifluid_mutant,
    build_multifluid_mutant_invariant, get_bip_matrices, get_departure_function_matrix,
    get_f_matrix, get_tc_vc,
};
pub use contributions::{
    CorrespondingStatesContribution, DepartureContribution, MixtureContribution,
};
pub use errors::{MultiFluidError, MultiFluidResult};
pub use model::{
    InvariantMutant, MultiFluid, MultiFluidAdapter, MultiFluidModel, Mutant, ResidualModel, RGAS,
};
pub use reducing::{
    MultiFluidInvariantReducingFunction, MultiFluidReducingFunction, ReducingFunction,
};

use serde::{Deserialize, Serialize};

/// Level of detail in the output written while a model is built.
#[derive(Copy, Clone, Debug, PartialOrd, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Do not print output.
    #[default]
    None,
    /// Print information about estimated or missing mixture parameters.
    Result,
    /// Print a detailed output for every component and binary pair.
    Iter,
}
