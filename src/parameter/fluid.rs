use super::{read_json, TermRecord};
use crate::errors::{MultiFluidError, MultiFluidResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Reducing state of a pure-fluid equation of state.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ReducingState {
    /// reducing temperature in Kelvin
    #[serde(rename = "T")]
    pub t: f64,
    /// reducing molar density in mol/m³
    pub rhomolar: f64,
}

/// Characteristic states of a pure fluid; only the reducing state is used.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct States {
    pub reducing: ReducingState,
}

/// A residual Helmholtz energy function with its reducing state.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EosRecord {
    pub alphar: Vec<TermRecord>,
    #[serde(rename = "STATES")]
    pub states: States,
}

/// Equation of state data of a pure fluid.
///
/// Only the first entry of `EOS` is used for the mixture model.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FluidRecord {
    #[serde(rename = "EOS")]
    pub eos: Vec<EosRecord>,
}

impl FluidRecord {
    /// Create a record with a single equation of state.
    pub fn new(tc: f64, rhomolar_c: f64, alphar: Vec<TermRecord>) -> Self {
        let reducing = ReducingState {
            t: tc,
            rhomolar: rhomolar_c,
        };
        Self {
            eos: vec![EosRecord {
                alphar,
                states: States { reducing },
            }],
        }
    }

    /// Read the record of fluid `name` from `<root>/dev/fluids/<name>.json`.
    pub fn from_json<P: AsRef<Path>>(root: P, name: &str) -> MultiFluidResult<Self> {
        read_json(
            root.as_ref()
                .join("dev")
                .join("fluids")
                .join(format!("{name}.json")),
        )
    }

    /// The equation of state used for the mixture model.
    pub fn primary(&self) -> MultiFluidResult<&EosRecord> {
        self.eos
            .first()
            .ok_or_else(|| MultiFluidError::MissingParameters("fluid record without EOS".into()))
    }

    /// Critical temperature and critical molar volume (inverse of the reducing density).
    pub fn tc_vc(&self) -> MultiFluidResult<(f64, f64)> {
        let reducing = self.primary()?.states.reducing;
        Ok((reducing.t, reducing.rhomolar.recip()))
    }
}
