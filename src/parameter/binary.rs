use super::{read_json, TermRecord};
use crate::errors::{MultiFluidError, MultiFluidResult};
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Binary interaction parameters of a pair of fluids.
///
/// `beta_t` and `beta_v` refer to the order (`name1`, `name2`).
/// Tables may contain records of other mixing rules (e.g. `xi`/`zeta`), so the
/// reducing parameters are only required for pairs that are actually used.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BinaryRecord {
    #[serde(rename = "Name1")]
    pub name1: String,
    #[serde(rename = "Name2")]
    pub name2: String,
    #[serde(rename = "betaT")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub beta_t: Option<f64>,
    #[serde(rename = "gammaT")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub gamma_t: Option<f64>,
    #[serde(rename = "betaV")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub beta_v: Option<f64>,
    #[serde(rename = "gammaV")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub gamma_v: Option<f64>,
    /// Interaction factor of the departure function
    #[serde(rename = "F")]
    #[serde(skip_serializing_if = "f64::is_zero")]
    #[serde(default)]
    pub f: f64,
    /// Name of the departure function
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub function: Option<String>,
}

impl BinaryRecord {
    /// Parameters used for pairs without data: unity reducing parameters and no departure.
    pub fn estimated(name1: &str, name2: &str) -> Self {
        Self {
            name1: name1.into(),
            name2: name2.into(),
            beta_t: Some(1.0),
            gamma_t: Some(1.0),
            beta_v: Some(1.0),
            gamma_v: Some(1.0),
            f: 0.0,
            function: None,
        }
    }

    /// Read a table of binary interaction parameters.
    pub fn from_json<P: AsRef<Path>>(path: P) -> MultiFluidResult<Vec<Self>> {
        read_json(path)
    }

    /// Find the record of the pair (`name1`, `name2`), ignoring case and order.
    ///
    /// The boolean is `true` if the record stores the pair in reversed order.
    pub fn find<'a>(collection: &'a [Self], name1: &str, name2: &str) -> Option<(&'a Self, bool)> {
        collection.iter().find_map(|r| {
            if r.name1.eq_ignore_ascii_case(name1) && r.name2.eq_ignore_ascii_case(name2) {
                Some((r, false))
            } else if r.name1.eq_ignore_ascii_case(name2) && r.name2.eq_ignore_ascii_case(name1) {
                Some((r, true))
            } else {
                None
            }
        })
    }

    /// Reducing parameters `[beta_t, gamma_t, beta_v, gamma_v]` for the requested order.
    pub fn reducing_parameters(&self, reversed: bool) -> MultiFluidResult<[f64; 4]> {
        let get = |value: Option<f64>, key: &str| {
            value.ok_or_else(|| {
                MultiFluidError::MissingParameters(format!(
                    "'{key}' of the binary pair {}/{}",
                    self.name1, self.name2
                ))
            })
        };
        let beta_t = get(self.beta_t, "betaT")?;
        let gamma_t = get(self.gamma_t, "gammaT")?;
        let beta_v = get(self.beta_v, "betaV")?;
        let gamma_v = get(self.gamma_v, "gammaV")?;
        Ok(if reversed {
            [beta_t.recip(), gamma_t, beta_v.recip(), gamma_v]
        } else {
            [beta_t, gamma_t, beta_v, gamma_v]
        })
    }

    /// Name of the departure function, if the pair has one.
    pub fn departure_function(&self) -> Option<&str> {
        self.function.as_deref().filter(|f| !f.is_empty())
    }
}

/// A named departure function.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DepartureRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(flatten)]
    pub term: TermRecord,
}

impl DepartureRecord {
    pub fn new<S: Into<String>>(name: S, term: TermRecord) -> Self {
        Self {
            name: name.into(),
            term,
        }
    }

    /// Read a collection of departure functions.
    pub fn from_json<P: AsRef<Path>>(path: P) -> MultiFluidResult<Vec<Self>> {
        read_json(path)
    }

    /// Find a departure function by its exact name.
    pub fn find<'a>(collection: &'a [Self], name: &str) -> Option<&'a Self> {
        collection.iter().find(|r| r.name == name)
    }
}
