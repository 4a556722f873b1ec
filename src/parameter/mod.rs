//! Records that describe pure fluids, binary pairs and departure functions in JSON.
use crate::errors::{MultiFluidError, MultiFluidResult};
use crate::Verbosity;
use indexmap::IndexMap;
use nalgebra::DVector;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

mod binary;
mod fluid;

pub use binary::{BinaryRecord, DepartureRecord};
pub use fluid::{EosRecord, FluidRecord, ReducingState, States};

/// Read and deserialize a json file, reporting the path if it can not be opened.
pub(crate) fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> MultiFluidResult<T> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| MultiFluidError::DataSource {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// A single term of a residual Helmholtz energy function as stored in JSON.
///
/// Besides the `type` tag, the record holds all coefficient arrays of the term.
/// Keys that are not used by the term type are ignored.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TermRecord {
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(flatten)]
    pub parameters: IndexMap<String, Value>,
}

impl TermRecord {
    /// Create an empty record of the given type.
    pub fn new<S: Into<String>>(ty: S) -> Self {
        Self {
            ty: ty.into(),
            parameters: IndexMap::new(),
        }
    }

    /// Add a coefficient array to the record.
    pub fn with(mut self, key: &str, values: &[f64]) -> Self {
        self.parameters.insert(key.into(), values.into());
        self
    }

    /// Add an integer entry (e.g. `Npower`) to the record.
    pub fn with_integer(mut self, key: &str, value: usize) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Coefficient array `key`; absent or empty arrays are `None`.
    pub fn array_opt(&self, key: &str) -> MultiFluidResult<Option<DVector<f64>>> {
        let Some(value) = self.parameters.get(key) else {
            return Ok(None);
        };
        let Some(values) = value.as_array() else {
            return Err(MultiFluidError::MissingParameters(format!(
                "'{key}' in {} term is not an array",
                self.ty
            )));
        };
        if values.is_empty() {
            return Ok(None);
        }
        values
            .iter()
            .map(|v| {
                v.as_f64().ok_or_else(|| {
                    MultiFluidError::MissingParameters(format!(
                        "'{key}' in {} term contains the non-numeric entry {v}",
                        self.ty
                    ))
                })
            })
            .collect::<MultiFluidResult<Vec<_>>>()
            .map(|v| Some(DVector::from_vec(v)))
    }

    /// Coefficient array `key` that has to be present.
    pub fn array(&self, key: &str) -> MultiFluidResult<DVector<f64>> {
        self.array_opt(key)?.ok_or_else(|| {
            MultiFluidError::MissingParameters(format!("'{key}' in {} term", self.ty))
        })
    }

    /// Coefficient array `key`, or `n` zeros if it is absent.
    pub fn array_or_zeros(&self, key: &str, n: usize) -> MultiFluidResult<DVector<f64>> {
        Ok(self.array_opt(key)?.unwrap_or_else(|| DVector::zeros(n)))
    }

    /// Non-negative integer entry `key`.
    pub fn integer(&self, key: &str) -> MultiFluidResult<usize> {
        self.parameters
            .get(key)
            .and_then(Value::as_u64)
            .map(|v| v as usize)
            .ok_or_else(|| {
                MultiFluidError::MissingParameters(format!(
                    "'{key}' in {} term is missing or not a non-negative integer",
                    self.ty
                ))
            })
    }
}

/// Options for building multi-fluid models.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(default)]
pub struct BuildOptions {
    /// Use unity reducing parameters and no departure function for
    /// binary pairs that are not found in the interaction table.
    pub estimate: bool,
    /// Output printed while the model is built.
    pub verbosity: Verbosity,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn estimate(mut self, estimate: bool) -> Self {
        self.estimate = estimate;
        self
    }

    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Read the options from a flags document, e.g. `{"estimate": true}`.
    pub fn from_json_value(flags: &Value) -> MultiFluidResult<Self> {
        if flags.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_value(flags.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_term_record() {
        let record: TermRecord = serde_json::from_value(json!({
            "type": "ResidualHelmholtzPower",
            "n": [0.1, -2],
            "d": [1, 2],
            "l": [],
            "BibTeX": "Doe-2000"
        }))
        .unwrap();
        assert_eq!(record.ty, "ResidualHelmholtzPower");
        assert_eq!(record.array("n").unwrap().as_slice(), &[0.1, -2.0]);
        assert_eq!(record.array_or_zeros("t", 2).unwrap().as_slice(), &[0.0, 0.0]);
        assert!(record.array_opt("l").unwrap().is_none());
        assert!(matches!(
            record.array("BibTeX"),
            Err(MultiFluidError::MissingParameters(_))
        ));
        assert!(matches!(
            record.array("eta"),
            Err(MultiFluidError::MissingParameters(_))
        ));
    }

    #[test]
    fn test_term_record_builder() {
        let record = TermRecord::new("GERG-2008")
            .with("n", &[1.0, 2.0])
            .with_integer("Npower", 1);
        assert_eq!(record.integer("Npower").unwrap(), 1);
        assert!(record.integer("n").is_err());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, json!({"type": "GERG-2008", "n": [1.0, 2.0], "Npower": 1}));
    }

    #[test]
    fn test_build_options() {
        let options = BuildOptions::from_json_value(&json!({"estimate": true})).unwrap();
        assert!(options.estimate);
        assert_eq!(options.verbosity, Verbosity::None);
        assert_eq!(
            BuildOptions::from_json_value(&json!({})).unwrap(),
            BuildOptions::new()
        );
        assert_eq!(
            BuildOptions::from_json_value(&Value::Null).unwrap(),
            BuildOptions::new()
        );
        assert!(BuildOptions::from_json_value(&json!({"estimate": "yes"})).is_err());
    }

    #[test]
    fn test_missing_file() {
        let res: MultiFluidResult<Vec<BinaryRecord>> = read_json("does/not/exist.json");
        assert!(matches!(res, Err(MultiFluidError::DataSource { .. })));
    }
}
