//! Closed-form terms of residual Helmholtz energy functions and containers that sum them.
//!
//! Every term is a function `alpha_r(tau, delta)` of the reduced reciprocal temperature
//! and the reduced density. Pure-fluid equations of state are built from [PureTerm]s,
//! binary departure functions from [DepartureTerm]s. Both sets are closed, so the
//! dispatch in the hot evaluation path is a plain `match`.
use crate::errors::{MultiFluidError, MultiFluidResult};
use crate::parameter::TermRecord;
use itertools::Itertools;
use nalgebra::DVector;
use num_dual::DualNum;

mod gaussian;
mod nonanalytic;
mod power;

pub use gaussian::{GaoBTerm, GaussianTerm, Gerg2004Term};
pub(crate) use gaussian::GAUSSIAN_KEYS;
pub use nonanalytic::NonAnalyticTerm;
pub use power::{ExponentialTerm, Lemmon2005Term, PowerTerm};

/// A contribution to the reduced residual Helmholtz energy of a pure fluid.
pub trait HelmholtzTerm {
    /// Evaluate the term at reduced reciprocal temperature `tau` and reduced density `delta`.
    fn alphar<D: DualNum<f64> + Copy>(&self, tau: D, delta: D) -> D;
}

/// `x^e`; integral exponents are evaluated with `powi`.
#[inline]
fn pow<D: DualNum<f64> + Copy>(x: D, e: f64) -> D {
    if e.fract() == 0.0 {
        x.powi(e as i32)
    } else {
        x.powf(e)
    }
}

fn check_lengths(term: &'static str, arrays: &[(&str, &DVector<f64>)]) -> MultiFluidResult<()> {
    let n = arrays.first().map_or(0, |(_, a)| a.len());
    if arrays.iter().any(|(_, a)| a.len() != n) {
        let lengths = arrays
            .iter()
            .map(|(key, a)| format!("{key}: {}", a.len()))
            .join(", ");
        return Err(MultiFluidError::LengthMismatch { term, lengths });
    }
    Ok(())
}

/// Check that the coefficient arrays `keys` of a record have identical lengths.
pub(crate) fn check_record_lengths(
    term: &'static str,
    record: &TermRecord,
    keys: &[&str],
) -> MultiFluidResult<()> {
    let arrays = keys
        .iter()
        .map(|&key| record.array(key).map(|a| (key, a)))
        .collect::<MultiFluidResult<Vec<_>>>()?;
    let arrays: Vec<_> = arrays.iter().map(|(key, a)| (*key, a)).collect();
    check_lengths(term, &arrays)
}

fn integer_exponents(term: &'static str, l: &DVector<f64>) -> MultiFluidResult<Vec<i32>> {
    l.iter()
        .map(|&value| {
            let l_i = value as i32;
            if l_i as f64 != value {
                Err(MultiFluidError::NonIntegerExponent { term, value })
            } else {
                Ok(l_i)
            }
        })
        .collect()
}

/// Placeholder that contributes exactly zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NullTerm;

impl HelmholtzTerm for NullTerm {
    fn alphar<D: DualNum<f64> + Copy>(&self, _: D, _: D) -> D {
        D::zero()
    }
}

/// Terms allowed in the residual Helmholtz energy of a pure fluid.
#[derive(Clone, Debug)]
pub enum PureTerm {
    Power(PowerTerm),
    Gaussian(GaussianTerm),
    NonAnalytic(NonAnalyticTerm),
    Lemmon2005(Lemmon2005Term),
    GaoB(GaoBTerm),
    Exponential(ExponentialTerm),
}

impl PureTerm {
    /// Type tags of the pure-fluid terms that can be read from a fluid file.
    pub const ALLOWED_TYPES: [&'static str; 6] = [
        "ResidualHelmholtzPower",
        "ResidualHelmholtzGaussian",
        "ResidualHelmholtzNonAnalytic",
        "ResidualHelmholtzGaoB",
        "ResidualHelmholtzLemmon2005",
        "ResidualHelmholtzExponential",
    ];

    /// Build a term from its JSON record, dispatching on the `type` tag.
    pub fn from_record(record: &TermRecord) -> MultiFluidResult<Self> {
        Ok(match record.ty.as_str() {
            "ResidualHelmholtzPower" => Self::Power(PowerTerm::from_record(record)?),
            "ResidualHelmholtzGaussian" => Self::Gaussian(GaussianTerm::from_record(record)?),
            "ResidualHelmholtzNonAnalytic" => {
                Self::NonAnalytic(NonAnalyticTerm::from_record(record)?)
            }
            "ResidualHelmholtzLemmon2005" => {
                Self::Lemmon2005(Lemmon2005Term::from_record(record)?)
            }
            "ResidualHelmholtzGaoB" => Self::GaoB(GaoBTerm::from_record(record)?),
            "ResidualHelmholtzExponential" => {
                Self::Exponential(ExponentialTerm::from_record(record)?)
            }
            ty => {
                return Err(MultiFluidError::UnknownTermType {
                    ty: ty.into(),
                    allowed: Self::ALLOWED_TYPES.join(","),
                })
            }
        })
    }
}

impl HelmholtzTerm for PureTerm {
    #[inline]
    fn alphar<D: DualNum<f64> + Copy>(&self, tau: D, delta: D) -> D {
        match self {
            Self::Power(t) => t.alphar(tau, delta),
            Self::Gaussian(t) => t.alphar(tau, delta),
            Self::NonAnalytic(t) => t.alphar(tau, delta),
            Self::Lemmon2005(t) => t.alphar(tau, delta),
            Self::GaoB(t) => t.alphar(tau, delta),
            Self::Exponential(t) => t.alphar(tau, delta),
        }
    }
}

/// Terms allowed in binary departure functions.
#[derive(Clone, Debug)]
pub enum DepartureTerm {
    Power(PowerTerm),
    Gaussian(GaussianTerm),
    Gerg2004(Gerg2004Term),
    Null(NullTerm),
}

impl HelmholtzTerm for DepartureTerm {
    #[inline]
    fn alphar<D: DualNum<f64> + Copy>(&self, tau: D, delta: D) -> D {
        match self {
            Self::Power(t) => t.alphar(tau, delta),
            Self::Gaussian(t) => t.alphar(tau, delta),
            Self::Gerg2004(t) => t.alphar(tau, delta),
            Self::Null(t) => t.alphar(tau, delta),
        }
    }
}

macro_rules! impl_from_term {
    ($enum:ident, $($variant:ident($term:ty)),+) => {
        $(
            impl From<$term> for $enum {
                fn from(term: $term) -> Self {
                    Self::$variant(term)
                }
            }
        )+
    };
}

impl_from_term!(
    PureTerm,
    Power(PowerTerm),
    Gaussian(GaussianTerm),
    NonAnalytic(NonAnalyticTerm),
    Lemmon2005(Lemmon2005Term),
    GaoB(GaoBTerm),
    Exponential(ExponentialTerm)
);
impl_from_term!(
    DepartureTerm,
    Power(PowerTerm),
    Gaussian(GaussianTerm),
    Gerg2004(Gerg2004Term),
    Null(NullTerm)
);

/// Ordered collection of terms whose contributions are summed.
///
/// An empty collection contributes zero.
#[derive(Clone, Debug)]
pub struct Terms<T> {
    terms: Vec<T>,
}

/// Residual Helmholtz energy of a pure fluid.
pub type EosTerms = Terms<PureTerm>;

/// Departure function of a binary pair.
pub type DepartureTerms = Terms<DepartureTerm>;

impl<T> Default for Terms<T> {
    fn default() -> Self {
        Self { terms: Vec::new() }
    }
}

impl<T> Terms<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_term<U: Into<T>>(&mut self, term: U) {
        self.terms.push(term.into());
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.terms.iter()
    }
}

impl<T, U: Into<T>> FromIterator<U> for Terms<T> {
    fn from_iter<I: IntoIterator<Item = U>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<T: HelmholtzTerm> HelmholtzTerm for Terms<T> {
    #[inline]
    fn alphar<D: DualNum<f64> + Copy>(&self, tau: D, delta: D) -> D {
        self.terms
            .iter()
            .fold(D::zero(), |acc, term| acc + term.alphar(tau, delta))
    }
}

impl DepartureTerms {
    /// A departure function that contributes nothing.
    pub fn null() -> Self {
        let mut terms = Self::new();
        terms.add_term(NullTerm);
        terms
    }
}
