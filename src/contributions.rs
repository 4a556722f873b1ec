use crate::errors::{MultiFluidError, MultiFluidResult};
use crate::terms::{DepartureTerms, EosTerms, HelmholtzTerm};
use nalgebra::{DMatrix, DVector};
use num_dual::DualNum;

/// Contribution to the reduced residual Helmholtz energy of a mixture.
pub trait MixtureContribution {
    fn alphar<D: DualNum<f64> + Copy>(&self, tau: D, delta: D, molefracs: &DVector<D>) -> D;
}

/// Mole fraction weighted sum of the pure-fluid residual Helmholtz energies.
///
/// All pure-fluid equations of state are evaluated at the reduced state of the
/// mixture, not at their own reducing state.
#[derive(Clone, Debug)]
pub struct CorrespondingStatesContribution<E = EosTerms> {
    eoss: Vec<E>,
}

impl<E> CorrespondingStatesContribution<E> {
    pub fn new(eoss: Vec<E>) -> Self {
        Self { eoss }
    }

    /// Equation of state of component `i`.
    pub fn eos(&self, i: usize) -> &E {
        &self.eoss[i]
    }

    pub fn components(&self) -> usize {
        self.eoss.len()
    }
}

impl<E: HelmholtzTerm> CorrespondingStatesContribution<E> {
    /// Residual Helmholtz energy of component `i` at the given reduced state,
    /// without weighting by its mole fraction.
    pub fn alphari<D: DualNum<f64> + Copy>(&self, tau: D, delta: D, i: usize) -> D {
        self.eoss[i].alphar(tau, delta)
    }
}

impl<E: HelmholtzTerm> MixtureContribution for CorrespondingStatesContribution<E> {
    fn alphar<D: DualNum<f64> + Copy>(&self, tau: D, delta: D, molefracs: &DVector<D>) -> D {
        self.eoss
            .iter()
            .zip(molefracs.iter())
            .fold(D::zero(), |acc, (eos, &x)| acc + x * eos.alphar(tau, delta))
    }
}

/// Binary departure functions weighted by `x_i x_j F_ij`.
///
/// Every unordered pair is evaluated once (`i < j`); the lower triangle of
/// `funcs` is stored for symmetry but never evaluated.
#[derive(Clone, Debug)]
pub struct DepartureContribution<E = DepartureTerms> {
    f: DMatrix<f64>,
    funcs: Vec<Vec<E>>,
}

impl<E> DepartureContribution<E> {
    pub fn new(f: DMatrix<f64>, funcs: Vec<Vec<E>>) -> MultiFluidResult<Self> {
        let n = f.nrows();
        if f.ncols() != n {
            return Err(MultiFluidError::IncompatibleComponents(n, f.ncols()));
        }
        if funcs.len() != n {
            return Err(MultiFluidError::IncompatibleComponents(n, funcs.len()));
        }
        if let Some(row) = funcs.iter().find(|row| row.len() != n) {
            return Err(MultiFluidError::IncompatibleComponents(n, row.len()));
        }
        Ok(Self { f, funcs })
    }

    /// Interaction factors `F_ij`.
    pub fn f(&self) -> &DMatrix<f64> {
        &self.f
    }

    /// Departure function of the pair (`i`, `j`).
    pub fn function(&self, i: usize, j: usize) -> &E {
        &self.funcs[i][j]
    }
}

impl<E: HelmholtzTerm> MixtureContribution for DepartureContribution<E> {
    fn alphar<D: DualNum<f64> + Copy>(&self, tau: D, delta: D, molefracs: &DVector<D>) -> D {
        let n = molefracs.len();
        let mut res = D::zero();
        for i in 0..n {
            for j in i + 1..n {
                let f = self.f[(i, j)];
                if f != 0.0 {
                    res += molefracs[i] * molefracs[j] * self.funcs[i][j].alphar(tau, delta) * f;
                }
            }
        }
        res
    }
}
