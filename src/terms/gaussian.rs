use super::{check_lengths, pow, HelmholtzTerm};
use crate::errors::{MultiFluidError, MultiFluidResult};
use crate::parameter::TermRecord;
use nalgebra::DVector;
use num_dual::DualNum;

pub(crate) const GAUSSIAN_KEYS: [&str; 7] = ["n", "t", "d", "eta", "beta", "gamma", "epsilon"];

/// Read the Gaussian coefficient arrays of a record, skipping the first `skip` entries.
fn gaussian_arrays(record: &TermRecord, skip: usize) -> MultiFluidResult<[DVector<f64>; 7]> {
    let [n, t, d, eta, beta, gamma, epsilon] = GAUSSIAN_KEYS.map(|key| {
        let values = record.array(key)?;
        if values.len() < skip {
            return Err(MultiFluidError::MissingParameters(format!(
                "'{key}' has fewer than Npower = {skip} entries"
            )));
        }
        Ok(values.rows(skip, values.len() - skip).into_owned())
    });
    Ok([n?, t?, d?, eta?, beta?, gamma?, epsilon?])
}

/// Gaussian bell-shaped term.
///
/// `alpha_r = sum_k n_k delta^d_k tau^t_k exp(-eta_k (delta - epsilon_k)^2 - beta_k (tau - gamma_k)^2)`
#[derive(Clone, Debug)]
pub struct GaussianTerm {
    pub(crate) n: DVector<f64>,
    pub(crate) t: DVector<f64>,
    pub(crate) d: DVector<f64>,
    pub(crate) eta: DVector<f64>,
    pub(crate) beta: DVector<f64>,
    pub(crate) gamma: DVector<f64>,
    pub(crate) epsilon: DVector<f64>,
}

impl GaussianTerm {
    pub fn new(
        n: DVector<f64>,
        t: DVector<f64>,
        d: DVector<f64>,
        eta: DVector<f64>,
        beta: DVector<f64>,
        gamma: DVector<f64>,
        epsilon: DVector<f64>,
    ) -> MultiFluidResult<Self> {
        check_lengths(
            "Gaussian",
            &[
                ("n", &n),
                ("t", &t),
                ("d", &d),
                ("eta", &eta),
                ("beta", &beta),
                ("gamma", &gamma),
                ("epsilon", &epsilon),
            ],
        )?;
        Ok(Self {
            n,
            t,
            d,
            eta,
            beta,
            gamma,
            epsilon,
        })
    }

    pub fn from_record(record: &TermRecord) -> MultiFluidResult<Self> {
        Self::tail(record, 0)
    }

    /// All but the first `skip` entries of every coefficient array as a Gaussian term.
    pub(crate) fn tail(record: &TermRecord, skip: usize) -> MultiFluidResult<Self> {
        let [n, t, d, eta, beta, gamma, epsilon] = gaussian_arrays(record, skip)?;
        Self::new(n, t, d, eta, beta, gamma, epsilon)
    }

    pub fn len(&self) -> usize {
        self.n.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n.is_empty()
    }
}

impl HelmholtzTerm for GaussianTerm {
    fn alphar<D: DualNum<f64> + Copy>(&self, tau: D, delta: D) -> D {
        let mut res = D::zero();
        for k in 0..self.n.len() {
            let exponent = -(delta - self.epsilon[k]).powi(2) * self.eta[k]
                - (tau - self.gamma[k]).powi(2) * self.beta[k];
            res += pow(delta, self.d[k]) * pow(tau, self.t[k]) * exponent.exp() * self.n[k];
        }
        res
    }
}

/// Exponential part of the GERG-2004/GERG-2008 departure functions.
///
/// `alpha_r = sum_k n_k delta^d_k tau^t_k exp(-eta_k (delta - epsilon_k)^2 - beta_k (delta - gamma_k))`
#[derive(Clone, Debug)]
pub struct Gerg2004Term {
    pub(crate) n: DVector<f64>,
    pub(crate) t: DVector<f64>,
    pub(crate) d: DVector<f64>,
    pub(crate) eta: DVector<f64>,
    pub(crate) beta: DVector<f64>,
    pub(crate) gamma: DVector<f64>,
    pub(crate) epsilon: DVector<f64>,
}

impl Gerg2004Term {
    pub fn new(
        n: DVector<f64>,
        t: DVector<f64>,
        d: DVector<f64>,
        eta: DVector<f64>,
        beta: DVector<f64>,
        gamma: DVector<f64>,
        epsilon: DVector<f64>,
    ) -> MultiFluidResult<Self> {
        check_lengths(
            "GERG",
            &[
                ("n", &n),
                ("t", &t),
                ("d", &d),
                ("eta", &eta),
                ("beta", &beta),
                ("gamma", &gamma),
                ("epsilon", &epsilon),
            ],
        )?;
        Ok(Self {
            n,
            t,
            d,
            eta,
            beta,
            gamma,
            epsilon,
        })
    }

    /// All but the first `skip` entries of every coefficient array as a GERG term.
    pub(crate) fn tail(record: &TermRecord, skip: usize) -> MultiFluidResult<Self> {
        let [n, t, d, eta, beta, gamma, epsilon] = gaussian_arrays(record, skip)?;
        Self::new(n, t, d, eta, beta, gamma, epsilon)
    }

    pub fn len(&self) -> usize {
        self.n.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n.is_empty()
    }
}

impl HelmholtzTerm for Gerg2004Term {
    fn alphar<D: DualNum<f64> + Copy>(&self, tau: D, delta: D) -> D {
        let mut res = D::zero();
        for k in 0..self.n.len() {
            let exponent = -(delta - self.epsilon[k]).powi(2) * self.eta[k]
                - (delta - self.gamma[k]) * self.beta[k];
            res += pow(delta, self.d[k]) * pow(tau, self.t[k]) * exponent.exp() * self.n[k];
        }
        res
    }
}

/// Gaussian-like term of Gao et al. with a rational function of `tau` in the exponent.
///
/// `alpha_r = sum_k n_k delta^d_k tau^t_k exp(eta_k (delta - epsilon_k)^2 + 1 / (beta_k (tau - gamma_k)^2 + b_k))`
///
/// The sign of `eta` is flipped with respect to the value given in fluid files.
#[derive(Clone, Debug)]
pub struct GaoBTerm {
    n: DVector<f64>,
    t: DVector<f64>,
    d: DVector<f64>,
    eta: DVector<f64>,
    beta: DVector<f64>,
    gamma: DVector<f64>,
    epsilon: DVector<f64>,
    b: DVector<f64>,
}

impl GaoBTerm {
    /// Create a new term; `eta` is given in the convention of the fluid files and negated here.
    #[expect(clippy::too_many_arguments)]
    pub fn new(
        n: DVector<f64>,
        t: DVector<f64>,
        d: DVector<f64>,
        eta: DVector<f64>,
        beta: DVector<f64>,
        gamma: DVector<f64>,
        epsilon: DVector<f64>,
        b: DVector<f64>,
    ) -> MultiFluidResult<Self> {
        check_lengths(
            "GaoB",
            &[
                ("n", &n),
                ("t", &t),
                ("d", &d),
                ("eta", &eta),
                ("beta", &beta),
                ("gamma", &gamma),
                ("epsilon", &epsilon),
                ("b", &b),
            ],
        )?;
        Ok(Self {
            n,
            t,
            d,
            eta: -eta,
            beta,
            gamma,
            epsilon,
            b,
        })
    }

    pub fn from_record(record: &TermRecord) -> MultiFluidResult<Self> {
        let [n, t, d, eta, beta, gamma, epsilon] = gaussian_arrays(record, 0)?;
        Self::new(n, t, d, eta, beta, gamma, epsilon, record.array("b")?)
    }
}

impl HelmholtzTerm for GaoBTerm {
    fn alphar<D: DualNum<f64> + Copy>(&self, tau: D, delta: D) -> D {
        let mut res = D::zero();
        for k in 0..self.n.len() {
            let exponent = (delta - self.epsilon[k]).powi(2) * self.eta[k]
                + ((tau - self.gamma[k]).powi(2) * self.beta[k] + self.b[k]).recip();
            res += pow(delta, self.d[k]) * pow(tau, self.t[k]) * exponent.exp() * self.n[k];
        }
        res
    }
}
