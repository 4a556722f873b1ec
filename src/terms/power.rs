use super::{check_lengths, integer_exponents, pow, HelmholtzTerm};
use crate::errors::{MultiFluidError, MultiFluidResult};
use crate::parameter::TermRecord;
use nalgebra::DVector;
use num_dual::DualNum;

/// Polynomial term with an optional exponential cutoff in the density.
///
/// `alpha_r = sum_k n_k delta^d_k tau^t_k exp(-c_k delta^l_k)` with `c_k = 1` if `l_k > 0`
/// and `c_k = 0` otherwise.
#[derive(Clone, Debug)]
pub struct PowerTerm {
    pub(crate) n: DVector<f64>,
    pub(crate) t: DVector<f64>,
    pub(crate) d: DVector<f64>,
    pub(crate) c: DVector<f64>,
    pub(crate) l: Vec<i32>,
}

impl PowerTerm {
    /// Create a new power term. Without `l`, no exponential cutoff is applied.
    pub fn new(
        n: DVector<f64>,
        t: DVector<f64>,
        d: DVector<f64>,
        l: Option<DVector<f64>>,
    ) -> MultiFluidResult<Self> {
        let l = l.unwrap_or_else(|| DVector::zeros(n.len()));
        check_lengths("power", &[("n", &n), ("t", &t), ("d", &d), ("l", &l)])?;
        let c = l.map(|l| if l > 0.0 { 1.0 } else { 0.0 });
        let l = integer_exponents("power", &l)?;
        Ok(Self { n, t, d, c, l })
    }

    pub fn from_record(record: &TermRecord) -> MultiFluidResult<Self> {
        let n = record.array("n")?;
        let t = record.array_or_zeros("t", n.len())?;
        let d = record.array_or_zeros("d", n.len())?;
        Self::new(n, t, d, record.array_opt("l")?)
    }

    /// The first `count` entries of every coefficient array as a power term.
    pub(crate) fn head(record: &TermRecord, count: usize) -> MultiFluidResult<Self> {
        let head = |key: &str| -> MultiFluidResult<DVector<f64>> {
            let values = record.array(key)?;
            if values.len() < count {
                return Err(MultiFluidError::MissingParameters(format!(
                    "'{key}' has fewer than Npower = {count} entries"
                )));
            }
            Ok(values.rows(0, count).into_owned())
        };
        let l = match record.array_opt("l")? {
            Some(_) => Some(head("l")?),
            None => None,
        };
        Self::new(head("n")?, head("t")?, head("d")?, l)
    }

    pub fn len(&self) -> usize {
        self.n.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n.is_empty()
    }
}

impl HelmholtzTerm for PowerTerm {
    fn alphar<D: DualNum<f64> + Copy>(&self, tau: D, delta: D) -> D {
        let mut res = D::zero();
        for k in 0..self.n.len() {
            let mut term = pow(delta, self.d[k]) * pow(tau, self.t[k]) * self.n[k];
            if self.c[k] > 0.0 {
                term *= (-delta.powi(self.l[k]) * self.c[k]).exp();
            }
            res += term;
        }
        res
    }
}

/// Power term with an additional exponential cutoff in the temperature.
///
/// `alpha_r = sum_k n_k delta^d_k tau^t_k exp(-delta^l_k - tau^m_k)`, where the cutoffs
/// are dropped for `l_k = 0` and `m_k = 0`, respectively.
#[derive(Clone, Debug)]
pub struct Lemmon2005Term {
    n: DVector<f64>,
    t: DVector<f64>,
    d: DVector<f64>,
    l: Vec<i32>,
    m: DVector<f64>,
}

impl Lemmon2005Term {
    pub fn new(
        n: DVector<f64>,
        t: DVector<f64>,
        d: DVector<f64>,
        l: DVector<f64>,
        m: DVector<f64>,
    ) -> MultiFluidResult<Self> {
        check_lengths(
            "Lemmon2005",
            &[("n", &n), ("t", &t), ("d", &d), ("m", &m), ("l", &l)],
        )?;
        let l = integer_exponents("Lemmon2005", &l)?;
        Ok(Self { n, t, d, l, m })
    }

    pub fn from_record(record: &TermRecord) -> MultiFluidResult<Self> {
        Self::new(
            record.array("n")?,
            record.array("t")?,
            record.array("d")?,
            record.array("l")?,
            record.array("m")?,
        )
    }
}

impl HelmholtzTerm for Lemmon2005Term {
    fn alphar<D: DualNum<f64> + Copy>(&self, tau: D, delta: D) -> D {
        let mut res = D::zero();
        for k in 0..self.n.len() {
            let mut exponent = D::zero();
            if self.l[k] != 0 {
                exponent -= delta.powi(self.l[k]);
            }
            if self.m[k] != 0.0 {
                exponent -= pow(tau, self.m[k]);
            }
            res += pow(delta, self.d[k]) * pow(tau, self.t[k]) * exponent.exp() * self.n[k];
        }
        res
    }
}

/// Exponential term with a prefactor in the exponent.
///
/// `alpha_r = sum_k n_k delta^d_k tau^t_k exp(-g_k delta^l_k)`
#[derive(Clone, Debug)]
pub struct ExponentialTerm {
    n: DVector<f64>,
    t: DVector<f64>,
    d: DVector<f64>,
    g: DVector<f64>,
    l: Vec<i32>,
}

impl ExponentialTerm {
    pub fn new(
        n: DVector<f64>,
        t: DVector<f64>,
        d: DVector<f64>,
        g: DVector<f64>,
        l: DVector<f64>,
    ) -> MultiFluidResult<Self> {
        check_lengths(
            "exponential",
            &[("n", &n), ("t", &t), ("d", &d), ("g", &g), ("l", &l)],
        )?;
        let l = integer_exponents("exponential", &l)?;
        Ok(Self { n, t, d, g, l })
    }

    pub fn from_record(record: &TermRecord) -> MultiFluidResult<Self> {
        Self::new(
            record.array("n")?,
            record.array("t")?,
            record.array("d")?,
            record.array("g")?,
            record.array("l")?,
        )
    }
}

impl HelmholtzTerm for ExponentialTerm {
    fn alphar<D: DualNum<f64> + Copy>(&self, tau: D, delta: D) -> D {
        let mut res = D::zero();
        for k in 0..self.n.len() {
            res += pow(delta, self.d[k])
                * pow(tau, self.t[k])
                * (-delta.powi(self.l[k]) * self.g[k]).exp()
                * self.n[k];
        }
        res
    }
}
