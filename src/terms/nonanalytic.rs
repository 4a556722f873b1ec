use super::{check_lengths, HelmholtzTerm};
use crate::errors::MultiFluidResult;
use crate::parameter::TermRecord;
use nalgebra::DVector;
use num_dual::DualNum;

/// Non-analytic term for the critical region (Span & Wagner).
///
/// ```text
/// alpha_r = sum_k n_k Delta^b_k delta psi
/// Delta   = theta^2 + B_k ((delta - 1)^2)^a_k
/// theta   = (1 - tau) + A_k ((delta - 1)^2)^(1 / (2 beta_k))
/// psi     = exp(-C_k (delta - 1)^2 - D_k (tau - 1)^2)
/// ```
#[derive(Clone, Debug)]
pub struct NonAnalyticTerm {
    n: DVector<f64>,
    aa: DVector<f64>,
    bb: DVector<f64>,
    cc: DVector<f64>,
    dd: DVector<f64>,
    a: DVector<f64>,
    b: DVector<f64>,
    beta: DVector<f64>,
}

impl NonAnalyticTerm {
    #[expect(clippy::too_many_arguments)]
    pub fn new(
        n: DVector<f64>,
        aa: DVector<f64>,
        bb: DVector<f64>,
        cc: DVector<f64>,
        dd: DVector<f64>,
        a: DVector<f64>,
        b: DVector<f64>,
        beta: DVector<f64>,
    ) -> MultiFluidResult<Self> {
        check_lengths(
            "nonanalytic",
            &[
                ("n", &n),
                ("A", &aa),
                ("B", &bb),
                ("C", &cc),
                ("D", &dd),
                ("a", &a),
                ("b", &b),
                ("beta", &beta),
            ],
        )?;
        Ok(Self {
            n,
            aa,
            bb,
            cc,
            dd,
            a,
            b,
            beta,
        })
    }

    pub fn from_record(record: &TermRecord) -> MultiFluidResult<Self> {
        Self::new(
            record.array("n")?,
            record.array("A")?,
            record.array("B")?,
            record.array("C")?,
            record.array("D")?,
            record.array("a")?,
            record.array("b")?,
            record.array("beta")?,
        )
    }
}

impl HelmholtzTerm for NonAnalyticTerm {
    fn alphar<D: DualNum<f64> + Copy>(&self, tau: D, delta: D) -> D {
        let delta_m1_sq = (delta - 1.0).powi(2);
        let tau_m1_sq = (tau - 1.0).powi(2);
        // powf of a dual zero has NaN derivatives
        let at_critical_density = delta_m1_sq.re() == 0.0;
        let mut res = D::zero();
        for k in 0..self.n.len() {
            let mut theta = -tau + 1.0;
            let mut big_delta = D::zero();
            if !at_critical_density {
                theta += delta_m1_sq.powf(0.5 / self.beta[k]) * self.aa[k];
                big_delta += delta_m1_sq.powf(self.a[k]) * self.bb[k];
            }
            big_delta += theta * theta;
            if big_delta.re() == 0.0 {
                continue;
            }
            let psi = (-delta_m1_sq * self.cc[k] - tau_m1_sq * self.dd[k]).exp();
            res += big_delta.powf(self.b[k]) * delta * psi * self.n[k];
        }
        res
    }
}
