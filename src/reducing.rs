//! Mixing rules for the reducing temperature and density of a mixture.
use crate::errors::{MultiFluidError, MultiFluidResult};
use nalgebra::{DMatrix, DVector};
use num_dual::DualNum;

/// Reducing temperature and reducing density as functions of the composition.
pub trait ReducingFunction {
    /// Reducing temperature `T_r(x)`.
    fn tr<D: DualNum<f64> + Copy>(&self, molefracs: &DVector<D>) -> D;

    /// Reducing molar density `rho_r(x)`.
    fn rhor<D: DualNum<f64> + Copy>(&self, molefracs: &DVector<D>) -> D;
}

fn check_shapes(
    n: usize,
    vectors: &[&DVector<f64>],
    matrices: &[&DMatrix<f64>],
) -> MultiFluidResult<()> {
    if let Some(v) = vectors.iter().find(|v| v.len() != n) {
        return Err(MultiFluidError::IncompatibleComponents(n, v.len()));
    }
    if let Some(m) = matrices.iter().find(|m| m.shape() != (n, n)) {
        return Err(MultiFluidError::IncompatibleComponents(n, m.nrows().max(m.ncols())));
    }
    Ok(())
}

/// `(vc_i^(1/3) + vc_j^(1/3))^3 / 8`
fn volume_combination(vc: &DVector<f64>, i: usize, j: usize) -> f64 {
    0.125 * (vc[i].cbrt() + vc[j].cbrt()).powi(3)
}

/// Reducing function with the quadratic mixing rule of the GERG-2004/2008 models.
///
/// ```text
/// Y(x) = sum_i x_i^2 Y_c,i + sum_{i<j} 2 x_i x_j (x_i + x_j) / (beta_ij^2 x_i + x_j) Y_ij
/// ```
///
/// Storage invariants: `beta(j,i) = 1 / beta(i,j)` and `gamma(j,i) = gamma(i,j)`.
/// The cross parameters `Y_ij` are computed once for both orders of each pair.
#[derive(Clone, Debug)]
pub struct MultiFluidReducingFunction {
    beta_t: DMatrix<f64>,
    gamma_t: DMatrix<f64>,
    beta_v: DMatrix<f64>,
    gamma_v: DMatrix<f64>,
    tc: DVector<f64>,
    vc: DVector<f64>,
    yt: DMatrix<f64>,
    yv: DMatrix<f64>,
}

impl MultiFluidReducingFunction {
    pub fn new(
        beta_t: DMatrix<f64>,
        gamma_t: DMatrix<f64>,
        beta_v: DMatrix<f64>,
        gamma_v: DMatrix<f64>,
        tc: DVector<f64>,
        vc: DVector<f64>,
    ) -> MultiFluidResult<Self> {
        let n = tc.len();
        check_shapes(n, &[&vc], &[&beta_t, &gamma_t, &beta_v, &gamma_v])?;

        let mut yt = DMatrix::zeros(n, n);
        let mut yv = DMatrix::zeros(n, n);
        for i in 0..n {
            for j in i + 1..n {
                let t = (tc[i] * tc[j]).sqrt();
                let v = volume_combination(&vc, i, j);
                yt[(i, j)] = beta_t[(i, j)] * gamma_t[(i, j)] * t;
                yt[(j, i)] = beta_t[(j, i)] * gamma_t[(j, i)] * t;
                yv[(i, j)] = beta_v[(i, j)] * gamma_v[(i, j)] * v;
                yv[(j, i)] = beta_v[(j, i)] * gamma_v[(j, i)] * v;
            }
        }
        Ok(Self {
            beta_t,
            gamma_t,
            beta_v,
            gamma_v,
            tc,
            vc,
            yt,
            yv,
        })
    }

    fn y<D: DualNum<f64> + Copy>(
        z: &DVector<D>,
        yc: &DVector<f64>,
        beta: &DMatrix<f64>,
        yij: &DMatrix<f64>,
    ) -> D {
        let n = z.len();
        let mut sum1 = D::zero();
        for i in 0..n {
            sum1 += z[i] * z[i] * yc[i];
        }
        let mut sum2 = D::zero();
        for i in 0..n {
            for j in i + 1..n {
                sum2 += z[i] * z[j] * (z[i] + z[j]) / (z[i] * beta[(i, j)].powi(2) + z[j])
                    * (2.0 * yij[(i, j)]);
            }
        }
        sum1 + sum2
    }

    pub fn tc(&self) -> &DVector<f64> {
        &self.tc
    }

    pub fn vc(&self) -> &DVector<f64> {
        &self.vc
    }

    pub fn beta_t(&self) -> &DMatrix<f64> {
        &self.beta_t
    }

    pub fn gamma_t(&self) -> &DMatrix<f64> {
        &self.gamma_t
    }

    pub fn beta_v(&self) -> &DMatrix<f64> {
        &self.beta_v
    }

    pub fn gamma_v(&self) -> &DMatrix<f64> {
        &self.gamma_v
    }

    /// Cross parameters of the reducing temperature.
    pub fn yt(&self) -> &DMatrix<f64> {
        &self.yt
    }

    /// Cross parameters of the reducing volume.
    pub fn yv(&self) -> &DMatrix<f64> {
        &self.yv
    }
}

impl ReducingFunction for MultiFluidReducingFunction {
    fn tr<D: DualNum<f64> + Copy>(&self, molefracs: &DVector<D>) -> D {
        Self::y(molefracs, &self.tc, &self.beta_t, &self.yt)
    }

    fn rhor<D: DualNum<f64> + Copy>(&self, molefracs: &DVector<D>) -> D {
        Self::y(molefracs, &self.vc, &self.beta_v, &self.yv).recip()
    }
}

/// Reducing function with the composition-invariant mixing rule.
///
/// ```text
/// Y(x) = sum_i sum_j x_i x_j (phi_ij + x_j lambda_ij) Y_ij
/// ```
///
/// with `Y_T,ij = sqrt(Tc_i Tc_j)` and `Y_v,ij = (vc_i^(1/3) + vc_j^(1/3))^3 / 8`.
/// Storage invariants: `phi` is symmetric, `lambda` is antisymmetric.
#[derive(Clone, Debug)]
pub struct MultiFluidInvariantReducingFunction {
    phi_t: DMatrix<f64>,
    lambda_t: DMatrix<f64>,
    phi_v: DMatrix<f64>,
    lambda_v: DMatrix<f64>,
    tc: DVector<f64>,
    vc: DVector<f64>,
    yt: DMatrix<f64>,
    yv: DMatrix<f64>,
}

impl MultiFluidInvariantReducingFunction {
    pub fn new(
        phi_t: DMatrix<f64>,
        lambda_t: DMatrix<f64>,
        phi_v: DMatrix<f64>,
        lambda_v: DMatrix<f64>,
        tc: DVector<f64>,
        vc: DVector<f64>,
    ) -> MultiFluidResult<Self> {
        let n = tc.len();
        check_shapes(n, &[&vc], &[&phi_t, &lambda_t, &phi_v, &lambda_v])?;
        let yt = DMatrix::from_fn(n, n, |i, j| (tc[i] * tc[j]).sqrt());
        let yv = DMatrix::from_fn(n, n, |i, j| volume_combination(&vc, i, j));
        Ok(Self {
            phi_t,
            lambda_t,
            phi_v,
            lambda_v,
            tc,
            vc,
            yt,
            yv,
        })
    }

    fn y<D: DualNum<f64> + Copy>(
        z: &DVector<D>,
        phi: &DMatrix<f64>,
        lambda: &DMatrix<f64>,
        yij: &DMatrix<f64>,
    ) -> D {
        let n = z.len();
        let mut sum = D::zero();
        for i in 0..n {
            for j in 0..n {
                sum += z[i] * z[j] * (z[j] * lambda[(i, j)] + phi[(i, j)]) * yij[(i, j)];
            }
        }
        sum
    }

    pub fn tc(&self) -> &DVector<f64> {
        &self.tc
    }

    pub fn vc(&self) -> &DVector<f64> {
        &self.vc
    }

    pub fn phi_t(&self) -> &DMatrix<f64> {
        &self.phi_t
    }

    pub fn lambda_t(&self) -> &DMatrix<f64> {
        &self.lambda_t
    }

    pub fn phi_v(&self) -> &DMatrix<f64> {
        &self.phi_v
    }

    pub fn lambda_v(&self) -> &DMatrix<f64> {
        &self.lambda_v
    }

    pub fn yt(&self) -> &DMatrix<f64> {
        &self.yt
    }

    pub fn yv(&self) -> &DMatrix<f64> {
        &self.yv
    }
}

impl ReducingFunction for MultiFluidInvariantReducingFunction {
    fn tr<D: DualNum<f64> + Copy>(&self, molefracs: &DVector<D>) -> D {
        Self::y(molefracs, &self.phi_t, &self.lambda_t, &self.yt)
    }

    fn rhor<D: DualNum<f64> + Copy>(&self, molefracs: &DVector<D>) -> D {
        Self::y(molefracs, &self.phi_v, &self.lambda_v, &self.yv).recip()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{dmatrix, dvector};
    use num_dual::Dual64;

    fn classic() -> MultiFluidReducingFunction {
        MultiFluidReducingFunction::new(
            dmatrix![1.0, 0.99; 1.0 / 0.99, 1.0],
            dmatrix![1.0, 1.05; 1.05, 1.0],
            dmatrix![1.0, 1.02; 1.0 / 1.02, 1.0],
            dmatrix![1.0, 0.97; 0.97, 1.0],
            dvector![190.564, 305.322],
            dvector![1.0 / 10139.128, 1.0 / 6870.854],
        )
        .unwrap()
    }

    #[test]
    fn test_pure_limit() {
        let red = classic();
        for i in 0..2 {
            let mut x = dvector![0.0, 0.0];
            x[i] = 1.0;
            assert_relative_eq!(red.tr(&x), red.tc()[i], max_relative = 1e-14);
            assert_relative_eq!(red.rhor(&x), 1.0 / red.vc()[i], max_relative = 1e-14);
        }
    }

    #[test]
    fn test_cross_parameters() {
        let red = classic();
        let t = (190.564f64 * 305.322).sqrt();
        assert_relative_eq!(red.yt()[(0, 1)], 0.99 * 1.05 * t, max_relative = 1e-14);
        assert_relative_eq!(red.yt()[(1, 0)], 1.05 * t / 0.99, max_relative = 1e-14);
        let v = ((1.0f64 / 10139.128).cbrt() + (1.0f64 / 6870.854).cbrt()).powi(3) / 8.0;
        assert_relative_eq!(red.yv()[(0, 1)], 1.02 * 0.97 * v, max_relative = 1e-14);
    }

    #[test]
    fn test_mixing_rule() {
        let red = classic();
        let x = dvector![0.3, 0.7];
        let expected = 0.09 * 190.564
            + 0.49 * 305.322
            + 2.0 * 0.21 * 1.0 / (0.99f64.powi(2) * 0.3 + 0.7) * red.yt()[(0, 1)];
        assert_relative_eq!(red.tr(&x), expected, max_relative = 1e-14);
    }

    #[test]
    fn test_component_order() {
        // swapping the components together with the reciprocal betas leaves Y unchanged
        let red = classic();
        let swapped = MultiFluidReducingFunction::new(
            dmatrix![1.0, 1.0 / 0.99; 0.99, 1.0],
            dmatrix![1.0, 1.05; 1.05, 1.0],
            dmatrix![1.0, 1.0 / 1.02; 1.02, 1.0],
            dmatrix![1.0, 0.97; 0.97, 1.0],
            dvector![305.322, 190.564],
            dvector![1.0 / 6870.854, 1.0 / 10139.128],
        )
        .unwrap();
        let x = dvector![0.25, 0.75];
        let x_swapped = dvector![0.75, 0.25];
        assert_relative_eq!(red.tr(&x), swapped.tr(&x_swapped), max_relative = 1e-13);
        assert_relative_eq!(red.rhor(&x), swapped.rhor(&x_swapped), max_relative = 1e-13);
    }

    #[test]
    fn test_invariant_reduces_to_classic() {
        let ones = DMatrix::from_element(2, 2, 1.0);
        let zeros = DMatrix::zeros(2, 2);
        let tc = dvector![190.564, 305.322];
        let vc = dvector![1.0 / 10139.128, 1.0 / 6870.854];
        let classic = MultiFluidReducingFunction::new(
            ones.clone(),
            ones.clone(),
            ones.clone(),
            ones.clone(),
            tc.clone(),
            vc.clone(),
        )
        .unwrap();
        let invariant = MultiFluidInvariantReducingFunction::new(
            ones.clone(),
            zeros.clone(),
            ones,
            zeros,
            tc,
            vc,
        )
        .unwrap();
        let x = dvector![0.4, 0.6];
        assert_relative_eq!(classic.tr(&x), invariant.tr(&x), max_relative = 1e-13);
        assert_relative_eq!(classic.rhor(&x), invariant.rhor(&x), max_relative = 1e-13);
    }

    #[test]
    fn test_invariant_lambda() {
        let tc = dvector![200.0, 300.0];
        let vc = dvector![1e-4, 2e-4];
        let red = MultiFluidInvariantReducingFunction::new(
            DMatrix::from_element(2, 2, 1.0),
            dmatrix![0.0, 0.1; -0.1, 0.0],
            DMatrix::from_element(2, 2, 1.0),
            DMatrix::zeros(2, 2),
            tc,
            vc,
        )
        .unwrap();
        let (x0, x1) = (0.4f64, 0.6f64);
        let t01 = (200.0f64 * 300.0).sqrt();
        let expected = x0 * x0 * 200.0
            + x1 * x1 * 300.0
            + x0 * x1 * (1.0 + 0.1 * x1) * t01
            + x1 * x0 * (1.0 - 0.1 * x0) * t01;
        assert_relative_eq!(red.tr(&dvector![x0, x1]), expected, max_relative = 1e-14);
    }

    #[test]
    fn test_derivative() {
        let red = classic();
        let h = 1e-7;
        let fd = (red.tr(&dvector![0.3 + h, 0.7]) - red.tr(&dvector![0.3 - h, 0.7])) / (2.0 * h);
        let x = dvector![Dual64::from(0.3).derivative(), Dual64::from(0.7)];
        assert_relative_eq!(red.tr(&x).eps, fd, max_relative = 1e-6);
    }

    #[test]
    fn test_shape_mismatch() {
        let res = MultiFluidReducingFunction::new(
            DMatrix::from_element(2, 2, 1.0),
            DMatrix::from_element(2, 2, 1.0),
            DMatrix::from_element(3, 3, 1.0),
            DMatrix::from_element(2, 2, 1.0),
            dvector![200.0, 300.0],
            dvector![1e-4, 2e-4],
        );
        assert!(matches!(
            res,
            Err(MultiFluidError::IncompatibleComponents(2, 3))
        ));
    }
}
