use crate::contributions::{
    CorrespondingStatesContribution, DepartureContribution, MixtureContribution,
};
use crate::reducing::{
    MultiFluidInvariantReducingFunction, MultiFluidReducingFunction, ReducingFunction,
};
use nalgebra::DVector;
use num_dual::DualNum;

/// Molar gas constant in J/mol/K.
pub const RGAS: f64 = 8.314462618;

/// Reduced residual Helmholtz energy of a mixture as a function of temperature,
/// density and composition.
///
/// All methods are generic over the scalar type, so derivatives with respect to
/// any of the arguments are obtained by evaluating with dual numbers.
pub trait ResidualModel {
    /// Reduced residual Helmholtz energy at temperature, total molar density and mole fractions.
    fn alphar<D: DualNum<f64> + Copy>(
        &self,
        temperature: D,
        density: D,
        molefracs: &DVector<D>,
    ) -> D;

    /// Reduced residual Helmholtz energy at temperature and partial densities.
    ///
    /// The total density defaults to the sum of the partial densities.
    fn alphar_rhovec<D: DualNum<f64> + Copy>(
        &self,
        temperature: D,
        partial_density: &DVector<D>,
        total_density: Option<D>,
    ) -> D {
        let density = total_density
            .unwrap_or_else(|| partial_density.iter().fold(D::zero(), |acc, &rho| acc + rho));
        let molefracs = partial_density.map(|rho| rho / density);
        self.alphar(temperature, density, &molefracs)
    }

    /// Molar gas constant used with the model.
    fn gas_constant(&self) -> f64 {
        RGAS
    }
}

fn alphar_reduced<D, R, C, Dep>(
    redfunc: &R,
    corr: &C,
    dep: &Dep,
    temperature: D,
    density: D,
    molefracs: &DVector<D>,
) -> D
where
    D: DualNum<f64> + Copy,
    R: ReducingFunction,
    C: MixtureContribution,
    Dep: MixtureContribution,
{
    let tau = redfunc.tr(molefracs) / temperature;
    let delta = density / redfunc.rhor(molefracs);
    corr.alphar(tau, delta, molefracs) + dep.alphar(tau, delta, molefracs)
}

/// Multi-fluid mixture model.
///
/// `alpha_r(T, rho, x) = alpha_r^corr(tau, delta, x) + alpha_r^dep(tau, delta, x)` with
/// `tau = T_r(x) / T` and `delta = rho / rho_r(x)`.
#[derive(Clone, Debug)]
pub struct MultiFluid<
    R = MultiFluidReducingFunction,
    C = CorrespondingStatesContribution,
    Dep = DepartureContribution,
> {
    pub redfunc: R,
    pub corr: C,
    pub dep: Dep,
    meta: String,
}

/// Multi-fluid model built from fluid and mixture data.
pub type MultiFluidModel = MultiFluid;

impl<R, C, Dep> MultiFluid<R, C, Dep> {
    pub fn new(redfunc: R, corr: C, dep: Dep) -> Self {
        Self {
            redfunc,
            corr,
            dep,
            meta: String::new(),
        }
    }

    /// Metadata stored with the model (empty by default).
    pub fn get_meta(&self) -> &str {
        &self.meta
    }

    pub fn set_meta<S: Into<String>>(&mut self, meta: S) {
        self.meta = meta.into();
    }
}

impl<R, C, Dep> ResidualModel for MultiFluid<R, C, Dep>
where
    R: ReducingFunction,
    C: MixtureContribution,
    Dep: MixtureContribution,
{
    fn alphar<D: DualNum<f64> + Copy>(
        &self,
        temperature: D,
        density: D,
        molefracs: &DVector<D>,
    ) -> D {
        alphar_reduced(
            &self.redfunc,
            &self.corr,
            &self.dep,
            temperature,
            density,
            molefracs,
        )
    }
}

/// Model that borrows the corresponding-states contribution of a base model and
/// brings its own reducing function and departure contribution.
///
/// The adapter can not outlive the model it borrows from.
#[derive(Clone, Debug)]
pub struct MultiFluidAdapter<
    'a,
    R,
    Dep,
    BR = MultiFluidReducingFunction,
    C = CorrespondingStatesContribution,
    BD = DepartureContribution,
> {
    base: &'a MultiFluid<BR, C, BD>,
    pub redfunc: R,
    pub dep: Dep,
    meta: String,
}

/// Adapter with new binary interaction parameters and departure functions.
pub type Mutant<'a> = MultiFluidAdapter<'a, MultiFluidReducingFunction, DepartureContribution>;

/// Adapter with the composition-invariant reducing function.
pub type InvariantMutant<'a> =
    MultiFluidAdapter<'a, MultiFluidInvariantReducingFunction, DepartureContribution>;

impl<'a, R, Dep, BR, C, BD> MultiFluidAdapter<'a, R, Dep, BR, C, BD> {
    pub fn new(base: &'a MultiFluid<BR, C, BD>, redfunc: R, dep: Dep) -> Self {
        Self {
            base,
            redfunc,
            dep,
            meta: String::new(),
        }
    }

    /// The model the pure-fluid contribution is borrowed from.
    pub fn base(&self) -> &'a MultiFluid<BR, C, BD> {
        self.base
    }

    pub fn corr(&self) -> &'a C {
        &self.base.corr
    }

    pub fn get_meta(&self) -> &str {
        &self.meta
    }

    pub fn set_meta<S: Into<String>>(&mut self, meta: S) {
        self.meta = meta.into();
    }
}

impl<R, Dep, BR, C, BD> ResidualModel for MultiFluidAdapter<'_, R, Dep, BR, C, BD>
where
    R: ReducingFunction,
    Dep: MixtureContribution,
    C: MixtureContribution,
{
    fn alphar<D: DualNum<f64> + Copy>(
        &self,
        temperature: D,
        density: D,
        molefracs: &DVector<D>,
    ) -> D {
        alphar_reduced(
            &self.redfunc,
            &self.base.corr,
            &self.dep,
            temperature,
            density,
            molefracs,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::{DepartureTerms, EosTerms, HelmholtzTerm, PowerTerm};
    use approx::assert_relative_eq;
    use nalgebra::{dmatrix, dvector, DMatrix};
    use num_dual::Dual64;

    fn eos(n: f64, t: f64) -> EosTerms {
        let p = PowerTerm::new(
            dvector![n, 0.1],
            dvector![t, 1.5],
            dvector![1.0, 3.0],
            Some(dvector![0.0, 2.0]),
        )
        .unwrap();
        [p].into_iter().collect()
    }

    fn binary() -> MultiFluidModel {
        let tc = dvector![190.564, 305.322];
        let vc = dvector![1.0 / 10139.128, 1.0 / 6870.854];
        let redfunc = MultiFluidReducingFunction::new(
            dmatrix![1.0, 0.99; 1.0 / 0.99, 1.0],
            dmatrix![1.0, 1.05; 1.05, 1.0],
            dmatrix![1.0, 1.01; 1.0 / 1.01, 1.0],
            dmatrix![1.0, 0.98; 0.98, 1.0],
            tc,
            vc,
        )
        .unwrap();
        let corr = CorrespondingStatesContribution::new(vec![eos(0.5, 0.25), eos(-0.8, 1.0)]);
        let dep = DepartureContribution::new(
            DMatrix::zeros(2, 2),
            vec![vec![DepartureTerms::null(); 2]; 2],
        )
        .unwrap();
        MultiFluid::new(redfunc, corr, dep)
    }

    #[test]
    fn test_single_component() {
        let pure = eos(0.5, 0.25);
        let redfunc = MultiFluidReducingFunction::new(
            DMatrix::from_element(1, 1, 1.0),
            DMatrix::from_element(1, 1, 1.0),
            DMatrix::from_element(1, 1, 1.0),
            DMatrix::from_element(1, 1, 1.0),
            dvector![190.564],
            dvector![1.0 / 10139.128],
        )
        .unwrap();
        let dep = DepartureContribution::new(
            DMatrix::zeros(1, 1),
            vec![vec![DepartureTerms::null()]],
        )
        .unwrap();
        let model = MultiFluid::new(
            redfunc,
            CorrespondingStatesContribution::new(vec![pure.clone()]),
            dep,
        );
        let (t, rho) = (250.0, 5000.0);
        let expected = pure.alphar(190.564 / t, rho / 10139.128);
        assert_relative_eq!(
            model.alphar(t, rho, &dvector![1.0]),
            expected,
            max_relative = 1e-14
        );
    }

    #[test]
    fn test_rhovec() {
        let model = binary();
        let t = 280.0;
        let rhovec = dvector![1200.0, 1800.0];
        let x = dvector![0.4, 0.6];
        let a = model.alphar(t, 3000.0, &x);
        assert_relative_eq!(model.alphar_rhovec(t, &rhovec, None), a, max_relative = 1e-14);
        assert_relative_eq!(
            model.alphar_rhovec(t, &rhovec, Some(3000.0)),
            a,
            max_relative = 1e-14
        );
    }

    #[test]
    fn test_density_derivative() {
        let model = binary();
        let (t, rho) = (280.0, 3000.0);
        let x = dvector![0.4, 0.6];
        let h = 1e-3;
        let fd = (model.alphar(t, rho + h, &x) - model.alphar(t, rho - h, &x)) / (2.0 * h);
        let a = model.alphar(
            Dual64::from(t),
            Dual64::from(rho).derivative(),
            &x.map(Dual64::from),
        );
        assert_relative_eq!(a.re, model.alphar(t, rho, &x), max_relative = 1e-14);
        assert_relative_eq!(a.eps, fd, max_relative = 1e-6);
    }

    #[test]
    fn test_meta() {
        let mut model = binary();
        assert_eq!(model.get_meta(), "");
        model.set_meta("{}");
        assert_eq!(model.get_meta(), "{}");
        assert_eq!(model.gas_constant(), RGAS);
    }

    #[test]
    fn test_adapter_borrows_base() {
        let model = binary();
        let redfunc = model.redfunc.clone();
        let dep = model.dep.clone();
        let adapter = Mutant::new(&model, redfunc, dep);
        let x = dvector![0.3, 0.7];
        assert_eq!(adapter.alphar(300.0, 2000.0, &x), model.alphar(300.0, 2000.0, &x));
        assert!(std::ptr::eq(adapter.corr(), &model.corr));
        assert_eq!(adapter.gas_constant(), RGAS);
    }
}
