use approx::assert_relative_eq;
use feos_multifluid::terms::HelmholtzTerm;
use feos_multifluid::{
    CorrespondingStatesContribution, DepartureContribution, MultiFluid, MultiFluidResult,
    ReducingFunction, ResidualModel,
};
use nalgebra::{dvector, DMatrix, DVector};
use num_dual::{Dual64, DualNum};

/// alpha_r = tau delta
#[derive(Clone)]
struct DummyEos;

impl HelmholtzTerm for DummyEos {
    fn alphar<D: DualNum<f64> + Copy>(&self, tau: D, delta: D) -> D {
        tau * delta
    }
}

/// Reducing temperature and density are both the first mole fraction.
struct DummyReducingFunction;

impl ReducingFunction for DummyReducingFunction {
    fn tr<D: DualNum<f64> + Copy>(&self, molefracs: &DVector<D>) -> D {
        molefracs[0]
    }

    fn rhor<D: DualNum<f64> + Copy>(&self, molefracs: &DVector<D>) -> D {
        molefracs[0]
    }
}

type DummyModel = MultiFluid<
    DummyReducingFunction,
    CorrespondingStatesContribution<DummyEos>,
    DepartureContribution<DummyEos>,
>;

fn dummy_model() -> MultiFluidResult<DummyModel> {
    let corr = CorrespondingStatesContribution::new(vec![DummyEos; 2]);
    let dep = DepartureContribution::new(DMatrix::zeros(2, 2), vec![vec![DummyEos; 2]; 2])?;
    Ok(MultiFluid::new(DummyReducingFunction, corr, dep))
}

#[test]
fn test_dummy_model() -> MultiFluidResult<()> {
    let model = dummy_model()?;
    let t = 300.0;
    let rhovec = dvector![1.0, 2.0];
    let x1 = 1.0 / 3.0;
    let tau = x1 / t;
    let delta = 3.0 / x1;
    assert_relative_eq!(
        model.alphar_rhovec(t, &rhovec, None),
        tau * delta,
        max_relative = 1e-14
    );
    assert_relative_eq!(
        model.alphar(t, 3.0, &dvector![x1, 1.0 - x1]),
        tau * delta,
        max_relative = 1e-14
    );
    Ok(())
}

#[test]
fn test_dummy_model_derivative() -> MultiFluidResult<()> {
    // alpha_r = x1 / T * rho / x1 = rho / T
    let model = dummy_model()?;
    let (t, rho) = (300.0, 3.0);
    let x = dvector![0.25, 0.75].map(Dual64::from);
    let a = model.alphar(Dual64::from(t).derivative(), Dual64::from(rho), &x);
    assert_relative_eq!(a.re, rho / t, max_relative = 1e-14);
    assert_relative_eq!(a.eps, -rho / (t * t), max_relative = 1e-14);
    Ok(())
}
