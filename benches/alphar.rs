//! Benchmarks for the evaluation of the residual Helmholtz energy
//! of a multi-fluid model for different types of dual numbers.
//! These should give an idea about the expected slow-down depending
//! on the dual number type used.
//!
//! The example system is the ternary mixture of methane, ethane and
//! nitrogen with GERG-type departure functions for methane/ethane and
//! methane/nitrogen.
use criterion::{criterion_group, criterion_main, Criterion};
use feos_multifluid::parameter::BuildOptions;
use feos_multifluid::{build_multifluid_model, MultiFluidModel, ResidualModel};
use nalgebra::{dvector, DVector};
use num_dual::{Dual2_64, Dual3_64, Dual64, DualNum, HyperDual64};

fn a_res<D: DualNum<f64> + Copy>(inp: (&MultiFluidModel, D, D, &DVector<D>)) -> D {
    inp.0.alphar(inp.1, inp.2, inp.3)
}

fn benchmark_dual_numbers(c: &mut Criterion) {
    let model = build_multifluid_model(
        &["Methane", "Ethane", "Nitrogen"],
        "./tests/data",
        "./tests/data/mixture_binary_pairs.json",
        &BuildOptions::new(),
    )
    .unwrap();

    let t = 240.0;
    let rho = 6000.0;
    let x = dvector![0.7, 0.2, 0.1];

    let mut group = c.benchmark_group("dual_numbers");

    // real valued evaluation
    group.bench_function("a_f64", |b| b.iter(|| a_res((&model, t, rho, &x))));

    // da_drho - dual number
    let xd = x.map(Dual64::from);
    let (td, rhod) = (Dual64::from(t), Dual64::from(rho).derivative());
    group.bench_function("a_dual", |b| b.iter(|| a_res((&model, td, rhod, &xd))));

    // d2a_drho2 - dual2 number
    let xd = x.map(Dual2_64::from);
    let (td, rhod) = (Dual2_64::from(t), Dual2_64::from(rho).derivative());
    group.bench_function("a_dual2", |b| b.iter(|| a_res((&model, td, rhod, &xd))));

    // d2a_dTdrho - hyperdual number
    let xd = x.map(HyperDual64::from);
    let (td, rhod) = (
        HyperDual64::from(t).derivative1(),
        HyperDual64::from(rho).derivative2(),
    );
    group.bench_function("a_hyperdual", |b| b.iter(|| a_res((&model, td, rhod, &xd))));

    // d3a_drho3 - dual3 number
    let xd = x.map(Dual3_64::from);
    let (td, rhod) = (Dual3_64::from(t), Dual3_64::from(rho).derivative());
    group.bench_function("a_dual3", |b| b.iter(|| a_res((&model, td, rhod, &xd))));
}

criterion_group!(bench, benchmark_dual_numbers);
criterion_main!(bench);
