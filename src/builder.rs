//! Assembly of multi-fluid models from fluid, binary and departure function records.
use crate::contributions::{CorrespondingStatesContribution, DepartureContribution};
use crate::errors::{MultiFluidError, MultiFluidResult};
use crate::model::{InvariantMutant, MultiFluid, MultiFluidModel, Mutant};
use crate::parameter::{BinaryRecord, BuildOptions, DepartureRecord, FluidRecord, TermRecord};
use crate::reducing::{MultiFluidInvariantReducingFunction, MultiFluidReducingFunction};
use crate::terms::{
    check_record_lengths, DepartureTerms, EosTerms, GaussianTerm, Gerg2004Term, NullTerm,
    PowerTerm, PureTerm, GAUSSIAN_KEYS,
};
use crate::{log_iter, log_result};
use nalgebra::{DMatrix, DVector};
use serde_json::Value;
use std::path::Path;

const DEPARTURE_TYPES: [&str; 5] = [
    "Exponential",
    "GERG-2004",
    "GERG-2008",
    "Gaussian+Exponential",
    "none",
];

/// Parameters of a binary pair in the order requested by the caller.
struct PairParameters<'a> {
    /// `[beta_t, gamma_t, beta_v, gamma_v]`
    reducing: [f64; 4],
    f: f64,
    function: Option<&'a str>,
}

fn pair_parameters<'a>(
    binaries: &'a [BinaryRecord],
    name1: &str,
    name2: &str,
    options: &BuildOptions,
) -> MultiFluidResult<PairParameters<'a>> {
    match BinaryRecord::find(binaries, name1, name2) {
        Some((record, reversed)) => Ok(PairParameters {
            reducing: record.reducing_parameters(reversed)?,
            f: record.f,
            function: record.departure_function(),
        }),
        None if options.estimate => {
            let record = BinaryRecord::estimated(name1, name2);
            Ok(PairParameters {
                reducing: record.reducing_parameters(false)?,
                f: record.f,
                function: None,
            })
        }
        None => Err(MultiFluidError::BinaryPairNotFound(
            name1.into(),
            name2.into(),
        )),
    }
}

/// Critical temperatures and critical molar volumes of the fluids.
pub fn get_tc_vc(fluids: &[FluidRecord]) -> MultiFluidResult<(DVector<f64>, DVector<f64>)> {
    let mut tc = DVector::zeros(fluids.len());
    let mut vc = DVector::zeros(fluids.len());
    for (i, fluid) in fluids.iter().enumerate() {
        (tc[i], vc[i]) = fluid.tc_vc()?;
    }
    Ok((tc, vc))
}

/// Residual Helmholtz energy of a pure fluid from its term records.
pub fn build_eos_terms(records: &[TermRecord]) -> MultiFluidResult<EosTerms> {
    records.iter().map(PureTerm::from_record).collect()
}

/// Departure function from its record.
///
/// Composite types (`GERG-2004`, `GERG-2008` and `Gaussian+Exponential`) are split
/// into a power term with the first `Npower` coefficients and a Gaussian-type term
/// with the remaining ones.
pub fn build_departure_function(record: &TermRecord) -> MultiFluidResult<DepartureTerms> {
    let mut dep = DepartureTerms::new();
    match record.ty.as_str() {
        "Exponential" => dep.add_term(PowerTerm::from_record(record)?),
        "GERG-2004" | "GERG-2008" => {
            check_record_lengths("GERG", record, &GAUSSIAN_KEYS)?;
            let npower = record.integer("Npower")?;
            dep.add_term(PowerTerm::head(record, npower)?);
            dep.add_term(Gerg2004Term::tail(record, npower)?);
        }
        "Gaussian+Exponential" => {
            check_record_lengths("Gaussian+Exponential", record, &GAUSSIAN_KEYS)?;
            let npower = record.integer("Npower")?;
            dep.add_term(PowerTerm::head(record, npower)?);
            dep.add_term(GaussianTerm::tail(record, npower)?);
        }
        "none" => dep.add_term(NullTerm),
        ty => {
            return Err(MultiFluidError::UnknownTermType {
                ty: ty.into(),
                allowed: DEPARTURE_TYPES.join(","),
            })
        }
    }
    Ok(dep)
}

/// Reducing parameters `(beta_t, gamma_t, beta_v, gamma_v)` of all binary pairs.
///
/// `beta(j,i) = 1 / beta(i,j)` and `gamma(j,i) = gamma(i,j)`; diagonal entries are 1.
pub fn get_bip_matrices(
    binaries: &[BinaryRecord],
    components: &[&str],
    options: &BuildOptions,
) -> MultiFluidResult<(DMatrix<f64>, DMatrix<f64>, DMatrix<f64>, DMatrix<f64>)> {
    let n = components.len();
    let ones = DMatrix::from_element(n, n, 1.0);
    let (mut beta_t, mut gamma_t, mut beta_v, mut gamma_v) =
        (ones.clone(), ones.clone(), ones.clone(), ones);
    for i in 0..n {
        for j in i + 1..n {
            let [bt, gt, bv, gv] =
                pair_parameters(binaries, components[i], components[j], options)?.reducing;
            beta_t[(i, j)] = bt;
            beta_t[(j, i)] = bt.recip();
            gamma_t[(i, j)] = gt;
            gamma_t[(j, i)] = gt;
            beta_v[(i, j)] = bv;
            beta_v[(j, i)] = bv.recip();
            gamma_v[(i, j)] = gv;
            gamma_v[(j, i)] = gv;
        }
    }
    Ok((beta_t, gamma_t, beta_v, gamma_v))
}

/// Symmetric matrix of interaction factors `F_ij` with zero diagonal.
pub fn get_f_matrix(
    binaries: &[BinaryRecord],
    components: &[&str],
    options: &BuildOptions,
) -> MultiFluidResult<DMatrix<f64>> {
    let n = components.len();
    let mut f = DMatrix::zeros(n, n);
    for i in 0..n {
        for j in i + 1..n {
            let f_ij = pair_parameters(binaries, components[i], components[j], options)?.f;
            f[(i, j)] = f_ij;
            f[(j, i)] = f_ij;
        }
    }
    Ok(f)
}

/// Departure functions of all binary pairs.
///
/// Pairs without a departure function and the diagonal get a null term.
pub fn get_departure_function_matrix(
    binaries: &[BinaryRecord],
    departures: &[DepartureRecord],
    components: &[&str],
    options: &BuildOptions,
) -> MultiFluidResult<Vec<Vec<DepartureTerms>>> {
    let n = components.len();
    let mut funcs = vec![vec![DepartureTerms::null(); n]; n];
    for i in 0..n {
        for j in i + 1..n {
            let pair = pair_parameters(binaries, components[i], components[j], options)?;
            let Some(name) = pair.function else {
                continue;
            };
            let record = DepartureRecord::find(departures, name)
                .ok_or_else(|| MultiFluidError::DepartureNotFound(name.into()))?;
            log_iter!(
                options.verbosity,
                "{}-{}: departure function {} ({})",
                components[i],
                components[j],
                name,
                record.term.ty
            );
            let dep = build_departure_function(&record.term)?;
            funcs[j][i] = dep.clone();
            funcs[i][j] = dep;
        }
    }
    Ok(funcs)
}

/// Build a multi-fluid model from records that are already in memory.
///
/// `fluids` has to be given in the order of `components`.
pub fn build_multifluid_model_from_records(
    components: &[&str],
    fluids: &[FluidRecord],
    binaries: &[BinaryRecord],
    departures: &[DepartureRecord],
    options: &BuildOptions,
) -> MultiFluidResult<MultiFluidModel> {
    if fluids.len() != components.len() {
        return Err(MultiFluidError::IncompatibleComponents(
            components.len(),
            fluids.len(),
        ));
    }

    // pure fluids
    let (tc, vc) = get_tc_vc(fluids)?;
    let mut eoss = Vec::with_capacity(fluids.len());
    for (i, fluid) in fluids.iter().enumerate() {
        let eos = build_eos_terms(&fluid.primary()?.alphar)?;
        log_iter!(
            options.verbosity,
            "{}: Tc = {} K, vc = {:e} m³/mol, {} terms",
            components[i],
            tc[i],
            vc[i],
            eos.len()
        );
        eoss.push(eos);
    }

    // binary pairs
    for (i, &c1) in components.iter().enumerate() {
        for &c2 in &components[i + 1..] {
            if BinaryRecord::find(binaries, c1, c2).is_none() && options.estimate {
                log_result!(
                    options.verbosity,
                    "{c1}-{c2}: no binary interaction parameters, using estimate"
                );
            }
        }
    }
    let f = get_f_matrix(binaries, components, options)?;
    let funcs = get_departure_function_matrix(binaries, departures, components, options)?;
    let (beta_t, gamma_t, beta_v, gamma_v) = get_bip_matrices(binaries, components, options)?;

    let redfunc = MultiFluidReducingFunction::new(beta_t, gamma_t, beta_v, gamma_v, tc, vc)?;
    Ok(MultiFluid::new(
        redfunc,
        CorrespondingStatesContribution::new(eoss),
        DepartureContribution::new(f, funcs)?,
    ))
}

/// Build a multi-fluid model from json files.
///
/// Fluids are read from `<root>/dev/fluids/<name>.json`, departure functions from
/// `<root>/dev/mixtures/mixture_departure_functions.json` and binary interaction
/// parameters from `bip_path`.
pub fn build_multifluid_model<P: AsRef<Path>, Q: AsRef<Path>>(
    components: &[&str],
    root: P,
    bip_path: Q,
    options: &BuildOptions,
) -> MultiFluidResult<MultiFluidModel> {
    let root = root.as_ref();
    let fluids = components
        .iter()
        .map(|name| FluidRecord::from_json(root, name))
        .collect::<MultiFluidResult<Vec<_>>>()?;
    let binaries = BinaryRecord::from_json(bip_path)?;
    let departures = DepartureRecord::from_json(
        root.join("dev")
            .join("mixtures")
            .join("mixture_departure_functions.json"),
    )?;
    build_multifluid_model_from_records(components, &fluids, &binaries, &departures, options)
}

/// Override entry of the pair (`i`, `j`): the `BIP` object and the departure function.
fn mutant_entry(overrides: &Value, i: usize, j: usize) -> MultiFluidResult<(&Value, TermRecord)> {
    let missing =
        |what: &str| MultiFluidError::MissingParameters(format!("{what} of pair ({i}, {j})"));
    let entry = overrides
        .get(i.to_string())
        .and_then(|e| e.get(j.to_string()))
        .ok_or_else(|| missing("override"))?;
    let bip = entry.get("BIP").ok_or_else(|| missing("BIP"))?;
    let departure = entry.get("departure").ok_or_else(|| missing("departure"))?;
    Ok((bip, serde_json::from_value(departure.clone())?))
}

fn bip_value(bip: &Value, key: &str) -> MultiFluidResult<f64> {
    bip.get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| MultiFluidError::MissingParameters(format!("'{key}' in BIP override")))
}

/// Interaction factors and departure functions from an override document.
///
/// `set_bip` is called with the `BIP` object of every pair `i < j`.
fn mutant_departure<F>(
    overrides: &Value,
    n: usize,
    mut set_bip: F,
) -> MultiFluidResult<DepartureContribution>
where
    F: FnMut(usize, usize, &Value) -> MultiFluidResult<()>,
{
    let mut f = DMatrix::zeros(n, n);
    let mut funcs = vec![vec![DepartureTerms::null(); n]; n];
    for i in 0..n {
        for j in i + 1..n {
            let (bip, departure) = mutant_entry(overrides, i, j)?;
            set_bip(i, j, bip)?;
            let f_ij = bip_value(bip, "Fij")?;
            f[(i, j)] = f_ij;
            f[(j, i)] = f_ij;
            let dep = build_departure_function(&departure)?;
            funcs[j][i] = dep.clone();
            funcs[i][j] = dep;
        }
    }
    DepartureContribution::new(f, funcs)
}

/// Model that keeps the pure fluids of `model` and takes all binary interaction
/// parameters and departure functions from `overrides`.
///
/// The override document maps stringified zero-based indices `i -> j` (with `i < j`) to
/// `{"BIP": {"betaT", "gammaT", "betaV", "gammaV", "Fij"}, "departure": <departure function>}`.
/// The document is stored as metadata of the returned model.
pub fn build_multifluid_mutant<'a>(
    model: &'a MultiFluidModel,
    overrides: &Value,
) -> MultiFluidResult<Mutant<'a>> {
    let red = &model.redfunc;
    let n = red.tc().len();
    let mut beta_t = red.beta_t().clone();
    let mut gamma_t = red.gamma_t().clone();
    let mut beta_v = red.beta_v().clone();
    let mut gamma_v = red.gamma_v().clone();

    let dep = mutant_departure(overrides, n, |i, j, bip| {
        beta_t[(i, j)] = bip_value(bip, "betaT")?;
        beta_t[(j, i)] = beta_t[(i, j)].recip();
        beta_v[(i, j)] = bip_value(bip, "betaV")?;
        beta_v[(j, i)] = beta_v[(i, j)].recip();
        gamma_t[(i, j)] = bip_value(bip, "gammaT")?;
        gamma_t[(j, i)] = gamma_t[(i, j)];
        gamma_v[(i, j)] = bip_value(bip, "gammaV")?;
        gamma_v[(j, i)] = gamma_v[(i, j)];
        Ok(())
    })?;

    let redfunc = MultiFluidReducingFunction::new(
        beta_t,
        gamma_t,
        beta_v,
        gamma_v,
        red.tc().clone(),
        red.vc().clone(),
    )?;
    let mut mutant = Mutant::new(model, redfunc, dep);
    mutant.set_meta(overrides.to_string());
    Ok(mutant)
}

/// Like [build_multifluid_mutant], but with the composition-invariant reducing function.
///
/// Only binary mixtures are supported. The `BIP` objects contain
/// `phiT`, `lambdaT`, `phiV`, `lambdaV` and `Fij`; `phi` defaults to 1 and `lambda` to 0.
pub fn build_multifluid_mutant_invariant<'a>(
    model: &'a MultiFluidModel,
    overrides: &Value,
) -> MultiFluidResult<InvariantMutant<'a>> {
    let red = &model.redfunc;
    let n = red.tc().len();
    if n != 2 {
        return Err(MultiFluidError::IncompatibleComponents(2, n));
    }
    let mut phi_t = DMatrix::from_element(n, n, 1.0);
    let mut lambda_t = DMatrix::zeros(n, n);
    let mut phi_v = DMatrix::from_element(n, n, 1.0);
    let mut lambda_v = DMatrix::zeros(n, n);

    let dep = mutant_departure(overrides, n, |i, j, bip| {
        phi_t[(i, j)] = bip_value(bip, "phiT")?;
        phi_t[(j, i)] = phi_t[(i, j)];
        lambda_t[(i, j)] = bip_value(bip, "lambdaT")?;
        lambda_t[(j, i)] = -lambda_t[(i, j)];
        phi_v[(i, j)] = bip_value(bip, "phiV")?;
        phi_v[(j, i)] = phi_v[(i, j)];
        lambda_v[(i, j)] = bip_value(bip, "lambdaV")?;
        lambda_v[(j, i)] = -lambda_v[(i, j)];
        Ok(())
    })?;

    let redfunc = MultiFluidInvariantReducingFunction::new(
        phi_t,
        lambda_t,
        phi_v,
        lambda_v,
        red.tc().clone(),
        red.vc().clone(),
    )?;
    let mut mutant = InvariantMutant::new(model, redfunc, dep);
    mutant.set_meta(overrides.to_string());
    Ok(mutant)
}
