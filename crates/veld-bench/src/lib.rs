//! Benchmark profiles for Veld condition validation.
//!
//! - [`reference_profile`]: a Poisson-style problem with four boundary
//!   conditions, one interior residual and one data condition
//! - [`wide_profile`]: `n` conditions cycling through all three variants

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use veld_condition::ConditionArgs;
use veld_test_utils::{DirichletResidual, MockSpan, MockTensor, ZeroResidual};

/// A square domain with Dirichlet data on each edge, a residual on the
/// interior, and a small supervised data set.
pub fn reference_profile() -> Vec<(String, ConditionArgs)> {
    let edges = [
        ("gamma1", [("x", 0.0, 1.0), ("y", 1.0, 1.0)]),
        ("gamma2", [("x", 0.0, 1.0), ("y", 0.0, 0.0)]),
        ("gamma3", [("x", 1.0, 1.0), ("y", 0.0, 1.0)]),
        ("gamma4", [("x", 0.0, 0.0), ("y", 0.0, 1.0)]),
    ];
    let mut profile: Vec<(String, ConditionArgs)> = edges
        .into_iter()
        .map(|(name, bounds)| {
            let args = ConditionArgs::new()
                .location(MockSpan::new(bounds).shared())
                .function(DirichletResidual::shared("u", 0.0));
            (name.to_string(), args)
        })
        .collect();
    profile.push((
        "D".to_string(),
        ConditionArgs::new()
            .location(MockSpan::new([("x", 0.0, 1.0), ("y", 0.0, 1.0)]).shared())
            .functions(vec![ZeroResidual::shared("u"), ZeroResidual::shared("v")]),
    ));
    profile.push(("data".to_string(), supervised_args(16)));
    profile
}

/// `n` conditions cycling supervised, location-driven and input-driven.
pub fn wide_profile(n: usize) -> Vec<(String, ConditionArgs)> {
    (0..n)
        .map(|i| {
            let args = match i % 3 {
                0 => supervised_args(4),
                1 => ConditionArgs::new()
                    .location(MockSpan::new([("x", 0.0, 1.0)]).shared())
                    .function(ZeroResidual::shared("u")),
                _ => ConditionArgs::new()
                    .input_points(grid(4))
                    .functions(vec![
                        ZeroResidual::shared("u"),
                        DirichletResidual::shared("u", 1.0),
                    ]),
            };
            (format!("c{i}"), args)
        })
        .collect()
}

fn supervised_args(rows: usize) -> ConditionArgs {
    ConditionArgs::new()
        .input_points(grid(rows))
        .output_points(MockTensor::new(["u"], (0..rows).map(|_| vec![0.0])).shared())
        .data_weight(10.0)
}

fn grid(rows: usize) -> veld_core::TensorRef {
    MockTensor::new(
        ["x", "y"],
        (0..rows).map(|r| vec![r as f64 / rows as f64, 0.5]),
    )
    .shared()
}
