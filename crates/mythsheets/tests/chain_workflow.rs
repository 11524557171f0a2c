//! End-to-end formula workflows through the public API.

use mythsheets::prelude::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn numeric_seed(v: f64) -> EvalContext {
    EvalContext::new().with(&keys::VALUE, v)
}

#[test]
fn full_arithmetic_workflow() {
    // ((10 + 5 - 3) * 2) / 4 = 6, the canonical damage/attribute pipeline.
    let chain = FormulaChain::numeric(vec![
        Arc::new(Add::new(5.0)),
        Arc::new(Subtract::new(3.0)),
        Arc::new(Multiply::new(2.0)),
        Arc::new(Divide::new(4.0)),
    ])
    .unwrap();

    assert_eq!(chain.evaluate(&numeric_seed(10.0)).unwrap(), 6.0);
}

#[test]
fn halving_workflow() {
    // Half a level-11 stat, both rounding conventions.
    let up = FormulaChain::numeric(vec![Arc::new(Halve::round_up())]).unwrap();
    let down = FormulaChain::numeric(vec![Arc::new(Halve::round_down())]).unwrap();

    assert_eq!(up.evaluate(&numeric_seed(11.0)).unwrap(), 6.0);
    assert_eq!(down.evaluate(&numeric_seed(11.0)).unwrap(), 5.0);
}

#[test]
fn dependency_set_drives_seeding() {
    let chain = FormulaChain::numeric(vec![
        Arc::new(HitPoints::new(8, 2)),
        Arc::new(Add::new(5.0)),
    ])
    .unwrap();

    // The chain tells the caller what to fetch: level and dice, plus the
    // running-value slot the Add step reads.
    let names: Vec<_> = chain
        .dependencies()
        .keys()
        .iter()
        .map(|k| k.name())
        .collect();
    assert_eq!(names, vec!["dice", "level", "value"]);

    // Under-seeded context: execution never starts.
    let err = chain
        .begin()
        .seed(EvalContext::new().with(&keys::LEVEL, 5))
        .unwrap_err();
    assert!(matches!(err, EvalError::UnsatisfiedDependency { .. }));
}

#[test]
fn hit_point_chain_with_deterministic_dice() {
    // HitPoints is a producer (priority sorts it first), Add a modifier:
    // fixed rolls of 4 at level 5, d8, con +2 → 34, +5 favored bonus → 39.
    // Submitted out of order on purpose.
    let chain = FormulaChain::numeric(vec![
        Arc::new(Add::new(5.0)),
        Arc::new(HitPoints::new(8, 2)),
    ])
    .unwrap();

    let ctx = EvalContext::new()
        .with(&keys::VALUE, 0.0)
        .with(&keys::LEVEL, 5)
        .with(&keys::DICE, Arc::new(FixedRoller(4)) as Dice);

    assert_eq!(chain.evaluate(&ctx).unwrap(), 39.0);
}

#[test]
fn substituted_roller_predicts_multi_roll_chain() {
    // The hit-point step rolls twice at level 3; with every roll fixed to
    // k = 6 the result is exactly the closed form with 6 substituted at
    // each call site.
    let chain = FormulaChain::numeric(vec![
        Arc::new(HitPoints::new(10, 1)),
        Arc::new(Halve::round_up()),
    ])
    .unwrap();

    let ctx = numeric_seed(0.0)
        .with(&keys::LEVEL, 3)
        .with(&keys::DICE, Arc::new(FixedRoller(6)) as Dice);

    // (10 + 1) + 2 * (6 + 1) = 25; half round up = 13.
    assert_eq!(chain.evaluate(&ctx).unwrap(), 13.0);
}

#[test]
fn attack_resolution_chain() {
    let chain = FormulaChain::new(
        vec![Arc::new(AttackRoll::new()) as Arc<dyn Calculation<Outcome>>],
        ValueType::of::<Outcome>(),
        ValueType::of::<Outcome>(),
    )
    .unwrap();

    let base = EvalContext::new()
        .with(&keys::ATTACK_BONUS, 5)
        .with(&keys::TARGET_AC, 15);

    let hit = base.with(&keys::DICE, Arc::new(FixedRoller(10)) as Dice);
    assert_eq!(chain.evaluate(&hit).unwrap(), Outcome::Hit);

    let miss = base.with(&keys::DICE, Arc::new(FixedRoller(9)) as Dice);
    assert_eq!(chain.evaluate(&miss).unwrap(), Outcome::Miss);

    let crit = base.with(&keys::DICE, Arc::new(FixedRoller(20)) as Dice);
    assert_eq!(chain.evaluate(&crit).unwrap(), Outcome::Crit);
}

#[test]
fn invalid_chain_is_rejected_before_execution() {
    // An Outcome-typed chain declared as numeric cannot be built.
    let err = FormulaChain::new(
        vec![Arc::new(AttackRoll::new()) as Arc<dyn Calculation<Outcome>>],
        ValueType::of::<Outcome>(),
        ValueType::of::<f64>(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ValidationError::OutputMismatch { expected: "f64", .. }
    ));
}

#[test]
fn failure_reports_reach_the_caller_with_the_originating_reason() {
    let chain = FormulaChain::numeric(vec![
        Arc::new(Add::new(3.0)),
        Arc::new(Divide::new(0.0)),
    ])
    .unwrap();

    let err = chain.evaluate(&numeric_seed(10.0)).unwrap_err();
    assert_eq!(err.to_string(), "division by zero in DIVIDE");
}
