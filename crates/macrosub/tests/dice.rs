//! Tests for dice notation parsing and the roll macro.

use macrosub::{ChatMetadata, DiceRoller, EvalContext, MacroEngine, MacroEnv, NotationDice};

fn expand(engine: &MacroEngine, content: &str) -> String {
    let mut env = MacroEnv::new();
    let mut metadata = ChatMetadata::default();
    let mut ctx = EvalContext::new(&[], &mut metadata, "chat");
    engine.evaluate(content, &mut env, &mut ctx)
}

// === Notation Validation ===

#[test]
fn validate_accepts_standard_notation() {
    let dice = NotationDice;
    assert!(dice.validate("2d6"));
    assert!(dice.validate("d20"));
    assert!(dice.validate("2d6+3"));
    assert!(dice.validate("2d6 - 1"));
    assert!(dice.validate("1d4+2d8"));
    assert!(dice.validate("7"));
}

#[test]
fn validate_rejects_malformed_notation() {
    let dice = NotationDice;
    assert!(!dice.validate(""));
    assert!(!dice.validate("2d"));
    assert!(!dice.validate("d"));
    assert!(!dice.validate("xd6"));
    assert!(!dice.validate("1d0"));
    assert!(!dice.validate("0d6"));
    assert!(!dice.validate("2d6+"));
    assert!(!dice.validate("notaformula"));
}

// === Roll Evaluation ===

#[test]
fn roll_totals_stay_in_range() {
    let dice = NotationDice;
    for _ in 0..100 {
        let total = dice.roll("2d6").unwrap().total;
        assert!((2..=12).contains(&total), "out of range: {total}");
    }
}

#[test]
fn roll_applies_modifiers() {
    let dice = NotationDice;
    for _ in 0..100 {
        let total = dice.roll("2d6+3").unwrap().total;
        assert!((5..=15).contains(&total), "out of range: {total}");
    }
    for _ in 0..100 {
        let total = dice.roll("1d4-2").unwrap().total;
        assert!((-1..=2).contains(&total), "out of range: {total}");
    }
}

// === Roll Macro ===

#[test]
fn roll_macro_substitutes_a_total() {
    let engine = MacroEngine::new();
    for _ in 0..20 {
        let out = expand(&engine, "{{roll:2d6}}");
        let total: i64 = out.parse().expect("numeric total");
        assert!((2..=12).contains(&total), "out of range: {total}");
    }
}

#[test]
fn bare_number_rolls_a_single_die() {
    let engine = MacroEngine::new();
    for _ in 0..20 {
        let out = expand(&engine, "{{roll:20}}");
        let total: i64 = out.parse().expect("numeric total");
        assert!((1..=20).contains(&total), "out of range: {total}");
    }
}

#[test]
fn roll_macro_accepts_space_separator() {
    let engine = MacroEngine::new();
    let out = expand(&engine, "{{roll 1d1}}");
    assert_eq!(out, "1");
}

#[test]
fn invalid_formula_degrades_to_placeholder() {
    let engine = MacroEngine::new();
    assert_eq!(expand(&engine, "{{roll:notaformula}}"), "");

    let engine = MacroEngine::builder()
        .invalid_roll_placeholder("[invalid roll]")
        .build();
    assert_eq!(expand(&engine, "{{roll:notaformula}}"), "[invalid roll]");
}
