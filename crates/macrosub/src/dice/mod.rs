//! Dice-notation validation and evaluation for the roll macro.
//!
//! The pipeline consumes dice through the [`DiceRoller`] trait so a host
//! can supply its own dice library; [`NotationDice`] is the built-in
//! implementation for standard `NdS +/- k` notation.

mod notation;

pub use notation::{DiceFormula, DiceTerm, parse_formula};

use crate::hash::{Seed, rng_from_seed};

/// Result of evaluating a dice formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollResult {
    /// The signed total of all rolled dice and modifiers.
    pub total: i64,
}

/// External dice collaborator: validates and evaluates formulas.
pub trait DiceRoller {
    /// Whether `formula` is well-formed dice notation.
    fn validate(&self, formula: &str) -> bool;

    /// Evaluate `formula` to a total; `None` when the formula is invalid.
    fn roll(&self, formula: &str) -> Option<RollResult>;
}

/// Built-in roller for standard dice notation.
///
/// # Example
///
/// ```
/// use macrosub::{DiceRoller, NotationDice};
///
/// let dice = NotationDice;
/// assert!(dice.validate("2d6+1"));
/// assert!(!dice.validate("2d"));
///
/// let result = dice.roll("2d6").unwrap();
/// assert!((2..=12).contains(&result.total));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct NotationDice;

impl DiceRoller for NotationDice {
    fn validate(&self, formula: &str) -> bool {
        parse_formula(formula).is_some()
    }

    fn roll(&self, formula: &str) -> Option<RollResult> {
        let parsed = parse_formula(formula)?;
        let mut rng = rng_from_seed(Seed::Entropy);
        Some(RollResult {
            total: parsed.evaluate(&mut rng),
        })
    }
}
