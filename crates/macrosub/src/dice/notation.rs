//! Dice-notation parser using winnow.
//!
//! Grammar:
//! - formula := term (('+' | '-') term)*
//! - term    := [count] ('d' | 'D') sides | integer
//!
//! Whitespace is allowed around the `+`/`-` operators. Counts and sides
//! are bounded so a single directive cannot degenerate into busywork.

use rand::Rng;
use rand::rngs::StdRng;
use winnow::combinator::{alt, opt, repeat};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

/// Most dice a single term may roll.
const MAX_DICE: u64 = 1000;
/// Most sides a die may have.
const MAX_SIDES: u64 = 10_000;

/// A parsed dice formula: a signed sum of terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceFormula {
    /// Terms with their sign (+1 or -1).
    terms: Vec<(i64, DiceTerm)>,
}

/// One term of a dice formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiceTerm {
    /// `NdS`: roll `count` dice with `sides` sides each.
    Dice { count: u64, sides: u64 },
    /// A flat integer modifier.
    Constant(u64),
}

impl DiceFormula {
    /// Evaluate the formula with the supplied generator.
    pub fn evaluate(&self, rng: &mut StdRng) -> i64 {
        let mut total = 0i64;
        for (sign, term) in &self.terms {
            let value = match term {
                DiceTerm::Constant(n) => *n as i64,
                DiceTerm::Dice { count, sides } => {
                    let mut sum = 0i64;
                    for _ in 0..*count {
                        sum += rng.random_range(1..=*sides) as i64;
                    }
                    sum
                }
            };
            total += sign * value;
        }
        total
    }
}

/// Parse a dice formula, returning `None` when malformed.
pub fn parse_formula(input: &str) -> Option<DiceFormula> {
    let mut remaining = input.trim();
    match formula(&mut remaining) {
        Ok(parsed) if remaining.is_empty() => Some(parsed),
        _ => None,
    }
}

/// Parse a complete formula: first term plus signed followers.
fn formula(input: &mut &str) -> ModalResult<DiceFormula> {
    let first = term.parse_next(input)?;
    let rest: Vec<(i64, DiceTerm)> = repeat(0.., signed_term).parse_next(input)?;

    let mut terms = Vec::with_capacity(1 + rest.len());
    terms.push((1i64, first));
    terms.extend(rest);
    Ok(DiceFormula { terms })
}

/// Parse `+ term` or `- term` with optional surrounding whitespace.
fn signed_term(input: &mut &str) -> ModalResult<(i64, DiceTerm)> {
    ws(input)?;
    let sign = alt(('+'.value(1i64), '-'.value(-1i64))).parse_next(input)?;
    ws(input)?;
    let parsed = term.parse_next(input)?;
    Ok((sign, parsed))
}

/// Parse a term: a dice roll or a flat constant.
fn term(input: &mut &str) -> ModalResult<DiceTerm> {
    alt((dice_term, constant_term)).parse_next(input)
}

/// Parse `[count]dS`, defaulting the count to one die.
fn dice_term(input: &mut &str) -> ModalResult<DiceTerm> {
    let count = opt(integer).parse_next(input)?;
    let _: char = alt(('d', 'D')).parse_next(input)?;
    let sides = integer.parse_next(input)?;

    let count = count.unwrap_or(1);
    if count == 0 || count > MAX_DICE || sides == 0 || sides > MAX_SIDES {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }
    Ok(DiceTerm::Dice { count, sides })
}

/// Parse a flat integer modifier.
fn constant_term(input: &mut &str) -> ModalResult<DiceTerm> {
    integer.map(DiceTerm::Constant).parse_next(input)
}

/// Parse an unsigned integer (at most nine digits).
fn integer(input: &mut &str) -> ModalResult<u64> {
    take_while(1..=9, |c: char| c.is_ascii_digit())
        .try_map(str::parse)
        .parse_next(input)
}

/// Consume optional whitespace.
fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}
