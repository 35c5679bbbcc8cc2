//! Compact dice notation: `d20`, `3d6+2`, `d20+d4-3`.
//!
//! Terms are separated by `+` or `-` and evaluated strictly left to right.
//! A term is a constant or `[count]d<sides>`; a multi-die term contributes a
//! single summed value. Characters other than digits, `d`/`D`, `+` and `-`
//! are ignored.

use crate::error::{InitiativeError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on the dice rolled by a single term.
pub const MAX_ROLL_COUNT: u32 = 1000;

/// Outcome of evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub total: i64,
    /// Signed value of each term, left to right.
    pub terms: Vec<i64>,
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms: Vec<String> = self.terms.iter().map(|t| t.to_string()).collect();
        write!(f, "({}) {}", terms.join(" "), self.total)
    }
}

/// Term being accumulated while scanning.
#[derive(Default)]
struct Pending {
    negative: bool,
    /// Zero means no `d` has been seen yet and the term is a constant.
    roll_count: u32,
    n: i64,
}

impl Pending {
    fn finish<R: Rng>(&self, expr: &str, rng: &mut R) -> Result<i64> {
        let mut value = self.n;
        if self.roll_count > 0 {
            if self.n <= 0 {
                return Err(InitiativeError::InvalidDieSides(expr.to_string()));
            }
            value = (0..self.roll_count).fold(0i64, |acc, _| {
                acc.saturating_add(rng.gen_range(1..=self.n))
            });
        }
        Ok(if self.negative { -value } else { value })
    }
}

/// Evaluate `expr` drawing die faces from `rng`.
pub fn evaluate<R: Rng>(expr: &str, rng: &mut R) -> Result<DiceRoll> {
    let mut roll = DiceRoll {
        total: 0,
        terms: Vec::new(),
    };
    let mut term = Pending::default();

    for ch in expr.chars() {
        match ch {
            'd' | 'D' => {
                let count = if term.n == 0 { 1 } else { term.n };
                if count > MAX_ROLL_COUNT as i64 {
                    return Err(InitiativeError::TooManyDice(
                        count.min(u32::MAX as i64) as u32,
                    ));
                }
                term.roll_count = count as u32;
                term.n = 0;
            }
            '+' | '-' => {
                push_term(&mut roll, term.finish(expr, rng)?);
                term = Pending {
                    negative: ch == '-',
                    ..Pending::default()
                };
            }
            '0'..='9' => {
                let digit = ch as i64 - '0' as i64;
                term.n = term.n.saturating_mul(10).saturating_add(digit);
            }
            _ => {}
        }
    }
    push_term(&mut roll, term.finish(expr, rng)?);

    tracing::trace!(expr, total = roll.total, "dice evaluated");
    Ok(roll)
}

/// Evaluate `expr` with the thread-local generator.
pub fn roll(expr: &str) -> Result<DiceRoll> {
    evaluate(expr, &mut rand::thread_rng())
}

/// Check that `expr` is well formed. The drawn values are discarded.
pub fn validate(expr: &str) -> Result<()> {
    evaluate(expr, &mut StdRng::seed_from_u64(0)).map(|_| ())
}

fn push_term(roll: &mut DiceRoll, value: i64) {
    roll.terms.push(value);
    roll.total = roll.total.saturating_add(value);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
