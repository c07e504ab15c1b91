//! Parameter curve formulas and the per-level parameter table of a class.
//!
//! Classes store eight parameter curves (max HP, max MP, attack, defense, magic
//! attack, magic defense, agility, luck) evaluated for every level from 1 to 99.
//! Curves are written as small integer expressions over `lvl`:
//!
//! ```text
//! 400+lvl*50
//! 15+lvl*5/4
//! (lvl+3)*12
//! ```
//!
//! Arithmetic is integer only; division rounds toward negative infinity.

use core::fmt;
use core::str::FromStr;

/// Number of base parameters.
pub const PARAM_COUNT: usize = 8;

/// Rows per parameter: levels 0..=99, level 0 is always zero.
pub const LEVEL_ROWS: usize = 100;

/// Integer expression over the level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveFormula {
    /// Fixed constant value.
    Constant(i64),

    /// The level being evaluated.
    Level,

    Add(Box<CurveFormula>, Box<CurveFormula>),
    Sub(Box<CurveFormula>, Box<CurveFormula>),
    Mul(Box<CurveFormula>, Box<CurveFormula>),
    Div(Box<CurveFormula>, Box<CurveFormula>),

    Neg(Box<CurveFormula>),
}

/// Errors raised by [`CurveFormula`] parsing and evaluation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CurveError {
    #[error("unexpected `{found}` at offset {offset}")]
    UnexpectedToken { found: String, offset: usize },

    #[error("unexpected end of formula")]
    UnexpectedEnd,

    #[error("division by zero at level {level}")]
    DivisionByZero { level: i64 },

    #[error("overflow at level {level}")]
    Overflow { level: i64 },
}

impl CurveFormula {
    /// `base + lvl * numerator / denominator`, the shape of the stock curves.
    pub fn linear(base: i64, numerator: i64, denominator: i64) -> Self {
        let per_level = Self::Mul(Box::new(Self::Level), Box::new(Self::Constant(numerator)));
        let scaled = if denominator == 1 {
            per_level
        } else {
            Self::Div(Box::new(per_level), Box::new(Self::Constant(denominator)))
        };
        Self::Add(Box::new(Self::Constant(base)), Box::new(scaled))
    }

    /// Evaluates the formula at `level`.
    pub fn evaluate(&self, level: i64) -> Result<i64, CurveError> {
        let overflow = || CurveError::Overflow { level };
        match self {
            Self::Constant(value) => Ok(*value),
            Self::Level => Ok(level),
            Self::Add(lhs, rhs) => lhs
                .evaluate(level)?
                .checked_add(rhs.evaluate(level)?)
                .ok_or_else(overflow),
            Self::Sub(lhs, rhs) => lhs
                .evaluate(level)?
                .checked_sub(rhs.evaluate(level)?)
                .ok_or_else(overflow),
            Self::Mul(lhs, rhs) => lhs
                .evaluate(level)?
                .checked_mul(rhs.evaluate(level)?)
                .ok_or_else(overflow),
            Self::Div(lhs, rhs) => {
                let numerator = lhs.evaluate(level)?;
                let denominator = rhs.evaluate(level)?;
                if denominator == 0 {
                    return Err(CurveError::DivisionByZero { level });
                }
                floor_div(numerator, denominator).ok_or_else(overflow)
            }
            Self::Neg(inner) => inner.evaluate(level)?.checked_neg().ok_or_else(overflow),
        }
    }

    /// The stock curves a class receives when none are given.
    pub fn default_set() -> [CurveFormula; PARAM_COUNT] {
        [
            Self::linear(400, 50, 1),
            Self::linear(80, 10, 1),
            Self::linear(15, 5, 4),
            Self::linear(15, 5, 4),
            Self::linear(15, 5, 4),
            Self::linear(15, 5, 4),
            Self::linear(30, 5, 2),
            Self::linear(30, 5, 2),
        ]
    }
}

fn floor_div(numerator: i64, denominator: i64) -> Option<i64> {
    let quotient = numerator.checked_div(denominator)?;
    if (numerator % denominator != 0) && ((numerator < 0) != (denominator < 0)) {
        quotient.checked_sub(1)
    } else {
        Some(quotient)
    }
}

impl fmt::Display for CurveFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => write!(f, "{value}"),
            Self::Level => f.write_str("lvl"),
            Self::Add(lhs, rhs) => write!(f, "({lhs}+{rhs})"),
            Self::Sub(lhs, rhs) => write!(f, "({lhs}-{rhs})"),
            Self::Mul(lhs, rhs) => write!(f, "{lhs}*{rhs}"),
            Self::Div(lhs, rhs) => write!(f, "{lhs}/{rhs}"),
            Self::Neg(inner) => write!(f, "-{inner}"),
        }
    }
}

impl FromStr for CurveFormula {
    type Err = CurveError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser { source, offset: 0 };
        let formula = parser.expression()?;
        parser.skip_whitespace();
        match parser.peek() {
            None => Ok(formula),
            Some(c) => Err(CurveError::UnexpectedToken {
                found: c.to_string(),
                offset: parser.offset,
            }),
        }
    }
}

/// Recursive-descent parser: expression := term (('+' | '-') term)*,
/// term := factor (('*' | '/') factor)*, factor := int | `lvl` | '(' expression ')' | '-' factor.
struct Parser<'a> {
    source: &'a str,
    offset: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.source[self.offset..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.offset += c.len_utf8();
        }
    }

    fn next_operator(&mut self, operators: &[char]) -> Option<char> {
        self.skip_whitespace();
        let c = self.peek()?;
        if operators.contains(&c) {
            self.offset += c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn expression(&mut self) -> Result<CurveFormula, CurveError> {
        let mut lhs = self.term()?;
        while let Some(op) = self.next_operator(&['+', '-']) {
            let rhs = self.term()?;
            lhs = match op {
                '+' => CurveFormula::Add(Box::new(lhs), Box::new(rhs)),
                _ => CurveFormula::Sub(Box::new(lhs), Box::new(rhs)),
            };
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<CurveFormula, CurveError> {
        let mut lhs = self.factor()?;
        while let Some(op) = self.next_operator(&['*', '/']) {
            let rhs = self.factor()?;
            lhs = match op {
                '*' => CurveFormula::Mul(Box::new(lhs), Box::new(rhs)),
                _ => CurveFormula::Div(Box::new(lhs), Box::new(rhs)),
            };
        }
        Ok(lhs)
    }

    fn factor(&mut self) -> Result<CurveFormula, CurveError> {
        self.skip_whitespace();
        let start = self.offset;
        let c = self.peek().ok_or(CurveError::UnexpectedEnd)?;

        if c == '-' {
            self.offset += 1;
            return Ok(CurveFormula::Neg(Box::new(self.factor()?)));
        }

        if c == '(' {
            self.offset += 1;
            let inner = self.expression()?;
            self.skip_whitespace();
            return match self.peek() {
                Some(')') => {
                    self.offset += 1;
                    Ok(inner)
                }
                Some(other) => Err(CurveError::UnexpectedToken {
                    found: other.to_string(),
                    offset: self.offset,
                }),
                None => Err(CurveError::UnexpectedEnd),
            };
        }

        if c.is_ascii_digit() {
            let digits: &str = self.source[start..]
                .split(|c: char| !c.is_ascii_digit())
                .next()
                .unwrap_or_default();
            self.offset += digits.len();
            return digits
                .parse()
                .map(CurveFormula::Constant)
                .map_err(|_| CurveError::UnexpectedToken {
                    found: digits.to_owned(),
                    offset: start,
                });
        }

        if self.source[start..].starts_with("lvl") {
            self.offset += 3;
            return Ok(CurveFormula::Level);
        }

        Err(CurveError::UnexpectedToken {
            found: c.to_string(),
            offset: start,
        })
    }
}

/// The 8 × 100 parameter table of a class.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParamCurves {
    values: Vec<i64>,
}

impl ParamCurves {
    /// Evaluates one formula per parameter for levels 1..=99.
    pub fn from_formulas(formulas: &[CurveFormula; PARAM_COUNT]) -> Result<Self, CurveError> {
        let mut values = vec![0; PARAM_COUNT * LEVEL_ROWS];
        for (param, formula) in formulas.iter().enumerate() {
            for level in 1..LEVEL_ROWS {
                values[param * LEVEL_ROWS + level] = formula.evaluate(level as i64)?;
            }
        }
        Ok(Self { values })
    }

    /// Value of `param` at `level`, `None` when out of range.
    pub fn get(&self, param: usize, level: usize) -> Option<i64> {
        if param >= PARAM_COUNT || level >= LEVEL_ROWS {
            return None;
        }
        self.values.get(param * LEVEL_ROWS + level).copied()
    }

    /// Overwrites a single cell. Returns false when out of range.
    pub fn set(&mut self, param: usize, level: usize, value: i64) -> bool {
        if param >= PARAM_COUNT || level >= LEVEL_ROWS {
            return false;
        }
        self.values[param * LEVEL_ROWS + level] = value;
        true
    }

    /// All levels of one parameter, starting at level 0.
    pub fn row(&self, param: usize) -> Option<&[i64]> {
        if param >= PARAM_COUNT {
            return None;
        }
        let start = param * LEVEL_ROWS;
        self.values.get(start..start + LEVEL_ROWS)
    }
}

impl Default for ParamCurves {
    fn default() -> Self {
        let mut values = vec![0; PARAM_COUNT * LEVEL_ROWS];
        for (param, formula) in CurveFormula::default_set().iter().enumerate() {
            for level in 1..LEVEL_ROWS {
                // Stock formulas are linear over 1..=99 and cannot fail.
                values[param * LEVEL_ROWS + level] =
                    formula.evaluate(level as i64).unwrap_or_default();
            }
        }
        Self { values }
    }
}
