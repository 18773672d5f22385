use std::collections::HashMap;
use std::ops::{BitAnd, BitOr, Not};

use crate::error::{FuzzyError, Result};
use crate::ops::{AndOp, OrOp};
use crate::variable::{Variable, Variables};
#[cfg(test)]
use crate::membership::MembershipFunction;
#[cfg(test)]
use crate::universe::Universe;

/// Rule premise: term references combined with fuzzy connectives.
///
/// `And`/`Or` nodes carry an optional operator; `None` defers to the engine's
/// configured default.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Is(Variable, String),
    And(Box<Expr>, Box<Expr>, Option<AndOp>),
    Or(Box<Expr>, Box<Expr>, Option<OrOp>),
    Not(Box<Expr>),
}

impl Expr {
    pub fn and(self, rhs: Expr) -> Self {
        Expr::And(Box::new(self), Box::new(rhs), None)
    }

    pub fn and_with(self, rhs: Expr, op: AndOp) -> Self {
        Expr::And(Box::new(self), Box::new(rhs), Some(op))
    }

    pub fn or(self, rhs: Expr) -> Self {
        Expr::Or(Box::new(self), Box::new(rhs), None)
    }

    pub fn or_with(self, rhs: Expr, op: OrOp) -> Self {
        Expr::Or(Box::new(self), Box::new(rhs), Some(op))
    }

    /// Every `(variable, term)` referenced, left to right, repeats included.
    pub fn propositions(&self) -> Vec<(Variable, &str)> {
        let mut props = Vec::new();

        fn parse<'p>(expr: &'p Expr, out: &mut Vec<(Variable, &'p str)>) {
            match expr {
                Expr::Is(var, term) => out.push((*var, term.as_str())),
                Expr::And(lhs, rhs, _) | Expr::Or(lhs, rhs, _) => {
                    parse(lhs, out);
                    parse(rhs, out);
                },
                Expr::Not(expr) => parse(expr, out),
            }
        }

        parse(self, &mut props);

        props
    }

    /// Firing strength in `[0, 1]` for the crisp values in `bindings`.
    pub fn strength(
        &self,
        vars: &Variables,
        bindings: &HashMap<Variable, f64>,
        and_op: AndOp,
        or_op: OrOp,
    ) -> Result<f64> {
        let strength = match self {
            Expr::Is(var, term) => {
                let variable = vars.get(*var)?;
                let value = bindings.get(var).copied().ok_or_else(|| FuzzyError::MissingInput {
                    variable: variable.name().to_owned(),
                })?;

                variable.membership(term, value)?
            },
            Expr::And(lhs, rhs, op) => {
                let left = lhs.strength(vars, bindings, and_op, or_op)?;
                let right = rhs.strength(vars, bindings, and_op, or_op)?;

                op.unwrap_or(and_op).apply(left, right)
            },
            Expr::Or(lhs, rhs, op) => {
                let left = lhs.strength(vars, bindings, and_op, or_op)?;
                let right = rhs.strength(vars, bindings, and_op, or_op)?;

                op.unwrap_or(or_op).apply(left, right)
            },
            Expr::Not(expr) => 1. - expr.strength(vars, bindings, and_op, or_op)?,
        };

        Ok(strength.clamp(0., 1.))
    }
}

impl BitAnd for Expr {
    type Output = Expr;

    fn bitand(self, rhs: Expr) -> Expr {
        self.and(rhs)
    }
}

impl BitOr for Expr {
    type Output = Expr;

    fn bitor(self, rhs: Expr) -> Expr {
        self.or(rhs)
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }
}

impl Variable {
    pub fn is(self, term: impl Into<String>) -> Expr {
        Expr::Is(self, term.into())
    }
}

#[cfg(test)]
fn setup() -> (Variables, Variable, Variable) {
    let mut vars = Variables::new();
    let universe = Universe::new(0., 10., 11).unwrap();
    let temp = vars.antecedent("temp", universe.clone()).unwrap();
    let wind = vars.antecedent("wind", universe).unwrap();

    vars.add_term(temp, "hot", MembershipFunction::trapezoidal(5., 10., 10., 10.).unwrap())
        .unwrap();
    vars.add_term(wind, "calm", MembershipFunction::trapezoidal(0., 0., 2., 6.).unwrap())
        .unwrap();

    (vars, temp, wind)
}

#[test]
fn test_connectives() {
    let (vars, temp, wind) = setup();
    let bindings = HashMap::from([(temp, 7.), (wind, 5.)]);
    let strength = |expr: Expr| expr.strength(&vars, &bindings, AndOp::Min, OrOp::Max).unwrap();

    // hot(7) = 0.4, calm(5) = 0.25
    let hot = strength(temp.is("hot"));
    let calm = strength(wind.is("calm"));

    assert!((hot - 0.4).abs() < 1e-12);
    assert!((calm - 0.25).abs() < 1e-12);
    assert_eq!(strength(temp.is("hot") & wind.is("calm")), calm);
    assert_eq!(strength(temp.is("hot") | wind.is("calm")), hot);
    assert_eq!(strength(!wind.is("calm")), 0.75);
    assert!((strength(temp.is("hot").and_with(wind.is("calm"), AndOp::Prod)) - 0.1).abs() < 1e-12);
    assert!((strength(temp.is("hot").or_with(wind.is("calm"), OrOp::ProbOr)) - 0.55).abs() < 1e-12);

    let and = strength(temp.is("hot") & wind.is("calm"));
    let or = strength(temp.is("hot") | wind.is("calm"));

    assert!(and <= hot && and <= calm);
    assert!(or >= hot && or >= calm);
}

#[test]
fn test_missing_input() {
    let (vars, temp, wind) = setup();
    let bindings = HashMap::from([(temp, 7.)]);
    let expr = temp.is("hot") & wind.is("calm");

    assert_eq!(
        expr.strength(&vars, &bindings, AndOp::Min, OrOp::Max),
        Err(FuzzyError::MissingInput { variable: "wind".into() })
    );
}

#[test]
fn test_propositions() {
    let (_, temp, wind) = setup();
    let expr = (temp.is("hot") & !wind.is("calm")) | temp.is("cold");

    assert_eq!(
        expr.propositions(),
        vec![(temp, "hot"), (wind, "calm"), (temp, "cold")]
    );
}
