//! Mamdani fuzzy inference.
//!
//! Crisp inputs are fuzzified against the terms of their antecedent variables,
//! rule premises are combined with fuzzy connectives, every firing rule clips
//! its consequent term, the clipped sets are aggregated per output and the
//! result is defuzzified back into a crisp value.
//!
//! ```
//! use fuzzy_control::{InferenceEngine, MembershipFunction, Rules, Universe, Variables};
//!
//! # fn main() -> fuzzy_control::Result<()> {
//! let mut vars = Variables::new();
//! let temp = vars.antecedent("temp", Universe::new(0., 40., 41)?)?;
//! let power = vars.consequent("power", Universe::new(0., 10., 101)?)?;
//!
//! vars.add_term(temp, "cold", MembershipFunction::trapezoidal(0., 0., 10., 20.)?)?;
//! vars.add_term(power, "high", MembershipFunction::triangular(5., 10., 10.)?)?;
//!
//! let mut rules = Rules::new();
//! rules.add(temp.is("cold"), power, "high");
//!
//! let engine = InferenceEngine::new(vars, rules)?;
//! let mut inputs = engine.inputs();
//! inputs.set(temp, 12.)?;
//!
//! let outputs = engine.compute(&inputs)?;
//! assert!(outputs.get(power)? > 5.);
//! # Ok(())
//! # }
//! ```

mod dsl;
mod error;
mod inference;
mod inputs;
mod linspace;
mod math;
mod membership;
mod ops;
mod outputs;
mod rules;
mod terms;
mod universe;
mod variable;

pub use dsl::Expr;
pub use error::{FuzzyError, Result};
pub use inference::{InferenceConfig, InferenceEngine};
pub use inputs::Inputs;
pub use linspace::Linspace;
pub use membership::MembershipFunction;
pub use ops::{AggregationOp, AndOp, DefuzzificationOp, ImplicationOp, OrOp};
pub use outputs::Outputs;
pub use rules::{Conclusion, Rule, Rules};
pub use terms::Terms;
pub use universe::Universe;
pub use variable::{LinguisticVariable, Variable, VariableKind, Variables};
