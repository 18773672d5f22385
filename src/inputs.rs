use std::collections::HashMap;

use crate::error::{FuzzyError, Result};
use crate::variable::{Variable, VariableKind, Variables};

/// Crisp input bindings for one inference call.
///
/// Owned by the caller, so one engine can serve many calls at once, each with
/// its own `Inputs`.
#[derive(Clone, Debug)]
pub struct Inputs<'v> {
    vars: &'v Variables,
    pub(crate) values: HashMap<Variable, f64>,
}

impl<'v> Inputs<'v> {
    pub(crate) fn new(vars: &'v Variables) -> Self {
        Inputs {
            vars,
            values: HashMap::new(),
        }
    }

    /// Binds a crisp value, replacing any earlier one for the same variable.
    pub fn set(&mut self, var: Variable, value: f64) -> Result<()> {
        let variable = self.vars.get(var)?;

        if variable.kind() != VariableKind::Antecedent {
            return Err(FuzzyError::WrongKind {
                variable: variable.name().to_owned(),
                expected: VariableKind::Antecedent,
            });
        }

        variable.check_input(value)?;
        self.values.insert(var, value);

        Ok(())
    }

    pub fn set_by_name(&mut self, name: &str, value: f64) -> Result<()> {
        let var = self.vars.find(name)?;

        self.set(var, value)
    }

    /// Whether these bindings were handed out for `vars`.
    pub(crate) fn belongs_to(&self, vars: &Variables) -> bool {
        std::ptr::eq(self.vars, vars)
    }

    pub fn get(&self, var: Variable) -> Option<f64> {
        self.values.get(&var).copied()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}
