use crate::error::{FuzzyError, Result};
use crate::universe::Universe;
use crate::variable::Variable;

#[derive(Clone, Debug)]
pub(crate) struct Inferred {
    pub(crate) name: String,
    pub(crate) universe: Universe,
    pub(crate) aggregated: Vec<f64>,
    pub(crate) crisp: Option<f64>,
}

/// Result of one inference call. Consequents keep the order in which the
/// rule base first mentions them.
#[derive(Clone, Debug)]
pub struct Outputs {
    inferred: Vec<(Variable, Inferred)>,
    firing_strengths: Vec<f64>,
}

impl Outputs {
    pub(crate) fn new(inferred: Vec<(Variable, Inferred)>, firing_strengths: Vec<f64>) -> Self {
        Self {
            inferred,
            firing_strengths,
        }
    }

    /// Crisp value of a consequent, or `UndefinedOutput` when no rule reached it.
    pub fn get(&self, var: Variable) -> Result<f64> {
        let inferred = self.lookup(var).ok_or(FuzzyError::UnregisteredVariable {
            registry: "inference outputs",
        })?;

        inferred.crisp.ok_or_else(|| FuzzyError::UndefinedOutput {
            variable: inferred.name.clone(),
        })
    }

    pub fn get_by_name(&self, name: &str) -> Result<f64> {
        match self.inferred.iter().find(|(_, inferred)| inferred.name == name) {
            Some((var, _)) => self.get(*var),
            None => Err(FuzzyError::UnknownVariable { name: name.to_owned() }),
        }
    }

    /// The aggregated output set of a consequent as `(y, membership)` pairs.
    pub fn aggregated_curve(&self, var: Variable) -> Option<Vec<(f64, f64)>> {
        self.lookup(var).map(|inferred| {
            inferred
                .universe
                .points()
                .iter()
                .copied()
                .zip(inferred.aggregated.iter().copied())
                .collect()
        })
    }

    /// Firing strength of each rule, in declaration order.
    pub fn firing_strengths(&self) -> &[f64] {
        &self.firing_strengths
    }

    /// Every consequent with its crisp value, or `None` if undefined.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.inferred
            .iter()
            .map(|(_, inferred)| (inferred.name.as_str(), inferred.crisp))
    }

    fn lookup(&self, var: Variable) -> Option<&Inferred> {
        self.inferred.iter().find(|(key, _)| *key == var).map(|(_, inferred)| inferred)
    }
}
