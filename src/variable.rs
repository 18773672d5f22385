use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

use slotmap::{new_key_type, SlotMap};

use crate::error::{FuzzyError, Result};
use crate::membership::MembershipFunction;
use crate::terms::Terms;
use crate::universe::Universe;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// Copyable handle to a variable registered in [`Variables`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Variable(pub(crate) VariableKey);

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum VariableKind {
    /// Consumes a crisp input
    Antecedent,
    /// Produces a fuzzy output set
    Consequent,
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Antecedent => f.write_str("antecedent"),
            Self::Consequent => f.write_str("consequent"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LinguisticVariable {
    name: String,
    kind: VariableKind,
    universe: Universe,
    terms: Terms,
}

impl LinguisticVariable {
    pub fn new(name: impl Into<String>, kind: VariableKind, universe: Universe) -> Self {
        Self {
            name: name.into(),
            kind,
            universe,
            terms: Terms::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn terms(&self) -> &Terms {
        &self.terms
    }

    pub fn add_term(&mut self, name: impl Into<String>, function: MembershipFunction) -> Result<()> {
        self.terms.insert(name.into(), function).map_err(|term| FuzzyError::DuplicateTerm {
            variable: self.name.clone(),
            term,
        })
    }

    pub fn term(&self, term: &str) -> Result<&MembershipFunction> {
        self.terms.get(term).ok_or_else(|| FuzzyError::UnknownTerm {
            variable: self.name.clone(),
            term: term.to_owned(),
        })
    }

    /// Degree of `x` in the named term.
    pub fn membership(&self, term: &str, x: f64) -> Result<f64> {
        self.term(term).map(|f| f.degree(x))
    }

    /// The named term sampled over this variable's universe, as `(x, degree)` pairs.
    pub fn curve(&self, term: &str) -> Result<Vec<(f64, f64)>> {
        let function = self.term(term)?;

        Ok(self.universe.points().iter().map(|&x| (x, function.degree(x))).collect())
    }

    /// Rejects crisp values outside the universe instead of extrapolating.
    pub(crate) fn check_input(&self, value: f64) -> Result<()> {
        if self.universe.contains(value) {
            Ok(())
        } else {
            Err(FuzzyError::OutOfDomain {
                variable: self.name.clone(),
                value,
                min: self.universe.min(),
                max: self.universe.max(),
            })
        }
    }
}

/// Registry owning every linguistic variable of a system.
#[derive(Clone, Debug, Default)]
pub struct Variables {
    vars: SlotMap<VariableKey, LinguisticVariable>,
    names: HashMap<String, VariableKey>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>, kind: VariableKind, universe: Universe) -> Result<Variable> {
        let name = name.into();

        if self.names.contains_key(&name) {
            return Err(FuzzyError::DuplicateVariable { name });
        }

        let key = self.vars.insert(LinguisticVariable::new(name.clone(), kind, universe));

        self.names.insert(name, key);

        Ok(Variable(key))
    }

    pub fn antecedent(&mut self, name: impl Into<String>, universe: Universe) -> Result<Variable> {
        self.add(name, VariableKind::Antecedent, universe)
    }

    pub fn consequent(&mut self, name: impl Into<String>, universe: Universe) -> Result<Variable> {
        self.add(name, VariableKind::Consequent, universe)
    }

    pub fn add_term(&mut self, var: Variable, name: impl Into<String>, function: MembershipFunction) -> Result<()> {
        match self.vars.get_mut(var.0) {
            Some(variable) => variable.add_term(name, function),
            None => Err(unregistered()),
        }
    }

    pub fn get(&self, var: Variable) -> Result<&LinguisticVariable> {
        self.vars.get(var.0).ok_or_else(unregistered)
    }

    pub fn find(&self, name: &str) -> Result<Variable> {
        self.names
            .get(name)
            .map(|key| Variable(*key))
            .ok_or_else(|| FuzzyError::UnknownVariable { name: name.to_owned() })
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, &LinguisticVariable)> {
        self.vars.iter().map(|(key, var)| (Variable(key), var))
    }
}

impl Index<Variable> for Variables {
    type Output = LinguisticVariable;

    fn index(&self, var: Variable) -> &LinguisticVariable {
        &self.vars[var.0]
    }
}

fn unregistered() -> FuzzyError {
    FuzzyError::UnregisteredVariable { registry: "variable set" }
}

#[cfg(test)]
fn humidity() -> (Variables, Variable) {
    let mut vars = Variables::new();
    let humidity = vars
        .antecedent("humidity", Universe::new(0., 100., 101).unwrap())
        .unwrap();

    vars.add_term(
        humidity,
        "good",
        MembershipFunction::triangular(30., 40., 50.).unwrap(),
    )
    .unwrap();

    (vars, humidity)
}

#[test]
fn test_terms() {
    let (mut vars, humidity) = humidity();

    assert_eq!(vars[humidity].membership("good", 35.), Ok(0.5));
    assert_eq!(
        vars[humidity].membership("dry", 35.),
        Err(FuzzyError::UnknownTerm {
            variable: "humidity".into(),
            term: "dry".into()
        })
    );
    assert_eq!(
        vars.add_term(humidity, "good", MembershipFunction::triangular(0., 1., 2.).unwrap()),
        Err(FuzzyError::DuplicateTerm {
            variable: "humidity".into(),
            term: "good".into()
        })
    );
}

#[test]
fn test_names() {
    let (mut vars, humidity) = humidity();

    assert_eq!(vars.find("humidity"), Ok(humidity));
    assert!(matches!(vars.find("pressure"), Err(FuzzyError::UnknownVariable { .. })));
    assert!(matches!(
        vars.consequent("humidity", Universe::new(0., 1., 2).unwrap()),
        Err(FuzzyError::DuplicateVariable { .. })
    ));
    assert_eq!(vars[humidity].kind(), VariableKind::Antecedent);
}

#[test]
fn test_unregistered_handle() {
    let (_, humidity) = humidity();
    let empty = Variables::new();

    assert_eq!(
        empty.get(humidity).map(|_| ()),
        Err(FuzzyError::UnregisteredVariable { registry: "variable set" })
    );
    assert_eq!(
        FuzzyError::UnregisteredVariable { registry: "variable set" }.to_string(),
        "variable handle is not registered with this variable set"
    );
}

#[test]
fn test_curve() {
    let (vars, humidity) = humidity();
    let curve = vars[humidity].curve("good").unwrap();

    assert_eq!(curve.len(), 101);
    assert_eq!(curve[40], (40., 1.));
    assert_eq!(curve[45], (45., 0.5));
    assert_eq!(curve[50], (50., 0.));
}

#[test]
fn test_out_of_domain() {
    let (vars, humidity) = humidity();

    assert!(vars[humidity].check_input(100.).is_ok());
    assert!(matches!(
        vars[humidity].check_input(-0.5),
        Err(FuzzyError::OutOfDomain { .. })
    ));
}
