use crate::dsl::Expr;
use crate::error::{FuzzyError, Result};
use crate::variable::Variable;

/// One `(consequent, term, weight)` conclusion of a rule.
#[derive(Clone, Debug, PartialEq)]
pub struct Conclusion {
    pub(crate) var: Variable,
    pub(crate) term: String,
    pub(crate) weight: f64,
}

impl Conclusion {
    pub fn new(var: Variable, term: impl Into<String>) -> Self {
        Self {
            var,
            term: term.into(),
            weight: 1.,
        }
    }

    /// Weight must lie in `(0, 1]`.
    pub fn weighted(var: Variable, term: impl Into<String>, weight: f64) -> Result<Self> {
        if !(weight > 0. && weight <= 1.) {
            return Err(FuzzyError::InvalidWeight { weight });
        }

        Ok(Self {
            var,
            term: term.into(),
            weight,
        })
    }

    pub fn var(&self) -> Variable {
        self.var
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    premise: Expr,
    conclusions: Vec<Conclusion>,
}

impl Rule {
    pub fn new(premise: Expr, conclusions: impl IntoIterator<Item = Conclusion>) -> Self {
        Self {
            premise,
            conclusions: conclusions.into_iter().collect(),
        }
    }

    pub fn premise(&self) -> &Expr {
        &self.premise
    }

    pub fn conclusions(&self) -> &[Conclusion] {
        &self.conclusions
    }
}

/// Rule set in declaration order. Position only identifies a rule in
/// diagnostics; it never changes the inferred result.
#[derive(Clone, Debug, Default)]
pub struct Rules(pub(crate) Vec<Rule>);

impl Rules {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    /// `premise` implies `term` of `var` at full weight.
    pub fn add(&mut self, premise: Expr, var: Variable, term: impl Into<String>) {
        self.0.push(Rule::new(premise, Some(Conclusion::new(var, term))));
    }

    pub fn add_weighted(&mut self, premise: Expr, var: Variable, term: impl Into<String>, weight: f64) -> Result<()> {
        let conclusion = Conclusion::weighted(var, term, weight)?;

        self.0.push(Rule::new(premise, Some(conclusion)));

        Ok(())
    }

    pub fn push(&mut self, rule: Rule) {
        self.0.push(rule);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.0.iter()
    }
}

impl FromIterator<Rule> for Rules {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Rules(iter.into_iter().collect())
    }
}

#[test]
fn test_weights() {
    use crate::universe::Universe;
    use crate::variable::Variables;

    let mut vars = Variables::new();
    let speed = vars.consequent("speed", Universe::new(0., 1., 2).unwrap()).unwrap();
    let mut rules = Rules::new();

    assert_eq!(Conclusion::new(speed, "low").weight(), 1.);
    assert!(Conclusion::weighted(speed, "low", 0.5).is_ok());
    assert!(Conclusion::weighted(speed, "low", 1.).is_ok());

    for weight in [0., -0.5, 1.01, f64::NAN] {
        assert!(matches!(
            rules.add_weighted(speed.is("low"), speed, "low", weight),
            Err(FuzzyError::InvalidWeight { .. })
        ));
    }
    assert!(rules.is_empty());
}
