use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::{FuzzyError, Result};
use crate::inputs::Inputs;
use crate::ops::*;
use crate::outputs::{Inferred, Outputs};
use crate::rules::Rules;
use crate::variable::{LinguisticVariable, Variable, VariableKind, Variables};
#[cfg(test)]
use crate::membership::MembershipFunction;
#[cfg(test)]
use crate::rules::{Conclusion, Rule};
#[cfg(test)]
use crate::universe::Universe;
#[cfg(test)]
use approx::assert_abs_diff_eq;

/// Operator selection for an [`InferenceEngine`]. The default is classic
/// Mamdani: min-and, max-or, clipping implication, max aggregation and a
/// centroid defuzzifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InferenceConfig {
    pub and_op: AndOp,
    pub or_op: OrOp,
    pub imp_op: ImplicationOp,
    pub agg_op: AggregationOp,
    pub defuzz_op: DefuzzificationOp,
}

impl InferenceConfig {
    pub fn new(
        and_op: AndOp,
        or_op: OrOp,
        imp_op: ImplicationOp,
        agg_op: AggregationOp,
        defuzz_op: DefuzzificationOp,
    ) -> Self {
        Self {
            and_op,
            or_op,
            imp_op,
            agg_op,
            defuzz_op,
        }
    }

    pub fn with_and(mut self, and_op: AndOp) -> Self {
        self.and_op = and_op;
        self
    }

    pub fn with_or(mut self, or_op: OrOp) -> Self {
        self.or_op = or_op;
        self
    }

    pub fn with_implication(mut self, imp_op: ImplicationOp) -> Self {
        self.imp_op = imp_op;
        self
    }

    pub fn with_aggregation(mut self, agg_op: AggregationOp) -> Self {
        self.agg_op = agg_op;
        self
    }

    pub fn with_defuzzification(mut self, defuzz_op: DefuzzificationOp) -> Self {
        self.defuzz_op = defuzz_op;
        self
    }
}

/// A validated rule base. Immutable once built; every [`compute`] call works
/// on its own caller-owned [`Inputs`] and returns fresh [`Outputs`].
///
/// [`compute`]: InferenceEngine::compute
#[derive(Clone, Debug)]
pub struct InferenceEngine {
    vars: Variables,
    rules: Rules,
    config: InferenceConfig,
    antecedents: Vec<Variable>,
    consequents: Vec<Variable>,
    // Consequent terms sampled over their universe, indexed by rule then conclusion
    conclusion_curves: Vec<Vec<Vec<f64>>>,
}

fn expect_kind(variable: &LinguisticVariable, expected: VariableKind) -> Result<()> {
    if variable.kind() == expected {
        Ok(())
    } else {
        Err(FuzzyError::WrongKind {
            variable: variable.name().to_owned(),
            expected,
        })
    }
}

impl InferenceEngine {
    pub fn new(vars: Variables, rules: Rules) -> Result<Self> {
        Self::with_config(vars, rules, InferenceConfig::default())
    }

    /// Checks every term reference and variable role up front, so nothing
    /// about the rule base itself can fail at compute time.
    pub fn with_config(vars: Variables, rules: Rules, config: InferenceConfig) -> Result<Self> {
        let mut antecedents = Vec::new();
        let mut consequents = Vec::new();
        let mut conclusion_curves = Vec::with_capacity(rules.len());

        for rule in rules.iter() {
            for (var, term) in rule.premise().propositions() {
                let variable = vars.get(var)?;

                expect_kind(variable, VariableKind::Antecedent)?;
                variable.term(term)?;

                if !antecedents.contains(&var) {
                    antecedents.push(var);
                }
            }

            let mut curves = Vec::with_capacity(rule.conclusions().len());

            for conclusion in rule.conclusions() {
                let variable = vars.get(conclusion.var())?;

                expect_kind(variable, VariableKind::Consequent)?;
                curves.push(variable.term(conclusion.term())?.sample(variable.universe()));

                if !consequents.contains(&conclusion.var()) {
                    consequents.push(conclusion.var());
                }
            }

            conclusion_curves.push(curves);
        }

        debug!(
            rules = rules.len(),
            antecedents = antecedents.len(),
            consequents = consequents.len(),
            ?config,
            "built inference engine"
        );

        Ok(Self {
            vars,
            rules,
            config,
            antecedents,
            consequents,
            conclusion_curves,
        })
    }

    /// Fresh, empty input bindings for one call.
    pub fn inputs(&self) -> Inputs<'_> {
        Inputs::new(&self.vars)
    }

    /// Fails with `ForeignInputs` unless `inputs` came from [`Self::inputs`]
    /// on this very engine.
    pub fn compute(&self, inputs: &Inputs) -> Result<Outputs> {
        // Keys of independent registries collide, so a foreign binding would
        // silently skip this engine's domain checks
        if !inputs.belongs_to(&self.vars) {
            return Err(FuzzyError::ForeignInputs);
        }

        for var in &self.antecedents {
            if !inputs.values.contains_key(var) {
                return Err(FuzzyError::MissingInput {
                    variable: self.vars.get(*var)?.name().to_owned(),
                });
            }
        }

        let mut aggregated = HashMap::with_capacity(self.consequents.len());

        for var in &self.consequents {
            aggregated.insert(*var, vec![0.; self.vars.get(*var)?.universe().len()]);
        }

        let mut firing_strengths = Vec::with_capacity(self.rules.len());

        for ((i, rule), curves) in self.rules.iter().enumerate().zip(&self.conclusion_curves) {
            let strength = rule
                .premise()
                .strength(&self.vars, &inputs.values, self.config.and_op, self.config.or_op)?;

            trace!(rule = i, strength, "rule fired");
            firing_strengths.push(strength);

            // Contributes the zero set
            if strength == 0. {
                continue;
            }

            for (conclusion, curve) in rule.conclusions().iter().zip(curves) {
                let effective = f64::min(strength * conclusion.weight(), 1.);
                let Some(agg) = aggregated.get_mut(&conclusion.var()) else {
                    continue;
                };

                for (slot, degree) in agg.iter_mut().zip(curve) {
                    *slot = self.config.agg_op.apply(*slot, self.config.imp_op.apply(effective, *degree));
                }
            }
        }

        let mut inferred = Vec::with_capacity(self.consequents.len());

        for var in &self.consequents {
            let variable = self.vars.get(*var)?;
            let aggregated = aggregated.remove(var).unwrap_or_default();
            let crisp = self.config.defuzz_op.call(variable.universe().points(), &aggregated);

            match crisp {
                Some(value) => trace!(variable = variable.name(), value, "defuzzified"),
                None => debug!(variable = variable.name(), "no rule contributed, output undefined"),
            }

            inferred.push((
                *var,
                Inferred {
                    name: variable.name().to_owned(),
                    universe: variable.universe().clone(),
                    aggregated,
                    crisp,
                },
            ));
        }

        Ok(Outputs::new(inferred, firing_strengths))
    }

    /// A term of any variable sampled over its universe, for display.
    pub fn curve(&self, var: Variable, term: &str) -> Result<Vec<(f64, f64)>> {
        self.vars.get(var)?.curve(term)
    }

    pub fn curve_by_name(&self, var: &str, term: &str) -> Result<Vec<(f64, f64)>> {
        self.curve(self.vars.find(var)?, term)
    }

    pub fn variable(&self, var: Variable) -> Result<&LinguisticVariable> {
        self.vars.get(var)
    }

    pub fn variables(&self) -> &Variables {
        &self.vars
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }
}

#[cfg(test)]
struct AirPurifier {
    vars: Variables,
    air_quality: Variable,
    humidity: Variable,
    fan_speed: Variable,
}

#[cfg(test)]
fn air_purifier() -> AirPurifier {
    let mut vars = Variables::new();
    let universe = Universe::new(0., 100., 101).unwrap();
    let air_quality = vars.antecedent("air_quality", universe.clone()).unwrap();
    let humidity = vars.antecedent("humidity", universe.clone()).unwrap();
    let fan_speed = vars.consequent("fan_speed", universe).unwrap();

    let trap = |a, b, c, d| MembershipFunction::trapezoidal(a, b, c, d).unwrap();
    let tri = |a, b, c| MembershipFunction::triangular(a, b, c).unwrap();

    vars.add_term(air_quality, "poor", trap(0., 0., 20., 40.)).unwrap();
    vars.add_term(air_quality, "moderate", tri(30., 50., 70.)).unwrap();
    vars.add_term(air_quality, "good", trap(60., 80., 100., 100.)).unwrap();

    vars.add_term(humidity, "underrate", trap(0., 0., 10., 32.)).unwrap();
    vars.add_term(humidity, "good", tri(30., 40., 50.)).unwrap();
    vars.add_term(humidity, "overrate", trap(48., 70., 100., 100.)).unwrap();

    vars.add_term(fan_speed, "low", trap(0., 0., 20., 40.)).unwrap();
    vars.add_term(fan_speed, "medium", tri(20., 50., 70.)).unwrap();
    vars.add_term(fan_speed, "high", trap(60., 85., 100., 100.)).unwrap();

    AirPurifier {
        vars,
        air_quality,
        humidity,
        fan_speed,
    }
}

#[cfg(test)]
fn air_purifier_rules(sys: &AirPurifier) -> Vec<Rule> {
    let table = [
        ("poor", "underrate", "high"),
        ("poor", "good", "medium"),
        ("poor", "overrate", "high"),
        ("moderate", "underrate", "medium"),
        ("moderate", "good", "low"),
        ("moderate", "overrate", "medium"),
        ("good", "underrate", "low"),
        ("good", "good", "low"),
        ("good", "overrate", "medium"),
    ];

    table
        .into_iter()
        .map(|(air, hum, fan)| {
            Rule::new(
                sys.air_quality.is(air) & sys.humidity.is(hum),
                Some(Conclusion::new(sys.fan_speed, fan)),
            )
        })
        .collect()
}

#[cfg(test)]
fn air_purifier_engine() -> (InferenceEngine, Variable) {
    let sys = air_purifier();
    let rules = air_purifier_rules(&sys).into_iter().collect();
    let fan_speed = sys.fan_speed;

    (InferenceEngine::new(sys.vars, rules).unwrap(), fan_speed)
}

#[test]
fn test_air_purifier() {
    let (engine, fan_speed) = air_purifier_engine();
    let mut inputs = engine.inputs();

    inputs.set_by_name("air_quality", 80.).unwrap();
    inputs.set_by_name("humidity", 50.).unwrap();

    let outputs = engine.compute(&inputs).unwrap();
    let speed = outputs.get(fan_speed).unwrap();

    assert!((20. ..=70.).contains(&speed));
    assert_abs_diff_eq!(speed, 45.22105631339632, epsilon = 1e-9);
    assert_eq!(outputs.get_by_name("fan_speed"), Ok(speed));

    // Only "good & overrate" fires, at overrate(50) = 2 / 22
    let strengths = outputs.firing_strengths();

    assert_eq!(strengths.len(), 9);
    assert_abs_diff_eq!(strengths[8], 2. / 22., epsilon = 1e-12);
    assert!(strengths[..8].iter().all(|s| *s == 0.));

    // Repeated calls are bit for bit identical
    for _ in 0..3 {
        let again = engine.compute(&inputs).unwrap().get(fan_speed).unwrap();

        assert_eq!(again.to_bits(), speed.to_bits());
    }
}

#[test]
fn test_aggregated_curve() {
    let (engine, fan_speed) = air_purifier_engine();
    let mut inputs = engine.inputs();

    inputs.set_by_name("air_quality", 80.).unwrap();
    inputs.set_by_name("humidity", 50.).unwrap();

    let outputs = engine.compute(&inputs).unwrap();
    let curve = outputs.aggregated_curve(fan_speed).unwrap();
    let cap = 2. / 22.;

    assert_eq!(curve.len(), 101);
    assert_eq!(curve[0], (0., 0.));
    assert_eq!(curve[20], (20., 0.));
    assert_abs_diff_eq!(curve[50].1, cap, epsilon = 1e-12);
    assert_eq!(curve[70], (70., 0.));
    assert!(curve.iter().all(|(_, m)| *m <= cap + 1e-12));

    let medium = engine.curve_by_name("fan_speed", "medium").unwrap();

    assert_eq!(medium[50], (50., 1.));
    assert!(matches!(
        engine.curve_by_name("fan_speed", "turbo"),
        Err(FuzzyError::UnknownTerm { .. })
    ));
}

#[test]
fn test_rule_order_invariance() {
    let sys = air_purifier();
    let rules = air_purifier_rules(&sys);
    let reversed: Rules = rules.iter().rev().cloned().collect();
    let rotated: Rules = rules.iter().cycle().skip(4).take(rules.len()).cloned().collect();
    let engines = [
        InferenceEngine::new(sys.vars.clone(), rules.into_iter().collect()).unwrap(),
        InferenceEngine::new(sys.vars.clone(), reversed).unwrap(),
        InferenceEngine::new(sys.vars.clone(), rotated).unwrap(),
    ];

    for (air, hum) in [(80., 50.), (35., 31.), (65., 45.), (10., 90.), (55., 49.)] {
        let results: Vec<Vec<(f64, f64)>> = engines
            .iter()
            .map(|engine| {
                let mut inputs = engine.inputs();

                inputs.set(sys.air_quality, air).unwrap();
                inputs.set(sys.humidity, hum).unwrap();

                engine.compute(&inputs).unwrap().aggregated_curve(sys.fan_speed).unwrap()
            })
            .collect();

        assert_eq!(results[0], results[1]);
        assert_eq!(results[0], results[2]);
    }
}

#[cfg(test)]
fn heater() -> (Variables, Variable, Variable) {
    let mut vars = Variables::new();
    let temp = vars.antecedent("temp", Universe::new(0., 40., 41).unwrap()).unwrap();
    let power = vars.consequent("power", Universe::new(0., 10., 101).unwrap()).unwrap();

    vars.add_term(temp, "cold", MembershipFunction::trapezoidal(0., 0., 10., 20.).unwrap())
        .unwrap();
    vars.add_term(temp, "hot", MembershipFunction::trapezoidal(25., 35., 40., 40.).unwrap())
        .unwrap();
    vars.add_term(power, "high", MembershipFunction::triangular(5., 10., 10.).unwrap())
        .unwrap();
    vars.add_term(power, "off", MembershipFunction::triangular(0., 0., 2.).unwrap())
        .unwrap();

    (vars, temp, power)
}

#[test]
fn test_no_rule_fires() {
    let (vars, temp, power) = heater();
    let mut rules = Rules::new();

    rules.add(temp.is("cold"), power, "high");

    let engine = InferenceEngine::new(vars, rules).unwrap();
    let mut inputs = engine.inputs();

    inputs.set(temp, 5.).unwrap();

    assert!(engine.compute(&inputs).unwrap().get(power).is_ok());

    // No residue from the previous call
    inputs.set(temp, 30.).unwrap();

    let outputs = engine.compute(&inputs).unwrap();

    assert_eq!(
        outputs.get(power),
        Err(FuzzyError::UndefinedOutput { variable: "power".into() })
    );
    assert_eq!(outputs.firing_strengths(), &[0.]);
    assert!(outputs
        .aggregated_curve(power)
        .unwrap()
        .iter()
        .all(|(_, m)| *m == 0.));
}

#[test]
fn test_input_errors() {
    let (vars, temp, power) = heater();
    let mut rules = Rules::new();

    rules.add(temp.is("cold") | temp.is("hot"), power, "high");

    let engine = InferenceEngine::new(vars, rules).unwrap();
    let mut inputs = engine.inputs();

    assert_eq!(
        engine.compute(&inputs).map(|_| ()),
        Err(FuzzyError::MissingInput { variable: "temp".into() })
    );
    assert!(matches!(inputs.set(temp, 41.), Err(FuzzyError::OutOfDomain { .. })));
    assert!(matches!(inputs.set(temp, f64::NAN), Err(FuzzyError::OutOfDomain { .. })));
    assert!(matches!(inputs.set(power, 1.), Err(FuzzyError::WrongKind { .. })));
    assert!(matches!(
        inputs.set_by_name("pressure", 1.),
        Err(FuzzyError::UnknownVariable { .. })
    ));

    // A rejected value leaves the bindings untouched
    assert_eq!(inputs.get(temp), None);

    inputs.set(temp, 40.).unwrap();

    assert!(engine.compute(&inputs).is_ok());
}

#[test]
fn test_build_errors() {
    let (vars, temp, power) = heater();

    let mut rules = Rules::new();
    rules.add(temp.is("warm"), power, "high");
    assert!(matches!(
        InferenceEngine::new(vars.clone(), rules),
        Err(FuzzyError::UnknownTerm { .. })
    ));

    let mut rules = Rules::new();
    rules.add(temp.is("cold"), power, "max");
    assert!(matches!(
        InferenceEngine::new(vars.clone(), rules),
        Err(FuzzyError::UnknownTerm { .. })
    ));

    let mut rules = Rules::new();
    rules.add(power.is("high"), power, "off");
    assert_eq!(
        InferenceEngine::new(vars.clone(), rules).map(|_| ()),
        Err(FuzzyError::WrongKind {
            variable: "power".into(),
            expected: VariableKind::Antecedent
        })
    );

    let mut rules = Rules::new();
    rules.add(temp.is("cold"), temp, "hot");
    assert!(matches!(
        InferenceEngine::new(vars, rules),
        Err(FuzzyError::WrongKind { .. })
    ));
}

#[test]
fn test_weights_and_implication() {
    let (vars, temp, power) = heater();
    let mut rules = Rules::new();

    rules.add_weighted(temp.is("cold"), power, "high", 0.5).unwrap();

    let clip = InferenceEngine::new(vars.clone(), rules.clone()).unwrap();
    let scale = InferenceEngine::with_config(
        vars,
        rules,
        InferenceConfig::default().with_implication(ImplicationOp::Prod),
    )
    .unwrap();
    let mut inputs = clip.inputs();

    inputs.set(temp, 5.).unwrap();

    let clipped = clip.compute(&inputs).unwrap().aggregated_curve(power).unwrap();
    let peak = clipped.iter().map(|(_, m)| *m).fold(0., f64::max);

    assert_abs_diff_eq!(peak, 0.5, epsilon = 1e-12);

    let mut inputs = scale.inputs();

    inputs.set(temp, 5.).unwrap();

    let scaled = scale.compute(&inputs).unwrap().aggregated_curve(power).unwrap();

    // Scaling keeps the triangle's shape: half height at every sample
    for ((y, m), (_, full)) in scaled.iter().zip(scale.curve(power, "high").unwrap()) {
        assert_abs_diff_eq!(*m, full * 0.5, epsilon = 1e-12);
        assert!(*y >= 0.);
    }
}

#[test]
fn test_multiple_conclusions() {
    let mut vars = Variables::new();
    let universe = Universe::new(0., 10., 101).unwrap();
    let load = vars.antecedent("load", universe.clone()).unwrap();
    let fan = vars.consequent("fan", universe.clone()).unwrap();
    let pump = vars.consequent("pump", universe).unwrap();

    vars.add_term(load, "heavy", MembershipFunction::trapezoidal(5., 8., 10., 10.).unwrap())
        .unwrap();
    vars.add_term(fan, "fast", MembershipFunction::triangular(6., 8., 10.).unwrap())
        .unwrap();
    vars.add_term(pump, "on", MembershipFunction::triangular(2., 4., 6.).unwrap())
        .unwrap();

    let mut rules = Rules::new();

    rules.push(Rule::new(
        load.is("heavy"),
        [
            Conclusion::new(fan, "fast"),
            Conclusion::weighted(pump, "on", 0.5).unwrap(),
        ],
    ));

    let engine = InferenceEngine::new(vars, rules).unwrap();
    let mut inputs = engine.inputs();

    inputs.set(load, 9.).unwrap();

    let outputs = engine.compute(&inputs).unwrap();

    // Both implied sets are symmetric about their term's peak
    assert_abs_diff_eq!(outputs.get(fan).unwrap(), 8., epsilon = 1e-9);
    assert_abs_diff_eq!(outputs.get(pump).unwrap(), 4., epsilon = 1e-9);
    assert_eq!(outputs.iter().count(), 2);
}

#[test]
fn test_alternative_operators() {
    let sys = air_purifier();
    let rules: Rules = air_purifier_rules(&sys).into_iter().collect();
    let product = InferenceConfig::default()
        .with_and(AndOp::Prod)
        .with_or(OrOp::ProbOr)
        .with_aggregation(AggregationOp::ProbOr);

    for defuzz_op in [
        DefuzzificationOp::Centroid,
        DefuzzificationOp::AreaCentroid,
        DefuzzificationOp::Bisector,
        DefuzzificationOp::Mom,
        DefuzzificationOp::Som,
        DefuzzificationOp::Lom,
    ] {
        let config = product.with_defuzzification(defuzz_op);
        let engine = InferenceEngine::with_config(sys.vars.clone(), rules.clone(), config).unwrap();
        let mut inputs = engine.inputs();

        inputs.set(sys.air_quality, 35.).unwrap();
        inputs.set(sys.humidity, 31.).unwrap();

        let speed = engine.compute(&inputs).unwrap().get(sys.fan_speed).unwrap();

        assert!((0. ..=100.).contains(&speed), "{defuzz_op:?} gave {speed}");
    }
}

#[test]
fn test_inputs_from_other_engine() {
    let universe = |max| Universe::new(0., max, 11).unwrap();
    let build = |input_max| {
        let mut vars = Variables::new();
        let level = vars.antecedent("level", universe(input_max)).unwrap();
        let valve = vars.consequent("valve", universe(10.)).unwrap();

        vars.add_term(level, "any", MembershipFunction::trapezoidal(0., 0., input_max, input_max).unwrap())
            .unwrap();
        vars.add_term(valve, "open", MembershipFunction::triangular(0., 5., 10.).unwrap())
            .unwrap();

        let mut rules = Rules::new();

        rules.add(level.is("any"), valve, "open");

        (InferenceEngine::new(vars, rules).unwrap(), level)
    };
    let (wide, wide_level) = build(100.);
    let (narrow, narrow_level) = build(1.);

    // Handles of independent registries compare equal
    assert_eq!(wide_level, narrow_level);

    let mut inputs = wide.inputs();

    inputs.set(wide_level, 50.).unwrap();

    assert!(wide.compute(&inputs).is_ok());
    assert_eq!(narrow.compute(&inputs).map(|_| ()), Err(FuzzyError::ForeignInputs));

    // A clone owns its own registry too
    let copy = wide.clone();

    assert_eq!(copy.compute(&inputs).map(|_| ()), Err(FuzzyError::ForeignInputs));
    assert!(matches!(narrow.inputs().set(narrow_level, 50.), Err(FuzzyError::OutOfDomain { .. })));
}

#[test]
fn test_outputs_in_declaration_order() {
    let mut vars = Variables::new();
    let universe = Universe::new(0., 10., 11).unwrap();
    let load = vars.antecedent("load", universe.clone()).unwrap();
    let names = ["zeta", "alpha", "mid", "beta", "omega", "gamma"];
    let outputs: Vec<Variable> = names
        .iter()
        .map(|name| vars.consequent(*name, universe.clone()).unwrap())
        .collect();

    vars.add_term(load, "some", MembershipFunction::trapezoidal(0., 0., 10., 10.).unwrap())
        .unwrap();

    for var in &outputs {
        vars.add_term(*var, "on", MembershipFunction::triangular(0., 5., 10.).unwrap())
            .unwrap();
    }

    let rules: Rules = outputs
        .iter()
        .map(|var| Rule::new(load.is("some"), Some(Conclusion::new(*var, "on"))))
        .collect();
    let engine = InferenceEngine::new(vars, rules).unwrap();
    let mut inputs = engine.inputs();

    inputs.set(load, 3.).unwrap();

    let result = engine.compute(&inputs).unwrap();

    assert_eq!(result.iter().map(|(name, _)| name).collect::<Vec<_>>(), names);
    assert_eq!(engine.variable(outputs[1]).unwrap().name(), "alpha");

    // The antecedent is registered but never an output
    assert_eq!(
        result.get(load),
        Err(FuzzyError::UnregisteredVariable {
            registry: "inference outputs"
        })
    );
}

#[test]
fn test_concurrent_compute() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<InferenceEngine>();

    let (engine, fan_speed) = air_purifier_engine();
    let expected: Vec<Result<f64>> = (0..=10)
        .map(|i| {
            let mut inputs = engine.inputs();

            inputs.set_by_name("air_quality", i as f64 * 10.).unwrap();
            inputs.set_by_name("humidity", 100. - i as f64 * 10.).unwrap();
            engine.compute(&inputs).unwrap().get(fan_speed)
        })
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..=10)
            .map(|i| {
                let engine = &engine;

                scope.spawn(move || {
                    let mut inputs = engine.inputs();

                    inputs.set_by_name("air_quality", i as f64 * 10.).unwrap();
                    inputs.set_by_name("humidity", 100. - i as f64 * 10.).unwrap();
                    engine.compute(&inputs).unwrap().get(fan_speed)
                })
            })
            .collect();

        for (handle, expected) in handles.into_iter().zip(expected) {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
