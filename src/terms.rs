use std::collections::HashMap;

use crate::membership::MembershipFunction;

/// Named membership functions of one variable, kept in declaration order.
#[derive(Clone, Debug, Default)]
pub struct Terms {
    entries: Vec<(String, MembershipFunction)>,
    index: HashMap<String, usize>,
}

impl Terms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands the name back if it is already taken.
    pub(crate) fn insert(&mut self, name: String, function: MembershipFunction) -> Result<(), String> {
        if self.index.contains_key(&name) {
            return Err(name);
        }

        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, function));

        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&MembershipFunction> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MembershipFunction)> {
        self.entries.iter().map(|(name, f)| (name.as_str(), f))
    }
}

#[test]
fn test_terms_keep_order() {
    let mut terms = Terms::new();
    let tri = MembershipFunction::triangular(0., 1., 2.).unwrap();

    terms.insert("low".into(), tri.clone()).unwrap();
    terms.insert("high".into(), tri.clone()).unwrap();
    terms.insert("mid".into(), tri.clone()).unwrap();

    assert_eq!(terms.insert("low".into(), tri), Err("low".to_owned()));
    assert_eq!(terms.len(), 3);
    assert_eq!(terms.iter().map(|(name, _)| name).collect::<Vec<_>>(), vec!["low", "high", "mid"]);
    assert!(terms.get("mid").is_some());
    assert!(terms.get("none").is_none());
}
