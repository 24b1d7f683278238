//! Change detection across ordered steps

use crate::config::Config;
use crate::key::ItemKey;
use std::collections::{BTreeSet, HashMap};

/// Keys whose effective value changes somewhere across `steps`
///
/// Each step holds only the items set at that position. A key is iterated
/// when it is set to a value different from the one it last held, or when it
/// first appears after the initial step (a transition from unset to set).
/// A key that keeps one value everywhere it is set is not iterated, even if
/// intermediate steps leave it out.
pub fn iterated_keys<'a, V, I>(steps: I) -> BTreeSet<ItemKey>
where
    V: PartialEq + 'a,
    I: IntoIterator<Item = &'a Config<V>>,
{
    let mut known: HashMap<&'a ItemKey, &'a V> = HashMap::new();
    let mut iterated = BTreeSet::new();

    for (index, step) in steps.into_iter().enumerate() {
        for (key, value) in step {
            match known.get_mut(key) {
                None => {
                    if index > 0 {
                        iterated.insert(key.clone());
                    }
                    known.insert(key, value);
                }
                Some(last) if *last != value => {
                    iterated.insert(key.clone());
                    *last = value;
                }
                Some(_) => {}
            }
        }
    }
    iterated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(items: &[(&str, &str)]) -> Config<String> {
        items
            .iter()
            .map(|(k, v)| (k.parse().unwrap(), (*v).to_string()))
            .collect()
    }

    fn names(keys: &BTreeSet<ItemKey>) -> Vec<String> {
        keys.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn reports_changed_and_late_keys() {
        let steps = vec![
            step(&[("nochange", "nochange"), ("change", "change0")]),
            step(&[("change", "change1"), ("new1", "new1")]),
            step(&[("nochange", "nochange"), ("change", "change2"), ("new2", "new2")]),
        ];
        assert_eq!(names(&iterated_keys(&steps)), vec!["change", "new1", "new2"]);
    }

    #[test]
    fn no_steps_no_keys() {
        let steps: Vec<Config<String>> = Vec::new();
        assert!(iterated_keys(&steps).is_empty());
    }

    #[test]
    fn single_step_has_no_iterated_keys() {
        let steps = vec![step(&[("a", "1"), ("b", "2")])];
        assert!(iterated_keys(&steps).is_empty());
    }

    #[test]
    fn value_returning_to_earlier_value_is_iterated() {
        let steps = vec![step(&[("a", "1")]), step(&[("a", "2")]), step(&[("a", "1")])];
        assert_eq!(names(&iterated_keys(&steps)), vec!["a"]);
    }

    #[test]
    fn late_key_with_constant_value_is_still_iterated() {
        let steps = vec![step(&[("a", "1")]), step(&[]), step(&[("b", "x")]), step(&[("b", "x")])];
        assert_eq!(names(&iterated_keys(&steps)), vec!["b"]);
    }
}
