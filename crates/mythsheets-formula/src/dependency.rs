//! Dependency collection for formula chains
//!
//! A single static pass over a chain's steps produces the set of context
//! slots the chain will read, before any character data is touched. The
//! rule-loading layer uses the resulting [`DependencySet`] to know which
//! attributes to fetch from storage, and the runtime uses it to refuse
//! under-seeded evaluations up front.

use ahash::AHashSet;
use mythsheets_core::{EvalContext, KeyRef, TypedKey};

/// Accumulates the slots a chain's steps declare.
///
/// Requirements are deduplicated; two steps reading the same slot contribute
/// one entry.
#[derive(Debug, Default)]
pub struct DependencyCollector {
    keys: AHashSet<KeyRef>,
    variables: AHashSet<String>,
}

impl DependencyCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare that a step reads the slot named by `key`.
    pub fn require<T: 'static>(&mut self, key: &TypedKey<T>) {
        self.keys.insert(key.erased());
    }

    /// Declare that a step reads an external named value (a rule-pack
    /// variable resolved by the surrounding application).
    pub fn require_variable(&mut self, name: impl Into<String>) {
        self.variables.insert(name.into());
    }

    /// Freeze the collected requirements into a [`DependencySet`].
    pub fn finish(self) -> DependencySet {
        let mut keys: Vec<KeyRef> = self.keys.into_iter().collect();
        keys.sort();
        let mut variables: Vec<String> = self.variables.into_iter().collect();
        variables.sort();
        DependencySet { keys, variables }
    }
}

/// The frozen dependency set of a compiled chain.
///
/// Computed once at chain construction and cached there, since it depends
/// only on chain structure. Iteration order is sorted for deterministic
/// reporting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DependencySet {
    keys: Vec<KeyRef>,
    variables: Vec<String>,
}

impl DependencySet {
    /// The context slots the chain reads, sorted by name.
    pub fn keys(&self) -> &[KeyRef] {
        &self.keys
    }

    /// The external named values the chain reads, sorted.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Whether the chain declared the slot named by `key`.
    pub fn contains<T: 'static>(&self, key: &TypedKey<T>) -> bool {
        self.keys.binary_search(&key.erased()).is_ok()
    }

    /// The declared slots not bound in `ctx`, sorted by name. Empty means
    /// the context is sufficiently seeded.
    pub fn missing_from(&self, ctx: &EvalContext) -> Vec<KeyRef> {
        self.keys
            .iter()
            .filter(|key| !ctx.contains_ref(key))
            .copied()
            .collect()
    }

    /// Whether no slots or variables were declared.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.variables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mythsheets_core::keys;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_duplicate_requirements_collapse() {
        let mut collector = DependencyCollector::new();
        collector.require(&keys::VALUE);
        collector.require(&keys::VALUE);
        collector.require(&keys::LEVEL);
        let set = collector.finish();
        assert_eq!(set.keys().len(), 2);
        assert!(set.contains(&keys::VALUE));
        assert!(set.contains(&keys::LEVEL));
    }

    #[test]
    fn test_keys_are_sorted_by_name() {
        let mut collector = DependencyCollector::new();
        collector.require(&keys::VALUE);
        collector.require(&keys::ATTACK_BONUS);
        collector.require(&keys::LEVEL);
        let set = collector.finish();
        let names: Vec<_> = set.keys().iter().map(|k| k.name()).collect();
        assert_eq!(names, vec!["attack_bonus", "level", "value"]);
    }

    #[test]
    fn test_variables_are_deduplicated_and_sorted() {
        let mut collector = DependencyCollector::new();
        collector.require_variable("STR");
        collector.require_variable("CON");
        collector.require_variable("STR");
        let set = collector.finish();
        assert_eq!(set.variables(), ["CON".to_string(), "STR".to_string()]);
    }

    #[test]
    fn test_missing_from_reports_unbound_slots() {
        let mut collector = DependencyCollector::new();
        collector.require(&keys::VALUE);
        collector.require(&keys::LEVEL);
        let set = collector.finish();

        let ctx = EvalContext::new().with(&keys::VALUE, 1.0);
        let missing = set.missing_from(&ctx);
        assert_eq!(missing, vec![keys::LEVEL.erased()]);

        let seeded = ctx.with(&keys::LEVEL, 4);
        assert!(set.missing_from(&seeded).is_empty());
    }

    #[test]
    fn test_empty_set() {
        let set = DependencyCollector::new().finish();
        assert!(set.is_empty());
        assert!(set.missing_from(&EvalContext::new()).is_empty());
    }
}
