//! Named stores that accumulate rules before processing

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::declarations::DeclarationSet;
use crate::rule::Rule;

/// A shared handle to a store.
///
/// Producers push rules through it, and a processor reads through it, all without copying the
/// store.
pub type StoreHandle = Rc<RefCell<RuleStore>>;

/// A named collection of rules, at most one per selector.
#[derive(Debug, Clone, Default)]
pub struct RuleStore {
    /// The name this store is registered under
    name: String,
    /// selector -> rule, in first seen order
    rules: IndexMap<String, Rule>,
}

impl RuleStore {
    /// Create a empty store with the given name.
    ///
    /// Stores are generally fetched from a `StoreRegistry` instead.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: IndexMap::new(),
        }
    }

    /// The name of this store
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the rule for `selector`, creating a empty one if it doesnt exist yet.
    pub fn add_rule(&mut self, selector: impl Into<String>) -> &mut Rule {
        let selector = selector.into();
        self.rules.entry(selector).or_insert_with_key(|selector| {
            log::trace!("Creating rule {selector}");
            Rule::new(selector.as_str())
        })
    }

    /// Get the rule for `selector` (creating it if needed), and merge in the given declarations.
    pub fn add_rule_with(
        &mut self,
        selector: impl Into<String>,
        declarations: impl Into<DeclarationSet>,
    ) -> &mut Rule {
        let declarations = declarations.into();
        let rule = self.add_rule(selector);
        rule.add_declarations(declarations);
        rule
    }

    /// Lookup the rule for a selector
    pub fn get_rule(&self, selector: &str) -> Option<&Rule> {
        self.rules.get(selector)
    }

    /// All rules in this store, in the order their selectors were first added
    pub fn rules(&self) -> impl ExactSizeIterator<Item = &Rule> {
        self.rules.values()
    }

    /// The number of rules (selectors) in this store
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Does this store contain no rules
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Lookup-or-create table of named stores.
///
/// A registry is meant to live for one request (or one build), owned by whatever drives
/// the producers, and passed by reference to them.
/// Handles are `Rc` based, so a registry and its stores stay on the thread that created them.
#[derive(Debug, Default)]
pub struct StoreRegistry {
    /// name -> store, in creation order
    stores: IndexMap<String, StoreHandle>,
}

impl StoreRegistry {
    /// Create a empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the store with the given name, creating and registering it if it doesnt exist.
    ///
    /// Repeated calls with the same name return handles to the same store.
    pub fn store(&mut self, name: impl Into<String>) -> StoreHandle {
        let handle = self.stores.entry(name.into()).or_insert_with_key(|name| {
            log::debug!("Creating store {name}");
            Rc::new(RefCell::new(RuleStore::new(name.as_str())))
        });
        Rc::clone(handle)
    }

    /// Get the store with the given name, if it exists
    #[must_use]
    pub fn get(&self, name: &str) -> Option<StoreHandle> {
        self.stores.get(name).map(Rc::clone)
    }

    /// The names of every registered store, in creation order
    pub fn store_names(&self) -> impl Iterator<Item = &str> {
        self.stores.keys().map(String::as_str)
    }

    /// All registered stores, in creation order
    pub fn stores(&self) -> impl Iterator<Item = &StoreHandle> {
        self.stores.values()
    }

    /// Drop every store from the registry.
    ///
    /// Handles given out earlier stay valid, but the registry wont return them again.
    pub fn forget_all(&mut self) {
        log::debug!("Forgetting {} stores", self.stores.len());
        self.stores.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_same_store() {
        let mut registry = StoreRegistry::new();
        let first = registry.store("block-supports");
        let second = registry.store("block-supports");

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(registry.store_names().collect::<Vec<_>>(), vec!["block-supports"]);
    }

    #[test]
    fn different_names_different_stores() {
        let mut registry = StoreRegistry::new();
        let first = registry.store("a");
        let second = registry.store("b");

        assert!(!Rc::ptr_eq(&first, &second));
        assert_eq!(second.borrow().name(), "b");
    }

    #[test]
    fn forget_all_resets() {
        let mut registry = StoreRegistry::new();
        let old = registry.store("a");
        old.borrow_mut().add_rule_with(".a", [("color", "red")]);

        registry.forget_all();
        assert!(registry.get("a").is_none());

        let new = registry.store("a");
        assert!(!Rc::ptr_eq(&old, &new));
        assert!(new.borrow().is_empty());
    }

    #[test]
    fn add_rule_returns_existing() {
        let mut store = RuleStore::new("test");
        store.add_rule(".a").add_declarations([("color", "red")]);
        store.add_rule(".a").add_declarations([("margin", "0")]);

        assert_eq!(store.len(), 1);
        let rule = store.get_rule(".a");
        assert_eq!(
            rule.map(|rule| rule.to_css(false)),
            Some(String::from(".a{color: red;margin: 0;}"))
        );
    }

    #[test]
    fn add_rule_with_merges() {
        let mut store = RuleStore::new("test");
        store.add_rule_with(".a", [("color", "red")]);
        store.add_rule_with(".a", [("color", "blue")]);

        assert_eq!(
            store.get_rule(".a").and_then(|rule| rule.declarations().get("color")),
            Some("blue")
        );
    }

    #[test]
    fn rules_in_first_seen_order() {
        let mut store = RuleStore::new("test");
        store.add_rule(".b");
        store.add_rule(".a");
        store.add_rule(".b");

        let selectors: Vec<_> = store.rules().map(Rule::selector).collect();
        assert_eq!(selectors, vec![".b", ".a"]);
    }
}
