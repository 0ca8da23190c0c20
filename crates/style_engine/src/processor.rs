//! Consolidate rules from many stores and serialize them

use std::rc::Rc;

use indexmap::IndexMap;

use crate::declarations::CanonicalDeclarations;
use crate::error_handling::log_or_panic_result;
use crate::rule::Rule;
use crate::store::StoreHandle;

/// Options for `Processor::css`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
#[must_use]
pub struct ProcessorOptions {
    /// Combine selectors that end up with identical declarations into one rule
    pub optimize: bool,
    /// Use newlines and indentation in the output
    pub prettify: bool,
}

impl Default for ProcessorOptions {
    /// Optimized, and prettified only in debug builds.
    fn default() -> Self {
        Self {
            optimize: true,
            prettify: cfg!(debug_assertions),
        }
    }
}

impl ProcessorOptions {
    /// Set the `optimize` option
    pub fn optimize(mut self, optimize: bool) -> Self {
        self.optimize = optimize;
        self
    }

    /// Set the `prettify` option
    pub fn prettify(mut self, prettify: bool) -> Self {
        self.prettify = prettify;
        self
    }
}

/// Collects rules, from stores and directly, and turns them into one stylesheet.
#[derive(Debug, Default)]
#[must_use]
pub struct Processor {
    /// store name -> store, in registration order
    stores: IndexMap<String, StoreHandle>,
    /// Rules added directly, at most one per selector
    rules: IndexMap<String, Rule>,
}

impl Processor {
    /// Create a processor with no stores or rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a store, its rules are read every time css is generated.
    ///
    /// Attaching a store with the same name as a already attached one replaces it
    /// (keeping the position of the first registration).
    pub fn add_store(&mut self, store: &StoreHandle) -> &mut Self {
        let store_ref =
            log_or_panic_result!(store.try_borrow(), "Store is mutably borrowed while attaching");
        let Some(store_ref) = store_ref else {
            return self;
        };
        let name = store_ref.name().to_owned();
        drop(store_ref);

        log::debug!("Attaching store {name}");
        self.stores.insert(name, Rc::clone(store));
        self
    }

    /// Add a single rule, merging it into any existing rule for the same selector.
    pub fn add_rule(&mut self, rule: Rule) -> &mut Self {
        merge_rule(&mut self.rules, rule);
        self
    }

    /// Add rules in order, merging each into any existing rule for the same selector.
    pub fn add_rules(&mut self, rules: impl IntoIterator<Item = Rule>) -> &mut Self {
        for rule in rules {
            merge_rule(&mut self.rules, rule);
        }
        self
    }

    /// The rules added directly to this processor
    pub fn rules(&self) -> impl ExactSizeIterator<Item = &Rule> {
        self.rules.values()
    }

    /// The names of the attached stores, in registration order
    pub fn store_names(&self) -> impl Iterator<Item = &str> {
        self.stores.keys().map(String::as_str)
    }

    /// Consolidate every rule into a single set, one rule per selector.
    ///
    /// Direct rules come first, then each store's rules in registration order.
    /// Rules for a already seen selector are merged into it, later values winning.
    #[must_use]
    pub fn consolidated(&self) -> IndexMap<String, Rule> {
        let mut rules = self.rules.clone();

        for (name, store) in &self.stores {
            let store = log_or_panic_result!(
                store.try_borrow(),
                "Store {name} is mutably borrowed while generating css"
            );
            let Some(store) = store else {
                continue;
            };

            log::trace!("Reading {} rules from store {name}", store.len());
            for rule in store.rules() {
                match rules.get_mut(rule.selector()) {
                    Some(existing) => {
                        existing.add_declarations(rule.declarations());
                    }
                    None => {
                        rules.insert(rule.selector().to_owned(), rule.clone());
                    }
                }
            }
        }

        rules
    }

    /// Generate the css for every rule.
    ///
    /// This does not change the processor, calling it again gives the same result as long as no
    /// rules are added in between.
    #[must_use]
    pub fn css(&self, options: ProcessorOptions) -> String {
        let rules = self.consolidated();
        log::debug!(
            "Generating css for {} rules from {} stores ({options:?})",
            rules.len(),
            self.stores.len()
        );

        let rules = if options.optimize {
            combine_selectors(&rules)
        } else {
            rules.into_values().collect()
        };

        let mut output = String::new();
        for rule in &rules {
            let css = rule.to_css(options.prettify);
            if css.is_empty() {
                continue;
            }
            output.push_str(&css);
            if options.prettify {
                output.push('\n');
            }
        }
        output
    }
}

/// Insert `rule`, or merge its declarations into the existing rule for its selector.
fn merge_rule(rules: &mut IndexMap<String, Rule>, rule: Rule) {
    match rules.get_mut(rule.selector()) {
        Some(existing) => {
            log::trace!("Merging rule {}", rule.selector());
            existing.add_declarations(rule.declarations());
        }
        None => {
            rules.insert(rule.selector().to_owned(), rule);
        }
    }
}

/// Combine rules with identical declarations into single rules with a selector list.
///
/// Selectors are joined in first seen order, and the combined rule takes the position of the
/// first member of its group.
/// A combined rule whose selector list already exists as a rule is merged into it, the combined
/// declarations winning.
/// Empty rules are left alone, they produce no output anyway.
#[must_use]
pub fn combine_selectors(rules: &IndexMap<String, Rule>) -> Vec<Rule> {
    let canonical: Vec<Option<CanonicalDeclarations<'_>>> = rules
        .values()
        .map(|rule| (!rule.is_empty()).then(|| rule.declarations().canonical()))
        .collect();

    let mut groups: IndexMap<&CanonicalDeclarations<'_>, Vec<&str>> = IndexMap::new();
    for (rule, canonical) in rules.values().zip(&canonical) {
        if let Some(canonical) = canonical {
            groups.entry(canonical).or_default().push(rule.selector());
        }
    }

    let mut result = IndexMap::with_capacity(groups.len());
    let mut combined = Vec::new();
    for (rule, canonical) in rules.values().zip(&canonical) {
        let group = canonical.as_ref().and_then(|canonical| groups.get(canonical));
        match group {
            Some(group) if group.len() > 1 => {
                if group.first() == Some(&rule.selector()) {
                    let selector = group.join(",");
                    log::trace!("Combined {} selectors into {selector}", group.len());
                    // Reserve the position, declarations are merged in once every rule is placed.
                    merge_rule(&mut result, Rule::new(selector.as_str()));
                    combined.push(Rule::with_declarations(
                        selector,
                        rule.declarations().clone(),
                    ));
                }
            }
            _ => merge_rule(&mut result, rule.clone()),
        }
    }

    for rule in combined {
        merge_rule(&mut result, rule);
    }

    result.into_values().collect()
}
