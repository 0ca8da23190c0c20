//! The json input document

use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use style_engine::prelude::*;

use crate::options::DocumentOptions;
use crate::prelude::*;

/// A document describing the rules to process
///
/// ```json
/// {
///     "options": { "optimize": true, "prettify": false },
///     "stores": {
///         "block-supports": [{ "selector": ".wp-1", "declarations": { "margin": "0" } }]
///     },
///     "rules": [{ "selector": "body", "declarations": { "color": "black" } }]
/// }
/// ```
#[derive(Deserialize, Default)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub(crate) struct Document {
    /// Processing options
    pub(crate) options: DocumentOptions,
    /// Named stores, attached in the order they appear
    pub(crate) stores: IndexMap<String, Vec<Rule>>,
    /// Rules added straight to the processor
    pub(crate) rules: Vec<Rule>,
}

impl Document {
    /// Read a document from a file, or stdin if the path is `-`
    pub(crate) fn read(path: &Path) -> Result<Self> {
        let content = if path == Path::new("-") {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Reading stdin")?;
            content
        } else {
            std::fs::read_to_string(path)?
        };

        Self::parse(&content)
    }

    /// Parse a document from json
    pub(crate) fn parse(content: &str) -> Result<Self> {
        let document: Self = serde_json::from_str(content)
            .map_err(|err| anyhow!("Invalid style document: {err}"))?;
        log::info!(
            "Loaded {} stores and {} direct rules",
            document.stores.len(),
            document.rules.len()
        );
        Ok(document)
    }

    /// Push every rule through a store registry and processor, and return the css.
    pub(crate) fn into_css(self, options: ProcessorOptions) -> String {
        let mut registry = StoreRegistry::new();
        let mut processor = Processor::new();

        for (name, rules) in self.stores {
            let store = registry.store(name);
            {
                let mut store = store.borrow_mut();
                for rule in rules {
                    store.add_rule_with(rule.selector().to_owned(), rule.declarations().clone());
                }
            }
            processor.add_store(&store);
        }
        processor.add_rules(self.rules);

        processor.css(options)
    }
}
