//! Aggregate css rules from many producers into one stylesheet.
//!
//! Producers push `selector -> declarations` rules into named stores (or straight into a
//! processor). The processor merges rules for the same selector, optionally combines selectors
//! whose declarations end up identical, and serializes the result.
//!
//! ```rust
//! use style_engine::prelude::*;
//!
//! let mut registry = StoreRegistry::new();
//! registry
//!     .store("block-supports")
//!     .borrow_mut()
//!     .add_rule_with(".wp-1", [("margin", "0")]);
//! registry
//!     .store("global-styles")
//!     .borrow_mut()
//!     .add_rule_with(".wp-2", [("margin", "0")]);
//!
//! let mut processor = Processor::new();
//! for store in registry.stores() {
//!     processor.add_store(store);
//! }
//!
//! let css = processor.css(ProcessorOptions::default().prettify(false));
//! assert_eq!(css, ".wp-1,.wp-2{margin: 0;}");
//! ```

pub mod declarations;
mod error_handling;
pub mod processor;
pub mod rule;
pub mod store;

pub use declarations::DeclarationSet;
pub use processor::{Processor, ProcessorOptions};
pub use rule::Rule;
pub use store::{RuleStore, StoreHandle, StoreRegistry};

/// Commonly used types.
pub mod prelude {
    pub use super::declarations::DeclarationSet;
    pub use super::processor::{Processor, ProcessorOptions};
    pub use super::rule::Rule;
    pub use super::store::{RuleStore, StoreHandle, StoreRegistry};
}

/// Check if a string is valid css
#[cfg(test)]
#[expect(clippy::panic, clippy::expect_used, reason = "This is meant for tests")]
pub(crate) fn assert_valid_css(string: &str) {
    let warnings = std::sync::Arc::default();
    let result = lightningcss::stylesheet::StyleSheet::parse(
        string,
        lightningcss::stylesheet::ParserOptions {
            warnings: Some(std::sync::Arc::clone(&warnings)),
            error_recovery: false,
            ..Default::default()
        },
    );

    match result {
        Err(error) => {
            panic!("The following code was not valid css\n{string}\nerror: {error}");
        }
        Ok(_) => {
            let warnings = warnings.read().expect("Failed to get lock");
            if !warnings.is_empty() {
                for warning in warnings.iter() {
                    eprintln!("{warning}");
                }
                panic!("The following code produced warnings\n{string}");
            }
        }
    }
}
