//! A single css rule

use crate::declarations::{DeclarationSet, push_indent};

/// A selector bound to a set of declarations.
///
/// The selector is used verbatim, it is never parsed or validated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Rule {
    /// The selector (or comma separated selector list)
    selector: String,
    /// The declarations for the selector
    #[cfg_attr(feature = "serde", serde(default))]
    declarations: DeclarationSet,
}

impl Rule {
    /// Create a rule with no declarations
    pub fn new(selector: impl Into<String>) -> Self {
        Self::with_declarations(selector, DeclarationSet::new())
    }

    /// Create a rule with a initial set of declarations
    pub fn with_declarations(
        selector: impl Into<String>,
        declarations: impl Into<DeclarationSet>,
    ) -> Self {
        Self {
            selector: selector.into(),
            declarations: declarations.into(),
        }
    }

    /// The selector of this rule
    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// The declarations of this rule
    pub fn declarations(&self) -> &DeclarationSet {
        &self.declarations
    }

    /// Merge declarations into this rule, the added declarations win on conflict.
    ///
    /// Adding nothing is fine, the rule stays around with whatever it had.
    pub fn add_declarations<K, V>(
        &mut self,
        declarations: impl IntoIterator<Item = (K, V)>,
    ) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.declarations.extend(declarations);
        self
    }

    /// Does this rule produce no css
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Render this rule as css.
    ///
    /// A rule without declarations renders as a empty string, never as `selector{}`.
    #[must_use]
    pub fn to_css(&self, pretty: bool) -> String {
        self.css_with_indent(pretty, 0)
    }

    /// Render this rule as css, nested `indent` levels deep when prettified.
    #[must_use]
    pub fn css_with_indent(&self, pretty: bool, indent: usize) -> String {
        let mut output = String::new();
        if self.is_empty() {
            return output;
        }

        if pretty {
            let mut selectors = split_selector_list(&self.selector).into_iter().peekable();
            while let Some(selector) = selectors.next() {
                push_indent(&mut output, indent);
                output.push_str(selector);
                if selectors.peek().is_some() {
                    output.push_str(",\n");
                }
            }
            output.push_str(" {");
        } else {
            output.push_str(&self.selector);
            output.push('{');
        }

        self.declarations
            .write_css(&mut output, pretty, indent.saturating_add(1));

        if pretty {
            output.push('\n');
            push_indent(&mut output, indent);
        }
        output.push('}');
        output
    }
}

/// Split a selector list on its top level commas.
///
/// Commas inside `()`, `[]` or quoted strings belong to a single selector (`:is(.a, .b)`).
fn split_selector_list(selector: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth: usize = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (index, character) in selector.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, character) {
            (_, '\\') => escaped = true,
            (Some(open), close) if open == close => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(character),
            (None, '(' | '[') => depth = depth.saturating_add(1),
            (None, ')' | ']') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                if let Some(part) = selector.get(start..index) {
                    parts.push(part.trim());
                }
                start = index.saturating_add(1);
            }
            (None, _) => {}
        }
    }
    if let Some(part) = selector.get(start..) {
        parts.push(part.trim());
    }

    parts
}
