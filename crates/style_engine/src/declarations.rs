//! Css declaration sets

use indexmap::IndexMap;

/// The indentation unit used by prettified output
pub(crate) const INDENT: &str = "\t";

/// Push `level` indentation units onto `output`
pub(crate) fn push_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str(INDENT);
    }
}

/// A set of css declarations (`property: value`) keyed by property name.
///
/// Insertion order is kept for output, but is not significant for equality,
/// `{color: red; margin: 0}` and `{margin: 0; color: red}` compare equal.
///
/// Property names and values are opaque strings, nothing here validates css syntax.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[must_use]
pub struct DeclarationSet {
    /// property -> value
    declarations: IndexMap<String, String>,
}

impl DeclarationSet {
    /// Create a empty declaration set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a single property, overwriting any existing value for it.
    ///
    /// An overwritten property keeps the position it was first inserted at.
    pub fn add(&mut self, property: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.declarations.insert(property.into(), value.into());
        self
    }

    /// Merge `other` into this set, values from `other` win on conflict.
    pub fn merge(&mut self, other: &DeclarationSet) -> &mut Self {
        self.extend(other);
        self
    }

    /// Get the value of a property
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations.get(property).map(String::as_str)
    }

    /// Iterate the declarations in insertion order
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.declarations.iter())
    }

    /// The number of declarations
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Does this set hold no declarations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// The order independent form of this set, used to find sets with identical content.
    ///
    /// This sorts a snapshot of the declarations by property name, the set itself is untouched.
    pub fn canonical(&self) -> CanonicalDeclarations<'_> {
        let mut pairs: Vec<(&str, &str)> = self.iter().collect();
        pairs.sort_unstable();
        CanonicalDeclarations(pairs)
    }

    /// Render the declarations as css.
    ///
    /// Compact output is `a: b;c: d;`, prettified output puts each declaration on its own line
    /// indented by one level.
    #[must_use]
    pub fn to_css(&self, pretty: bool) -> String {
        let mut output = String::new();
        self.write_css(&mut output, pretty, 1);
        output
    }

    /// Write the declarations to `output`, using `indent` levels of indentation in pretty mode.
    pub(crate) fn write_css(&self, output: &mut String, pretty: bool, indent: usize) {
        for (property, value) in self {
            if pretty {
                output.push('\n');
                push_indent(output, indent);
            }
            output.push_str(property);
            output.push_str(": ");
            output.push_str(value);
            output.push(';');
        }
    }
}

/// Declarations sorted by property name.
///
/// Two sets compare equal here exactly when they hold the same properties with byte identical
/// values, no matter what order they were inserted in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalDeclarations<'a>(Vec<(&'a str, &'a str)>);

impl<'a> CanonicalDeclarations<'a> {
    /// The sorted `(property, value)` pairs
    #[must_use]
    pub fn pairs(&self) -> &[(&'a str, &'a str)] {
        &self.0
    }
}

/// Iterator over the declarations of a `DeclarationSet`
pub struct Iter<'a>(indexmap::map::Iter<'a, String, String>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.0
            .next()
            .map(|(property, value)| (property.as_str(), value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a> IntoIterator for &'a DeclarationSet {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for DeclarationSet {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.declarations.into_iter()
    }
}

impl<K, V> Extend<(K, V)> for DeclarationSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (property, value) in iter {
            self.add(property, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for DeclarationSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl From<IndexMap<String, String>> for DeclarationSet {
    fn from(declarations: IndexMap<String, String>) -> Self {
        Self { declarations }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for DeclarationSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(declarations: [(K, V); N]) -> Self {
        declarations.into_iter().collect()
    }
}
