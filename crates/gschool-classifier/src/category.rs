//! Built-in category labels.

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Categories produced by the built-in classifiers.
///
/// The serialized form (`snake_case`) is the label stored in the category
/// policy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    Adult,
    Drugs,
    Education,
    Gambling,
    Games,
    News,
    Shopping,
    Social,
    Streaming,
    Violence,
    /// Fallback when nothing matches.
    Other,
}

impl Category {
    /// All labels, in declaration order.
    pub fn names() -> Vec<String> {
        Category::iter().map(|c| c.to_string()).collect()
    }
}
