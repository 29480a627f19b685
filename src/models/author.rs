//! Author model representing a person credited on an article.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A person with a first and last name.
///
/// Two authors are equal when both names match exactly. No case folding or
/// whitespace normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Author {
    first_name: String,
    last_name: String,
}

impl Author {
    /// Create a new author. Empty names are accepted.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Formatted name as `"last, first"`
    pub fn name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.last_name, self.first_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;
    use std::hash::{Hash, Hasher};

    fn hash_of(author: &Author) -> u64 {
        let mut hasher = DefaultHasher::new();
        author.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_name_format() {
        let author = Author::new("Richard", "Feynman");
        assert_eq!(author.name(), "Feynman, Richard");
        assert_eq!(author.to_string(), "Feynman, Richard");
    }

    #[test]
    fn test_name_with_empty_parts() {
        assert_eq!(Author::new("", "Curie").name(), "Curie, ");
        assert_eq!(Author::new("", "").name(), ", ");
    }

    #[test]
    fn test_equality_and_hash() {
        let a = Author::new("Lise", "Meitner");
        let b = Author::new("Lise", "Meitner");

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let set: HashSet<Author> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_inequality() {
        let base = Author::new("Lise", "Meitner");

        assert_ne!(base, Author::new("Otto", "Meitner"));
        assert_ne!(base, Author::new("Lise", "Hahn"));
        // Case sensitive
        assert_ne!(base, Author::new("lise", "Meitner"));
        // Swapped fields are a different author
        assert_ne!(base, Author::new("Meitner", "Lise"));
    }

    #[test]
    fn test_serialize() {
        let author = Author::new("Emmy", "Noether");
        let json = serde_json::to_value(&author).unwrap();
        assert_eq!(json["first_name"], "Emmy");
        assert_eq!(json["last_name"], "Noether");
    }
}
