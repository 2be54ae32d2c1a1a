//! Node payload and shape vocabulary

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a node in coverage analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// The node whose coverage is judged (`square`)
    Target,
    /// A mark placed by the author (`diamond`)
    Selected,
    /// An ordinary, unmarked node (`circle` or no shape)
    Base,
}

impl Shape {
    /// Map a DOT shape keyword to a shape, ignoring case
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "square" => Some(Self::Target),
            "diamond" => Some(Self::Selected),
            "circle" => Some(Self::Base),
            _ => None,
        }
    }

    /// DOT keyword for this shape
    #[inline]
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Target => "square",
            Self::Selected => "diamond",
            Self::Base => "circle",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Node weight stored in the arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Unique node name
    pub name: String,
    /// Coverage role
    pub shape: Shape,
}

impl Node {
    /// Create a node
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }

    /// Whether this node is a mark
    #[inline]
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.shape == Shape::Selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_keywords_are_case_insensitive() {
        assert_eq!(Shape::from_keyword("square"), Some(Shape::Target));
        assert_eq!(Shape::from_keyword("DIAMOND"), Some(Shape::Selected));
        assert_eq!(Shape::from_keyword(" Circle "), Some(Shape::Base));
        assert_eq!(Shape::from_keyword("box"), None);
        assert_eq!(Shape::from_keyword(""), None);
    }

    #[test]
    fn test_shape_keyword_roundtrip() {
        for shape in [Shape::Target, Shape::Selected, Shape::Base] {
            assert_eq!(Shape::from_keyword(shape.keyword()), Some(shape));
        }
    }
}
