//! Class-name mapping artifact.

use serde::{Deserialize, Serialize};

/// Ordered class names for the classifier's probability columns.
///
/// Deserialized from a JSON document of shape `{"classes": [...]}`. The
/// index of each name is the column index of the classifier's probability
/// output; the loader enforces that the lengths agree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassMapping {
    /// Class names in classifier column order.
    pub classes: Vec<String>,
}

impl ClassMapping {
    /// Number of classes in the mapping.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the mapping has no classes.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// The class name for a probability column, if in range.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.classes.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_shape() {
        let mapping: ClassMapping =
            serde_json::from_str(r#"{"classes": ["acne", "bags", "redness"]}"#).unwrap();
        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping.label(1), Some("bags"));
        assert_eq!(mapping.label(3), None);
    }
}
