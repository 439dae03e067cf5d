use crate::property::{PropertyMap, PropertyValue};
use serde::{Deserialize, Serialize};

/// An existing database page, normalized to the flat property model.
///
/// The reconciliation engine only reads from this; pages are created and
/// updated through the store, never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatabaseRecord {
    pub id: String,
    pub properties: PropertyMap,
}

impl DatabaseRecord {
    pub fn select(&self, name: &str) -> Option<&str> {
        match self.properties.get(name) {
            Some(PropertyValue::Select(value)) => Some(value),
            _ => None,
        }
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        match self.properties.get(name) {
            Some(PropertyValue::Number(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn multi_select(&self, name: &str) -> Option<&[String]> {
        match self.properties.get(name) {
            Some(PropertyValue::MultiSelect(values)) => Some(values),
            _ => None,
        }
    }

    pub fn rich_text(&self, name: &str) -> Option<&str> {
        match self.properties.get(name) {
            Some(PropertyValue::RichText(value)) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_accessors_ignore_mismatched_types() {
        let mut properties = PropertyMap::new();
        properties.insert("状态".to_string(), PropertyValue::Select("在看".to_string()));
        properties.insert("观看进度".to_string(), PropertyValue::Number(12.0));
        let record = DatabaseRecord {
            id: "page-1".to_string(),
            properties,
        };

        assert_eq!(record.select("状态"), Some("在看"));
        assert_eq!(record.number("观看进度"), Some(12.0));
        // A select read as a number is absent, not an error
        assert_eq!(record.number("状态"), None);
        assert_eq!(record.select("不存在"), None);
    }
}
