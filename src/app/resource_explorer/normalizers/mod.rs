use serde::{Deserialize, Serialize};

/// One entry in a picker: the uniform output of every resource lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    pub value: String,
    pub label: String,
}

impl Suggestion {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            text: value.clone(),
            label: value.clone(),
            value,
        }
    }
}

impl From<String> for Suggestion {
    fn from(value: String) -> Self {
        Suggestion::new(value)
    }
}

impl From<&str> for Suggestion {
    fn from(value: &str) -> Self {
        Suggestion::new(value)
    }
}

/// Turn native values into suggestions, preserving order and duplicates
pub fn normalize<I, S>(values: I) -> Vec<Suggestion>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Suggestion::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triple_mirrors_value() {
        let s = Suggestion::new("i-123");
        assert_eq!(s.text, "i-123");
        assert_eq!(s.value, "i-123");
        assert_eq!(s.label, "i-123");
    }

    #[test]
    fn test_normalize_keeps_order_and_duplicates() {
        let out = normalize(["b", "a", "b"]);
        let values: Vec<&str> = out.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_string(&Suggestion::new("us-east-1")).unwrap();
        assert_eq!(
            json,
            r#"{"text":"us-east-1","value":"us-east-1","label":"us-east-1"}"#
        );
    }
}
