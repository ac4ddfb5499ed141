//! Helpers for loosely typed (TOML) input.

/// Describe a value for an error message.
///
/// Scalars are stringified, booleans are labelled, and compound values are
/// named by type.
pub fn describe_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(true) => "(boolean)TRUE".to_string(),
        toml::Value::Boolean(false) => "(boolean)FALSE".to_string(),
        toml::Value::Datetime(d) => d.to_string(),
        toml::Value::Array(_) => "array".to_string(),
        toml::Value::Table(_) => "table".to_string(),
    }
}

/// Convert a scalar value into a line of comment text.
///
/// Returns `None` for arrays and tables.
pub fn scalar_to_line(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
        toml::Value::Datetime(d) => Some(d.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_scalars() {
        assert_eq!(describe_value(&toml::Value::String("nope".into())), "nope");
        assert_eq!(describe_value(&toml::Value::Integer(42)), "42");
        assert_eq!(describe_value(&toml::Value::Float(90.01)), "90.01");
    }

    #[test]
    fn test_describe_booleans() {
        assert_eq!(describe_value(&toml::Value::Boolean(true)), "(boolean)TRUE");
        assert_eq!(describe_value(&toml::Value::Boolean(false)), "(boolean)FALSE");
    }

    #[test]
    fn test_describe_compound() {
        assert_eq!(describe_value(&toml::Value::Array(Vec::new())), "array");
        assert_eq!(describe_value(&toml::Value::Table(toml::Table::new())), "table");
    }

    #[test]
    fn test_scalar_to_line() {
        assert_eq!(
            scalar_to_line(&toml::Value::Integer(9001)),
            Some("9001".to_string())
        );
        assert_eq!(
            scalar_to_line(&toml::Value::Boolean(true)),
            Some("TRUE".to_string())
        );
        assert_eq!(scalar_to_line(&toml::Value::Array(Vec::new())), None);
    }
}
