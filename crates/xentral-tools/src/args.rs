//! Argument checks against a tool's declared parameters.

use serde_json::Value;

use xentral_core::{Arguments, ToolDefinition, ToolError};

/// Reject missing required arguments and values of the wrong type.
///
/// Arguments the definition does not declare are passed through untouched.
///
/// # Errors
///
/// [`ToolError::MissingArgument`] or [`ToolError::InvalidArgument`].
pub fn check_arguments(definition: &ToolDefinition, arguments: &Arguments) -> Result<(), ToolError> {
    for param in definition.parameters() {
        let value = match arguments.get(param.name()) {
            None | Some(Value::Null) => {
                if param.is_required() {
                    return Err(ToolError::MissingArgument(param.name().to_string()));
                }
                continue;
            }
            Some(value) => value,
        };

        if !param.param_type().accepts(value) {
            return Err(ToolError::invalid(
                param.name(),
                format!("expected {}", param.param_type()),
            ));
        }

        if let Some(allowed) = param.allowed_values() {
            let matches = value
                .as_str()
                .is_some_and(|v| allowed.iter().any(|a| a == v));
            if !matches {
                return Err(ToolError::invalid(
                    param.name(),
                    format!("must be one of: {}", allowed.join(", ")),
                ));
            }
        }
    }
    Ok(())
}

/// Render a scalar argument for use in a query string.
pub fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use xentral_core::{ParamType, ToolParameter};

    fn definition() -> ToolDefinition {
        ToolDefinition::new(
            "list_orders",
            "List orders",
            vec![
                ToolParameter::new("customer_id", ParamType::Integer, "Customer ID").required(),
                ToolParameter::new("status", ParamType::String, "Status")
                    .with_enum(["open", "shipped"]),
                ToolParameter::new("raw", ParamType::Boolean, "Raw output"),
            ],
        )
        .unwrap()
    }

    fn args(value: serde_json::Value) -> Arguments {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn accepts_valid_arguments() {
        let arguments = args(json!({"customer_id": 5, "status": "open", "extra": [1]}));
        assert!(check_arguments(&definition(), &arguments).is_ok());
    }

    #[test]
    fn missing_required() {
        let err = check_arguments(&definition(), &args(json!({"raw": true}))).unwrap_err();
        assert!(matches!(err, ToolError::MissingArgument(ref n) if n == "customer_id"));

        let err = check_arguments(&definition(), &args(json!({"customer_id": null}))).unwrap_err();
        assert!(matches!(err, ToolError::MissingArgument(_)));
    }

    #[test]
    fn wrong_type() {
        let err = check_arguments(&definition(), &args(json!({"customer_id": "5"}))).unwrap_err();
        assert_eq!(err.to_string(), "invalid argument 'customer_id': expected integer");
    }

    #[test]
    fn value_outside_enum() {
        let err = check_arguments(
            &definition(),
            &args(json!({"customer_id": 1, "status": "lost"})),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid argument 'status': must be one of: open, shipped"
        );
    }

    #[test]
    fn query_values() {
        assert_eq!(query_value(&json!("Berlin")), Some("Berlin".to_string()));
        assert_eq!(query_value(&json!(25)), Some("25".to_string()));
        assert_eq!(query_value(&json!(false)), Some("false".to_string()));
        assert_eq!(query_value(&json!({"a": 1})), None);
    }
}
