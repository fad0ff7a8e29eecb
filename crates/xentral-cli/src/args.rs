use serde_json::Value;

use xentral_core::Arguments;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("expected an argument name starting with '--', got '{0}'")]
    NotAFlag(String),

    #[error("argument '--{0}' has no value")]
    MissingValue(String),
}

/// Turn `--key value` pairs into tool arguments.
///
/// `true`/`false` become booleans and all-digit values become integers;
/// everything else stays a string.
pub fn parse_tool_args(raw: &[String]) -> Result<Arguments, ArgsError> {
    let mut arguments = Arguments::new();
    let mut iter = raw.iter();

    while let Some(flag) = iter.next() {
        let Some(key) = flag.strip_prefix("--").filter(|k| !k.is_empty()) else {
            return Err(ArgsError::NotAFlag(flag.clone()));
        };
        let value = iter
            .next()
            .ok_or_else(|| ArgsError::MissingValue(key.to_string()))?;
        arguments.insert(key.to_string(), coerce(value));
    }

    Ok(arguments)
}

fn coerce(value: &str) -> Value {
    if value.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if value.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = value.parse::<i64>() {
            return Value::from(n);
        }
    }
    Value::String(value.to_string())
}
