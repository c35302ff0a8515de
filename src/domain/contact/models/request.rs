use serde_json::Value;

/// Raw form fields after coercion. Every field is a trimmed string; absent or
/// structured input collapses to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactRequest {
    pub name: String,
    pub company: String,
    pub email: String,
    pub service: String,
    pub message: String,
}

impl ContactRequest {
    pub fn new(name: &str, company: &str, email: &str, service: &str, message: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            company: company.trim().to_string(),
            email: email.trim().to_string(),
            service: service.trim().to_string(),
            message: message.trim().to_string(),
        }
    }

    /// Reads a request body that is either a JSON object or a JSON string
    /// holding one. Anything unparseable yields an empty request, so the
    /// caller sees a missing-field error rather than a parse error.
    pub fn from_body(body: &[u8]) -> Self {
        Self::from_value(&parse_body(body))
    }

    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str| coerce(value.get(key));
        Self {
            name: field("name"),
            company: field("company"),
            email: field("email"),
            service: field("service"),
            message: field("message"),
        }
    }
}

fn parse_body(body: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::String(text)) => serde_json::from_str(&text).unwrap_or(Value::Null),
        Ok(value) => value,
        Err(_) => Value::Null,
    }
}

/// Total conversion of an arbitrary JSON value into a trimmed string. Falsy
/// values (`null`, `false`, zero) become empty; arrays and objects are never
/// stringified.
pub fn coerce(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => String::new(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => String::new(),
    }
}
