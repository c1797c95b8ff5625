use cidr::IpCidr;
use regex::Regex;
use std::collections::HashMap;
use std::net::IpAddr;

/// A document value used throughout the sieve rule language.
///
/// This type represents everything a document attribute can hold: the JSON
/// scalar and container types (with integers distinguished from floats),
/// plus the network-flavored values rules compare against directly -
/// IP addresses, CIDR networks, and precompiled regexes.
///
/// # Missing vs. null
///
/// A document never stores "missing". Absence is expressed by resolution
/// returning nothing, while `Value::Null` is an explicit, *present* null.
/// The `pr` operator sees a null as present; comparison operators reject it.
///
/// # Examples
///
/// ```
/// use sieve_lang::Value;
/// use std::collections::HashMap;
///
/// // Scalar values
/// let null = Value::Null;
/// let boolean = Value::Bool(true);
/// let integer = Value::Int(42);
/// let float = Value::Float(3.14);
/// let string = Value::String("hello".to_string());
///
/// // Network values
/// let addr = Value::Ip("10.1.2.3".parse().unwrap());
///
/// // Collections
/// let array = Value::Array(vec![Value::Int(1), Value::Int(2)]);
///
/// let mut doc = HashMap::new();
/// doc.insert("key".to_string(), Value::String("value".to_string()));
/// let object = Value::Object(doc);
/// ```
#[derive(Debug, Clone)]
pub enum Value {
    /// Explicit null (present, unlike a missing attribute)
    Null,

    /// Boolean
    Bool(bool),

    /// Integer number (preserved separately from floats)
    Int(i64),

    /// Floating-point number
    Float(f64),

    /// UTF-8 string
    String(String),

    /// IP address, v4 or v6
    Ip(IpAddr),

    /// CIDR network
    Net(IpCidr),

    /// Array of values (homogeneous or heterogeneous)
    Array(Vec<Value>),

    /// Object with string keys
    Object(HashMap<String, Value>),

    /// Precompiled regex, usable as a `mt` pattern source
    Regex(Regex),
}

impl Value {
    /// Runtime type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Ip(_) => "ip address",
            Value::Net(_) => "network",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Regex(_) => "regex",
        }
    }

    /// Text rendering for the operations that compare strings.
    ///
    /// Strings pass through; addresses, networks, and regexes render as
    /// their written form. Everything else has no text form.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Ip(ip) => Some(ip.to_string()),
            Value::Net(net) => Some(net.to_string()),
            Value::Regex(re) => Some(re.as_str().to_string()),
            _ => None,
        }
    }

    /// Unwrap an object into a document map.
    pub fn into_object(self) -> Option<HashMap<String, Value>> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

// Regex carries no equality of its own; two regex values are equal when
// their source patterns are.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Ip(a), Value::Ip(b)) => a == b,
            (Value::Net(a), Value::Net(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Regex(a), Value::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<IpAddr> for Value {
    fn from(ip: IpAddr) -> Self {
        Value::Ip(ip)
    }
}

impl From<IpCidr> for Value {
    fn from(net: IpCidr) -> Self {
        Value::Net(net)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(obj: HashMap<String, Value>) -> Self {
        Value::Object(obj)
    }
}

/// Lossless mapping from JSON. Numbers become `Int` when they fit an `i64`
/// and `Float` otherwise; strings stay strings even when they look like
/// addresses (the string operations handle address-shaped text themselves).
impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap())
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => Value::Object(
                obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            ),
        }
    }
}

/// Parse a JSON object string into a document map.
///
/// Returns the JSON error for malformed input, or `Ok(None)` when the input
/// parses but its root is not an object.
///
/// # Examples
///
/// ```
/// use sieve_lang::document_from_json;
///
/// let doc = document_from_json(r#"{"a": 1, "b": {"c": true}}"#).unwrap().unwrap();
/// assert!(doc.contains_key("a"));
/// ```
pub fn document_from_json(
    input: &str,
) -> Result<Option<HashMap<String, Value>>, serde_json::Error> {
    let json: serde_json::Value = serde_json::from_str(input)?;
    Ok(Value::from(json).into_object())
}
