use crate::ast::AttrPath;
use crate::value::Value;
use std::collections::HashMap;

/// Walk an attribute path through nested objects in a document.
///
/// Resolution is total: an absent key, or a path that descends through a
/// non-object value, yields `None`. Absence is data, never an error, and
/// the document is never touched beyond reads.
pub fn resolve<'a>(path: &AttrPath, doc: &'a HashMap<String, Value>) -> Option<&'a Value> {
    let mut segments = path.segments().iter();
    let mut current = doc.get(segments.next()?.as_str())?;
    for segment in segments {
        match current {
            Value::Object(obj) => current = obj.get(segment.as_str())?,
            _ => return None,
        }
    }
    Some(current)
}

#[test]
fn test_resolve_nested() {
    let mut inner = HashMap::new();
    inner.insert("ip".to_string(), Value::from("1.1.1.1"));
    let mut doc = HashMap::new();
    doc.insert("src".to_string(), Value::Object(inner));

    let path = AttrPath::new(vec!["src".to_string(), "ip".to_string()]);
    assert_eq!(resolve(&path, &doc), Some(&Value::from("1.1.1.1")));
}

#[test]
fn test_resolve_missing_key() {
    let doc = HashMap::new();
    assert_eq!(resolve(&AttrPath::root("a"), &doc), None);
}

#[test]
fn test_resolve_through_scalar() {
    let mut doc = HashMap::new();
    doc.insert("a".to_string(), Value::Int(1));

    // a is not an object, so a.b cannot resolve
    let path = AttrPath::new(vec!["a".to_string(), "b".to_string()]);
    assert_eq!(resolve(&path, &doc), None);
}

#[test]
fn test_resolve_null_is_present() {
    let mut doc = HashMap::new();
    doc.insert("a".to_string(), Value::Null);
    assert_eq!(resolve(&AttrPath::root("a"), &doc), Some(&Value::Null));
}
