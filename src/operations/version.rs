use crate::evaluator::EvalError;
use crate::operations::{text_of, OpResult, Operation};
use crate::value::Value;
use std::cmp::Ordering;

/// Version comparisons: segment-wise, numeric, from the left.
///
/// `1.2.10` is newer than `1.2.3`, which plain string comparison gets
/// wrong. Absent trailing segments count as zero (`1.2` equals `1.2.0`),
/// as does any segment that is not a number.
pub struct VersionOperation;

fn segment(parts: &mut std::str::Split<'_, char>) -> Option<u64> {
    parts.next().map(|s| s.parse().unwrap_or(0))
}

fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (segment(&mut left), segment(&mut right)) {
            (None, None) => return Ordering::Equal,
            (l, r) => {
                let ordering = l.unwrap_or(0).cmp(&r.unwrap_or(0));
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

fn ordered(left: Option<&Value>, right: Option<&Value>) -> Result<Ordering, EvalError> {
    let l = text_of(left, "a version string")?;
    let r = text_of(right, "a version string")?;
    Ok(compare_versions(&l, &r))
}

impl Operation for VersionOperation {
    fn name(&self) -> &'static str {
        "version"
    }

    fn eq(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        Ok(ordered(left, right)? == Ordering::Equal)
    }

    fn ne(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        Ok(ordered(left, right)? != Ordering::Equal)
    }

    fn gt(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        Ok(ordered(left, right)? == Ordering::Greater)
    }

    fn lt(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        Ok(ordered(left, right)? == Ordering::Less)
    }

    fn ge(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        Ok(ordered(left, right)? != Ordering::Less)
    }

    fn le(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        Ok(ordered(left, right)? != Ordering::Greater)
    }
}

#[test]
fn test_version_ordering() {
    assert_eq!(compare_versions("1.2.3", "1.2.3"), Ordering::Equal);
    assert_eq!(compare_versions("1.2.10", "1.2.3"), Ordering::Greater);
    assert_eq!(compare_versions("1.2", "1.2.0"), Ordering::Equal);
    assert_eq!(compare_versions("2.0.0", "10.0.0"), Ordering::Less);
    assert_eq!(compare_versions("1.2.x", "1.2.0"), Ordering::Equal);
}
