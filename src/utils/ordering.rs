//! Ordering helpers for rule entities
//!
//! Pattern evaluation order is significant: patterns are tried in ascending
//! `order`, ties broken by `id`. Sorting must also tolerate absent values
//! (`None` sorts before any present value, two `None` compare equal).

use std::cmp::Ordering;

/// Extend a comparator over non-absent values to a total order over `Option`.
///
/// Rules: `None < Some(_)`, `None == None`; two present values are compared
/// with `cmp`.
pub fn compare_null_safe<T, F>(a: Option<&T>, b: Option<&T>, cmp: F) -> Ordering
where
    F: FnOnce(&T, &T) -> Ordering,
{
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => cmp(x, y),
    }
}

/// Pattern precedence: ascending `order`, ties broken by ascending `id`.
pub fn pattern_precedence(a: (u32, u32), b: (u32, u32)) -> Ordering {
    a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_sorts_first() {
        let x = 5u32;
        assert_eq!(
            compare_null_safe(None, Some(&x), u32::cmp),
            Ordering::Less
        );
        assert_eq!(
            compare_null_safe(Some(&x), None, u32::cmp),
            Ordering::Greater
        );
        assert_eq!(
            compare_null_safe::<u32, _>(None, None, u32::cmp),
            Ordering::Equal
        );
    }

    #[test]
    fn test_present_values_use_inner_comparator() {
        let a = 1u32;
        let b = 2u32;
        assert_eq!(compare_null_safe(Some(&a), Some(&b), u32::cmp), Ordering::Less);
        assert_eq!(compare_null_safe(Some(&b), Some(&a), u32::cmp), Ordering::Greater);
        assert_eq!(compare_null_safe(Some(&a), Some(&a), u32::cmp), Ordering::Equal);
    }

    #[test]
    fn test_antisymmetry() {
        let values = [None, Some(1u32), Some(2u32), Some(3u32)];
        for a in &values {
            for b in &values {
                let ab = compare_null_safe(a.as_ref(), b.as_ref(), u32::cmp);
                let ba = compare_null_safe(b.as_ref(), a.as_ref(), u32::cmp);
                assert_eq!(ab, ba.reverse(), "antisymmetry violated for {:?} / {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_transitivity() {
        let values = [None, Some(1u32), Some(2u32), Some(3u32)];
        for a in &values {
            for b in &values {
                for c in &values {
                    let ab = compare_null_safe(a.as_ref(), b.as_ref(), u32::cmp);
                    let bc = compare_null_safe(b.as_ref(), c.as_ref(), u32::cmp);
                    let ac = compare_null_safe(a.as_ref(), c.as_ref(), u32::cmp);
                    if ab == bc {
                        assert_eq!(ac, ab, "transitivity violated for {:?} {:?} {:?}", a, b, c);
                    }
                }
            }
        }
    }

    #[test]
    fn test_pattern_precedence() {
        assert_eq!(pattern_precedence((1, 5), (2, 1)), Ordering::Less);
        assert_eq!(pattern_precedence((2, 1), (2, 5)), Ordering::Less);
        assert_eq!(pattern_precedence((2, 5), (2, 5)), Ordering::Equal);
        assert_eq!(pattern_precedence((3, 1), (2, 9)), Ordering::Greater);
    }
}
