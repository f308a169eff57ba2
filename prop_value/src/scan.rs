//! Permissive text scanning, scanf-style: a failed scan yields zero rather
//! than an error, and trailing garbage after a valid prefix is ignored.

/// Longest decimal-integer prefix of `s`, or 0 when there is none.
pub(crate) fn int_prefix(s: &str) -> i64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    s[..end].parse().unwrap_or(0)
}

/// Longest float prefix of `s` (digits, optional fraction and exponent),
/// or 0.0 when there is none.
pub(crate) fn float_prefix(s: &str) -> f32 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+') | Some(b'-')) {
            exp += 1;
        }
        if bytes.get(exp).is_some_and(|b| b.is_ascii_digit()) {
            end = exp;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
        }
    }
    s[..end].parse().unwrap_or(0.0)
}

/// Scans up to `N` comma-separated integers; missing or unscannable
/// components are zero.
pub(crate) fn int_list<const N: usize>(s: &str) -> [i64; N] {
    let mut parts = s.split(',');
    core::array::from_fn(|_| parts.next().map(int_prefix).unwrap_or(0))
}

/// Scans up to `N` comma-separated floats; missing or unscannable
/// components are zero.
pub(crate) fn float_list<const N: usize>(s: &str) -> [f32; N] {
    let mut parts = s.split(',');
    core::array::from_fn(|_| parts.next().map(float_prefix).unwrap_or(0.0))
}

/// Case-insensitive boolean word. Covers the plain forms and every word the
/// boolean aspects can emit, so text round-trips regardless of aspect.
pub(crate) fn bool_word(s: &str) -> Option<bool> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("0")
        || s.eq_ignore_ascii_case("false")
        || s.eq_ignore_ascii_case("no")
        || s.eq_ignore_ascii_case("off")
        || s.eq_ignore_ascii_case("disabled")
    {
        Some(false)
    } else if s.eq_ignore_ascii_case("1")
        || s.eq_ignore_ascii_case("true")
        || s.eq_ignore_ascii_case("yes")
        || s.eq_ignore_ascii_case("on")
        || s.eq_ignore_ascii_case("enabled")
    {
        Some(true)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_prefix_is_permissive() {
        assert_eq!(int_prefix("42"), 42);
        assert_eq!(int_prefix("  -17 trailing"), -17);
        assert_eq!(int_prefix("nonsense"), 0);
        assert_eq!(int_prefix(""), 0);
        assert_eq!(int_prefix("+5"), 5);
    }

    #[test]
    fn float_prefix_is_permissive() {
        assert_eq!(float_prefix("1.5"), 1.5);
        assert_eq!(float_prefix("-2.25e2x"), -225.0);
        assert_eq!(float_prefix("junk"), 0.0);
        assert_eq!(float_prefix("3."), 3.0);
        assert_eq!(float_prefix("1e"), 1.0);
    }

    #[test]
    fn lists_pad_with_zero() {
        assert_eq!(int_list::<3>("1,2"), [1, 2, 0]);
        assert_eq!(int_list::<2>("1,2,3"), [1, 2]);
        assert_eq!(float_list::<4>("0.5,junk,2"), [0.5, 0.0, 2.0, 0.0]);
    }

    #[test]
    fn bool_words() {
        assert_eq!(bool_word("Yes"), Some(true));
        assert_eq!(bool_word(" off "), Some(false));
        assert_eq!(bool_word("enabled"), Some(true));
        assert_eq!(bool_word("maybe"), None);
    }
}
