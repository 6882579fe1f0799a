use std::collections::HashMap;

/// Shannon entropy of `s` in bits per character, from its own character frequencies.
///
/// Returns `0.0` for the empty string.
pub fn shannon_entropy(s: &str) -> f64 {
    let mut frequencies: HashMap<char, usize> = HashMap::new();
    let mut len = 0usize;
    for c in s.chars() {
        *frequencies.entry(c).or_insert(0) += 1;
        len += 1;
    }

    if len == 0 {
        return 0.0;
    }

    let len = len as f64;
    let entropy: f64 = frequencies
        .values()
        .map(|&n| {
            let p = n as f64 / len;
            -p * p.log2()
        })
        .sum();

    // A single distinct symbol sums to -0.0
    entropy.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(shannon_entropy(""), 0.0);
    }

    #[test]
    fn test_repeated_char_is_zero() {
        assert_eq!(shannon_entropy("aaaaaaaa"), 0.0);
        assert_eq!(shannon_entropy("/"), 0.0);
    }

    #[test]
    fn test_uniform_distinct_chars_is_log2_n() {
        assert!(approx(shannon_entropy("ab"), 1.0));
        assert!(approx(shannon_entropy("abcd"), 2.0));
        assert!(approx(shannon_entropy("aabbccdd"), 2.0));
        assert!(approx(shannon_entropy("0123456789abcdef"), 4.0));
        assert!(approx(shannon_entropy("aXb93kLmZ0Qw"), 12f64.log2()));
    }

    #[test]
    fn test_counts_unicode_scalars() {
        assert!(approx(shannon_entropy("ab€€"), 1.5));
    }

    #[test]
    fn test_never_negative() {
        for s in ["", "x", "xy", "xxxy", "index.html?q=1", "ééé"] {
            assert!(shannon_entropy(s) >= 0.0, "negative entropy for {:?}", s);
        }
    }
}
