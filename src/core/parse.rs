use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("valid leading number regex")
});

/// Parses a credit or grade entry, treating anything unusable as zero.
///
/// Leading whitespace is skipped and the longest leading decimal literal is
/// taken, so `"4"`, `" 4.5 "` and `"4abc"` all parse, while `""`, `"abc"` and
/// `"."` yield `0.0`. Non-finite values (`"Infinity"`, `"1e999"`) also yield
/// `0.0`, as does negative zero.
pub fn parse_credit_or_zero(raw: &str) -> f64 {
    let Some(matched) = LEADING_NUMBER_RE.find(raw.trim_start()) else {
        return 0.0;
    };

    match matched.as_str().parse::<f64>() {
        Ok(value) if value.is_finite() && value != 0.0 => value,
        _ => 0.0,
    }
}
