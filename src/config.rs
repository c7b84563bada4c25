//! Command-line configuration

use crate::constants::DEFAULT_DURATION_SECS;

/// Benchmark configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchConfig {
    /// Target wall-clock duration for each runner, in seconds
    pub duration_secs: f64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
        }
    }
}

impl BenchConfig {
    /// Build from process arguments (program name already skipped).
    ///
    /// Only the first argument is read. It is parsed leniently by
    /// [`parse_leading_f64`]: a token with no number in front yields `0.0`.
    /// Negative and non-numeric input is not rejected.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match args.into_iter().next() {
            Some(arg) => Self {
                duration_secs: parse_leading_f64(arg.as_ref()),
            },
            None => Self::default(),
        }
    }
}

/// Parse the longest numeric prefix of `s` the way C `atof` does, ignoring
/// leading whitespace. Accepts decimal and hexadecimal (`0x1.8p3`) floats
/// and the words `inf`, `infinity` and `nan` in any case. Returns `0.0`
/// when there is no numeric prefix.
pub fn parse_leading_f64(s: &str) -> f64 {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let magnitude = parse_special(rest)
        .or_else(|| parse_hex(rest))
        .unwrap_or_else(|| parse_decimal(rest));

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn parse_special(s: &str) -> Option<f64> {
    if starts_with_ignore_case(s, "inf") {
        Some(f64::INFINITY)
    } else if starts_with_ignore_case(s, "nan") {
        Some(f64::NAN)
    } else {
        None
    }
}

/// `0x` mantissa with optional fraction and binary `p` exponent
fn parse_hex(s: &str) -> Option<f64> {
    if !starts_with_ignore_case(s, "0x") {
        return None;
    }
    let bytes = &s.as_bytes()[2..];
    let mut pos = 0;
    let mut mantissa = 0.0f64;
    let mut scale: i32 = 0;
    let mut digits = 0;

    while let Some(d) = bytes.get(pos).and_then(|&b| (b as char).to_digit(16)) {
        mantissa = mantissa * 16.0 + d as f64;
        digits += 1;
        pos += 1;
    }
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        while let Some(d) = bytes.get(pos).and_then(|&b| (b as char).to_digit(16)) {
            mantissa = mantissa * 16.0 + d as f64;
            scale = scale.saturating_sub(4);
            digits += 1;
            pos += 1;
        }
    }
    // "0x" alone reads as the decimal 0
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(pos), Some(b'p') | Some(b'P')) {
        let exp_str = &s[2 + pos + 1..];
        let exp_len = leading_exponent_len(exp_str);
        if exp_len > 0 {
            let exp = exp_str[..exp_len].parse::<i32>().unwrap_or(if exp_str.starts_with('-') {
                i32::MIN
            } else {
                i32::MAX
            });
            scale = scale.saturating_add(exp);
        }
    }

    Some(mantissa * 2f64.powi(scale))
}

/// Length of an optionally signed run of digits, or 0 when there are no digits
fn leading_exponent_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+') | Some(b'-')));
    let digits = bytes[sign..].iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        0
    } else {
        sign + digits
    }
}

fn parse_decimal(s: &str) -> f64 {
    let bytes = s.as_bytes();
    let mut end = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    let mut digits = end;

    if bytes.get(end) == Some(&b'.') {
        let frac = bytes[end + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
        digits += frac;
        if digits > 0 {
            end += 1 + frac;
        }
    }

    if digits == 0 {
        return 0.0;
    }

    // Exponent only counts if at least one digit follows it
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        end += match leading_exponent_len(&s[end + 1..]) {
            0 => 0,
            len => 1 + len,
        };
    }

    s[..end].parse().unwrap_or(0.0)
}
