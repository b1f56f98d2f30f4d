/// Numeric scalar shared by input and output trees.
///
/// Equality is numeric across variants: `1i64`, `1u64` and `1.0` compare
/// equal, so set deduplication and default comparison treat them as the
/// same value. `NaN` never equals anything, including itself.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::I64(i) => i as f64,
            Number::U64(u) => u as f64,
            Number::F64(f) => f,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        use Number::*;
        match (*self, *other) {
            (I64(a), I64(b)) => a == b,
            (U64(a), U64(b)) => a == b,
            (I64(a), U64(b)) | (U64(b), I64(a)) => a as i128 == b as i128,
            (F64(a), F64(b)) => a == b,
            (F64(f), other) | (other, F64(f)) => f == other.as_f64(),
        }
    }
}

impl core::fmt::Display for Number {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Number::I64(i) => write!(f, "{}", i),
            Number::U64(u) => write!(f, "{}", u),
            Number::F64(num) => f.write_str(&format_canonical_f64(*num)),
        }
    }
}

/// Format a finite f64 in canonical decimal form.
/// Requirements:
/// - no exponent notation
/// - no trailing fractional zeros (strip decimal point if none remains)
/// - no leading zeros except a single zero before the decimal point
/// - -0 normalized to 0
pub(crate) fn format_canonical_f64(value: f64) -> String {
    if !value.is_finite() {
        debug_assert!(false, "format_canonical_f64 called with non-finite value");
        return String::from("null");
    }
    if value == 0.0 {
        return String::from("0");
    }

    let mut sign_prefix = "";
    let mut magnitude = value;
    if magnitude < 0.0 {
        sign_prefix = "-";
        magnitude = -magnitude;
    }

    let mut buf = ryu::Buffer::new();
    let raw = buf.format_finite(magnitude);
    let body = if let Some(exp_index) = raw.find(['e', 'E']) {
        let mantissa = &raw[..exp_index];
        let exp: i32 = raw[exp_index + 1..].parse().unwrap_or(0);
        expand_exponent(mantissa, exp)
    } else {
        String::from(raw)
    };
    let trimmed = trim_fraction(body);
    if trimmed == "0" {
        return String::from("0");
    }
    if sign_prefix.is_empty() {
        trimmed
    } else {
        let mut out = String::with_capacity(sign_prefix.len() + trimmed.len());
        out.push('-');
        out.push_str(&trimmed);
        out
    }
}

fn expand_exponent(mantissa: &str, exp: i32) -> String {
    let mut digits = Vec::with_capacity(mantissa.len());
    let mut point_index = mantissa.len();
    for &b in mantissa.as_bytes() {
        if b == b'.' {
            point_index = digits.len();
        } else {
            digits.push(b);
        }
    }
    if point_index == mantissa.len() {
        point_index = digits.len();
    }

    if exp >= 0 {
        let target = point_index as i32 + exp;
        if target >= digits.len() as i32 {
            let mut result = String::with_capacity(target as usize);
            for &d in &digits {
                result.push(d as char);
            }
            let zeros = (target as usize).saturating_sub(digits.len());
            for _ in 0..zeros {
                result.push('0');
            }
            result
        } else {
            let split = target as usize;
            let mut result = String::with_capacity(digits.len() + 1);
            for (idx, &d) in digits.iter().enumerate() {
                if idx == split {
                    result.push('.');
                }
                result.push(d as char);
            }
            result
        }
    } else {
        let shift = (-exp) as usize;
        if shift >= point_index {
            let zeros = shift - point_index;
            let mut result = String::with_capacity(digits.len() + zeros + 2);
            result.push_str("0.");
            for _ in 0..zeros {
                result.push('0');
            }
            for &d in &digits {
                result.push(d as char);
            }
            result
        } else {
            let split = point_index - shift;
            let mut result = String::with_capacity(digits.len() + 1);
            for (idx, &d) in digits.iter().enumerate() {
                if idx == split {
                    result.push('.');
                }
                result.push(d as char);
            }
            result
        }
    }
}

fn trim_fraction(mut s: String) -> String {
    if let Some(dot_pos) = s.find('.') {
        let mut end = s.len();
        while end > dot_pos + 1 && s.as_bytes()[end - 1] == b'0' {
            end -= 1;
        }
        if end > dot_pos && s.as_bytes()[end - 1] == b'.' {
            end -= 1;
        }
        s.truncate(end);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_variant_equality() {
        assert_eq!(Number::I64(1), Number::U64(1));
        assert_eq!(Number::I64(1), Number::F64(1.0));
        assert_eq!(Number::U64(2), Number::F64(2.0));
        assert_ne!(Number::I64(-1), Number::U64(u64::MAX));
        assert_ne!(Number::F64(f64::NAN), Number::F64(f64::NAN));
    }

    #[test]
    fn canonical_float_text() {
        assert_eq!(Number::F64(1.5).to_string(), "1.5");
        assert_eq!(Number::F64(-0.0).to_string(), "0");
        assert_eq!(Number::F64(1e3).to_string(), "1000");
        assert_eq!(Number::F64(1e-4).to_string(), "0.0001");
    }
}
