//! Exact rational arithmetic used throughout the solver, splitter, and
//! scheduler. Floating point is only permitted at the rendering boundary.

use num_rational::Ratio;

/// The rational type used for every rate, throughput, and amount in the
/// pipeline. `i64` numerator/denominator is ample headroom for belt
/// throughputs and recipe ratios; the calculator never needs arbitrary
/// precision, only exactness.
pub type Rat = Ratio<i64>;

/// Build a [`Rat`] from an integer.
#[inline]
pub fn rat(n: i64) -> Rat {
    Rat::from_integer(n)
}

/// Build a [`Rat`] from a numerator/denominator pair.
#[inline]
pub fn ratio(num: i64, den: i64) -> Rat {
    Rat::new(num, den)
}

/// Parse a decimal or `a/b` literal as found in the recipe database grammar
/// (`SPEED[/DIVISOR]`, amounts, module effects). Accepts an optional leading
/// `-` sign, a `NUM/DEN` form, or a plain decimal with up to one `.`.
pub fn parse_rat(s: &str) -> Option<Rat> {
    let s = s.trim();
    if let Some((num, den)) = s.split_once('/') {
        let num = parse_decimal(num)?;
        let den = parse_decimal(den)?;
        if den == Rat::from_integer(0) {
            return None;
        }
        return Some(num / den);
    }
    parse_decimal(s)
}

fn parse_decimal(s: &str) -> Option<Rat> {
    let s = s.trim();
    let (sign, s) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s),
    };
    let value = if let Some((int_part, frac_part)) = s.split_once('.') {
        let int_part = if int_part.is_empty() { 0 } else { int_part.parse::<i64>().ok()? };
        if frac_part.is_empty() {
            Rat::from_integer(int_part)
        } else {
            let frac_digits = frac_part.len() as u32;
            let frac_val: i64 = frac_part.parse().ok()?;
            let scale = 10i64.checked_pow(frac_digits)?;
            Rat::from_integer(int_part) + Ratio::new(frac_val, scale)
        }
    } else {
        Rat::from_integer(s.parse::<i64>().ok()?)
    };
    Some(Rat::from_integer(sign) * value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_integers() {
        assert_eq!(parse_rat("40"), Some(rat(40)));
        assert_eq!(parse_rat("-3"), Some(rat(-3)));
    }

    #[test]
    fn parses_decimals() {
        assert_eq!(parse_rat("1.25"), Some(ratio(5, 4)));
        assert_eq!(parse_rat("-.15"), Some(ratio(-15, 100)));
        assert_eq!(parse_rat(".5"), Some(ratio(1, 2)));
    }

    #[test]
    fn parses_divisor_form() {
        assert_eq!(parse_rat("1.25/5"), Some(ratio(5, 4) / rat(5)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_rat("abc"), None);
        assert_eq!(parse_rat(""), None);
    }

    #[test]
    fn exactness_of_repeated_addition() {
        let third = ratio(1, 3);
        let sum = third + third + third;
        assert_eq!(sum, rat(1));
    }
}
