//! SI unit handling: metric-prefix parsing and best-fit rendering of values.
//!
//! The entry points used by the measurement overlays are [`parse_si_unit`],
//! [`render_si`], [`inverse_unit`] and the label helper [`format_si`].

/// Significant digits shown in every calibrated label.
pub const LABEL_DIGITS: usize = 3;

/// A metric magnitude prefix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiPrefix {
    pub name: &'static str,
    /// Accepted spellings. The first one is used when rendering.
    pub symbols: &'static [&'static str],
    pub factor: f64,
}

impl SiPrefix {
    /// Symbol used when rendering a value with this prefix.
    pub fn symbol(&self) -> &'static str {
        self.symbols[0]
    }
}

/// All prefixes, ordered from the largest factor to the smallest.
pub const SI_PREFIXES: [SiPrefix; 17] = [
    SiPrefix { name: "yotta", symbols: &["Y"], factor: 1e24 },
    SiPrefix { name: "zetta", symbols: &["Z"], factor: 1e21 },
    SiPrefix { name: "exa", symbols: &["E"], factor: 1e18 },
    SiPrefix { name: "peta", symbols: &["P"], factor: 1e15 },
    SiPrefix { name: "tera", symbols: &["T"], factor: 1e12 },
    SiPrefix { name: "giga", symbols: &["G"], factor: 1e9 },
    SiPrefix { name: "mega", symbols: &["M"], factor: 1e6 },
    SiPrefix { name: "kilo", symbols: &["k"], factor: 1e3 },
    SiPrefix { name: "none", symbols: &[""], factor: 1.0 },
    SiPrefix { name: "milli", symbols: &["m"], factor: 1e-3 },
    SiPrefix { name: "micro", symbols: &["µ", "u"], factor: 1e-6 },
    SiPrefix { name: "nano", symbols: &["n"], factor: 1e-9 },
    SiPrefix { name: "pico", symbols: &["p"], factor: 1e-12 },
    SiPrefix { name: "femto", symbols: &["f"], factor: 1e-15 },
    SiPrefix { name: "atto", symbols: &["a"], factor: 1e-18 },
    SiPrefix { name: "zepto", symbols: &["z"], factor: 1e-21 },
    SiPrefix { name: "yocto", symbols: &["y"], factor: 1e-24 },
];

/// Units whose first letter looks like a prefix but is part of the unit.
/// Matched whole, before any prefix is stripped.
const WHOLE_UNITS: [&str; 10] = [
    "min", "mol", "mph", "mmHg", "Pa", "Torr", "Gy", "ft", "yd", "ppm",
];

/// Units that are never rendered with a metric prefix.
const UNPREFIXED_UNITS: [&str; 7] = ["min", "mph", "mmHg", "Torr", "ft", "yd", "ppm"];

fn takes_prefix(unit: &str) -> bool {
    !UNPREFIXED_UNITS.contains(&unit)
}

/// Unit pairs that are reciprocal by convention.
const INVERSE_UNITS: [(&str, &str); 1] = [("Hz", "s")];

/// Result of [`parse_si_unit`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedUnit {
    /// Multiplier of the prefix (1 when unprefixed).
    pub factor: f64,
    /// Prefix symbol exactly as it appeared in the input.
    pub prefix: &'static str,
    pub base_unit: String,
}

/// A value rescaled to a prefixed unit by [`render_si`].
#[derive(Debug, Clone, PartialEq)]
pub struct SiValue {
    pub value: f64,
    pub unit: String,
}

fn is_unit_token(s: &str) -> bool {
    !s.is_empty() && !s.chars().any(|c| c.is_ascii_digit() || c.is_whitespace())
}

/// Parse a unit string of the form `[prefix][ ]unit`.
///
/// ```
/// # use scopebox::data::si::parse_si_unit;
/// let khz = parse_si_unit("kHz").unwrap();
/// assert_eq!(khz.factor, 1000.0);
/// assert_eq!(khz.base_unit, "Hz");
/// assert!(parse_si_unit("9Hz").is_none());
/// ```
pub fn parse_si_unit(unit_string: &str) -> Option<ParsedUnit> {
    let trimmed = unit_string.trim();

    if WHOLE_UNITS.contains(&trimmed) {
        return Some(ParsedUnit {
            factor: 1.0,
            prefix: "",
            base_unit: trimmed.to_string(),
        });
    }

    for prefix in SI_PREFIXES.iter().filter(|p| p.factor != 1.0) {
        for symbol in prefix.symbols {
            let Some(rest) = trimmed.strip_prefix(symbol) else {
                continue;
            };
            let rest = rest.strip_prefix(' ').unwrap_or(rest);
            if is_unit_token(rest) {
                return Some(ParsedUnit {
                    factor: prefix.factor,
                    prefix: *symbol,
                    base_unit: rest.to_string(),
                });
            }
        }
    }

    // A lone prefix symbol ("m") is a unit in its own right.
    if is_unit_token(trimmed) {
        return Some(ParsedUnit {
            factor: 1.0,
            prefix: "",
            base_unit: trimmed.to_string(),
        });
    }

    None
}

/// Rescale `value` into the largest prefix that keeps the mantissa at or above 1.
///
/// The prefix is chosen from the magnitude; the sign is preserved. Zero and
/// non-finite values are returned unprefixed.
pub fn render_si(value: f64, unit: &str) -> SiValue {
    if value.is_finite() {
        let magnitude = value.abs();
        if let Some(prefix) = SI_PREFIXES.iter().find(|p| magnitude / p.factor >= 1.0) {
            return SiValue {
                value: value / prefix.factor,
                unit: format!("{}{}", prefix.symbol(), unit),
            };
        }
    }

    SiValue {
        value,
        unit: unit.to_string(),
    }
}

/// Unit of the reciprocal quantity, e.g. `s` for `Hz`.
///
/// ```
/// # use scopebox::data::si::inverse_unit;
/// assert_eq!(inverse_unit("s"), "Hz");
/// assert_eq!(inverse_unit("V"), "V^-1");
/// ```
pub fn inverse_unit(unit: &str) -> String {
    for (a, b) in INVERSE_UNITS {
        if unit == a {
            return b.to_string();
        }
        if unit == b {
            return a.to_string();
        }
    }
    format!("{unit}^-1")
}

/// Format `value` with `digits` significant digits.
///
/// Fixed notation is used while the decimal exponent lies in `-6..digits`,
/// scientific notation (`1.23e+25`) outside of it.
pub fn to_precision(value: f64, digits: usize) -> String {
    let digits = digits.max(1);
    if !value.is_finite() {
        return format!("{value}");
    }
    if value == 0.0 {
        return format!("{:.*}", digits - 1, 0.0_f64);
    }

    // LowerExp rounds to the requested digits first, so the exponent already
    // accounts for carries like 999.6 -> 1.00e3.
    let sci = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exponent < -6 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{}", mantissa, sign, exponent.abs())
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        format!("{:.*}", decimals, value)
    }
}

/// Render a calibrated measurement as `"<3 significant digits> <unit>"`.
///
/// A unit that parses is rescaled to its best-fitting prefix, except for
/// non-metric units such as `min` or `ft`. Anything else is appended
/// verbatim; an empty unit yields just the number.
///
/// ```
/// # use scopebox::data::si::format_si;
/// assert_eq!(format_si(1.0, "V"), "1.00 V");
/// assert_eq!(format_si(1500.0, "mV"), "1.50 V");
/// assert_eq!(format_si(42.0, ""), "42.0");
/// ```
pub fn format_si(value: f64, unit: &str) -> String {
    let (value, unit) = match parse_si_unit(unit) {
        Some(parsed) if !takes_prefix(&parsed.base_unit) => {
            (value * parsed.factor, parsed.base_unit)
        }
        Some(parsed) => {
            let rendered = render_si(value * parsed.factor, &parsed.base_unit);
            (rendered.value, rendered.unit)
        }
        None => (value, unit.trim().to_string()),
    };

    let number = to_precision(value, LABEL_DIGITS);
    if unit.is_empty() {
        number
    } else {
        format!("{number} {unit}")
    }
}
