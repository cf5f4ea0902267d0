//! Roman numeral parsing for generation tags.
//!
//! The provider names generations `generation-i` through `generation-ix`.
//! Only canonical numerals are accepted: `IIII` or `VX` are rejected rather
//! than guessed at.

/// A numeral or generation tag that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized numeral in {tag:?}")]
pub struct NumeralError {
    /// The offending input.
    pub tag: String,
}

/// Largest value with a canonical numeral.
const MAX_NUMERAL: u32 = 3999;

/// Numeral symbols in descending weight, including subtractive pairs.
const SYMBOLS: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Render `value` as an uppercase canonical numeral.
///
/// Returns an empty string for zero.
pub fn to_numeral(value: u32) -> String {
    let mut remaining = value;
    let mut out = String::new();
    for (weight, symbol) in SYMBOLS {
        while remaining >= weight {
            out.push_str(symbol);
            remaining = remaining.saturating_sub(weight);
        }
    }
    out
}

/// Parse a canonical numeral (case-insensitive) into its value.
pub fn parse_numeral(text: &str) -> Result<u32, NumeralError> {
    let upper = text.to_ascii_uppercase();
    let mut rest = upper.as_str();
    let mut value: u32 = 0;

    for (weight, symbol) in SYMBOLS {
        while let Some(stripped) = rest.strip_prefix(symbol) {
            value = value.saturating_add(weight);
            rest = stripped;
        }
    }

    // Greedy parsing accepts "IIII"; re-rendering rejects anything non-canonical.
    if rest.is_empty() && (1..=MAX_NUMERAL).contains(&value) && to_numeral(value) == upper {
        Ok(value)
    } else {
        Err(NumeralError {
            tag: text.to_owned(),
        })
    }
}

/// Parse a `generation-<numeral>` tag into a generation number.
pub fn parse_generation_tag(tag: &str) -> Result<u32, NumeralError> {
    let numeral = tag.rsplit('-').next().unwrap_or_default();
    parse_numeral(numeral).ok().ok_or_else(|| NumeralError {
        tag: tag.to_owned(),
    })
}
