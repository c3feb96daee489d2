//! Checksum predicates for fixed-format identifiers.
//!
//! Pure functions over pre-normalised input (whitespace removed, letters
//! upper-cased). They never raise; the string constraints pair them with a
//! structural regex and decide which error to report.

/// Length of the digit blocks folded into a running mod-97 remainder.
///
/// A two-digit remainder plus seven digits stays below `10^9`.
const MOD97_CHUNK: usize = 7;

/// Luhn check: every second digit from the right is doubled (minus 9 above
/// 9) and the digit sum must be a multiple of 10.
///
/// Any non-digit character fails the check.
///
/// # Examples
///
/// ```
/// use argvalid::checksum::luhn;
///
/// assert!(luhn("4539148803436467"));
/// assert!(!luhn("4539148803436468"));
/// ```
#[must_use]
pub fn luhn(digits: &str) -> bool {
    let mut sum = 0u32;
    for (i, c) in digits.chars().rev().enumerate() {
        let Some(mut digit) = c.to_digit(10) else {
            return false;
        };
        if i % 2 == 1 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
    }
    sum % 10 == 0
}

/// IBAN check (ISO 13616 MOD 97-10).
///
/// The first four characters move to the end, letters expand to `10..=35`,
/// and the resulting numeral must leave a remainder of 1 modulo 97.
///
/// # Examples
///
/// ```
/// use argvalid::checksum::iban;
///
/// assert!(iban("FR1420041010050500013M02606"));
/// assert!(!iban("FR1520041010050500013M02606"));
/// ```
#[must_use]
pub fn iban(normalized: &str) -> bool {
    if normalized.len() < 4 || !normalized.is_ascii() {
        return false;
    }
    let (head, tail) = normalized.split_at(4);

    let mut numeral = String::with_capacity(normalized.len() * 2);
    for c in tail.chars().chain(head.chars()) {
        if c.is_ascii_digit() {
            numeral.push(c);
        } else if c.is_ascii_uppercase() {
            numeral.push_str(&(u32::from(c) - 55).to_string());
        } else {
            return false;
        }
    }

    mod97(&numeral) == Some(1)
}

/// French social-security number (NIR) key check.
///
/// `nir` is the 13-character body followed by the 2-digit key. Corsican
/// departments `2A` and `2B` count as `19` and `18` for the computation.
/// The expected key is `97 - body mod 97`.
///
/// # Examples
///
/// ```
/// use argvalid::checksum::nir;
///
/// assert!(nir("185057800604830"));
/// assert!(nir("185052A00604871"));
/// assert!(!nir("185057800604831"));
/// ```
#[must_use]
pub fn nir(normalized: &str) -> bool {
    if normalized.len() < 3 || !normalized.is_ascii() {
        return false;
    }
    let (body, key) = normalized.split_at(normalized.len() - 2);
    let Ok(key) = key.parse::<u64>() else {
        return false;
    };

    let body = match body.get(5..7) {
        Some("2A") => format!("{}19{}", &body[..5], &body[7..]),
        Some("2B") => format!("{}18{}", &body[..5], &body[7..]),
        _ => body.to_owned(),
    };

    match mod97(&body) {
        Some(0) => key == 97,
        Some(rem) => key == 97 - rem,
        None => false,
    }
}

/// Remainder of a decimal numeral modulo 97, folded in 7-digit chunks.
///
/// Returns `None` on an empty or non-decimal numeral.
fn mod97(numeral: &str) -> Option<u64> {
    if numeral.is_empty() || !numeral.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut remainder = 0u64;
    for chunk in numeral.as_bytes().chunks(MOD97_CHUNK) {
        for &b in chunk {
            remainder = remainder * 10 + u64::from(b - b'0');
        }
        remainder %= 97;
    }
    Some(remainder)
}
