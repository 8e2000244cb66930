//! Punycode ([RFC 3492](https://datatracker.ietf.org/doc/html/rfc3492)) for a single label.
//!
//! Works on one DNS label, never on a whole hostname; see [`crate::idn`]
//! for splitting and the `xn--` prefix.

use crate::constants::{MAX_ACE_LENGTH, MAX_LABEL_LENGTH};
use crate::error::PunycodeError;

const BASE: u32 = 36;
const T_MIN: u32 = 1;
const T_MAX: u32 = 26;
const SKEW: u32 = 38;
const DAMP: u32 = 700;
const INITIAL_BIAS: u32 = 72;
const INITIAL_N: u32 = 0x80;
const DELIMITER: char = '-';

/// Largest value the accumulators may hold (`i32::MAX`).
const MAX_INT: u32 = 0x7FFF_FFFF;

const DIGITS: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Transcoder state for one encode or decode call.
struct State {
    /// Current code point threshold
    n: u32,
    /// Accumulated delta (the decoder's `i`)
    delta: u32,
    /// Adaptive bias
    bias: u32,
}

impl State {
    const fn new() -> Self {
        Self {
            n: INITIAL_N,
            delta: 0,
            bias: INITIAL_BIAS,
        }
    }

    const fn threshold(&self, k: u32) -> u32 {
        if k <= self.bias {
            T_MIN
        } else if k >= self.bias + T_MAX {
            T_MAX
        } else {
            k - self.bias
        }
    }
}

/// Bias adaptation function (RFC 3492 §6.1).
pub(crate) const fn adapt(mut delta: u32, num_points: u32, first_time: bool) -> u32 {
    delta = if first_time { delta / DAMP } else { delta >> 1 };
    delta += delta / num_points;
    let mut k = 0;
    while delta > ((BASE - T_MIN) * T_MAX) >> 1 {
        delta /= BASE - T_MIN;
        k += BASE;
    }
    k + (BASE - T_MIN + 1) * delta / (delta + SKEW)
}

/// Maps a digit in `0..BASE` to `a-z` or `0-9`.
fn encode_digit(digit: u32) -> char {
    char::from(DIGITS[digit as usize])
}

const fn decode_digit(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(c as u32 - '0' as u32 + 26),
        'A'..='Z' => Some(c as u32 - 'A' as u32),
        'a'..='z' => Some(c as u32 - 'a' as u32),
        _ => None,
    }
}

fn checked_increment(value: u32) -> Result<u32, PunycodeError> {
    value
        .checked_add(1)
        .filter(|v| *v <= MAX_INT)
        .ok_or(PunycodeError::Overflow)
}

/// Encodes a Unicode label as Punycode (without the `xn--` prefix).
///
/// # Errors
///
/// Returns [`PunycodeError`] if the label exceeds 256 code points, the
/// encoded form exceeds 256 characters, or the arithmetic overflows.
///
/// # Examples
///
/// ```
/// use uri_idn::punycode;
///
/// assert_eq!(punycode::encode("bücher").unwrap(), "bcher-kva");
/// assert_eq!(punycode::encode("äöü").unwrap(), "4ca0bs");
/// ```
pub fn encode(label: &str) -> Result<String, PunycodeError> {
    let code_points: Vec<u32> = label.chars().map(u32::from).collect();
    if code_points.len() > MAX_LABEL_LENGTH {
        return Err(PunycodeError::LengthExceeded {
            max: MAX_LABEL_LENGTH,
            actual: code_points.len(),
        });
    }

    let mut output: String = label.chars().filter(char::is_ascii).collect();
    let basic = u32::try_from(output.len()).map_err(|_| PunycodeError::Overflow)?;
    let total = u32::try_from(code_points.len()).map_err(|_| PunycodeError::Overflow)?;
    if basic > 0 {
        output.push(DELIMITER);
    }

    let mut state = State::new();
    let mut handled = basic;

    while handled < total {
        let m = code_points
            .iter()
            .copied()
            .filter(|&c| c >= state.n)
            .min()
            .ok_or(PunycodeError::MalformedInput {
                reason: "no code point left to encode",
            })?;

        if m - state.n > (MAX_INT - state.delta) / (handled + 1) {
            return Err(PunycodeError::Overflow);
        }
        state.delta += (m - state.n) * (handled + 1);
        state.n = m;

        for &c in &code_points {
            if c < state.n {
                state.delta = checked_increment(state.delta)?;
            }
            if c == state.n {
                let mut q = state.delta;
                let mut k = BASE;
                loop {
                    let t = state.threshold(k);
                    if q < t {
                        break;
                    }
                    output.push(encode_digit(t + (q - t) % (BASE - t)));
                    q = (q - t) / (BASE - t);
                    k += BASE;
                }
                output.push(encode_digit(q));
                state.bias = adapt(state.delta, handled + 1, handled == basic);
                state.delta = 0;
                handled += 1;
            }
        }

        state.delta = checked_increment(state.delta)?;
        state.n = checked_increment(state.n)?;
    }

    if output.len() > MAX_ACE_LENGTH {
        return Err(PunycodeError::LengthExceeded {
            max: MAX_ACE_LENGTH,
            actual: output.len(),
        });
    }
    if let Some(c) = output.chars().find(|c| !c.is_ascii()) {
        return Err(PunycodeError::InvalidOutput { char: c });
    }

    Ok(output)
}

/// Decodes a Punycode label (without the `xn--` prefix) to Unicode.
///
/// The case of basic characters is preserved.
///
/// # Errors
///
/// Returns [`PunycodeError`] if the input contains non-ASCII characters
/// before the last delimiter, an invalid digit, a truncated integer, an
/// invalid code point, exceeds the length limits, or overflows.
///
/// # Examples
///
/// ```
/// use uri_idn::punycode;
///
/// assert_eq!(punycode::decode("bcher-kva").unwrap(), "bücher");
/// assert!(punycode::decode("bcher-kv!").is_err());
/// ```
pub fn decode(input: &str) -> Result<String, PunycodeError> {
    let length = input.chars().count();
    if length > MAX_ACE_LENGTH {
        return Err(PunycodeError::LengthExceeded {
            max: MAX_ACE_LENGTH,
            actual: length,
        });
    }

    let (basic, extended) = match input.rfind(DELIMITER) {
        Some(pos) if pos > 0 => (&input[..pos], &input[pos + 1..]),
        _ => ("", input),
    };
    if !basic.is_ascii() {
        return Err(PunycodeError::MalformedInput {
            reason: "non-basic code point before delimiter",
        });
    }

    let mut output: Vec<char> = basic.chars().collect();
    let mut state = State::new();
    let mut digits = extended.chars().peekable();
    let mut first = true;

    while digits.peek().is_some() {
        let old_delta = state.delta;
        let mut weight = 1;
        let mut k = BASE;
        loop {
            let c = digits.next().ok_or(PunycodeError::MalformedInput {
                reason: "truncated variable-length integer",
            })?;
            let digit = decode_digit(c).ok_or(PunycodeError::MalformedInput {
                reason: "invalid digit",
            })?;
            if digit > (MAX_INT - state.delta) / weight {
                return Err(PunycodeError::Overflow);
            }
            state.delta += digit * weight;
            let t = state.threshold(k);
            if digit < t {
                break;
            }
            if weight > MAX_INT / (BASE - t) {
                return Err(PunycodeError::Overflow);
            }
            weight *= BASE - t;
            k += BASE;
        }

        let points = u32::try_from(output.len() + 1).map_err(|_| PunycodeError::Overflow)?;
        state.bias = adapt(state.delta - old_delta, points, first);
        first = false;

        if state.delta / points > MAX_INT - state.n {
            return Err(PunycodeError::Overflow);
        }
        state.n += state.delta / points;
        state.delta %= points;

        let c = char::from_u32(state.n)
            .filter(|c| !c.is_ascii())
            .ok_or(PunycodeError::MalformedInput {
                reason: "decoded value is not a valid non-basic code point",
            })?;
        if output.len() >= MAX_LABEL_LENGTH {
            return Err(PunycodeError::LengthExceeded {
                max: MAX_LABEL_LENGTH,
                actual: output.len() + 1,
            });
        }
        output.insert(state.delta as usize, c);
        state.delta += 1;
    }

    Ok(output.into_iter().collect())
}
