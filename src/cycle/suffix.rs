//! Counter-suffix rules for loop identifiers.
//!
//! Identifiers conventionally end in a decimal run (`"batch_7"`). The
//! increment is a plain integer step, not zero-padded: `"run_09"` →
//! `"run_10"`, `"img009"` → `"img10"`.

/// Advance the trailing decimal run of `s` by one; append `"_2"` when
/// there is none. Runs that do not fit `u128` are carried digit-wise.
pub fn advance_counter(s: &str) -> String {
    let (prefix, digits) = split_trailing_digits(s);
    if digits.is_empty() {
        return format!("{s}_2");
    }
    match digits.parse::<u128>().ok().and_then(|n| n.checked_add(1)) {
        Some(next) => format!("{prefix}{next}"),
        None => format!("{prefix}{}", increment_decimal(digits)),
    }
}

/// Add one to a nonempty ASCII decimal string, rippling the carry.
fn increment_decimal(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    let mut i = bytes.len();
    loop {
        if i == 0 {
            bytes.insert(0, b'1');
            break;
        }
        i -= 1;
        if bytes[i] == b'9' {
            bytes[i] = b'0';
        } else {
            bytes[i] += 1;
            break;
        }
    }
    bytes.into_iter().map(char::from).collect()
}

/// Advancement used when an interrupt forks a loop: identifiers that
/// already carry an `_<digits>` branch suffix advance normally, anything
/// else starts a fresh `_2` branch (`"set1"` → `"set1_2"` → `"set1_3"`).
pub fn advance_branch(s: &str) -> String {
    let (prefix, digits) = split_trailing_digits(s);
    if !digits.is_empty() && prefix.ends_with('_') {
        advance_counter(s)
    } else {
        format!("{s}_2")
    }
}

/// Split `s` into `(prefix, trailing_digit_run)`; the run may be empty.
fn split_trailing_digits(s: &str) -> (&str, &str) {
    let start = s
        .rfind(|c: char| !c.is_ascii_digit())
        .map(|i| i + s[i..].chars().next().map_or(1, char::len_utf8))
        .unwrap_or(0);
    (&s[..start], &s[start..])
}
