/// Parse an ISO 8601 duration designator string (e.g. `PT1H2M30S`) into
/// whole seconds.
///
/// Covers the designators YouTube emits: weeks, days, hours, minutes and
/// seconds, in canonical order, with an optional fraction on the seconds
/// value (truncated toward zero). Year and month designators, repeated or
/// out-of-order designators, a bare `P` or `PT`, and negative values are all
/// malformed. Malformed input is an unknown length, never an error: `None`.
pub fn parse_duration(raw: &str) -> Option<u64> {
    let rest = raw.strip_prefix('P')?;
    if rest.is_empty() {
        return None;
    }

    let (date_part, time_part) = match rest.split_once('T') {
        // a trailing T with no time components is malformed
        Some((_, "")) => return None,
        Some((date, time)) => (date, time),
        None => (rest, ""),
    };

    let date = parse_components(date_part, &[('W', 604_800), ('D', 86_400)], false)?;
    let time = parse_components(time_part, &[('H', 3_600), ('M', 60), ('S', 1)], true)?;
    date.checked_add(time)
}

/// Sum one side of the duration. Designators must appear in the given order,
/// each at most once, each preceded by a value. A fraction is accepted only
/// on the seconds designator.
fn parse_components(
    part: &str,
    designators: &[(char, u64)],
    fraction_on_seconds: bool,
) -> Option<u64> {
    let mut total: u64 = 0;
    let mut remaining = designators;
    let mut value: u64 = 0;
    let mut has_digits = false;
    let mut in_fraction = false;

    for ch in part.chars() {
        if let Some(digit) = ch.to_digit(10) {
            if in_fraction {
                continue; // fractional digits truncate away
            }
            value = value.checked_mul(10)?.checked_add(u64::from(digit))?;
            has_digits = true;
        } else if ch == '.' || ch == ',' {
            if in_fraction || !has_digits {
                return None;
            }
            in_fraction = true;
        } else {
            let idx = remaining.iter().position(|&(d, _)| d == ch)?;
            let (_, unit) = remaining[idx];
            if !has_digits {
                return None;
            }
            if in_fraction && !(fraction_on_seconds && unit == 1) {
                return None;
            }
            total = total.checked_add(value.checked_mul(unit)?)?;
            remaining = &remaining[idx + 1..];
            value = 0;
            has_digits = false;
            in_fraction = false;
        }
    }

    // trailing digits or a dangling fraction never reached a designator
    if has_digits || in_fraction {
        return None;
    }
    Some(total)
}
