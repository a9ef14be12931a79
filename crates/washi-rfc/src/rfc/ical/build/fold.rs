//! Content line folding (RFC 5545 §3.1).

/// Maximum line length in octets (not including CRLF).
const MAX_LINE_OCTETS: usize = 75;

/// Folds a content line to comply with the 75-octet limit.
///
/// Lines are folded by inserting CRLF followed by a single space. Splits
/// only happen at UTF-8 character boundaries, never inside a multi-byte
/// sequence.
#[must_use]
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return format!("{line}\r\n");
    }

    let mut result = String::with_capacity(line.len() + (line.len() / MAX_LINE_OCTETS) * 3);
    let mut rest = line;
    let mut first_line = true;

    while !rest.is_empty() {
        // Continuation lines lose one octet to the leading space.
        let budget = if first_line {
            MAX_LINE_OCTETS
        } else {
            MAX_LINE_OCTETS - 1
        };

        if !first_line {
            result.push(' ');
        }

        if rest.len() <= budget {
            result.push_str(rest);
            result.push_str("\r\n");
            break;
        }

        let mut end = budget;
        while end > 0 && !rest.is_char_boundary(end) {
            end -= 1;
        }
        if end == 0 {
            // A single character wider than the budget; emit it whole.
            end = rest
                .char_indices()
                .nth(1)
                .map_or(rest.len(), |(i, _)| i);
        }

        result.push_str(&rest[..end]);
        result.push_str("\r\n");
        rest = &rest[end..];
        first_line = false;
    }

    result
}
