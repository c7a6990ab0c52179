//! Byte-level scanner for parenthesized numeric tuples such as `(0.5, 0.2, 0.1)`.
//!
//! Grammar (one tuple of arity `N`):
//!
//! ```text
//! tuple  := '(' number ( ' '? ',' ' '? number ){N-1} ')'
//! number := [+-]? digit* '.' digit* exponent?      (at least one digit overall)
//! exponent := [eE] [+-]? digit+                    (only with `allow_exponent`)
//! ```
//!
//! A tuple must close immediately after its `N`-th number, so a 3-tuple is never reported by a
//! 2-tuple scan and vice versa.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) start: usize,
    pub(crate) end: usize,
}

/// Number syntax accepted inside tuples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct NumberGrammar {
    pub(crate) allow_exponent: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TupleMatch<const N: usize> {
    pub(crate) values: [f64; N],
    pub(crate) span: Span,
}

/// Find every non-overlapping `N`-tuple in `input`, left to right.
pub(crate) fn scan_tuples<const N: usize>(
    input: &str,
    grammar: NumberGrammar,
) -> Vec<TupleMatch<N>> {
    let bytes = input.as_bytes();
    let mut out = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        if bytes[i] == b'('
            && let Some((values, end)) = tuple_at::<N>(input, i, grammar)
        {
            out.push(TupleMatch {
                values,
                span: Span { start: i, end },
            });
            i = end;
            continue;
        }
        i += 1;
    }

    out
}

/// First `N`-tuple in `input`, if any.
pub(crate) fn first_tuple<const N: usize>(
    input: &str,
    grammar: NumberGrammar,
) -> Option<TupleMatch<N>> {
    let bytes = input.as_bytes();
    (0..bytes.len())
        .filter(|&i| bytes[i] == b'(')
        .find_map(|i| {
            tuple_at::<N>(input, i, grammar).map(|(values, end)| TupleMatch {
                values,
                span: Span { start: i, end },
            })
        })
}

// `start` points at '('. Returns the parsed values and the byte offset just past ')'.
fn tuple_at<const N: usize>(
    input: &str,
    start: usize,
    grammar: NumberGrammar,
) -> Option<([f64; N], usize)> {
    let bytes = input.as_bytes();
    let mut i = start + 1;
    let mut values = [0.0f64; N];

    for (k, slot) in values.iter_mut().enumerate() {
        if k > 0 {
            i = separator_end(bytes, i)?;
        }
        let (v, end) = number_at(input, i, grammar)?;
        *slot = v;
        i = end;
    }

    (bytes.get(i) == Some(&b')')).then_some((values, i + 1))
}

fn separator_end(bytes: &[u8], mut i: usize) -> Option<usize> {
    if bytes.get(i) == Some(&b' ') {
        i += 1;
    }
    if bytes.get(i) != Some(&b',') {
        return None;
    }
    i += 1;
    if bytes.get(i) == Some(&b' ') {
        i += 1;
    }
    Some(i)
}

fn number_at(input: &str, start: usize, grammar: NumberGrammar) -> Option<(f64, usize)> {
    let bytes = input.as_bytes();
    let is_digit = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_digit);
    let mut i = start;

    if matches!(bytes.get(i), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while is_digit(i) {
        i += 1;
    }
    let int_digits = i - int_start;

    // The decimal point is mandatory.
    if bytes.get(i) != Some(&b'.') {
        return None;
    }
    i += 1;

    let frac_start = i;
    while is_digit(i) {
        i += 1;
    }
    if int_digits == 0 && i == frac_start {
        return None;
    }

    if grammar.allow_exponent && matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_start = j;
        while is_digit(j) {
            j += 1;
        }
        if j == exp_start {
            return None;
        }
        i = j;
    }

    let v: f64 = input[start..i].parse().ok()?;
    v.is_finite().then_some((v, i))
}

#[cfg(test)]
#[path = "../../tests/unit/extract/scan.rs"]
mod tests;
