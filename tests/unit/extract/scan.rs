use super::*;

const PLAIN: NumberGrammar = NumberGrammar {
    allow_exponent: false,
};
const EXP: NumberGrammar = NumberGrammar {
    allow_exponent: true,
};

fn values<const N: usize>(input: &str, g: NumberGrammar) -> Vec<[f64; N]> {
    scan_tuples::<N>(input, g)
        .into_iter()
        .map(|m| m.values)
        .collect()
}

#[test]
fn pairs_are_found_left_to_right() {
    assert_eq!(
        values::<2>("a (1.0,2.0) b (3.5, -4.25) c", PLAIN),
        vec![[1.0, 2.0], [3.5, -4.25]]
    );
}

#[test]
fn triple_is_not_seen_by_pair_scan() {
    let s = "(0.5, 0.2, 0.1) (1.0, 2.0)";
    assert_eq!(values::<2>(s, PLAIN), vec![[1.0, 2.0]]);
    assert_eq!(values::<3>(s, PLAIN), vec![[0.5, 0.2, 0.1]]);
}

#[test]
fn pair_is_not_seen_by_triple_scan() {
    assert!(values::<3>("(1.0, 2.0)", PLAIN).is_empty());
}

#[test]
fn separators_allow_single_spaces_only() {
    assert_eq!(values::<2>("(1.0 , 2.0)", PLAIN), vec![[1.0, 2.0]]);
    assert!(values::<2>("(1.0,  2.0)", PLAIN).is_empty());
    assert!(values::<2>("( 1.0, 2.0)", PLAIN).is_empty());
    assert!(values::<2>("(1.0, 2.0 )", PLAIN).is_empty());
}

#[test]
fn decimal_point_is_mandatory() {
    assert!(values::<2>("(1, 2)", PLAIN).is_empty());
    assert!(values::<2>("(1.0, 2)", PLAIN).is_empty());
    assert_eq!(values::<2>("(1., .5)", PLAIN), vec![[1.0, 0.5]]);
    assert_eq!(values::<2>("(+1.0, -.5)", PLAIN), vec![[1.0, -0.5]]);
}

#[test]
fn bare_point_is_not_a_number() {
    assert!(values::<2>("(., 1.0)", PLAIN).is_empty());
    assert!(values::<2>("(-., 1.0)", PLAIN).is_empty());
    assert!(values::<3>("(0.1, +., 0.3)", PLAIN).is_empty());
}

#[test]
fn malformed_tuple_does_not_hide_later_ones() {
    assert_eq!(
        values::<2>("((1.0, x) (2.0, 3.0)", PLAIN),
        vec![[2.0, 3.0]]
    );
    assert_eq!(values::<2>("((4.0, 5.0)", PLAIN), vec![[4.0, 5.0]]);
}

#[test]
fn exponent_requires_opt_in() {
    assert!(values::<2>("(1.5e2, 2.0)", PLAIN).is_empty());
    assert_eq!(values::<2>("(1.5e2, 2.0E-1)", EXP), vec![[150.0, 0.2]]);
    assert!(values::<2>("(1.5e, 2.0)", EXP).is_empty());
    // The mantissa still needs its decimal point.
    assert!(values::<2>("(15e1, 2.0)", EXP).is_empty());
}

#[test]
fn overflowing_literal_is_rejected() {
    assert!(values::<2>("(1.0e999, 2.0)", EXP).is_empty());
}

#[test]
fn first_tuple_reports_span() {
    let s = "color (0.1,0.2,0.3) then (0.4,0.5,0.6)";
    let m = first_tuple::<3>(s, PLAIN).unwrap();
    assert_eq!(m.values, [0.1, 0.2, 0.3]);
    assert_eq!(&s[m.span.start..m.span.end], "(0.1,0.2,0.3)");
}

#[test]
fn unicode_text_around_tuples_is_tolerated() {
    assert_eq!(
        values::<2>("pétalo → (1.0,2.0) ñ", PLAIN),
        vec![[1.0, 2.0]]
    );
}
