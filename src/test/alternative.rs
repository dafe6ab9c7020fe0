use std::str::FromStr;

use crate::{Alternative, Cond, MapContext};

#[test]
fn equality_truth_table() {
    let alt = Alternative::new("f1", Cond::Equal, "v1").unwrap();

    let ctx = MapContext::new().with_value("f1", "v1");
    assert_eq!(alt.test(&ctx), None);

    let ctx = MapContext::new().with_value("f1", "v");
    assert_eq!(alt.test(&ctx).as_deref(), Some("f1: != v1"));
}

#[test]
fn missing_field_fails_unless_cond_is_bang() {
    let present = Alternative::new("f1", Cond::Equal, "v1").unwrap();
    assert_eq!(present.test(&()).as_deref(), Some("f1: is missing"));

    let missing = Alternative::new("f1", Cond::Missing, "").unwrap();
    assert_eq!(missing.test(&()), None);

    let ctx = MapContext::new().with_value("f1", "v1");
    assert_eq!(missing.test(&ctx).as_deref(), Some("f1: is present"));
}

#[test]
fn integer_comparison() {
    let less_than = Alternative::new("f1", Cond::LessThan, "1").unwrap();

    let ctx = MapContext::new().with_value("f1", "0");
    assert_eq!(less_than.test(&ctx), None);

    let ctx = MapContext::new().with_value("f1", "x");
    assert_eq!(less_than.test(&ctx).as_deref(), Some("f1: not an integer field"));

    let ctx = MapContext::new().with_value("f1", "5");
    assert_eq!(less_than.test(&ctx).as_deref(), Some("f1: >= 1"));
}

#[test]
fn comment_always_passes() {
    let comment = Alternative::new("anything", Cond::Comment, "ignored").unwrap();
    assert_eq!(comment.test(&()), None);
}

#[test]
fn unique_id_convention() {
    let alt = Alternative::new("", Cond::Equal, "7").unwrap();
    assert_eq!(alt.test(&()), None);

    let alt = Alternative::new("", Cond::Equal, "7-2").unwrap();
    assert_eq!(alt.test(&()).as_deref(), Some("id: unknown version 7-2"));
}

#[test]
fn predicate_context_is_invoked_instead_of_builtin_check() {
    let alt = Alternative::new("rate", Cond::Equal, "irrelevant").unwrap();
    let ctx = MapContext::new().with_predicate("rate", |_alt| Some("rate limited".to_owned()));
    assert_eq!(ctx_test(&alt, &ctx).as_deref(), Some("rate limited"));

    let ctx = MapContext::new().with_predicate("rate", |_alt| None);
    assert_eq!(ctx_test(&alt, &ctx), None);
}

fn ctx_test(alt: &Alternative, ctx: &MapContext) -> Option<String> {
    alt.test(ctx)
}

#[test]
fn field_with_punctuation_is_rejected() {
    assert!(Alternative::new("f-1", Cond::Equal, "v").is_err());
}

#[test]
fn escape_round_trips() {
    let alt = Alternative::new("f1", Cond::Equal, "a|b&c\\d").unwrap();
    assert_eq!(alt.encode(), "f1=a\\|b\\&c\\\\d");

    let (decoded, remainder) = Alternative::decode(alt.encode().as_bytes()).unwrap();
    assert!(remainder.is_empty());
    assert_eq!(decoded, alt);
}

#[test]
fn decode_stops_at_unescaped_pipe_or_ampersand() {
    let (first, rest) = Alternative::decode(b"f1=a|f2=b&rest").unwrap();
    assert_eq!(first.value(), "a");
    assert_eq!(rest, b"f2=b&rest".as_slice());

    let (second, rest) = Alternative::decode(rest).unwrap();
    assert_eq!(second.value(), "b");
    assert_eq!(rest, b"&rest".as_slice());
}

#[test]
fn from_str_is_lenient_and_unescaped() {
    let alt = Alternative::from_str(" f1 = v1 ").unwrap();
    assert_eq!(alt.field(), "f1");
    assert_eq!(alt.cond(), Cond::Equal);
    assert_eq!(alt.value(), "v1");
}

#[test]
fn invalid_operator_is_a_structural_error() {
    assert!(Alternative::decode(b"f1?value").is_err());
}
