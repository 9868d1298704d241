//! Behavioural tests for merging record values.
//!
//! Covers the empty merge, single and disjoint sources, last-writer-wins on
//! name collisions, tag preservation and visibility filtering.

mod common;

use std::collections::BTreeMap;
use std::rc::Rc;

use anyhow::{Result, ensure};
use anystruct::{FieldType, Record, Reflect, field, merge, merge_iter, of, tag};
use common::{A, A2, B, C, D, E};
use rstest::rstest;
use serde_json::{Value, json};

/// Fields whose declared types are not scalars.
#[derive(Reflect)]
struct Profile {
    pub roles: Vec<String>,
    pub nick: Option<String>,
    pub scores: BTreeMap<String, u8>,
    pub extra: Value,
}

#[rstest]
fn empty_merge_equals_empty_of() {
    let merged = merge(&[]);
    assert!(merged.is_empty());
    assert_eq!(merged, of([]));
    assert_eq!(merged, Record::empty());
}

#[rstest]
fn single_source_matches_single_descriptor() -> Result<()> {
    ensure!(
        merge(&[&A { n: 100 }]) == of([field("n", 100, [])?]),
        "single field record differs"
    );
    Ok(())
}

#[rstest]
#[case::a_then_b(true)]
#[case::b_then_a(false)]
fn disjoint_sources_sort_by_name(#[case] a_first: bool) -> Result<()> {
    let a = A { n: 100 };
    let b = B { s: "test".into() };
    let merged = if a_first {
        merge(&[&a, &b])
    } else {
        merge(&[&b, &a])
    };
    let expected = of([field("n", 100, [])?, field("s", "test", [])?]);
    ensure!(merged == expected, "unexpected record {merged}");
    let names: Vec<_> = merged.names().collect();
    ensure!(names == ["n", "s"], "unexpected order {names:?}");
    Ok(())
}

#[rstest]
fn later_source_wins_entirely() -> Result<()> {
    let merged = merge(&[&A { n: 1 }, &A2 { n: "two".into() }]);
    ensure!(merged.get("n") == Some(&json!("two")), "value not replaced");
    ensure!(
        merged.field_type("n") == Some(&FieldType::String),
        "type not replaced"
    );
    ensure!(merged.tag("n") == Some("db:\"n\""), "tag not replaced");

    let reversed = merge(&[&A2 { n: "two".into() }, &A { n: 1 }]);
    ensure!(reversed.get("n") == Some(&json!(1)), "order ignored");
    ensure!(reversed.tag("n").is_none(), "stale tag kept");
    Ok(())
}

#[rstest]
fn tags_are_preserved() -> Result<()> {
    let merged = merge(&[&C { n: 100 }, &D { s: "test".into() }]);
    let expected = of([
        field("n", 100, [tag("json:\"n\"")])?,
        field("s", "test", [tag("json:\"s\"")])?,
    ]);
    ensure!(merged == expected, "unexpected record {merged}");
    Ok(())
}

#[rstest]
fn private_fields_are_excluded() -> Result<()> {
    let hidden = E::new(100);
    ensure!(hidden.n() == 100, "fixture mismatch");
    let merged = merge(&[&hidden, &B { s: "test".into() }]);
    ensure!(
        merged == of([field("s", "test", [])?]),
        "unexpected record {merged}"
    );
    ensure!(merge(&[&hidden]).is_empty(), "private field leaked");
    Ok(())
}

#[rstest]
fn non_record_inputs_are_ignored() -> Result<()> {
    let merged = merge(&[&42_i32, &A { n: 7 }, &"text", &vec![1, 2], &json!(3)]);
    ensure!(merged == of([field("n", 7, [])?]), "unexpected record {merged}");
    Ok(())
}

#[rstest]
fn pointers_resolve_to_their_record() -> Result<()> {
    let boxed: Box<dyn Reflect> = Box::new(B { s: "boxed".into() });
    let missing: Option<A> = None;
    let merged = merge(&[&boxed, &missing, &Some(A { n: 5 })]);
    let expected = of([field("n", 5, [])?, field("s", "boxed", [])?]);
    ensure!(merged == expected, "unexpected record {merged}");
    Ok(())
}

#[rstest]
#[case::nick(Some("ada"))]
#[case::no_nick(None)]
fn compound_fields_match_explicit_descriptors(#[case] nick: Option<&str>) -> Result<()> {
    let profile = Profile {
        roles: vec!["admin".to_owned()],
        nick: nick.map(str::to_owned),
        scores: BTreeMap::from([("x".to_owned(), 1)]),
        extra: json!({"k": [1, 2]}),
    };
    let merged = merge(&[&profile]);
    let expected = of([
        field("roles", vec!["admin"], [])?,
        field("nick", nick, [])?,
        field("scores", BTreeMap::from([("x".to_owned(), 1_u8)]), [])?,
        field("extra", json!({"k": [1, 2]}), [])?,
    ]);
    ensure!(merged == expected, "{merged} differs from {expected}");
    ensure!(
        merged.field_type("roles") == Some(&FieldType::String.list()),
        "roles declared as {:?}",
        merged.field_type("roles")
    );
    ensure!(
        merged.field_type("nick") == Some(&FieldType::String.optional()),
        "nick declared as {:?}",
        merged.field_type("nick")
    );
    Ok(())
}

#[rstest]
fn only_one_level_of_indirection_resolves() -> Result<()> {
    let boxed = Box::new(A { n: 1 });
    let twice = &&boxed;
    ensure!(merge(&[&twice]).is_empty(), "pointer to pointer resolved");
    ensure!(
        merge(&[&Rc::new(Box::new(A { n: 2 })), &Some(Box::new(A { n: 3 }))]).is_empty(),
        "nested smart pointers resolved"
    );
    ensure!(
        merge(&[&boxed, &Rc::new(B { s: "rc".into() })])
            == of([field("n", 1, [])?, field("s", "rc", [])?]),
        "single pointers must resolve"
    );
    Ok(())
}

#[rstest]
fn json_objects_merge_like_records() -> Result<()> {
    let merged = merge(&[&A { n: 1 }, &json!({"n": 2, "extra": true, "_private": 0})]);
    let expected = of([field("extra", true, [])?, field("n", 2, [])?]);
    ensure!(merged == expected, "unexpected record {merged}");
    Ok(())
}

#[rstest]
fn concrete_scenario() -> Result<()> {
    let merged = merge(&[&A { n: 100 }, &B { s: "test".into() }]);
    ensure!(merged.to_value() == json!({"n": 100, "s": "test"}), "unexpected values");
    let order: Vec<_> = merged.shape().fields().iter().map(|f| f.name()).collect();
    ensure!(order == ["n", "s"], "n must precede s");
    Ok(())
}

#[rstest]
fn merge_iter_keeps_last_of_many() -> Result<()> {
    let merged = merge_iter((1..=3).map(|n| A { n }));
    ensure!(merged == of([field("n", 3, [])?]), "unexpected record {merged}");
    Ok(())
}

#[rstest]
fn every_call_builds_an_independent_shape() {
    let first = merge(&[&A { n: 1 }]);
    let second = merge(&[&A { n: 1 }]);
    assert_eq!(first, second);
    assert!(!std::ptr::eq(first.shape(), second.shape()));
}
