use super::*;
use crate::schema::{Property, PropertyKind};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use serde_json::json;

fn schema() -> Schema {
    Schema::new(vec![
        Property::new("title", PropertyKind::String),
        Property::new("created_at", PropertyKind::DateTime),
        Property::new("published_on", PropertyKind::Date),
        Property::new("author_id", PropertyKind::Id),
        Property::new("views", PropertyKind::Scalar),
    ])
    .unwrap()
}

fn clause(path: &str, raw: Value) -> FilterClause {
    FilterClause::resolved(path, raw, &schema())
}

#[test]
fn contains_emits_escaped_unanchored_pattern() {
    let doc = convert_filter(&[clause("title", json!({ "contains": "Fo.o" }))]);

    assert_eq!(
        Value::Object(doc),
        json!({ "title": { "$regex": r"Fo\.o", "$options": "i" } })
    );
}

#[test]
fn starts_with_anchors_at_the_start() {
    let doc = convert_filter(&[clause("title", json!({ "starts_with": "Fo.o" }))]);

    assert_eq!(doc["title"]["$regex"], json!(r"^Fo\.o"));
    assert_eq!(doc["title"]["$options"], json!("i"));
}

#[test]
fn ends_with_anchors_at_the_end() {
    let doc = convert_filter(&[clause("title", json!({ "ends_with": "Fo.o" }))]);

    assert_eq!(doc["title"]["$regex"], json!(r"Fo\.o$"));
}

#[test]
fn plain_scalar_on_string_is_substring_match() {
    let doc = convert_filter(&[clause("title", json!("a.b*"))]);

    assert_eq!(doc["title"]["$regex"], json!(r"a\.b\*"));
}

#[test]
fn escaped_metacharacters_are_inert() {
    let doc = convert_filter(&[clause("title", json!({ "contains": "a.b*" }))]);
    let pattern = doc["title"]["$regex"].as_str().unwrap();
    let compiled = regex::Regex::new(pattern).unwrap();

    // Matches only the literal text, not any-character-then-star.
    assert!(compiled.is_match("xx a.b* yy"));
    assert!(!compiled.is_match("aab"));
    assert!(!compiled.is_match("axbbb"));
}

#[test]
fn date_range_with_only_from_emits_gte() {
    let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap().to_rfc3339();
    let doc = convert_filter(&[clause("created_at", json!({ "from": from }))]);

    assert_eq!(doc["created_at"]["$gte"], json!(from));
    assert!(doc["created_at"].get("$lte").is_none());
}

#[test]
fn date_range_with_only_to_emits_lte() {
    let to = Utc.with_ymd_and_hms(2024, 6, 30, 23, 59, 59).unwrap().to_rfc3339();
    let doc = convert_filter(&[clause("published_on", json!({ "to": to }))]);

    assert_eq!(doc["published_on"]["$lte"], json!(to));
    assert!(doc["published_on"].get("$gte").is_none());
}

#[test]
fn date_range_with_both_bounds_emits_both() {
    let doc = convert_filter(&[clause(
        "created_at",
        json!({ "from": "2024-01-01", "to": "2024-12-31" }),
    )]);

    assert_eq!(
        doc["created_at"],
        json!({ "$gte": "2024-01-01", "$lte": "2024-12-31" })
    );
}

#[test]
fn boundless_range_falls_through_to_equality() {
    let value = FilterValue::Range {
        from: None,
        to: None,
    };
    let doc = convert_filter(&[FilterClause::new(
        "created_at",
        schema().property("created_at").cloned(),
        value,
    )]);

    assert_eq!(doc["created_at"], json!({}));
}

#[test]
fn empty_string_bounds_do_not_count() {
    // Untouched form inputs submit empty strings; they are not bounds.
    let value = FilterValue::from_raw(json!({ "from": "", "to": "2024-12-31" }));

    assert_eq!(
        value,
        FilterValue::Range {
            from: None,
            to: Some(json!("2024-12-31")),
        }
    );
}

#[test]
fn valid_identifier_is_plain_equality() {
    let doc = convert_filter(&[clause("author_id", json!("507f1f77bcf86cd799439011"))]);

    assert_eq!(doc["author_id"], json!("507f1f77bcf86cd799439011"));
}

#[test]
fn invalid_identifier_collapses_everything_to_match_nothing() {
    let doc = convert_filter(&[
        clause("title", json!({ "contains": "Foo" })),
        clause("author_id", json!("not-an-id")),
        clause("views", json!(10)),
    ]);

    assert_eq!(doc, match_nothing());
}

#[test]
fn non_string_identifier_payload_matches_nothing() {
    let doc = convert_filter(&[clause("author_id", json!(42))]);

    assert_eq!(doc, match_nothing());
}

#[test]
fn other_scalar_types_pass_through_unescaped() {
    let doc = convert_filter(&[clause("views", json!(10))]);

    assert_eq!(doc["views"], json!(10));
}

#[test]
fn unresolved_nested_path_expands_to_nested_equality() {
    let doc = convert_filter(&[clause("genre.name", json!("fiction"))]);

    assert_eq!(
        Value::Object(doc),
        json!({ "genre": { "name": "fiction" } })
    );
}

#[test]
fn first_clause_wins_on_duplicate_keys() {
    let doc = convert_filter(&[
        clause("views", json!(1)),
        clause("views", json!(2)),
    ]);

    assert_eq!(doc["views"], json!(1));
}

#[test]
fn empty_filter_is_the_empty_document() {
    assert!(convert_filter(&[]).is_empty());
}

// --- suffix-encoded front-end convention ---

#[test]
fn suffixed_keys_lower_to_text_clauses() {
    let mut form = BTreeMap::new();
    form.insert("title_starts_with".to_string(), json!("Fo"));

    let clauses = lower_form_filters(&form, &schema());

    assert_eq!(clauses.len(), 1);
    assert_eq!(clauses[0].path, "title");
    assert_eq!(
        clauses[0].value,
        FilterValue::Text {
            op: TextOperator::StartsWith,
            term: "Fo".to_string(),
        }
    );
}

#[test]
fn from_and_to_keys_group_into_one_range_clause() {
    let mut form = BTreeMap::new();
    form.insert("created_at_from".to_string(), json!("2024-01-01"));
    form.insert("created_at_to".to_string(), json!("2024-12-31"));

    let clauses = lower_form_filters(&form, &schema());

    assert_eq!(clauses.len(), 1);
    assert_eq!(
        clauses[0].value,
        FilterValue::Range {
            from: Some(json!("2024-01-01")),
            to: Some(json!("2024-12-31")),
        }
    );
}

#[test]
fn suffixed_and_structured_encodings_translate_identically() {
    let mut form = BTreeMap::new();
    form.insert("title_contains".to_string(), json!("Fo.o"));

    let from_form = convert_filter(&lower_form_filters(&form, &schema()));
    let from_structured = convert_filter(&[clause("title", json!({ "contains": "Fo.o" }))]);

    assert_eq!(from_form, from_structured);
}

#[test]
fn unsuffixed_keys_lower_as_plain_payloads() {
    let mut form = BTreeMap::new();
    form.insert("views".to_string(), json!(3));

    let clauses = lower_form_filters(&form, &schema());

    assert_eq!(clauses[0].value, FilterValue::Scalar(json!(3)));
}

// --- properties ---

proptest! {
    #[test]
    fn escaped_contains_pattern_matches_its_own_term(term in ".*") {
        let doc = convert_filter(&[clause("title", json!({ "contains": term.clone() }))]);
        let pattern = doc["title"]["$regex"].as_str().unwrap();
        let compiled = regex::Regex::new(pattern).unwrap();

        prop_assert!(compiled.is_match(&term));
    }

    #[test]
    fn raw_lowering_roundtrips_text_operators(term in "[a-zA-Z0-9 .*+?]{0,30}") {
        let raw = json!({ "contains": term });
        let value = FilterValue::from_raw(raw.clone());

        prop_assert_eq!(value.to_raw(), raw);
    }
}
