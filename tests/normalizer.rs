// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

mod helpers;

use hakim::error::Error;
use hakim::services::normalizer::ResponseNormalizer;
use helpers::verdict_json;
use proptest::prelude::*;
use serde_json::json;

fn parse_error_message(raw: &str) -> String {
    match ResponseNormalizer::normalize(raw) {
        Err(Error::Parse { message, .. }) => message,
        other => panic!("expected Parse error, got: {other:?}"),
    }
}

// ─── Shapes ──────────────────────────────────────────────────────────────────

#[test]
fn array_keeps_order() {
    let raw = json!([verdict_json("Kira hukuku"), verdict_json("İş hukuku")]).to_string();
    let result = ResponseNormalizer::normalize(&raw).unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(result.records()[0].legal_classification, "Kira hukuku");
    assert_eq!(result.records()[1].legal_classification, "İş hukuku");
}

#[test]
fn single_object_is_wrapped() {
    let raw = verdict_json("Kira hukuku").to_string();
    let result = ResponseNormalizer::normalize(&raw).unwrap();

    assert_eq!(result.len(), 1);
    let record = &result.records()[0];
    assert_eq!(record.legal_classification, "Kira hukuku");
    assert_eq!(record.ruling, "Depozitonun iadesine karar verilmesi gerekir.");
    assert_eq!(record.related_provisions.len(), 1);
    assert_eq!(record.related_provisions[0].article, "342");
}

#[test]
fn fenced_and_clean_are_equivalent() {
    let clean = json!([verdict_json("Tüketici hukuku")]).to_string();
    let fenced_json = format!("```json\n{clean}\n```");
    let fenced_plain = format!("```\n{clean}\n```");

    let expected = ResponseNormalizer::normalize(&clean).unwrap();
    assert_eq!(ResponseNormalizer::normalize(&fenced_json).unwrap(), expected);
    assert_eq!(ResponseNormalizer::normalize(&fenced_plain).unwrap(), expected);
}

#[test]
fn fence_after_preamble_is_extracted() {
    let clean = json!([verdict_json("Tüketici hukuku")]).to_string();
    let raw = format!("İşte analiz:\n```json\n{clean}\n```");

    assert_eq!(
        ResponseNormalizer::normalize(&raw).unwrap(),
        ResponseNormalizer::normalize(&clean).unwrap()
    );
}

#[test]
fn text_after_closing_fence_is_ignored() {
    let clean = json!([verdict_json("Tüketici hukuku")]).to_string();
    let raw = format!("```json\n{clean}\n```\nUmarım yardımcı olur.");

    assert_eq!(
        ResponseNormalizer::normalize(&raw).unwrap(),
        ResponseNormalizer::normalize(&clean).unwrap()
    );
}

#[test]
fn unterminated_fence_is_accepted() {
    let clean = json!([verdict_json("Tüketici hukuku")]).to_string();
    let raw = format!("```json\n{clean}");

    let result = ResponseNormalizer::normalize(&raw).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result.records()[0].legal_classification, "Tüketici hukuku");
}

#[test]
fn duplicate_provisions_are_kept() {
    let mut record = verdict_json("Kira hukuku");
    let provision = record["relatedProvisions"][0].clone();
    record["relatedProvisions"] = json!([provision.clone(), provision]);

    let result = ResponseNormalizer::normalize(&record.to_string()).unwrap();
    let provisions = &result.records()[0].related_provisions;
    assert_eq!(provisions.len(), 2);
    assert_eq!(provisions[0], provisions[1]);
}

#[test]
fn empty_provision_list_is_accepted() {
    let mut record = verdict_json("Kira hukuku");
    record["relatedProvisions"] = json!([]);

    let result = ResponseNormalizer::normalize(&record.to_string()).unwrap();
    assert!(result.records()[0].related_provisions.is_empty());
}

// ─── Failures ────────────────────────────────────────────────────────────────

#[test]
fn invalid_json_keeps_raw_text() {
    let raw = "Üzgünüm, bu konuda yardımcı olamam.";
    match ResponseNormalizer::normalize(raw) {
        Err(Error::Parse { raw: kept, .. }) => assert_eq!(kept, raw),
        other => panic!("expected Parse error, got: {other:?}"),
    }
}

#[test]
fn empty_array_is_an_error() {
    let message = parse_error_message("[]");
    assert!(message.contains("no verdict records"), "{message}");
}

#[test]
fn scalar_json_is_an_error() {
    parse_error_message("\"just a string\"");
    parse_error_message("42");
}

#[test]
fn missing_field_is_an_error() {
    let mut record = verdict_json("Kira hukuku");
    record.as_object_mut().unwrap().remove("ruling");

    let message = parse_error_message(&json!([verdict_json("ok"), record]).to_string());
    assert!(message.contains("record 2"), "{message}");
    assert!(message.contains("ruling"), "{message}");
}

#[test]
fn blank_field_is_an_error() {
    let mut record = verdict_json("Kira hukuku");
    record["plainExplanation"] = json!("   ");

    let message = parse_error_message(&record.to_string());
    assert!(message.contains("plainExplanation"), "{message}");
}

#[test]
fn incomplete_provision_is_an_error() {
    let mut record = verdict_json("Kira hukuku");
    record["relatedProvisions"] = json!([{ "law": "TBK", "article": "299" }]);

    let message = parse_error_message(&record.to_string());
    assert!(message.contains("'text'"), "{message}");
}

#[test]
fn non_object_array_item_is_an_error() {
    let message = parse_error_message(r#"["karar"]"#);
    assert!(message.contains("expected an object"), "{message}");
}

// ─── Properties ──────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn normalizer_never_panics(raw in ".*") {
        let _ = ResponseNormalizer::normalize(&raw);
    }

    #[test]
    fn success_is_never_empty(count in 1usize..6, fenced in any::<bool>()) {
        let records: Vec<_> = (0..count).map(|i| verdict_json(&format!("konu {i}"))).collect();
        let mut raw = serde_json::Value::Array(records).to_string();
        if fenced {
            raw = format!("```json\n{raw}\n```");
        }
        let result = ResponseNormalizer::normalize(&raw).unwrap();
        prop_assert_eq!(result.len(), count);
    }
}
