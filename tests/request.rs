// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use hakim::domain::{MediaType, Part};
use hakim::error::Error;
use hakim::services::encoder::encode;
use hakim::services::request::{
    DOCUMENT_ONLY_FALLBACK, RequestBuilder, SYSTEM_INSTRUCTION, response_schema,
};

// ─── Instruction text ────────────────────────────────────────────────────────

#[test]
fn embeds_dispute_text_verbatim() {
    let text = "  Kira sözleşmesi feshedildi,\n depozito iade edilmedi  ";
    let request = RequestBuilder::build(text, &[]).unwrap();

    assert!(request.instruction_text().ends_with(text));
    assert!(request.instruction_text().contains("Türk hukuk mevzuatı"));
    assert_eq!(request.parts().len(), 1);
}

#[test]
fn blank_text_with_documents_uses_fallback() {
    let att = encode(b"%PDF-1.7", "application/pdf").unwrap();
    let request = RequestBuilder::build("   ", &[att]).unwrap();

    assert!(request.instruction_text().ends_with(DOCUMENT_ONLY_FALLBACK));
}

#[test]
fn compose_instruction_fallback_only_for_blank() {
    assert!(RequestBuilder::compose_instruction("").ends_with(DOCUMENT_ONLY_FALLBACK));
    assert!(!RequestBuilder::compose_instruction("x").contains(DOCUMENT_ONLY_FALLBACK));
}

// ─── Parts ───────────────────────────────────────────────────────────────────

#[test]
fn attachments_follow_text_in_upload_order() {
    let pdf = encode(b"%PDF-1.7 first", "application/pdf").unwrap();
    let png = encode(&[0x89, 0x50, 0x4E, 0x47], "image/png").unwrap();
    let jpg = encode(&[0xFF, 0xD8, 0xFF], "image/jpeg").unwrap();

    let request = RequestBuilder::build("uyuşmazlık", &[pdf, png, jpg]).unwrap();
    let parts = request.parts();

    assert_eq!(parts.len(), 4);
    assert_eq!(request.attachment_count(), 3);
    assert!(matches!(parts[0], Part::Text(_)));

    let expected: [(MediaType, &[u8]); 3] = [
        (MediaType::Pdf, b"%PDF-1.7 first"),
        (MediaType::Image("image/png".into()), &[0x89, 0x50, 0x4E, 0x47]),
        (MediaType::Image("image/jpeg".into()), &[0xFF, 0xD8, 0xFF]),
    ];
    for (part, (media, bytes)) in parts[1..].iter().zip(expected) {
        match part {
            Part::InlineData {
                media_type,
                bytes: raw,
            } => {
                assert_eq!(media_type, &media);
                assert_eq!(raw.as_slice(), bytes, "attachments are sent decoded");
            }
            other => panic!("expected inline data, got {other:?}"),
        }
    }
}

#[test]
fn empty_input_is_rejected() {
    let result = RequestBuilder::build(" \n\t", &[]);
    assert!(matches!(result, Err(Error::MissingInput)));
}

// ─── Contract elements ───────────────────────────────────────────────────────

#[test]
fn carries_system_instruction() {
    let request = RequestBuilder::build("soru", &[]).unwrap();
    assert_eq!(request.system_instruction(), SYSTEM_INSTRUCTION);
    assert!(SYSTEM_INSTRUCTION.contains("JSON ARRAY"));
    assert!(SYSTEM_INSTRUCTION.contains("Hiçbir soruyu atlama"));
}

#[test]
fn schema_requires_six_fields_and_three_provision_fields() {
    let schema = response_schema();

    assert_eq!(schema["type"], "ARRAY");
    let item = &schema["items"];
    assert_eq!(item["type"], "OBJECT");

    let required: Vec<&str> = item["required"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(
        required,
        [
            "caseSummary",
            "legalClassification",
            "relatedProvisions",
            "reasoning",
            "plainExplanation",
            "ruling"
        ]
    );
    assert_eq!(item["properties"].as_object().unwrap().len(), 6);

    let provisions = &item["properties"]["relatedProvisions"];
    assert_eq!(provisions["type"], "ARRAY");
    assert_eq!(
        provisions["items"]["required"],
        serde_json::json!(["law", "article", "text"])
    );
    for field in ["law", "article", "text"] {
        assert_eq!(provisions["items"]["properties"][field]["type"], "STRING");
    }
}

#[test]
fn request_carries_schema() {
    let request = RequestBuilder::build("soru", &[]).unwrap();
    assert_eq!(request.response_schema(), &response_schema());
}
