// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::fmt::Write as _;

use console::{Style, style};

use crate::domain::{AnalysisResult, VerdictRecord};
use crate::error::Result;

const INDENT: &str = "  ";

/// Render the itemized report. `styled` adds terminal colors.
pub fn render_text(result: &AnalysisResult, styled: bool) -> String {
    let mut out = String::new();
    let heading = Style::new().bold().force_styling(styled);

    let _ = writeln!(out, "{}", heading.apply_to("HUKUKİ ANALİZ RAPORU"));
    let _ = writeln!(out, "{} Madde Tespit Edildi", result.len());

    for (index, record) in result.iter().enumerate() {
        out.push('\n');
        render_record(&mut out, index + 1, record, styled);
    }

    out
}

fn render_record(out: &mut String, number: usize, record: &VerdictRecord, styled: bool) {
    let title = style(format!("── {number} ── {}", record.legal_classification.trim()))
        .yellow()
        .bold()
        .force_styling(styled);
    let label = Style::new().dim().bold().force_styling(styled);

    let _ = writeln!(out, "{title}");

    let _ = writeln!(out, "{}", label.apply_to("Vaka Özeti"));
    push_indented(out, &record.case_summary, 1);

    let _ = writeln!(out, "{}", label.apply_to("Sade Açıklama"));
    push_indented(out, &record.plain_explanation, 1);

    let _ = writeln!(out, "{}", label.apply_to("İlgili Mevzuat"));
    for provision in &record.related_provisions {
        let _ = writeln!(
            out,
            "{INDENT}• {} — Madde {}",
            provision.law.trim(),
            provision.article.trim()
        );
        push_indented(out, &provision.text, 2);
    }

    let _ = writeln!(out, "{}", label.apply_to("Gerekçeli Karar"));
    push_indented(out, &record.reasoning, 1);

    let ruling_label = style("Nihai Hüküm / Tavsiye").green().bold().force_styling(styled);
    let _ = writeln!(out, "{ruling_label}");
    push_indented(out, &record.ruling, 1);
}

fn push_indented(out: &mut String, text: &str, depth: usize) {
    let pad = INDENT.repeat(depth);
    for line in text.trim().lines() {
        if line.trim().is_empty() {
            out.push('\n');
        } else {
            let _ = writeln!(out, "{pad}{}", line.trim_end());
        }
    }
}

/// The records as a pretty-printed JSON array.
pub fn render_json(result: &AnalysisResult) -> Result<String> {
    let json = serde_json::to_string_pretty(result).map_err(std::io::Error::from)?;
    Ok(json)
}
