// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use hakim::domain::AnalysisRequest;
use hakim::error::{Error, Result};
use hakim::services::llm::AnalysisBackend;

/// A verdict object with every required field filled in.
#[allow(dead_code)]
pub fn verdict_json(classification: &str) -> Value {
    json!({
        "caseSummary": "Kiracı depozitonun iadesini talep ediyor.",
        "legalClassification": classification,
        "relatedProvisions": [
            {
                "law": "Türk Borçlar Kanunu",
                "article": "342",
                "text": "Kiracı güvence vermekle yükümlü ise bu güvence üç aylık kira bedelini aşamaz."
            }
        ],
        "reasoning": "Kira ilişkisi sona ermiş, güvence bedeli iade edilmemiştir.",
        "plainExplanation": "Ev sahibi depozitoyu geri vermek zorunda.",
        "ruling": "Depozitonun iadesine karar verilmesi gerekir."
    })
}

/// Backend double: replays a scripted outcome and counts calls.
#[allow(dead_code)]
pub struct ScriptedBackend {
    reply: Box<dyn Fn() -> Result<String> + Send + Sync>,
    pub calls: Arc<AtomicUsize>,
    pub last_parts: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl ScriptedBackend {
    pub fn replying(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(move || Ok(text.clone()))
    }

    pub fn failing(make_error: impl Fn() -> Error + Send + Sync + 'static) -> Self {
        Self::new(move || Err(make_error()))
    }

    fn new(reply: impl Fn() -> Result<String> + Send + Sync + 'static) -> Self {
        Self {
            reply: Box::new(reply),
            calls: Arc::new(AtomicUsize::new(0)),
            last_parts: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl AnalysisBackend for ScriptedBackend {
    async fn send(&self, request: &AnalysisRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_parts
            .store(request.parts().len(), Ordering::SeqCst);
        (self.reply)()
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
