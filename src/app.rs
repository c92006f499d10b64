// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::io::IsTerminal;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::domain::{AnalysisRequest, AnalysisResult};
use crate::error::{Error, Result};
use crate::services::{
    analysis::{self, AnalysisFailure, DisputeAnalyzer},
    encoder,
    llm::gemini::GeminiBackend,
    report,
    request::RequestBuilder,
};

pub struct App {
    cli: Cli,
    config: Config,
}

impl App {
    pub fn new(cli: Cli) -> Result<Self> {
        let config = Config::load(&cli)?;
        debug!(
            model = %config.model,
            base_url = %config.base_url,
            has_key = config.api_key.is_some(),
            "config loaded"
        );
        Ok(Self { cli, config })
    }

    pub async fn run(&mut self) -> Result<()> {
        if let Some(ref cmd) = self.cli.command {
            return self.handle_command(cmd);
        }

        self.analyze_dispute().await
    }

    async fn analyze_dispute(&self) -> Result<()> {
        // Step 1: Collect evidence, dropping what we cannot send
        let batch = encoder::encode_files(&self.cli.files, self.config.max_attachment_bytes).await;
        for rejected in &batch.rejected {
            let reason = match &rejected.error {
                Error::UnsupportedMediaType { .. } => {
                    "Lütfen sadece resim veya PDF formatında belgeler yükleyin.".to_string()
                }
                other => other.to_string(),
            };
            self.print_warning(&format!("{} atlandı: {reason}", rejected.path.display()));
        }
        let attachments = batch.attachments;

        // Step 2: Dispute text from argument, stdin, or prompt
        let text = self.read_dispute_text(attachments.is_empty()).await?;
        analysis::ensure_input(&text, &attachments).map_err(AnalysisFailure::from)?;

        // Step 3: One backend call, with the request built once
        let request = RequestBuilder::build(&text, &attachments).map_err(AnalysisFailure::from)?;
        let backend = GeminiBackend::new(&self.config)?;
        if self.cli.show_request {
            self.print_request_preview(&backend, &request)?;
        }

        let analyzer = DisputeAnalyzer::new(Box::new(backend));
        self.print_status(&format!(
            "{} belge ile analiz başlatılıyor ({}, {})",
            attachments.len(),
            analyzer.backend_name(),
            self.config.model
        ));

        let spinner = self.spinner();
        let outcome = analyzer.analyze_request(&request).await;
        spinner.finish_and_clear();

        // Step 4: Present
        let result = outcome?;
        self.present(&result)
    }

    async fn read_dispute_text(&self, no_attachments: bool) -> Result<String> {
        if let Some(ref text) = self.cli.text {
            return Ok(text.clone());
        }

        if !std::io::stdin().is_terminal() {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            return Ok(text);
        }

        // Interactive and nothing to analyze yet: ask.
        if no_attachments {
            let text: String = dialoguer::Input::new()
                .with_prompt("Uyuşmazlık özeti")
                .allow_empty(true)
                .interact_text()?;
            return Ok(text);
        }

        Ok(String::new())
    }

    fn print_request_preview(
        &self,
        backend: &GeminiBackend,
        request: &AnalysisRequest,
    ) -> Result<()> {
        let preview = serde_json::to_string_pretty(&backend.preview(request))
            .map_err(std::io::Error::from)?;
        eprintln!("{}", style("--- REQUEST ---").dim());
        eprintln!("{preview}");
        eprintln!("{}", style("--- END REQUEST ---").dim());
        Ok(())
    }

    fn spinner(&self) -> ProgressBar {
        if !std::io::stderr().is_terminal() {
            return ProgressBar::hidden();
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::with_template("{spinner:.yellow} {msg}") {
            spinner.set_style(template);
        }
        spinner.set_message("Hukuki Analiz Yapılıyor...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }

    fn present(&self, result: &AnalysisResult) -> Result<()> {
        let plain = if self.cli.json {
            report::render_json(result)?
        } else {
            report::render_text(result, false)
        };

        if self.cli.json || !std::io::stdout().is_terminal() {
            println!("{plain}");
        } else {
            print!("{}", report::render_text(result, true));
        }

        if let Some(ref path) = self.cli.output {
            std::fs::write(path, &plain)?;
            self.print_info(&format!("Rapor kaydedildi: {}", path.display()));
        }

        if self.cli.copy {
            match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(plain)) {
                Ok(()) => self.print_info("Rapor panoya kopyalandı"),
                Err(e) => self.print_warning(&format!("Panoya kopyalanamadı: {e}")),
            }
        }

        Ok(())
    }

    fn handle_command(&self, cmd: &Commands) -> Result<()> {
        match cmd {
            Commands::Init => {
                let path = Config::create_default()?;
                println!("Created config: {}", path.display());
                Ok(())
            }
            Commands::Config => {
                println!("Model: {}", self.config.model);
                println!("Base URL: {}", self.config.base_url);
                println!(
                    "API key: {}",
                    if self.config.api_key.is_some() {
                        "configured"
                    } else {
                        "missing"
                    }
                );
                match self.config.timeout_secs {
                    Some(t) => println!("Timeout: {t}s"),
                    None => println!("Timeout: none"),
                }
                match self.config.temperature {
                    Some(t) => println!("Temperature: {t}"),
                    None => println!("Temperature: backend default"),
                }
                println!(
                    "Max attachment bytes: {}",
                    self.config.max_attachment_bytes
                );
                Ok(())
            }
            Commands::Completions { shell } => {
                let mut cmd = <Cli as clap::CommandFactory>::command();
                clap_complete::generate(*shell, &mut cmd, "hakim", &mut std::io::stdout());
                Ok(())
            }
            #[cfg(feature = "secure-storage")]
            Commands::SetKey => self.set_api_key(),
            #[cfg(feature = "secure-storage")]
            Commands::GetKey => self.get_api_key(),
        }
    }

    // ─── Keyring Commands ───

    #[cfg(feature = "secure-storage")]
    fn set_api_key(&self) -> Result<()> {
        eprintln!("Enter the Gemini API key (input will be hidden):");

        let key = dialoguer::Password::new()
            .with_prompt("API key")
            .interact()
            .map_err(|e| Error::Dialog(e.to_string()))?;

        if key.trim().is_empty() {
            return Err(Error::Configuration("API key cannot be empty".into()));
        }

        let entry =
            keyring::Entry::new("hakim", "gemini").map_err(|e| Error::Keyring(e.to_string()))?;
        entry
            .set_password(key.trim())
            .map_err(|e| Error::Keyring(e.to_string()))?;

        eprintln!("{} API key stored", style("✓").green().bold());
        Ok(())
    }

    #[cfg(feature = "secure-storage")]
    fn get_api_key(&self) -> Result<()> {
        let entry =
            keyring::Entry::new("hakim", "gemini").map_err(|e| Error::Keyring(e.to_string()))?;

        match entry.get_password() {
            Ok(_) => {
                eprintln!(
                    "{} API key is stored in keychain",
                    style("✓").green().bold()
                );
            }
            Err(keyring::Error::NoEntry) => {
                eprintln!("{} No API key found in keychain", style("✗").red().bold());
                eprintln!("  Store one with: {}", style("hakim set-key").yellow());
            }
            Err(e) => {
                return Err(Error::Keyring(e.to_string()));
            }
        }

        Ok(())
    }

    // ─── Output Helpers ───

    fn print_status(&self, msg: &str) {
        eprintln!("{} {}", style("→").cyan(), msg);
    }

    fn print_info(&self, msg: &str) {
        eprintln!("{} {}", style("info:").cyan(), msg);
    }

    fn print_warning(&self, msg: &str) {
        eprintln!("{} {}", style("warning:").yellow().bold(), msg);
    }
}
