//! Document export: turns a rendered page into a downloadable file.
//!
//! The exporter receives only the page subtree (never the preview shell) and
//! wraps it in a standalone A4 document with the export-only typography
//! overrides. `HtmlExporter` hands that document back as is;
//! `CommandPdfExporter` pipes it through an external HTML→PDF converter.

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::render::html::percent_encode;
use crate::render::STYLESHEET;

/// Converter flags for a bare command such as `wkhtmltopdf`.
const DEFAULT_CONVERTER_ARGS: [&str; 4] = ["--page-size", "A4", "--orientation", "Portrait"];

/// Name used in filenames when the profile has no name yet.
const FALLBACK_BASENAME: &str = "Candidato";

/// Applied on top of the page stylesheet in exported documents only.
const EXPORT_OVERRIDES: &str = r#"
@page { size: A4 portrait; margin: 0; }
html, body { margin: 0; padding: 0; background: #ffffff; }
.a4-page {
  letter-spacing: 0.05em !important;
  word-spacing: 0.1em !important;
  font-variant-ligatures: none !important;
  font-kerning: none !important;
  text-rendering: optimizeSpeed !important;
  box-shadow: none !important;
  margin: 0 !important;
}
.a4-page p, .a4-page span, .a4-page h1, .a4-page h2, .a4-page h3,
.a4-page div, .a4-page li {
  line-height: 2.3 !important;
}
.a4-page .user-name { letter-spacing: 0.15em !important; }
"#;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Converter '{program}' could not be started: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("Converter failed (exit code {exit_code:?}): {stderr}")]
    Converter {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Export command is empty")]
    EmptyCommand,
}

/// Which page is exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Artifact {
    #[serde(rename = "cv")]
    Resume,
    #[serde(rename = "letter")]
    CoverLetter,
}

impl Artifact {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cv" => Some(Artifact::Resume),
            "letter" => Some(Artifact::CoverLetter),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Artifact::Resume => "cv",
            Artifact::CoverLetter => "letter",
        }
    }

    /// Filename label.
    pub fn label(self) -> &'static str {
        match self {
            Artifact::Resume => "Curriculo",
            Artifact::CoverLetter => "Carta",
        }
    }
}

/// One rendered page, ready for export.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub artifact: Artifact,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

/// `<name>_<label>`: trimmed full name with whitespace runs collapsed to `_`.
pub fn export_basename(full_name: &str, artifact: Artifact) -> String {
    let name = full_name.split_whitespace().collect::<Vec<_>>().join("_");
    let name = if name.is_empty() {
        FALLBACK_BASENAME.to_string()
    } else {
        name
    };
    format!("{name}_{}", artifact.label())
}

/// `Content-Disposition` for a download: an ASCII fallback name plus the
/// UTF-8 name, percent-encoded.
pub fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        percent_encode(filename)
    )
}

/// Wraps the page subtree in a self-contained A4 document.
pub fn standalone_html(document: &RenderedDocument) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"pt\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLESHEET}{EXPORT_OVERRIDES}</style>\n</head>\n\
         <body>\n{body}\n</body>\n</html>\n",
        title = crate::render::html::escape(&document.title),
        body = document.body,
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait DocumentExporter: Send + Sync {
    async fn export(
        &self,
        document: &RenderedDocument,
        basename: &str,
    ) -> Result<ExportedFile, ExportError>;
}

// ────────────────────────────────────────────────────────────────────────────
// HTML export
// ────────────────────────────────────────────────────────────────────────────

pub struct HtmlExporter;

#[async_trait]
impl DocumentExporter for HtmlExporter {
    async fn export(
        &self,
        document: &RenderedDocument,
        basename: &str,
    ) -> Result<ExportedFile, ExportError> {
        Ok(ExportedFile {
            filename: format!("{basename}.html"),
            content_type: "text/html; charset=utf-8",
            bytes: Bytes::from(standalone_html(document)),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// External converter (e.g. wkhtmltopdf)
// ────────────────────────────────────────────────────────────────────────────

/// Runs `program args… in.html out.pdf` in a scratch directory.
///
/// Arguments may reference `{input}` and `{output}`. Otherwise both paths are
/// appended, after the A4 portrait defaults if the command has no flags.
pub struct CommandPdfExporter {
    program: String,
    args: Vec<String>,
}

impl CommandPdfExporter {
    pub fn from_command_line(command: &str) -> Result<Self, ExportError> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(ExportError::EmptyCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    fn arguments(&self, input: &Path, output: &Path) -> Vec<String> {
        let input = input.to_string_lossy();
        let output = output.to_string_lossy();
        let templated = self
            .args
            .iter()
            .any(|a| a.contains("{input}") || a.contains("{output}"));

        if templated {
            return self
                .args
                .iter()
                .map(|a| a.replace("{input}", &input).replace("{output}", &output))
                .collect();
        }

        let mut args = self.args.clone();
        if args.is_empty() {
            args.extend(DEFAULT_CONVERTER_ARGS.iter().map(|s| s.to_string()));
        }
        args.push(input.into_owned());
        args.push(output.into_owned());
        args
    }
}

#[async_trait]
impl DocumentExporter for CommandPdfExporter {
    async fn export(
        &self,
        document: &RenderedDocument,
        basename: &str,
    ) -> Result<ExportedFile, ExportError> {
        let scratch = tempfile::tempdir()?;
        let input = scratch.path().join("document.html");
        let output = scratch.path().join("document.pdf");
        tokio::fs::write(&input, standalone_html(document)).await?;

        let args = self.arguments(&input, &output);
        debug!("Running converter {} {:?}", self.program, args);

        let result = tokio::process::Command::new(&self.program)
            .args(&args)
            .output()
            .await
            .map_err(|source| ExportError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !result.status.success() {
            return Err(ExportError::Converter {
                exit_code: result.status.code(),
                stderr: String::from_utf8_lossy(&result.stderr).to_string(),
            });
        }

        let bytes = tokio::fs::read(&output).await?;
        info!(
            "Exported {} ({} bytes) via {}",
            document.artifact.as_str(),
            bytes.len(),
            self.program
        );

        Ok(ExportedFile {
            filename: format!("{basename}.pdf"),
            content_type: "application/pdf",
            bytes: Bytes::from(bytes),
        })
    }
}
