use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tera::{Context, Tera};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::ReportConfig;

use super::view::ReportView;

const ACTION_PLAN_TEMPLATE: &str = "action_plan.html";

/// Turns a report view into PDF bytes.
#[async_trait]
pub trait ReportRenderer: Send + Sync {
    async fn render(&self, view: &ReportView) -> Result<Vec<u8>, RenderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("report template failed: {0}")]
    Template(String),
    #[error("wkhtmltopdf is not installed; set WKHTMLTOPDF_PATH")]
    ConverterMissing,
    #[error("pdf conversion failed: {0}")]
    Conversion(String),
    #[error("pdf converter io error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Converter crashes and pipe failures may clear up on a second run.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Conversion(_) | Self::Io(_))
    }
}

/// Renders the embedded action plan template and pipes it through wkhtmltopdf.
#[derive(Debug)]
pub struct HtmlPdfRenderer {
    tera: Tera,
    converter: Option<PathBuf>,
}

impl HtmlPdfRenderer {
    pub fn new(converter: Option<PathBuf>) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.register_filter("money", money_filter);
        tera.add_raw_template(
            ACTION_PLAN_TEMPLATE,
            include_str!("../../templates/action_plan.html.tera"),
        )
        .map_err(template_error)?;

        Ok(Self { tera, converter })
    }

    /// Explicit path from config wins; otherwise wkhtmltopdf is looked up on PATH.
    pub fn from_config(config: &ReportConfig) -> Result<Self, RenderError> {
        let converter = config
            .wkhtmltopdf_path
            .clone()
            .or_else(|| which::which("wkhtmltopdf").ok());

        match &converter {
            Some(path) => tracing::info!(path = %path.display(), "pdf converter located"),
            None => tracing::warn!("wkhtmltopdf not found; pdf reports are unavailable"),
        }

        Self::new(converter)
    }

    pub fn converter(&self) -> Option<&Path> {
        self.converter.as_deref()
    }

    pub fn render_html(&self, view: &ReportView) -> Result<String, RenderError> {
        let mut context = Context::new();
        context.insert("view", view);
        context.insert("tier_groups", &view.tiers.groups());
        context.insert(
            "generated_on",
            &view.generated_at.format("%B %d, %Y").to_string(),
        );

        self.tera
            .render(ACTION_PLAN_TEMPLATE, &context)
            .map_err(template_error)
    }

    async fn convert(&self, converter: &Path, html: &str) -> Result<Vec<u8>, RenderError> {
        let mut child = Command::new(converter)
            .args([
                "--quiet",
                "--encoding",
                "utf-8",
                "--page-size",
                "Letter",
                "-",
                "-",
            ])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(html.as_bytes()).await {
                Ok(()) => {}
                // The exit status below explains why the converter stopped reading.
                Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => {}
                Err(err) => return Err(err.into()),
            }
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(RenderError::Conversion(if stderr.is_empty() {
                format!("converter exited with {}", output.status)
            } else {
                stderr
            }));
        }
        if output.stdout.is_empty() {
            return Err(RenderError::Conversion(
                "converter produced no output".to_string(),
            ));
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl ReportRenderer for HtmlPdfRenderer {
    async fn render(&self, view: &ReportView) -> Result<Vec<u8>, RenderError> {
        let converter = self.converter.as_deref().ok_or(RenderError::ConverterMissing)?;
        let html = self.render_html(view)?;
        let pdf = self.convert(converter, &html).await?;
        tracing::info!(
            session_id = %view.session_id,
            bytes = pdf.len(),
            "pdf report rendered"
        );
        Ok(pdf)
    }
}

/// Whole dollars with thousands separators, e.g. `$12,500`.
pub fn format_money(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if amount < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

fn money_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let amount = value
        .as_f64()
        .ok_or_else(|| tera::Error::msg("money filter expects a number"))?;
    Ok(tera::Value::String(format_money(amount.round() as i64)))
}

fn template_error(err: tera::Error) -> RenderError {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    RenderError::Template(message)
}
