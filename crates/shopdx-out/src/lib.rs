//! Shopdx Out: diagnosis report rendering
//!
//! Renders a `DiagnosisReport` as plain text, markdown (both through the
//! handlebars templates in `templates/report-templates.yaml`) or JSON.
//!
//! # Example
//!
//! ```ignore
//! use shopdx_out::{ReportFormat, ReportRenderer};
//!
//! let renderer = ReportRenderer::builtin()?;
//! println!("{}", renderer.render(&report, ReportFormat::Markdown)?);
//! ```

pub mod renderer;
pub mod templates;
pub mod view;

use renderer::TemplateRenderer;
use shopdx_core::DiagnosisReport;
use std::fmt;
use std::str::FromStr;
use templates::TemplatesFile;
use thiserror::Error;
use view::ReportView;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("TEMPLATE/{0}")]
    Template(String),

    #[error("TEMPLATE/unknown template '{0}'")]
    UnknownTemplate(String),

    #[error("RENDER/{0}")]
    Render(#[from] handlebars::RenderError),

    #[error("SERIALIZE/{0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

impl ReportFormat {
    fn template_name(&self) -> Option<&'static str> {
        match self {
            ReportFormat::Text => Some("text"),
            ReportFormat::Markdown => Some("markdown"),
            ReportFormat::Json => None,
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown format '{}' (expected text, markdown or json)", other)),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Markdown => write!(f, "markdown"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

/// Renders reports in every supported format
pub struct ReportRenderer {
    templates: TemplateRenderer<'static>,
}

impl ReportRenderer {
    pub fn builtin() -> Result<Self, RenderError> {
        Self::with_templates(TemplatesFile::builtin()?)
    }

    /// Custom templates; they must define `text` and `markdown`
    pub fn with_templates(templates: TemplatesFile) -> Result<Self, RenderError> {
        for required in ["text", "markdown"] {
            if templates.get(required).is_none() {
                return Err(RenderError::UnknownTemplate(required.to_string()));
            }
        }
        Ok(Self {
            templates: TemplateRenderer::new(templates)?,
        })
    }

    pub fn render(
        &self,
        report: &DiagnosisReport,
        format: ReportFormat,
    ) -> Result<String, RenderError> {
        match format.template_name() {
            Some(name) => self.templates.render(name, &ReportView::from(report)),
            None => Ok(serde_json::to_string_pretty(report)?),
        }
    }

    /// Several reports; JSON becomes one array, text formats are concatenated
    pub fn render_all(
        &self,
        reports: &[DiagnosisReport],
        format: ReportFormat,
    ) -> Result<String, RenderError> {
        if format == ReportFormat::Json {
            return Ok(serde_json::to_string_pretty(reports)?);
        }
        let rendered = reports
            .iter()
            .map(|r| self.render(r, format))
            .collect::<Result<Vec<_>, _>>()?;
        let separator = match format {
            ReportFormat::Markdown => "\n\n---\n\n",
            _ => "\n\n",
        };
        Ok(rendered.join(separator))
    }
}

/// Quick render with the built-in templates
pub fn render(report: &DiagnosisReport, format: ReportFormat) -> Result<String, RenderError> {
    ReportRenderer::builtin()?.render(report, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!("md".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert!("pdf".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::default().to_string(), "text");
    }

    #[test]
    fn test_custom_templates_need_both_formats() {
        let only_text = TemplatesFile::from_yaml(
            "version: \"1\"\ntemplates:\n  text:\n    description: t\n    template: \"x\"\n",
        )
        .unwrap();
        assert!(matches!(
            ReportRenderer::with_templates(only_text),
            Err(RenderError::UnknownTemplate(name)) if name == "markdown"
        ));
    }
}
