//! Template rendering for diagnosis reports.
//!
//! Uses Handlebars with HTML escaping turned off (output is text or
//! markdown) and these helpers:
//! - fixed: number with a fixed number of decimals
//! - percent: fraction as a whole percentage (0.25 -> "25%")
//! - bar: 0-100 score as a ten-cell bar
//! - pad: left-align a string in a column
//! - upper: uppercase a string

use handlebars::{handlebars_helper, no_escape, Handlebars};
use serde::Serialize;

use crate::templates::TemplatesFile;
use crate::RenderError;

handlebars_helper!(fixed: |value: f64, digits: u64| format!("{:.*}", digits as usize, value));

handlebars_helper!(percent: |value: f64| format!("{:.0}%", value * 100.0));

handlebars_helper!(bar: |score: f64| score_bar(score));

handlebars_helper!(pad: |text: str, width: u64| format!("{:<w$}", text, w = width as usize));

handlebars_helper!(upper: |text: str| text.to_uppercase());

const BAR_CELLS: usize = 10;

/// Ten-cell bar, one filled cell per 10 points
pub fn score_bar(score: f64) -> String {
    let filled = ((score.clamp(0.0, 100.0) / 10.0).round() as usize).min(BAR_CELLS);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_CELLS - filled))
}

/// Compiled templates with helpers registered
pub struct TemplateRenderer<'a> {
    handlebars: Handlebars<'a>,
    templates: TemplatesFile,
}

impl<'a> TemplateRenderer<'a> {
    pub fn new(templates: TemplatesFile) -> Result<Self, RenderError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(no_escape);

        handlebars.register_helper("fixed", Box::new(fixed));
        handlebars.register_helper("percent", Box::new(percent));
        handlebars.register_helper("bar", Box::new(bar));
        handlebars.register_helper("pad", Box::new(pad));
        handlebars.register_helper("upper", Box::new(upper));

        for (name, template) in &templates.templates {
            handlebars
                .register_template_string(name, &template.template)
                .map_err(|e| RenderError::Template(format!("{}: {}", name, e)))?;
        }

        Ok(TemplateRenderer {
            handlebars,
            templates,
        })
    }

    pub fn load(path: &str) -> Result<Self, RenderError> {
        Self::new(TemplatesFile::load(path)?)
    }

    pub fn render<T: Serialize>(
        &self,
        template_name: &str,
        data: &T,
    ) -> Result<String, RenderError> {
        if self.templates.get(template_name).is_none() {
            return Err(RenderError::UnknownTemplate(template_name.to_string()));
        }
        Ok(self.handlebars.render(template_name, data)?)
    }

    /// Render a template string that is not part of the templates file
    pub fn render_string<T: Serialize>(
        &self,
        template: &str,
        data: &T,
    ) -> Result<String, RenderError> {
        Ok(self.handlebars.render_template(template, data)?)
    }

    pub fn list_templates(&self) -> Vec<&str> {
        self.templates.list_templates()
    }
}
