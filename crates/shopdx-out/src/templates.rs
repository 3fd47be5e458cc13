//! Template loading for report rendering
//!
//! A templates file holds named handlebars templates, one per output format:
//!
//! ```yaml
//! version: "1.0"
//! templates:
//!   text:
//!     description: Plain terminal report
//!     template: "{{shop.name}}: {{grade.code}}"
//! ```

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::RenderError;

const BUILTIN_YAML: &str = include_str!("../templates/report-templates.yaml");

static BUILTIN: Lazy<Result<TemplatesFile, String>> =
    Lazy::new(|| TemplatesFile::from_yaml(BUILTIN_YAML).map_err(|e| e.to_string()));

#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesFile {
    pub version: String,
    pub templates: BTreeMap<String, Template>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Template {
    pub description: String,
    pub template: String,
}

impl TemplatesFile {
    /// Templates shipped with the crate
    pub fn builtin() -> Result<Self, RenderError> {
        BUILTIN.clone().map_err(RenderError::Template)
    }

    pub fn load(path: &str) -> Result<Self, RenderError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RenderError::Template(format!("cannot read {}: {}", path, e)))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, RenderError> {
        serde_yaml::from_str(yaml).map_err(|e| RenderError::Template(e.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    pub fn list_templates(&self) -> Vec<&str> {
        self.templates.keys().map(|s| s.as_str()).collect()
    }
}
