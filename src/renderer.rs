//! Template rendering for daystart.
//! Substitutes the fixed context field set into template text with
//! MiniJinja; a placeholder naming any other field is a rendering error.

use crate::catalog::UserProfile;
use crate::error::{Error, Result};
use chrono::NaiveDate;
use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

/// The only fields ever substituted into templates. Built once per
/// materialization so repeated rendering within one run is stable.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RenderContext {
    pub project_name: String,
    pub date: String,
    pub author: String,
    pub copyright: String,
    pub email: String,
    pub organization: String,
}

impl RenderContext {
    /// Builds the context from the project name, a fixed date and the
    /// user profile.
    pub fn new(project_name: &str, today: NaiveDate, profile: &UserProfile) -> Self {
        Self {
            project_name: project_name.to_string(),
            date: today.format("%Y-%m-%d").to_string(),
            author: profile.author.clone(),
            copyright: profile.copyright.clone(),
            email: profile.email.clone(),
            organization: profile.organization.clone(),
        }
    }
}

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Errors
    /// * `Error::Render` if the template is malformed or references a
    ///   field outside the [`RenderContext`] set
    fn render(&self, template: &str, context: &RenderContext) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
///
/// The environment runs with strict undefined behavior: looking up an
/// unknown placeholder fails instead of rendering an empty string.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, template: &str, context: &RenderContext) -> Result<String> {
        self.env.render_str(template, context).map_err(Error::Render)
    }
}
