//! Catalog model for daystart.
//! Strict structural decoding of the languages/templates document and the
//! user profile, plus key lookup and the user-facing listing.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt::Write;

/// The full language/template definition set loaded at startup.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    pub languages: IndexMap<String, LanguageEntry>,
}

/// A single language with its display name, file extension and templates.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LanguageEntry {
    pub name: String,
    pub file_extension: String,
    pub templates: IndexMap<String, TemplateDef>,
}

/// One project template: the files it writes, in order, and the steps it
/// runs afterwards, in order. The first file is the project's entry point.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TemplateDef {
    pub name: String,
    pub description: String,
    pub files: Vec<FileSpec>,
    pub post_create_steps: Vec<PostStep>,
}

/// Maps a template source file (relative to the templates root) to its
/// destination (relative to the new project directory).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSpec {
    pub source: String,
    pub dest: String,
}

/// An action run after all template files are written.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PostStep {
    /// Run a child process; every element is template-rendered first.
    Exec { command: Vec<String> },
    /// Delete a project-relative path; a missing target is already satisfied.
    Remove { path: String },
}

/// Flat user identity record substituted into templates. No validation
/// beyond the fields being present.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserProfile {
    pub author: String,
    pub copyright: String,
    pub email: String,
    pub organization: String,
}

/// Decodes a templates catalog document.
///
/// # Errors
/// * `Error::Parse` for any structural mismatch: missing required fields,
///   unknown fields, or a malformed document. Nothing is defaulted.
pub fn parse_catalog(bytes: &[u8]) -> Result<Catalog> {
    serde_json::from_slice(bytes)
        .map_err(|source| Error::Parse { document: "templates catalog".to_string(), source })
}

/// Decodes a user profile document.
///
/// # Errors
/// * `Error::Parse` for any structural mismatch.
pub fn parse_profile(bytes: &[u8]) -> Result<UserProfile> {
    serde_json::from_slice(bytes)
        .map_err(|source| Error::Parse { document: "user configuration".to_string(), source })
}

impl Catalog {
    /// Looks up a language by key.
    ///
    /// # Errors
    /// * `Error::UnknownLanguage` if the key is not in the catalog
    pub fn language(&self, key: &str) -> Result<&LanguageEntry> {
        self.languages
            .get(key)
            .ok_or_else(|| Error::UnknownLanguage { language: key.to_string() })
    }

    /// Looks up a template under a language, validating both keys.
    ///
    /// # Errors
    /// * `Error::UnknownLanguage` / `Error::UnknownTemplate` on a missing key
    pub fn template(
        &self,
        language_key: &str,
        template_key: &str,
    ) -> Result<(&LanguageEntry, &TemplateDef)> {
        let language = self.language(language_key)?;
        let template =
            language.templates.get(template_key).ok_or_else(|| Error::UnknownTemplate {
                language: language_key.to_string(),
                template: template_key.to_string(),
            })?;
        Ok((language, template))
    }

    /// Renders the `--list` output: languages and templates sorted by key
    /// so the listing is reproducible regardless of document order.
    pub fn listing(&self) -> String {
        let mut out = String::new();
        out.push_str("Available Languages and Templates:\n");
        out.push_str("==================================\n");

        let mut language_keys: Vec<&String> = self.languages.keys().collect();
        language_keys.sort();

        for key in language_keys {
            let language = &self.languages[key];
            let heading = format!("{} ({})", language.name, key);
            let _ = writeln!(out, "\n{}", heading);
            let _ = writeln!(out, "{}", "-".repeat(heading.len()));

            let mut template_keys: Vec<&String> = language.templates.keys().collect();
            template_keys.sort();
            for template_key in template_keys {
                let template = &language.templates[template_key];
                let _ = writeln!(out, "  {:<15} - {}", template_key, template.description);
            }
        }

        out.push_str("\nUsage: daystart --lang <language> --template <template> [NAME]\n");
        out
    }
}
