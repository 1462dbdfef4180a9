//! Core materialization pipeline for daystart.
//! Orchestrates one project creation: allocate the directory, render and
//! write each template file in declared order, then run the post-create
//! steps in declared order. Fail fast, no rollback: an abort leaves the
//! directory and any already-written files on disk.

use crate::allocator::allocate;
use crate::catalog::{Catalog, FileSpec, PostStep, UserProfile};
use crate::constants::DEFAULT_PROJECT_PREFIX;
use crate::error::{Error, Result};
use crate::renderer::{RenderContext, TemplateRenderer};
use crate::resources::TemplateStore;
use chrono::NaiveDate;
use log::{debug, warn};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::process::{Command, Stdio};

/// A finished materialization: where the project landed and which file
/// the editor should open first.
#[derive(Debug)]
pub struct Materialized {
    pub root: PathBuf,
    /// Destination of the first file in the template, if it has any.
    pub entry_file: Option<PathBuf>,
}

/// Materializes projects from catalog templates.
///
/// Every collaborator is an immutable borrow passed in at construction;
/// two materializers in one process cannot observe each other's state.
pub struct Materializer<'a> {
    engine: &'a dyn TemplateRenderer,
    store: &'a TemplateStore,
    catalog: &'a Catalog,
    profile: &'a UserProfile,
}

impl<'a> Materializer<'a> {
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        store: &'a TemplateStore,
        catalog: &'a Catalog,
        profile: &'a UserProfile,
    ) -> Self {
        Self { engine, store, catalog, profile }
    }

    /// Creates one project directory from the named template.
    ///
    /// `today` is fixed by the caller (one clock read per materialization)
    /// and feeds both the directory name and the `Date` render field.
    /// With no project name, a dated default name is used for both the
    /// directory and the `ProjectName` field.
    pub fn materialize(
        &self,
        language_key: &str,
        template_key: &str,
        project_name: Option<&str>,
        base_dir: &Path,
        today: NaiveDate,
    ) -> Result<Materialized> {
        let (_, template) = self.catalog.template(language_key, template_key)?;

        let (project_name, dir_name) = match project_name {
            Some(name) => {
                (name.to_string(), format!("{}-{}", today.format("%Y%m%d"), name))
            }
            None => {
                let name =
                    format!("{}-{}", DEFAULT_PROJECT_PREFIX, today.format("%Y%m%d"));
                (name.clone(), name)
            }
        };

        let root = allocate(base_dir.join(dir_name))?;
        fs::create_dir_all(&root)?;
        debug!("created project directory {}", root.display());

        let context = RenderContext::new(&project_name, today, self.profile);

        for file in &template.files {
            self.write_file(&root, file, &context)?;
        }

        for step in &template.post_create_steps {
            self.run_step(&root, step, &context)?;
        }

        let entry_file = template.files.first().map(|file| root.join(&file.dest));

        Ok(Materialized { root, entry_file })
    }

    /// Resolves, renders and writes a single template file.
    fn write_file(&self, root: &Path, file: &FileSpec, context: &RenderContext) -> Result<()> {
        let dest = project_relative(root, &file.dest)?;

        let bytes = self.store.read(&file.source)?;
        let text = std::str::from_utf8(&bytes)
            .map_err(|_| Error::InvalidEncoding { template: file.source.clone() })?;
        let rendered = self.engine.render(text, context)?;

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&dest, rendered)?;
        debug!("created {}", dest.display());
        Ok(())
    }

    fn run_step(&self, root: &Path, step: &PostStep, context: &RenderContext) -> Result<()> {
        match step {
            PostStep::Remove { path } => {
                let target = project_relative(root, path)?;
                remove_path(&target);
                Ok(())
            }
            PostStep::Exec { command } => {
                let argv = command
                    .iter()
                    .map(|arg| self.engine.render(arg, context))
                    .collect::<Result<Vec<_>>>()?;
                let Some((program, args)) = argv.split_first() else {
                    return Err(Error::EmptyCommand);
                };

                debug!("executing: {}", argv.join(" "));

                // Commands run relative to the project root; the
                // process-wide working directory is never touched.
                let status = Command::new(program)
                    .args(args)
                    .current_dir(root)
                    .stdout(Stdio::null())
                    .stderr(Stdio::inherit())
                    .status()
                    .map_err(|e| Error::StepFailed {
                        command: argv.join(" "),
                        reason: e.to_string(),
                    })?;

                if !status.success() {
                    return Err(Error::StepFailed {
                        command: argv.join(" "),
                        reason: format!("exited with {}", status),
                    });
                }
                Ok(())
            }
        }
    }
}

/// Joins a catalog-declared path onto the project root, rejecting
/// absolute paths and anything that would traverse above the root.
fn project_relative(root: &Path, declared: &str) -> Result<PathBuf> {
    let declared_path = Path::new(declared);
    let stays_inside = !declared.is_empty()
        && !declared_path.is_absolute()
        && declared_path.components().all(|c| matches!(c, Component::Normal(_)));
    if !stays_inside {
        return Err(Error::InvalidDestination { dest: declared.to_string() });
    }
    Ok(root.join(declared_path))
}

/// Deletes a remove-step target. A missing target is already satisfied;
/// any other failure is a warning, never an abort.
fn remove_path(target: &Path) {
    let removed =
        if target.is_dir() { fs::remove_dir(target) } else { fs::remove_file(target) };
    match removed {
        Ok(()) => debug!("removed {}", target.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("{} already absent", target.display());
        }
        Err(e) => warn!("couldn't remove {}: {}", target.display(), e),
    }
}
