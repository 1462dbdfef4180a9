//! Two-tier resource resolution for daystart.
//! A logical resource name (the catalog document, the user profile, or a
//! template file body) is looked up on the filesystem first and falls back
//! to the bundled, read-only resource set compiled into the binary, so the
//! tool works with zero external files present.

use crate::constants::TEMPLATES_PREFIX;
use crate::error::{Error, Result};
use log::debug;
use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

/// Default resource set shipped inside the binary.
#[derive(RustEmbed)]
#[folder = "resources/"]
struct Bundled;

/// Resolves a logical resource name to bytes.
///
/// Resolution order, first success wins:
/// 1. the explicit filesystem path, when supplied and present, verbatim;
/// 2. the bundled resource of the same logical name.
///
/// # Errors
/// * `Error::ResourceNotFound` when neither tier yields the resource
pub fn resolve(logical_name: &str, override_path: Option<&Path>) -> Result<Cow<'static, [u8]>> {
    if let Some(path) = override_path {
        if path.is_file() {
            debug!("reading '{}' from {}", logical_name, path.display());
            return Ok(Cow::Owned(fs::read(path)?));
        }
    }

    match Bundled::get(logical_name) {
        Some(file) => {
            debug!("reading bundled '{}'", logical_name);
            Ok(file.data)
        }
        None => Err(Error::ResourceNotFound { logical_name: logical_name.to_string() }),
    }
}

/// Resolves template file bodies, optionally rooted at a user-supplied
/// override set.
///
/// The override base is the directory holding a user-supplied catalog
/// document; template sources are looked up under its `templates/`
/// subdirectory before falling back to the bundled set.
pub struct TemplateStore {
    override_base: Option<PathBuf>,
}

impl TemplateStore {
    /// Creates a store from the catalog document path the user supplied,
    /// if any.
    pub fn new(catalog_path: Option<&Path>) -> Self {
        let override_base = catalog_path.and_then(Path::parent).map(Path::to_path_buf);
        Self { override_base }
    }

    /// Reads a template source declared in the catalog.
    pub fn read(&self, source: &str) -> Result<Cow<'static, [u8]>> {
        let logical_name = format!("{}/{}", TEMPLATES_PREFIX, source);
        let override_path =
            self.override_base.as_ref().map(|base| base.join(TEMPLATES_PREFIX).join(source));
        resolve(&logical_name, override_path.as_deref())
    }
}

/// Copies every bundled resource into a real directory tree, preserving
/// relative paths, so the user can bootstrap an editable override set.
/// A pure walk-and-copy; nothing is rendered.
pub fn export_bundled<P: AsRef<Path>>(target_dir: P) -> Result<()> {
    let target_dir = target_dir.as_ref();
    fs::create_dir_all(target_dir)?;

    for name in Bundled::iter() {
        let file = Bundled::get(&name)
            .ok_or_else(|| Error::ResourceNotFound { logical_name: name.to_string() })?;
        let dest = target_dir.join(name.as_ref());
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&dest, file.data.as_ref())?;
        debug!("exported {}", dest.display());
    }

    Ok(())
}
