//! daystart's main application entry point and orchestration logic.
//! Parses arguments, loads the catalog and profile through the resource
//! resolver, and materializes each requested project in turn.

use std::path::PathBuf;

use chrono::{Datelike, Local};
use daystart::{
    catalog::{parse_catalog, parse_profile, UserProfile},
    cli::{get_args, Args},
    constants::{CATALOG_RESOURCE, PROFILE_RESOURCE},
    editor,
    error::{default_error_handler, Error, Result},
    logger::init_logger,
    processor::Materializer,
    renderer::MiniJinjaRenderer,
    resources::{self, TemplateStore},
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Export mode copies the bundled resources to disk and stops
/// 2. The catalog loads through the resolver (override or bundled)
/// 3. List mode prints the catalog listing and stops
/// 4. The profile loads, then CLI overrides are applied
/// 5. Each requested project is materialized fully, then handed to the
///    editor, before the next begins
fn run(args: Args) -> Result<()> {
    if let Some(target) = &args.generate_template {
        resources::export_bundled(target)?;
        println!("Bundled templates exported to: {}", target.display());
        println!(
            "Edit them there, then run daystart --templates {}/templates.json",
            target.display()
        );
        return Ok(());
    }

    let catalog_bytes = resources::resolve(CATALOG_RESOURCE, args.templates.as_deref())?;
    let catalog = parse_catalog(&catalog_bytes)?;

    if args.list {
        print!("{}", catalog.listing());
        return Ok(());
    }

    // An unknown language or template aborts before any directory is touched.
    let (language, _) = catalog.template(&args.lang, &args.template)?;
    let language_name = language.name.clone();

    let profile_bytes = resources::resolve(PROFILE_RESOURCE, args.user_config.as_deref())?;
    let mut profile = parse_profile(&profile_bytes)?;
    apply_profile_overrides(&mut profile, &args);

    let base_dir = PathBuf::from(shellexpand::tilde(&args.dir).into_owned());
    let store = TemplateStore::new(args.templates.as_deref());
    let engine = MiniJinjaRenderer::new();
    let materializer = Materializer::new(&engine, &store, &catalog, &profile);

    let requested: Vec<Option<&str>> = if args.names.is_empty() {
        vec![None]
    } else {
        args.names.iter().map(|name| Some(name.as_str())).collect()
    };

    let mut failed = false;
    for name in requested {
        // One clock read per materialization.
        let today = Local::now().date_naive();

        match materializer.materialize(&args.lang, &args.template, name, &base_dir, today) {
            Ok(project) => {
                if let Err(err) = editor::open_project(&project.root, project.entry_file.as_deref())
                {
                    log::warn!("couldn't open editor: {}", err);
                }
                println!("Created {} project in: {}", language_name, project.root.display());
            }
            // Suffix exhaustion means the base directory itself is in a
            // pathological state; stop the whole batch.
            Err(err @ Error::AllocationExhausted { .. }) => return Err(err),
            Err(err) => {
                eprintln!("{}", err);
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

/// Applies `--author`/`--copyright` overrides. When no user configuration
/// file was given and the bundled placeholder profile is still in effect,
/// the current user fills in the author and a dated copyright line.
fn apply_profile_overrides(profile: &mut UserProfile, args: &Args) {
    let current_user =
        std::env::var("USER").or_else(|_| std::env::var("USERNAME")).ok();

    if let Some(author) = &args.author {
        profile.author = author.clone();
    } else if args.user_config.is_none() && profile.author == "Your Name" {
        if let Some(user) = &current_user {
            profile.author = user.clone();
        }
    }

    if let Some(copyright) = &args.copyright {
        profile.copyright = copyright.clone();
    } else if args.user_config.is_none() && profile.copyright.contains("Your Name") {
        if let Some(user) = &current_user {
            let year = Local::now().year();
            profile.copyright =
                format!("Copyright (c) {} {}. All rights reserved.", year, user);
        }
    }
}
