//! Command-line interface implementation for daystart.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for daystart.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "daystart: quickly scaffold new programming projects with pre-configured templates",
    long_about = None,
    after_help = "Projects are created as <dir>/<YYYYMMDD>-<name> and opened in your editor.\n\
                  Run with --list to see every language and template, or with\n\
                  --generate-template <DIR> to export the bundled templates for editing."
)]
pub struct Args {
    /// Project name(s) to create; defaults to a single dated project
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,

    /// Base directory where new projects are created
    #[arg(short, long, default_value = "~/daystart", value_name = "DIR")]
    pub dir: String,

    /// Path to a templates catalog file (uses the bundled catalog if not specified)
    #[arg(short, long, value_name = "FILE")]
    pub templates: Option<PathBuf>,

    /// Path to a user configuration file (uses the bundled one if not specified)
    #[arg(short, long, value_name = "FILE")]
    pub user_config: Option<PathBuf>,

    /// Programming language to use (e.g. go, python, rust)
    #[arg(short, long, default_value = "go", value_name = "LANG")]
    pub lang: String,

    /// Template to use (e.g. basic, webserver, flask)
    #[arg(short = 'T', long, default_value = "basic", value_name = "TEMPLATE")]
    pub template: String,

    /// List available languages and templates
    #[arg(long)]
    pub list: bool,

    /// Export the bundled templates to a directory for customization
    #[arg(short, long, value_name = "DIR")]
    pub generate_template: Option<PathBuf>,

    /// Override the author name from the user configuration
    #[arg(long, value_name = "NAME")]
    pub author: Option<String>,

    /// Override the copyright line from the user configuration
    #[arg(long, value_name = "TEXT")]
    pub copyright: Option<String>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Returns
/// * `Args` - Parsed command line arguments
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help()
                    .unwrap();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
