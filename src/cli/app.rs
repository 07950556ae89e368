//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{query, report};

#[derive(Parser)]
#[command(name = "corpus")]
#[command(author, version, about = "Front-matter indexer and validator for Markdown content")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the corpus index and print it with diagnostics
    Build {
        /// Corpus root (defaults to current directory)
        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// Validate the corpus and report rejections and conflicts
    Check {
        /// Corpus root (defaults to current directory)
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Exit with failure when any rejection or conflict exists
        #[arg(long)]
        strict: bool,
    },

    /// List posts newest first
    List {
        /// Corpus root (defaults to current directory)
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Only posts carrying this tag
        #[arg(long)]
        tag: Option<String>,

        /// Only featured posts
        #[arg(long)]
        featured: bool,
    },

    /// Show one post's metadata by slug
    Show {
        /// Post slug
        slug: String,

        /// Corpus root (defaults to current directory)
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// List all tags with post counts
    Tags {
        /// Corpus root (defaults to current directory)
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("Corpus CLI starting");

    match cli.command {
        Commands::Build { dir } => report::build(&output, &dir)?,

        Commands::Check { dir, strict } => report::check(&output, &dir, strict)?,

        Commands::List { dir, tag, featured } => {
            output.verbose_ctx(
                "list",
                &format!("Listing posts, tag: {:?}, featured: {}", tag, featured),
            );
            query::list(&output, &dir, tag.as_deref(), featured)?
        }

        Commands::Show { slug, dir } => {
            output.verbose_ctx("show", &format!("Looking up slug: {}", slug));
            query::show(&output, &dir, &slug)?
        }

        Commands::Tags { dir } => query::tags(&output, &dir)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
