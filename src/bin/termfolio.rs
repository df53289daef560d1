//! CLI binary for termfolio.
//!
//! A thin shim over the library crate that maps CLI flags to a
//! `ContentConfig` and prints rendered output or JSON catalogs.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use termfolio::{ContentConfig, ContentStore};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Render one document as terminal art
  termfolio render blog/hello-world.md

  # List the blog catalog (newest first)
  termfolio blog

  # Search posts mentioning rust in title, excerpt or tags
  termfolio blog --search rust

  # Portfolio projects using a given technology, as JSON
  termfolio portfolio --tech postgres --json

  # Show the reflowed resume, or save the PDF itself
  termfolio resume
  termfolio resume --download resume.pdf

  # Raw file listing under the content root
  termfolio ls blog

ENVIRONMENT VARIABLES:
  TERMFOLIO_ROOT        Content root directory (default: content)
  TERMFOLIO_RESUME_PDF  Path to the resume PDF (default: content/resume.pdf)
  RUST_LOG              Log filter, e.g. termfolio=debug
"#;

/// Render Markdown content collections as box-drawing terminal art.
#[derive(Parser, Debug)]
#[command(
    name = "termfolio",
    version,
    about = "Render Markdown content collections as box-drawing terminal art",
    after_help = AFTER_HELP
)]
struct Cli {
    /// Content root directory.
    #[arg(long, global = true, env = "TERMFOLIO_ROOT", default_value = "content")]
    root: PathBuf,

    /// Path to the resume PDF.
    #[arg(
        long,
        global = true,
        env = "TERMFOLIO_RESUME_PDF",
        default_value = "content/resume.pdf"
    )]
    resume_pdf: PathBuf,

    /// Remote image fetch timeout in seconds.
    #[arg(long, global = true, default_value_t = 30)]
    fetch_timeout: u64,

    /// Verbose logging (-v: debug, -vv: trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a document to terminal art.
    Render {
        /// Logical path under the content root, e.g. blog/hello-world.md.
        path: String,
    },
    /// List file names under a logical directory.
    Ls {
        /// Logical directory under the content root.
        path: String,
    },
    /// List or search the blog catalog.
    Blog {
        /// Case-insensitive search over title, excerpt and tags.
        #[arg(long)]
        search: Option<String>,
        /// Emit the catalog as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List or filter the portfolio catalog.
    Portfolio {
        /// Case-insensitive filter over technology tokens.
        #[arg(long)]
        tech: Option<String>,
        /// Emit the catalog as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show the reflowed resume, or save the PDF.
    Resume {
        /// Write the raw PDF to this path instead of rendering text.
        #[arg(long, value_name = "FILE")]
        download: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ContentConfig::builder()
        .content_root(&cli.root)
        .resume_pdf(&cli.resume_pdf)
        .fetch_timeout_secs(cli.fetch_timeout)
        .build()
        .context("invalid configuration")?;
    let store = ContentStore::new(config);

    match cli.command {
        Command::Render { path } => {
            let art = store
                .render_document(&path)
                .await
                .with_context(|| format!("failed to render '{path}'"))?;
            println!("{art}");
        }
        Command::Ls { path } => {
            for name in store
                .list_directory(&path)
                .await
                .with_context(|| format!("failed to list '{path}'"))?
            {
                println!("{name}");
            }
        }
        Command::Blog { search, json } => {
            let posts = match search {
                Some(term) => store.search_blogs(&term).await,
                None => store.blog_catalog().await,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
            } else {
                for post in &posts {
                    let date = post
                        .published
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "        --".to_string());
                    println!(
                        "{}  {}  {}",
                        dim(&date),
                        bold(&post.title),
                        dim(&post.tags.join(", "))
                    );
                    if !post.excerpt.is_empty() {
                        println!("            {}", post.excerpt);
                    }
                }
                eprintln!("{}", dim(&format!("{} post(s)", posts.len())));
            }
        }
        Command::Portfolio { tech, json } => {
            let projects = match tech {
                Some(term) => store.filter_portfolio(&term).await,
                None => store.portfolio_catalog().await,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&projects)?);
            } else {
                for project in &projects {
                    println!(
                        "{}  {}  {}",
                        bold(&project.title),
                        dim(&project.company),
                        dim(&project.year)
                    );
                    if !project.technologies.is_empty() {
                        println!("  {}", project.technologies.join(" · "));
                    }
                }
                eprintln!("{}", dim(&format!("{} project(s)", projects.len())));
            }
        }
        Command::Resume { download } => match download {
            Some(out) => {
                let bytes = store
                    .resume_attachment()
                    .await
                    .context("failed to read resume PDF")?;
                let mut file = std::fs::File::create(&out)
                    .with_context(|| format!("failed to create '{}'", out.display()))?;
                file.write_all(&bytes)?;
                eprintln!("Wrote {} bytes to {}", bytes.len(), out.display());
            }
            None => {
                let text = store
                    .resume_text()
                    .await
                    .context("failed to extract resume text")?;
                println!("{text}");
            }
        },
    }

    Ok(())
}

fn init_logging(verbosity: u8) {
    let default_filter = match verbosity {
        0 => "termfolio=warn",
        1 => "termfolio=debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}
