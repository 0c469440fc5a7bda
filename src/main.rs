//! CLI entry point for blogbuild

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blogbuild")]
#[command(version)]
#[command(about = "Builds a static blog from Markdown articles and two HTML templates", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new blog
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new article
    New {
        /// Title of the new article
        title: String,

        /// File name for the article (defaults to the slugified title)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Build the blog
    #[command(aliases = ["generate", "g"])]
    Build {
        /// Read articles from this directory instead of the configured one
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Write the site to this directory instead of the configured one
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Remove the output directory
    Clean,

    /// List articles in publication order
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blogbuild=debug,info"
    } else {
        "blogbuild=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run(cli).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("reading current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing blog in {:?}", target_dir);
            blogbuild::commands::init::init_site(&target_dir).await?;
            println!("Initialized blog in {:?}", target_dir);
        }

        Commands::New { title, path } => {
            let blog = blogbuild::Blog::new(&base_dir)?;
            tracing::info!("Creating new article with title: {}", title);
            let file = blogbuild::commands::new::create_article(&blog, &title, path.as_deref())
                .await?;
            println!("Created: {:?}", file);
        }

        Commands::Build { source, output } => {
            let mut blog = blogbuild::Blog::new(&base_dir)?;
            if let Some(source) = source {
                blog.set_source_dir(source);
            }
            if let Some(output) = output {
                blog.set_output_dir(output);
            }

            let summary = blog.build().await?;
            println!(
                "Built {} article(s) into {:?}",
                summary.generated.len(),
                blog.output_dir
            );
        }

        Commands::Clean => {
            let blog = blogbuild::Blog::new(&base_dir)?;
            tracing::info!("Cleaning output folder...");
            blog.clean().await?;
            println!("Cleaned successfully!");
        }

        Commands::List { json } => {
            let blog = blogbuild::Blog::new(&base_dir)?;
            blogbuild::commands::list::run(&blog, json).await?;
        }

        Commands::Version => {
            println!("blogbuild version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_build_without_templates_fails() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("resource/blog/articles")).unwrap();
        std::fs::write(
            dir.path().join("resource/blog/articles/a.md"),
            "---\ntitle: A\ndate: 2024-01-01\n---\n",
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            OsStr::new("blogbuild"),
            OsStr::new("--cwd"),
            dir.path().as_os_str(),
            OsStr::new("build"),
        ])
        .unwrap();

        assert!(run(cli).await.is_err());
        assert!(!dir.path().join("blog").exists());
    }

    #[tokio::test]
    async fn test_init_then_build_succeeds() {
        let dir = TempDir::new().unwrap();
        let cwd = dir.path().to_string_lossy().to_string();

        let init = Cli::try_parse_from(["blogbuild", "--cwd", &cwd, "init"]).unwrap();
        run(init).await.unwrap();

        let build = Cli::try_parse_from(["blogbuild", "--cwd", &cwd, "g"]).unwrap();
        run(build).await.unwrap();
        assert!(dir.path().join("blog/index.html").exists());
    }
}
