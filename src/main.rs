use clap::{Parser, Subcommand};
use docblog::{config, output, site, topics};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docblog")]
#[command(about = "Content layer for a minimal documentation and blog site")]
#[command(long_about = "\
Content layer for a minimal documentation and blog site

Your filesystem is the data source. Markdown files under content/docs become
documentation pages, files under content/blog become posts, and folders become
topics and sidebar groups.

Site structure:

  .
  ├── config.toml                      # Site config (optional)
  └── content/
      ├── docs/
      │   ├── index.md                 # Site root page (slug: index)
      │   ├── _partials/               # Underscore prefix = ignored
      │   └── tutorials/               # Folder = topic + sidebar group
      │       └── getting-started.md   # slug: tutorials/getting-started
      └── blog/
          ├── hello-world.md           # Needs title + date
          └── devlog/
              └── week-1.md

Front matter is YAML between --- fences or TOML between +++ fences.

Run 'docblog gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site root (holds config.toml and the content directory)
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate config and content, then list every entry
    Check,
    /// List curated topics and topics derived from the docs folders
    Topics,
    /// Look up a single curated topic by slug
    Topic {
        /// Topic slug, e.g. "devlog"
        slug: String,
    },
    /// Print the resolved sidebar
    Sidebar {
        /// Include draft pages
        #[arg(long)]
        drafts: bool,
    },
    /// Write the site manifest as JSON
    Manifest {
        /// Include draft pages and posts
        #[arg(long)]
        drafts: bool,
        /// Output path, relative to the site root unless absolute
        #[arg(long, default_value = site::DEFAULT_MANIFEST_PATH)]
        out: PathBuf,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site = site::load_site(&cli.source)?;
            warn_if_no_content(&site.content_dir);
            output::print_check_output(&site, &cli.source);
            println!("==> Content is valid");
        }
        Command::Topics => {
            let config = config::load_config(&cli.source)?;
            let content_dir = config.content_path(&cli.source);
            warn_if_no_content(&content_dir);
            let derived = topics::doc_topics_from_collection(&content_dir)?;
            output::print_topics(&topics::doc_topics(), &topics::blog_topics(), &derived);
        }
        Command::Topic { slug } => {
            println!(
                "{}",
                output::format_topic_lookup(&slug, topics::topic_by_slug(&slug))
            );
        }
        Command::Sidebar { drafts } => {
            let manifest = site::build_manifest(&cli.source, drafts)?;
            output::print_sidebar(&manifest.sidebar);
        }
        Command::Manifest { drafts, out } => {
            println!("==> Loading {}", cli.source.display());
            let site = site::load_site(&cli.source)?;
            warn_if_no_content(&site.content_dir);
            let manifest = site.into_manifest(drafts);
            let out = site::manifest_path(&cli.source, &out);

            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&out, json)?;
            println!("{}", output::format_manifest_summary(&manifest, &out));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// A missing content directory is an empty site, which is rarely intended.
fn warn_if_no_content(content_dir: &std::path::Path) {
    if !content_dir.is_dir() {
        eprintln!(
            "warning: content directory {} does not exist",
            content_dir.display()
        );
    }
}
