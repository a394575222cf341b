use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use file_index::{
    invoke, DirectoryEntry, DirectoryLister, ListingRenderer, ListingRequest, RealFileSystem,
    RenderConfig, ShortcodeArgs, SiteRoots,
};

const SITE_PATH_ENV: &str = "FILE_INDEX_SITE_PATH";
const INSTALL_ROOT_ENV: &str = "FILE_INDEX_INSTALL_ROOT";
const DOCUMENT_ROOT_ENV: &str = "DOCUMENT_ROOT";

#[derive(Parser, Debug)]
#[command(name = "file-index")]
#[command(about = "Generate an HTML listing of a directory", long_about = None)]
struct Cli {
    /// Without a command, the current directory is indexed as a full page
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Site root that requested directories are resolved against
    /// (defaults to $FILE_INDEX_SITE_PATH)
    #[arg(long, global = true)]
    site_path: Option<PathBuf>,

    /// Installation root, used when no site root is given
    /// (defaults to $FILE_INDEX_INSTALL_ROOT)
    #[arg(long, global = true)]
    install_root: Option<PathBuf>,

    /// Document root, the last fallback (defaults to $DOCUMENT_ROOT)
    #[arg(long, global = true)]
    document_root: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the listing of a directory
    Render {
        /// Directory relative to the site root (defaults to the current directory)
        #[arg(short, long)]
        dir: Option<String>,

        /// Maximum number of files to list
        #[arg(short, long)]
        max: Option<usize>,

        /// List files as well as directories
        #[arg(short, long)]
        files: bool,

        /// Wrap the listing in a complete HTML page
        #[arg(long)]
        full_page: bool,
    },

    /// Expand a shortcode such as `[file-index dir="wki"]`
    Shortcode {
        text: String,
    },

    /// Print the entries of a directory as text
    List {
        path: String,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,
    },
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn build_config(cli: &Cli) -> Result<RenderConfig> {
    let roots = SiteRoots {
        site_path: cli.site_path.clone().or_else(|| env_path(SITE_PATH_ENV)),
        install_root: cli.install_root.clone().or_else(|| env_path(INSTALL_ROOT_ENV)),
        document_root: cli.document_root.clone().or_else(|| env_path(DOCUMENT_ROOT_ENV)),
    };

    match roots.resolve() {
        Some(root) => log::info!("Using site root: {}", root.display()),
        None => log::debug!("No site root configured"),
    }

    let current_dir = std::env::current_dir()
        .context("Failed to get current directory")?;

    Ok(RenderConfig::default()
        .with_self_dir(current_dir)
        .with_roots(roots))
}

fn render_command(
    config: RenderConfig,
    dir: Option<String>,
    max: Option<usize>,
    files: bool,
    full_page: bool,
) -> Result<()> {
    let mut request = ListingRequest::for_directory(dir.unwrap_or_default()).with_files(files);
    if let Some(max) = max {
        request = request.with_max_items(max);
    }
    if full_page {
        request = request.with_full_page(true);
    }

    let renderer = ListingRenderer::new(RealFileSystem::new(), config);
    let html = renderer.render(&request)
        .context("Failed to render listing")?;

    print!("{}", html);
    Ok(())
}

fn shortcode_command(config: RenderConfig, text: &str) -> Result<()> {
    let args = ShortcodeArgs::parse(text);
    if args.is_none() {
        log::warn!("No file-index arguments in: {}", text);
    }

    let renderer = ListingRenderer::new(RealFileSystem::new(), config);
    println!("{}", invoke(&renderer, args.as_ref()));
    Ok(())
}

fn describe(entry: &DirectoryEntry) -> String {
    format!(
        "{} {:04o} {:>12} {} {}",
        if entry.is_directory { 'd' } else { '-' },
        entry.permissions & 0o7777,
        entry.size,
        entry.modified.format("%Y-%m-%d %H:%M"),
        entry.path.display()
    )
}

fn list_command(path: &str, recursive: bool) -> Result<()> {
    let lister = DirectoryLister::new(RealFileSystem::new());
    let listing = if recursive {
        lister.list_recursive(path)
    } else {
        lister.list(path)
    }
    .with_context(|| format!("Failed to list {}", path))?;

    for entry in listing.directories.iter().chain(listing.files.iter()) {
        println!("{}", describe(entry));
    }

    log::info!(
        "Listed {} directories and {} files",
        listing.directories.len(),
        listing.files.len()
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let log_level = if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .target(env_logger::Target::Stderr)
        .init();

    let config = build_config(&cli)?;

    match cli.command {
        None => render_command(config, None, None, false, true),
        Some(Commands::Render { dir, max, files, full_page }) => {
            render_command(config, dir, max, files, full_page)
        }
        Some(Commands::Shortcode { text }) => shortcode_command(config, &text),
        Some(Commands::List { path, recursive }) => list_command(&path, recursive),
    }
}
