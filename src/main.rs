//! Deckgen - slide layout and snapshot versioning from the terminal.
//!
//! Plans YAML deck definitions onto a fixed slide geometry and keeps a
//! numbered history of every generated artifact.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use deckgen::deck::{self, DeckPlanner, DeckRenderer, JsonPlanRenderer};
use deckgen::i18n::{FontRole, FontSelector, Language, LanguageStats};
use deckgen::layout::{EmuRect, LayoutEngine, Rect};
use deckgen::versions::VersionManager;
use deckgen::Config;

/// Slide layout and snapshot versioning
#[derive(Parser)]
#[command(name = "deckgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the default locations
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Snapshot directory, overrides [versions] dir
    #[arg(long, global = true, env = "DECKGEN_VERSIONS_DIR")]
    versions_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a deck definition and write the plan
    Build {
        /// YAML deck definition
        definition: PathBuf,

        /// Output file (defaults to <output_dir>/<name>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Save the result as a new snapshot
        #[arg(short, long)]
        snapshot: bool,

        /// Snapshot note
        #[arg(short, long, default_value = "build", requires = "snapshot")]
        note: String,
    },

    /// Show placement rectangles for the configured slide
    Layout {
        #[command(subcommand)]
        operation: LayoutOperation,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text", global = true)]
        format: String,
    },

    /// Manage artifact snapshots
    Versions {
        #[command(subcommand)]
        operation: VersionsOperation,
    },

    /// Detect the language of a piece of text
    Detect {
        /// Text to analyse
        #[arg(required = true)]
        text: Vec<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show font recommendations
    Fonts {
        /// Language (ja, en, mixed); all when omitted
        language: Option<Language>,
    },

    /// Show configuration
    Config {
        /// Show config directory path only
        #[arg(long)]
        path: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Layout queries.
#[derive(Subcommand)]
enum LayoutOperation {
    /// Content area below the title band
    Content,

    /// Fit an image of the given size (inches) into the content area
    Center {
        /// Image width
        #[arg(allow_negative_numbers = true)]
        width: f64,

        /// Image height
        #[arg(allow_negative_numbers = true)]
        height: f64,

        /// Fill the content area instead of preserving the aspect ratio
        #[arg(long)]
        stretch: bool,
    },

    /// Two equal columns
    Columns,

    /// Equal grid cells
    Grid {
        /// Number of rows
        rows: usize,

        /// Number of columns
        cols: usize,
    },
}

/// Snapshot operations.
#[derive(Subcommand)]
enum VersionsOperation {
    /// Save a file as the next version
    Save {
        /// Artifact to snapshot
        path: PathBuf,

        /// Short note stored in the file name
        #[arg(short, long, default_value = deckgen::versions::DEFAULT_NOTE)]
        note: String,
    },

    /// Save a file as a backup snapshot
    Backup {
        /// Artifact to snapshot
        path: PathBuf,
    },

    /// List all versions
    List {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Print the snapshot path of a version (latest when omitted)
    Show {
        /// Version number
        #[arg(id = "version_number", value_name = "VERSION")]
        version: Option<u32>,
    },

    /// Show the latest version
    Latest,

    /// Compare two versions
    Compare {
        /// First version
        v1: u32,

        /// Second version
        v2: u32,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Copy a version back to a destination path
    Rollback {
        /// Version number
        #[arg(id = "version_number", value_name = "VERSION")]
        version: u32,

        /// Where to restore the snapshot
        destination: PathBuf,
    },

    /// Print the full history
    History,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Build { definition, output, snapshot, note } => {
            let config = Config::load_or_default(cli.config.as_deref())?;
            let snapshot_note = snapshot.then_some(note.as_str());
            cmd_build(&config, cli.versions_dir.as_deref(), &definition, output, snapshot_note)?;
        }
        Commands::Layout { operation, format } => {
            let config = Config::load_or_default(cli.config.as_deref())?;
            cmd_layout(&config, operation, &format)?;
        }
        Commands::Versions { operation } => {
            let config = Config::load_or_default(cli.config.as_deref())?;
            cmd_versions(&config, cli.versions_dir.as_deref(), operation)?;
        }
        Commands::Detect { text, format } => {
            cmd_detect(&text.join(" "), &format)?;
        }
        Commands::Fonts { language } => {
            cmd_fonts(language);
        }
        Commands::Config { path } => {
            cmd_config(cli.config.as_deref(), path)?;
        }
        Commands::Completions { shell } => {
            cmd_completions(shell);
        }
    }

    Ok(())
}

/// Open the snapshot history, honouring `--versions-dir`.
fn open_versions(config: &Config, dir_override: Option<&Path>) -> Result<VersionManager> {
    let dir = dir_override.map_or_else(|| config.versions.resolved_dir(), Path::to_path_buf);
    VersionManager::open(&dir, &config.versions.base_name, config.versions.extension.clone())
        .with_context(|| format!("Failed to open versions directory {}", dir.display()))
}

/// Plan a deck and optionally snapshot the result.
fn cmd_build(
    config: &Config,
    versions_dir: Option<&Path>,
    definition: &Path,
    output: Option<PathBuf>,
    snapshot_note: Option<&str>,
) -> Result<()> {
    let planner = DeckPlanner::from_config(config).context("Invalid [slide] configuration")?;
    let renderer = JsonPlanRenderer::default();

    let output = output.unwrap_or_else(|| {
        let stem = definition.file_stem().map_or_else(|| "deck".into(), |s| s.to_string_lossy());
        PathBuf::from(&config.deck.output_dir).join(format!("{stem}.{}", renderer.extension()))
    });

    let plan = deck::build(definition, &output, &planner, None, &renderer)
        .with_context(|| format!("Failed to build {}", definition.display()))?;

    println!(
        "Built {} ({} slides, {} elements, {})",
        output.display(),
        plan.slides.len(),
        plan.element_count(),
        plan.language
    );

    if let Some(note) = snapshot_note {
        let mut manager = open_versions(config, versions_dir)?;
        let path = manager.save_version(&output, note)?;
        let number = manager.latest_version().map_or(0, |v| v.number);
        println!("Saved version {number}: {}", path.display());
    }

    Ok(())
}

/// A rectangle in both unit systems.
#[derive(Serialize)]
struct Placement {
    name: String,
    rect: Rect,
    emu: EmuRect,
}

impl Placement {
    fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self { name: name.into(), rect, emu: rect.to_emu() }
    }
}

/// Print layout rectangles.
fn cmd_layout(config: &Config, operation: LayoutOperation, format: &str) -> Result<()> {
    let engine = LayoutEngine::new(config.slide).context("Invalid [slide] configuration")?;

    let placements = match operation {
        LayoutOperation::Content => vec![Placement::new("content", engine.content_area())],
        LayoutOperation::Center { width, height, stretch } => {
            vec![Placement::new("image", engine.center_image(width, height, !stretch))]
        }
        LayoutOperation::Columns => {
            let (left, right) = engine.two_column_layout();
            vec![Placement::new("left", left), Placement::new("right", right)]
        }
        LayoutOperation::Grid { rows, cols } => engine
            .grid_layout(rows, cols)?
            .into_iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.into_iter()
                    .enumerate()
                    .map(move |(c, rect)| Placement::new(format!("cell[{r}][{c}]"), rect))
            })
            .collect(),
    };

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&placements)?;
            println!("{json}");
        }
        _ => {
            for p in &placements {
                println!(
                    "{:<12} left={:.3} top={:.3} width={:.3} height={:.3}  (emu {} {} {} {})",
                    p.name,
                    p.rect.left,
                    p.rect.top,
                    p.rect.width,
                    p.rect.height,
                    p.emu.left,
                    p.emu.top,
                    p.emu.width,
                    p.emu.height
                );
            }
        }
    }

    Ok(())
}

/// Handle snapshot operations.
fn cmd_versions(config: &Config, versions_dir: Option<&Path>, operation: VersionsOperation) -> Result<()> {
    let mut manager = open_versions(config, versions_dir)?;

    match operation {
        VersionsOperation::Save { path, note } => {
            let saved = manager.save_version(&path, &note)?;
            let number = manager.latest_version().map_or(0, |v| v.number);
            println!("Saved version {number}: {}", saved.display());
        }
        VersionsOperation::Backup { path } => {
            let saved = manager.create_backup(&path)?;
            println!("Backup saved: {}", saved.display());
        }
        VersionsOperation::List { format } => {
            let versions = manager.list_versions();
            match format.as_str() {
                "json" => {
                    let json = serde_json::to_string_pretty(versions)?;
                    println!("{json}");
                }
                _ => {
                    for v in versions {
                        println!("v{:<4} {}  {:<24} {}", v.number, v.timestamp, v.note, v.path.display());
                    }
                    println!("\nTotal: {} versions", versions.len());
                }
            }
        }
        VersionsOperation::Show { version } => {
            let Some(path) = manager.load_version(version) else {
                match version {
                    Some(n) => anyhow::bail!("Version {n} not found"),
                    None => anyhow::bail!("No versions found"),
                }
            };
            println!("{}", path.display());
        }
        VersionsOperation::Latest => {
            let latest = manager.latest_version().context("No versions found")?;
            println!("Version {}", latest.number);
            println!("  Timestamp: {}", latest.timestamp);
            println!("  Note:      {}", latest.note);
            println!("  Path:      {}", latest.path.display());
        }
        VersionsOperation::Compare { v1, v2, format } => {
            let comparison = manager.compare_versions(v1, v2)?;
            match format.as_str() {
                "json" => {
                    let json = serde_json::to_string_pretty(&comparison)?;
                    println!("{json}");
                }
                _ => {
                    println!("Version {} vs Version {}", v1, v2);
                    println!("  Size:      {} -> {} bytes", comparison.size1, comparison.size2);
                    println!(
                        "  Change:    {:+} bytes ({:+.2}%)",
                        comparison.size_diff, comparison.size_change_percent
                    );
                    for (n, present) in [(v1, comparison.v1_present), (v2, comparison.v2_present)] {
                        if !present {
                            println!("  Missing:   version {n} snapshot file");
                        }
                    }
                    match comparison.identical {
                        Some(true) => println!("  Content:   identical"),
                        Some(false) => println!("  Content:   different"),
                        None => {}
                    }
                }
            }
        }
        VersionsOperation::Rollback { version, destination } => {
            if !manager.rollback(version, &destination) {
                anyhow::bail!("Rollback to version {version} failed");
            }
            println!("Restored version {version} to {}", destination.display());
        }
        VersionsOperation::History => {
            print!("{}", manager.history_report());
        }
    }

    Ok(())
}

/// Print language statistics.
fn cmd_detect(text: &str, format: &str) -> Result<()> {
    let stats = LanguageStats::of(text);

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&stats)?;
            println!("{json}");
        }
        _ => {
            println!("Language: {}", stats.detected_language);
            println!(
                "  Japanese: {} (hiragana {}, katakana {}, kanji {})",
                stats.japanese_total, stats.hiragana, stats.katakana, stats.kanji
            );
            println!("  Latin:    {}", stats.latin);
            println!(
                "  Ratios:   japanese {:.2}, latin {:.2}",
                stats.japanese_ratio, stats.latin_ratio
            );
        }
    }

    Ok(())
}

/// Print font tables.
fn cmd_fonts(language: Option<Language>) {
    let selector = FontSelector::default();
    let languages = language.map_or_else(|| Language::all().to_vec(), |l| vec![l]);

    for language in languages {
        println!("[{language}]");
        for role in FontRole::FAMILY_ROLES {
            println!(
                "  {:<10} {:>2}pt  {}",
                role.name(),
                selector.recommend_size(language, role),
                selector.with_fallbacks(language, role).join(", ")
            );
        }
    }
}

/// Show configuration.
fn cmd_config(config_path: Option<&Path>, show_path: bool) -> Result<()> {
    if show_path {
        if let Some(path) = Config::config_dir() {
            println!("{}", path.display());
        }
        return Ok(());
    }

    let config = Config::load_or_default(config_path)?;
    let toml = toml::to_string_pretty(&config)?;
    println!("{toml}");

    Ok(())
}

fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "deckgen", &mut io::stdout());
}
