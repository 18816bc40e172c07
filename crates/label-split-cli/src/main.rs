use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use label_split::{GridConfig, LabelPreset, SplitStatistics};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "labelsplit", about = "Cut label sheet PDFs into one page per label", version)]
struct Cli {
    /// Log every processed and skipped grid cell
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split every page of a label sheet PDF into one page per label
    Split {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file (default: <input>_split.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        grid: GridArgs,
    },

    /// Show which regions would be extracted, without writing anything
    Plan {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        grid: GridArgs,
    },

    /// Write a copy of one page with the label grid drawn over it
    Overlay {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Page to preview (1-based)
        #[arg(long, default_value = "1")]
        page: usize,

        #[command(flatten)]
        grid: GridArgs,
    },

    /// Write a grid configuration file
    InitConfig {
        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,

        /// Label sheet layout to start from
        #[arg(long, default_value = "standard", value_enum)]
        preset: PresetArg,
    },
}

/// Grid geometry options shared by the commands that read a PDF.
///
/// Values are layered: preset, then config file, then individual flags.
#[derive(Args)]
struct GridArgs {
    /// JSON grid configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Label sheet layout to start from
    #[arg(long, value_enum)]
    preset: Option<PresetArg>,

    /// Label width in mm
    #[arg(long)]
    label_width: Option<f32>,

    /// Label height in mm
    #[arg(long)]
    label_height: Option<f32>,

    /// Left margin in mm
    #[arg(long)]
    margin_left: Option<f32>,

    /// Top margin in mm
    #[arg(long)]
    margin_top: Option<f32>,

    /// Right margin in mm (recorded, not used for bounds)
    #[arg(long)]
    margin_right: Option<f32>,

    /// Bottom margin in mm (recorded, not used for bounds)
    #[arg(long)]
    margin_bottom: Option<f32>,

    /// Gap between columns in mm
    #[arg(long)]
    spacing_h: Option<f32>,

    /// Gap between rows in mm
    #[arg(long)]
    spacing_v: Option<f32>,

    /// Rows per page
    #[arg(long)]
    rows: Option<usize>,

    /// Columns per page
    #[arg(long)]
    cols: Option<usize>,

    /// Rows used on the last page
    #[arg(long, conflicts_with = "no_last_page_override")]
    last_page_rows: Option<usize>,

    /// Use the regular row count on the last page too
    #[arg(long)]
    no_last_page_override: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PresetArg {
    /// 75 × 30 mm labels
    Standard,
    /// 58 × 40 mm labels
    Compact,
}

impl From<PresetArg> for LabelPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Standard => Self::Standard,
            PresetArg::Compact => Self::Compact,
        }
    }
}

impl GridArgs {
    /// Build the grid configuration from preset, config file and flags
    async fn resolve(&self) -> Result<GridConfig> {
        let mut config = match &self.config {
            Some(path) => GridConfig::load(path)
                .await
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => LabelPreset::from(self.preset.unwrap_or(PresetArg::Standard)).config(),
        };
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply(&self, config: &mut GridConfig) {
        if let Some(v) = self.label_width {
            config.label_width_mm = v;
        }
        if let Some(v) = self.label_height {
            config.label_height_mm = v;
        }
        if let Some(v) = self.margin_left {
            config.margins.left_mm = v;
        }
        if let Some(v) = self.margin_top {
            config.margins.top_mm = v;
        }
        if let Some(v) = self.margin_right {
            config.margins.right_mm = v;
        }
        if let Some(v) = self.margin_bottom {
            config.margins.bottom_mm = v;
        }
        if let Some(v) = self.spacing_h {
            config.spacing.horizontal_mm = v;
        }
        if let Some(v) = self.spacing_v {
            config.spacing.vertical_mm = v;
        }
        if let Some(v) = self.rows {
            config.rows = v;
        }
        if let Some(v) = self.cols {
            config.cols = v;
        }
        if self.no_last_page_override {
            config.last_page_rows = None;
        } else if let Some(v) = self.last_page_rows {
            config.last_page_rows = Some(v);
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn print_statistics(stats: &SplitStatistics) {
    println!("Split Statistics:");
    println!("  Source pages: {}", stats.source_pages);
    println!("  Grid cells: {}", stats.candidate_cells);
    println!("  Labels: {}", stats.labels);
    println!("  Skipped cells: {}", stats.skipped);
}

async fn load_input(input: &Path) -> Result<lopdf::Document> {
    label_split::ensure_input_file(input).await?;
    label_split::load_pdf(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Split {
            input,
            output,
            grid,
        } => {
            let config = grid.resolve().await?;
            label_split::ensure_input_file(&input).await?;
            let output = output.unwrap_or_else(|| label_split::default_output_path(&input));

            let stats = label_split::split_into_tiles(&input, &output, &config).await?;
            print_statistics(&stats);
            println!("Split → {}", output.display());
        }

        Commands::Plan { input, grid } => {
            let config = grid.resolve().await?;
            let source = load_input(&input).await?;
            let plan = label_split::plan_split(&source, &config)?;

            for page in &plan.pages {
                println!(
                    "Page {} ({:.2} x {:.2} pt, {} rows):",
                    page.page_index + 1,
                    page.frame.width(),
                    page.frame.height(),
                    page.rows
                );
                for rect in &page.rects {
                    println!("  label    {}", rect);
                }
                for rejected in &page.rejected {
                    println!("  skipped  {} ({})", rejected.cell.rect, rejected.reason);
                }
            }
            print_statistics(&SplitStatistics::from(&plan));
        }

        Commands::Overlay {
            input,
            output,
            page,
            grid,
        } => {
            let config = grid.resolve().await?;
            let source = load_input(&input).await?;
            let page_index = page
                .checked_sub(1)
                .context("Pages are numbered from 1")?;

            let preview = label_split::generate_overlay_preview(&source, &config, page_index)?;
            label_split::save_pdf(preview, &output).await?;
            println!("Overlay of page {} → {}", page, output.display());
        }

        Commands::InitConfig { output, preset } => {
            let config = LabelPreset::from(preset).config();
            config.save(&output).await?;
            println!("Wrote {} config → {}", LabelPreset::from(preset).name(), output.display());
        }
    }

    Ok(())
}
