use anyhow::{Context, Result, bail};
use cheatsheet_impose::{
    CheatSheetOptions, CheatSheetStatistics, Grid, ImpositionJob, InputFile, NUp, SheetSide,
    calculate_statistics, plan, statistics_for,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cheatsheet",
    about = "Pack lecture slides into duplex N-up cheat sheets",
    version
)]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a cheat-sheet PDF
    Impose {
        /// Input PDF file(s), in order
        #[arg(short, long, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Page range per input, paired by position (e.g. "1-3,5"; "" for all)
        #[arg(long)]
        pages: Vec<String>,

        /// Output PDF file [default: cheatsheet-<N>-in-1.pdf]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pages per side: 2, 4, 6 or 9 [default: 6]
        #[arg(long, value_parser = parse_layout)]
        layout: Option<NUp>,

        /// Output paper size [default: a4]
        #[arg(long, value_enum)]
        paper: Option<PaperArg>,

        /// Output orientation [default: auto]
        #[arg(long, value_enum)]
        orientation: Option<OrientationArg>,

        /// Sheet margin in mm [default: 5]
        #[arg(long)]
        margin: Option<f32>,

        /// Gap between cells in mm [default: 3]
        #[arg(long)]
        spacing: Option<f32>,

        /// Cell border [default: normal]
        #[arg(long, value_enum)]
        border: Option<BorderArg>,

        /// Scaling mode [default: fit]
        #[arg(long, value_enum)]
        scaling: Option<ScalingArg>,

        /// Turn pages whose orientation differs from their cell
        #[arg(long)]
        auto_rotate: bool,

        /// Label each cell with its page number
        #[arg(long)]
        page_numbers: bool,

        /// Note printed at the bottom of every face
        #[arg(long)]
        note: Option<String>,

        /// Start from options stored in a JSON file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the effective options to a JSON file
        #[arg(long)]
        save_config: Option<PathBuf>,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Print the sheet grids for a page count
    Plan {
        /// Number of pages in the sequence
        #[arg(long)]
        pages: usize,

        /// Pages per side: 2, 4, 6 or 9
        #[arg(long, default_value = "6", value_parser = parse_layout)]
        layout: NUp,
    },

    /// Print statistics for a page count
    Stats {
        /// Number of pages in the sequence
        #[arg(long)]
        pages: usize,

        /// Pages per side: 2, 4, 6 or 9
        #[arg(long, default_value = "6", value_parser = parse_layout)]
        layout: NUp,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Auto,
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum BorderArg {
    None,
    Light,
    Normal,
    Thick,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScalingArg {
    Fit,
    Fill,
}

impl From<PaperArg> for cheatsheet_impose::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<OrientationArg> for cheatsheet_impose::OrientationMode {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Auto => Self::Auto,
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl From<BorderArg> for cheatsheet_impose::BorderStyle {
    fn from(arg: BorderArg) -> Self {
        match arg {
            BorderArg::None => Self::None,
            BorderArg::Light => Self::Light,
            BorderArg::Normal => Self::Normal,
            BorderArg::Thick => Self::Thick,
        }
    }
}

impl From<ScalingArg> for cheatsheet_impose::ScalingMode {
    fn from(arg: ScalingArg) -> Self {
        match arg {
            ScalingArg::Fit => Self::Fit,
            ScalingArg::Fill => Self::Fill,
        }
    }
}

fn parse_layout(value: &str) -> Result<NUp, String> {
    let cells: usize = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    NUp::try_from(cells).map_err(|e| e.to_string())
}

fn print_statistics(stats: &CheatSheetStatistics) {
    println!("Cheat Sheet Statistics:");
    println!("  Source pages: {}", stats.source_pages);
    println!("  Output sheets: {}", stats.output_sheets);
    println!("  Output pages: {}", stats.output_pages);
    println!("  Blank cells: {}", stats.blank_cells);
    println!("  Paper saved: {}%", stats.paper_saved_percent);
}

fn print_grid(side: SheetSide, grid: &Grid) {
    println!("  {:?}:", side);
    for row in grid.row_slices() {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                Some(page) => format!("{:>4}", page),
                None => format!("{:>4}", "."),
            })
            .collect();
        println!("  {}", cells.concat());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();

    match cli.command {
        Commands::Plan { pages, layout } => {
            if pages == 0 {
                bail!("--pages must be at least 1");
            }
            let plan = plan(pages, layout);
            println!("{} pages, {}: {} sheet(s)", pages, layout, plan.len());
            for (i, sheet) in plan.sheets().iter().enumerate() {
                println!("Sheet {}", i + 1);
                print_grid(SheetSide::Front, &sheet.front);
                print_grid(SheetSide::Back, &sheet.back);
            }
        }

        Commands::Stats { pages, layout } => {
            let stats = statistics_for(pages, layout)?;
            print_statistics(&stats);
        }

        Commands::Impose {
            input,
            pages,
            output,
            layout,
            paper,
            orientation,
            margin,
            spacing,
            border,
            scaling,
            auto_rotate,
            page_numbers,
            note,
            config,
            save_config,
            stats_only,
        } => {
            let mut options = match &config {
                Some(path) => CheatSheetOptions::load(path)
                    .await
                    .with_context(|| format!("Failed to read config: {}", path.display()))?,
                None => CheatSheetOptions::default(),
            };

            if pages.len() > input.len() {
                bail!(
                    "{} --pages values given for {} --input files",
                    pages.len(),
                    input.len()
                );
            }
            if !input.is_empty() {
                options.input_files = input
                    .into_iter()
                    .enumerate()
                    .map(|(i, path)| match pages.get(i) {
                        Some(range) if !range.trim().is_empty() => {
                            InputFile::with_range(path, range.clone())
                        }
                        _ => InputFile::new(path),
                    })
                    .collect();
            }

            if let Some(layout) = layout {
                options.layout = layout;
            }
            if let Some(paper) = paper {
                options.paper_size = paper.into();
            }
            if let Some(orientation) = orientation {
                options.orientation = orientation.into();
            }
            if let Some(margin) = margin {
                options.margin_mm = margin;
            }
            if let Some(spacing) = spacing {
                options.spacing_mm = spacing;
            }
            if let Some(border) = border {
                options.border = border.into();
            }
            if let Some(scaling) = scaling {
                options.scaling_mode = scaling.into();
            }
            options.auto_rotate |= auto_rotate;
            options.page_numbers |= page_numbers;
            if let Some(note) = note {
                options.margin_note = note;
            }

            options.validate()?;

            if let Some(path) = &save_config {
                options
                    .save(path)
                    .await
                    .with_context(|| format!("Failed to write config: {}", path.display()))?;
                log::info!("Saved options to {}", path.display());
            }

            let paths: Vec<PathBuf> = options
                .input_files
                .iter()
                .map(|file| file.path.clone())
                .collect();
            let documents = cheatsheet_impose::load_multiple_pdfs(&paths).await?;

            let output = output.unwrap_or_else(|| PathBuf::from(options.default_output_name()));

            let render = move || -> cheatsheet_impose::Result<Option<_>> {
                let job = ImpositionJob::new(&documents, &options)?;
                print_statistics(&calculate_statistics(job.plan()));

                if stats_only {
                    return Ok(None);
                }
                job.run(|done, total| log::info!("Rendered sheet {}/{}", done, total))
                    .map(Some)
            };
            let imposed = tokio::task::spawn_blocking(render).await??;

            let Some(imposed) = imposed else {
                return Ok(());
            };
            cheatsheet_impose::save_pdf(imposed, &output)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Cheat sheet → {}", output.display());
        }
    }

    Ok(())
}
