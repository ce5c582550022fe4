use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fmt::Display;
use std::fs::File;
use std::path::{Path, PathBuf};

use setup_scout::config::{self, Config};
use setup_scout::runs::{self, Run, RunInput, RunStore};
use setup_scout::scoring::{self, ScoringConfig};
use setup_scout::stats::{self, TargetFilter};
use setup_scout::{identity, meet, output};

const EXIT_SUCCESS: i32 = 0;
const EXIT_IDENTITY: i32 = 1;
const EXIT_STORAGE: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Format {
    /// Aligned, human-readable output
    #[default]
    Table,
    /// Tab-separated, no header
    Tsv,
    /// Comma-separated with a header row
    Csv,
}

/// Measurements for one run
#[derive(Args, Debug, Default)]
struct RunArgs {
    /// Target distance in meters (omit for an untracked run)
    #[arg(long = "target")]
    target_m: Option<f64>,

    /// Measured distance from the target in centimeters
    #[arg(long = "distance")]
    distance_cm: Option<f64>,

    /// First timer reading in seconds
    #[arg(long)]
    time1: Option<f64>,

    /// Second timer reading in seconds
    #[arg(long)]
    time2: Option<f64>,

    /// Third timer reading in seconds
    #[arg(long)]
    time3: Option<f64>,

    /// Car angle in degrees
    #[arg(long = "angle")]
    angle_deg: Option<f64>,

    /// Dial turns
    #[arg(long = "dial")]
    dial_turns: Option<f64>,

    /// Winds
    #[arg(long)]
    winds: Option<f64>,

    /// The bucket bonus was earned
    #[arg(long)]
    bucket: bool,

    /// The run failed; score it at the worst-case distance
    #[arg(long)]
    failed: bool,

    /// A competition rule was violated
    #[arg(long)]
    competition_violation: bool,

    /// A construction rule was violated
    #[arg(long)]
    construction_violation: bool,
}

impl From<RunArgs> for RunInput {
    fn from(args: RunArgs) -> Self {
        RunInput {
            target_distance_m: args.target_m,
            vehicle_distance_cm: args.distance_cm,
            time1: args.time1,
            time2: args.time2,
            time3: args.time3,
            car_angle_deg: args.angle_deg,
            dial_turns: args.dial_turns,
            winds: args.winds,
            bucket_bonus: args.bucket,
            failed_run: args.failed,
            competition_violation: args.competition_violation,
            construction_violation: args.construction_violation,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a run and optionally save it
    Score {
        #[command(flatten)]
        run: RunArgs,

        /// Save the run to your history
        #[arg(long)]
        save: bool,

        /// Free-text notes stored with a saved run
        #[arg(long)]
        notes: Option<String>,
    },
    /// List your saved runs, oldest first
    List {
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Best and average scores per track, with the best setups
    Summary {
        /// Only include runs aimed at this target distance (meters)
        #[arg(long = "target")]
        target_m: Option<f64>,

        /// How far (meters) a run's target may be from --target
        #[arg(long = "tolerance")]
        tolerance_m: Option<f64>,

        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Delete one run by id or by its index in `list`
    Delete {
        /// Run id, or the 1-based index shown by `list`
        run: String,
    },
    /// Delete all of your runs
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Export your runs as CSV
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Rank teams in a meet on their best of two runs
    Meet {
        /// YAML meet sheet
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "setup-scout")]
#[command(about = "Score competition runs and find the best setup per track", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/setup-scout/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Competitor whose runs to use (overrides SETUP_SCOUT_USER and the config)
    #[arg(short, long, global = true)]
    user: Option<String>,

    /// Path to the run store (defaults to ~/.config/setup-scout/runs.json)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Everything a command needs after startup checks
struct Context {
    config: Config,
    scoring: ScoringConfig,
    user_flag: Option<String>,
    store_path: PathBuf,
}

impl Context {
    fn user(&self) -> String {
        identity::resolve_user(self.user_flag.clone(), &self.config)
            .unwrap_or_else(|e| exit_with(EXIT_IDENTITY, e))
    }

    fn load_store(&self) -> RunStore {
        runs::load_run_store(&self.store_path)
            .unwrap_or_else(|e| exit_with(EXIT_STORAGE, format!("Storage error: {:#}", e)))
    }

    fn save_store(&self, store: &RunStore) {
        if let Err(e) = runs::save_run_store(&self.store_path, store) {
            exit_with(EXIT_STORAGE, format!("Storage error: {:#}", e));
        }
    }
}

fn exit_with(code: i32, message: impl Display) -> ! {
    eprintln!("{}", message);
    std::process::exit(code);
}

fn main() {
    let cli = Cli::parse();
    setup_scout::logging::init(cli.verbose);

    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init = cli.command {
        if let Err(e) = config::init::run_init_wizard(config_path) {
            exit_with(EXIT_CONFIG, format!("Init failed: {:#}", e));
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => exit_with(EXIT_CONFIG, format!("Config error: {:#}", e)),
    };

    // Validate scoring config at startup
    let scoring = config.scoring.clone().unwrap_or_default();
    if let Err(errors) = scoring::validate_scoring(&scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    if let Some(tolerance) = config.tolerance_m {
        if let Err(e) = scoring::validate_tolerance(tolerance) {
            exit_with(EXIT_CONFIG, format!("Config error: {}", e));
        }
    }

    let store_path = config::resolve_store_path(cli.store, &config);
    log::debug!("Run store: {}", store_path.display());

    let ctx = Context {
        config,
        scoring,
        user_flag: cli.user,
        store_path,
    };

    match cli.command {
        Commands::Score { run, save, notes } => score(&ctx, run.into(), save, notes),
        Commands::List { format } => list(&ctx, format),
        Commands::Summary {
            target_m,
            tolerance_m,
            format,
        } => summary(&ctx, target_m, tolerance_m, format),
        Commands::Delete { run } => delete(&ctx, &run),
        Commands::Clear { yes } => clear(&ctx, yes),
        Commands::Export { output } => export(&ctx, output.as_deref()),
        Commands::Meet { file, format } => run_meet(&ctx, &file, format),
        Commands::Init => unreachable!("handled before config is loaded"),
    }

    std::process::exit(EXIT_SUCCESS);
}

fn score(ctx: &Context, input: RunInput, save: bool, notes: Option<String>) {
    let result = scoring::compute_score(&input, &ctx.scoring);
    let use_colors = output::should_use_colors();
    println!(
        "{}",
        output::format_score_detail(&result, ctx.scoring.base_score(), use_colors)
    );

    if !save {
        return;
    }

    let user = ctx.user();
    let mut store = ctx.load_store();
    let run = Run::from_result(&user, input, notes.unwrap_or_default(), &result);
    let id = run.id.clone();
    store.append(run);
    ctx.save_store(&store);

    println!();
    println!("Saved run {} for {}", id, user);
}

fn list(ctx: &Context, format: Format) {
    let user = ctx.user();
    let store = ctx.load_store();
    let sorted = runs::sort_chronological(store.runs_for(&user));
    log::debug!("{} runs for {}", sorted.len(), user);

    match format {
        Format::Table => println!(
            "{}",
            output::format_run_table(&sorted, output::should_use_colors())
        ),
        Format::Tsv => {
            if !sorted.is_empty() {
                println!("{}", output::format_run_tsv(&sorted));
            }
        }
        Format::Csv => write_stdout_csv(|out| output::write_runs_csv(out, &sorted)),
    }
}

fn summary(ctx: &Context, target_m: Option<f64>, tolerance_m: Option<f64>, format: Format) {
    if let Some(tolerance) = tolerance_m {
        if let Err(e) = scoring::validate_tolerance(tolerance) {
            exit_with(EXIT_CONFIG, e);
        }
        if target_m.is_none() {
            log::warn!("--tolerance has no effect without --target");
        }
    }

    let filter = target_m.map(|target_m| TargetFilter {
        target_m,
        tolerance_m: tolerance_m.or(ctx.config.tolerance_m),
    });

    let user = ctx.user();
    let store = ctx.load_store();
    let summary = stats::summarize(store.runs_for(&user), filter.as_ref());

    match format {
        Format::Table => println!(
            "{}",
            output::format_summary_table(&summary, output::should_use_colors())
        ),
        Format::Tsv => {
            if summary.is_no_matches() {
                eprintln!("No matching runs.");
            } else {
                println!("{}", output::format_summary_tsv(&summary));
            }
        }
        Format::Csv => write_stdout_csv(|out| output::write_summary_csv(out, &summary)),
    }
}

fn delete(ctx: &Context, selector: &str) {
    let user = ctx.user();
    let mut store = ctx.load_store();

    let id = {
        let sorted = runs::sort_chronological(store.runs_for(&user));
        runs::select_run(&sorted, selector).map(|run| run.id.clone())
    };
    let Some(id) = id else {
        exit_with(
            EXIT_CONFIG,
            format!("No run '{}' for {}. Use `list` to see ids and indices.", selector, user),
        );
    };

    if let Some(removed) = store.remove(&user, &id) {
        ctx.save_store(&store);
        println!(
            "Deleted run {} ({})",
            removed.id,
            output::format_score(removed.score)
        );
    }
}

fn clear(ctx: &Context, yes: bool) {
    let user = ctx.user();
    let mut store = ctx.load_store();
    let count = store.runs_for(&user).len();

    if count == 0 {
        println!("No runs to delete for {}.", user);
        return;
    }
    if !yes {
        exit_with(
            EXIT_CONFIG,
            format!("This deletes {} runs for {}. Re-run with --yes to confirm.", count, user),
        );
    }

    let removed = store.clear_user(&user);
    ctx.save_store(&store);
    println!("Deleted {} runs for {}.", removed, user);
}

fn export(ctx: &Context, path: Option<&Path>) {
    let user = ctx.user();
    let store = ctx.load_store();
    let sorted = runs::sort_chronological(store.runs_for(&user));

    match path {
        Some(path) => {
            let result = File::create(path)
                .map_err(anyhow::Error::from)
                .and_then(|file| output::write_runs_csv(file, &sorted));
            if let Err(e) = result {
                exit_with(
                    EXIT_STORAGE,
                    format!("Failed to export to {}: {:#}", path.display(), e),
                );
            }
            eprintln!("Exported {} runs to {}", sorted.len(), path.display());
        }
        None => write_stdout_csv(|out| output::write_runs_csv(out, &sorted)),
    }
}

fn run_meet(ctx: &Context, file: &Path, format: Format) {
    let sheet = match meet::load_meet_sheet(file) {
        Ok(s) => s,
        Err(e) => exit_with(EXIT_CONFIG, format!("Meet sheet error: {:#}", e)),
    };
    let results = meet::rank_meet(&sheet.teams, &ctx.scoring);

    match format {
        Format::Csv => write_stdout_csv(|out| output::write_meet_csv(out, &results)),
        Format::Table => println!(
            "{}",
            output::format_meet_table(&results, output::should_use_colors())
        ),
        Format::Tsv => {
            if results.is_empty() {
                eprintln!("No teams in meet sheet.");
            } else {
                println!("{}", output::format_meet_tsv(&results));
            }
        }
    }
}

fn write_stdout_csv<F>(write: F)
where
    F: FnOnce(std::io::StdoutLock<'static>) -> anyhow::Result<()>,
{
    if let Err(e) = write(std::io::stdout().lock()) {
        exit_with(EXIT_STORAGE, format!("Failed to write CSV: {:#}", e));
    }
}
