use clap::Parser;
use human_panic::setup_panic;
use indicatif::{ProgressBar, ProgressStyle};
use std::{
    fs,
    io::{stdin, stdout, IsTerminal},
    process::ExitCode,
    time::Instant,
};
use tracing::{debug, error};

use diagnoses_extractor::{
    display::{create_env, Phrasing, Renderer},
    game_data::GameDataLoader,
    run::process_departments,
};

/// A submodule that handles the command line arguments
mod args;
use args::Args;

/// The log filter used when `RUST_LOG` is not set
const DEFAULT_LOG_FILTER: &str = "diagnoses_extractor=warn";

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// Main function. This is the entry point of the program.
///
/// # Process
///
/// 1. Builds the four localization tables out of the `Localization` folder
/// 2. Builds the symptom catalog out of the `Symptoms` folder
/// 3. Writes the index of examinations and treatments
/// 4. Foreach selected department:
///     1. Assembles the diagnoses of the department's diagnosis file
///     2. Writes the department data file and the diagnosis report, backing
///        up the report of the previous run
/// 5. Prints the total number of diagnoses
///
/// Any error is reported and makes the program exit with a failure status.
/// An unterminated block only dooms the report of its own department, the
/// remaining departments are still processed, see [process_departments].
fn main() -> ExitCode {
    setup_panic!();
    init_tracing();
    let args = Args::parse();
    let interactive = stdin().is_terminal() && stdout().is_terminal() && !args.no_interaction;
    let start = Instant::now();
    //loading the game data
    let loader = GameDataLoader::new(&args.data_dir);
    let localization = match loader.load_localization() {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error loading localization: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let catalog = match loader.load_symptoms(&localization) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading symptoms: {}", e);
            return ExitCode::FAILURE;
        }
    };
    println!("Loaded {} symptoms", catalog.len());
    let phrasing = match &args.phrasing {
        Some(path) => match GameDataLoader::read_lines(path) {
            Ok(lines) => Phrasing::from_lines(&lines),
            Err(e) => {
                eprintln!("Error loading phrasing: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Phrasing::default(),
    };
    let format = args.format(interactive);
    let env = match create_env(args.templates.as_deref(), phrasing) {
        Ok(env) => env,
        Err(e) => {
            eprintln!("Error loading templates: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let renderer = match Renderer::new(&env, format, &args.output) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error preparing output: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = renderer.render_index(&catalog) {
        eprintln!("Error writing the index: {}", e);
        return ExitCode::FAILURE;
    }
    //assembling the departments
    let departments = args.departments();
    let bar_style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    let progress_bar = ProgressBar::new(departments.len() as u64);
    progress_bar.set_style(bar_style);
    let summary = match process_departments(
        &departments,
        &loader,
        &catalog,
        &localization,
        &renderer,
        &progress_bar,
    ) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut failed = !summary.is_complete();
    for e in &summary.skipped {
        eprintln!("{}", e);
        debug!(
            "skipped {}, {} diagnoses were assembled",
            e.department(),
            e.partial().len()
        );
    }
    for department in &summary.changed {
        println!("! Difference noticed in {} !", department.slug());
    }
    println!("Total diagnoses: {}", summary.total_diagnoses());
    if let Some(dump) = &args.dump {
        let written = serde_json::to_string_pretty(&summary.reports)
            .map_err(|e| e.to_string())
            .and_then(|json| fs::write(dump, json).map_err(|e| e.to_string()));
        if let Err(e) = written {
            error!("failed to dump to {}: {}", dump.display(), e);
            failed = true;
        }
    }
    debug!("finished in {:?}", start.elapsed());
    if interactive {
        if let Err(e) = open::that(renderer.get_path()) {
            error!("failed to open {}: {}", renderer.get_path().display(), e);
        }
    }
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
