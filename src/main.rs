
use indicatif::ParallelProgressIterator;
use log::{LevelFilter, debug, error, info};
use rayon::prelude::*;
use std::time::Instant;

use realign::aligner::{realign_with_config, RealignError};
use realign::cli::batch::{BatchSettings, check_batch_settings};
use realign::cli::core::{Commands, get_cli};
use realign::cli::pair::{PairSettings, check_pair_settings};
use realign::data_types::alignment::Alignment;
use realign::data_types::hsp_pair::HspPair;
use realign::parsing::hsp_pairs::load_hsp_pairs;
use realign::util::file_io::save_json;
use realign::util::progress_bar::get_progress_style;
use realign::writers::realign_summary::RealignSummaryWriter;

/// Sets up logging before we check any of the other settings
fn init_logging(verbosity: u8) {
    let filter_level: LevelFilter = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();
}

fn run_pair(settings: PairSettings) {
    // start the timer
    let start_time = Instant::now();
    init_logging(settings.verbosity);

    let (settings, config) = match check_pair_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };

    let src = settings.source.as_bytes();
    let tgt = settings.target.as_bytes();
    let alignment = match realign_with_config(src, tgt, &config) {
        Ok(a) => a,
        Err(e) => {
            error!("Error while realigning pair: {e}");
            std::process::exit(exitcode::OSERR);
        }
    };

    let stats = alignment.stats();
    let padded = alignment.padded(src, tgt, config.scoring());
    info!("Score: {}", alignment.score());
    info!("CIGAR: {}", alignment.cigar());
    info!("Aligned span: source 0..{}, target 0..{}", alignment.src_end(), alignment.tgt_end());
    info!("Stats: {stats:?}");
    info!("Identity: {:?}", stats.identity());
    info!("Alignment:");
    info!("\t{}", padded.source);
    info!("\t{}", padded.midline);
    info!("\t{}", padded.target);
    for segment in alignment.segments() {
        debug!("Segment: {segment:?}");
    }

    info!("Realignment completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn run_batch(settings: BatchSettings) {
    // start the timer
    let start_time = Instant::now();
    init_logging(settings.verbosity);

    let (settings, config) = match check_batch_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };

    // set up the number of threads for rayon
    match rayon::ThreadPoolBuilder::new().num_threads(settings.threads).build_global() {
        Ok(()) => {},
        Err(e) => {
            error!("Error while building thread pool: {e}");
            std::process::exit(exitcode::OSERR);
        }
    };

    // create a debug folder if specified and save the settings there
    if let Some(debug_folder) = settings.debug_folder.as_ref() {
        info!("Creating debug folder at {debug_folder:?}...");
        if let Err(e) = std::fs::create_dir_all(debug_folder) {
            error!("Error while creating debug folder: {e}");
            std::process::exit(exitcode::IOERR);
        }

        let cli_json = debug_folder.join("cli_settings.json");
        info!("Saving CLI options to {cli_json:?}...");
        if let Err(e) = save_json(&settings, &cli_json) {
            error!("Error while saving CLI options: {e:#}");
            std::process::exit(exitcode::IOERR);
        }

        let config_json = debug_folder.join("aligner_config.json");
        info!("Saving aligner configuration to {config_json:?}...");
        if let Err(e) = save_json(&config, &config_json) {
            error!("Error while saving aligner configuration: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    }

    info!("Loading HSP pairs...");
    let all_pairs: Vec<HspPair> = match load_hsp_pairs(&settings.input_fn) {
        Ok(p) => p,
        Err(e) => {
            error!("Error while loading HSP pairs: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    };
    info!("Loaded {} pairs.", all_pairs.len());

    let mut summary_writer = match RealignSummaryWriter::new(&settings.output_fn) {
        Ok(w) => w,
        Err(e) => {
            error!("Error while opening summary writer: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    };

    // every pair gets its own DP table, so they can all run independently
    let style = get_progress_style();
    info!("Realigning pairs...");
    let all_results: Vec<(HspPair, Result<Alignment, RealignError>)> = all_pairs.into_par_iter()
        .map(|pair| {
            let result = pair.realign(&config);
            match result.as_ref() {
                Ok(alignment) => debug!("{}: score={}, cigar={}", pair.pair_id(), alignment.score(), alignment.cigar()),
                Err(e) => error!("Error while realigning {}: {e}", pair.pair_id())
            };
            (pair, result)
        })
        .progress_with_style(style)
        .collect();
    info!("Realignment complete, saving outputs...");

    for (pair, result) in all_results.iter() {
        if let Err(e) = summary_writer.write_result(pair, result) {
            error!("Error while writing summary row: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    }
    if let Err(e) = summary_writer.flush() {
        error!("Error while flushing summary: {e:#}");
        std::process::exit(exitcode::IOERR);
    }

    info!("Aligned:failed pairs: {} : {}", summary_writer.aligned_pairs(), summary_writer.failed_pairs());
    info!("Batch completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn main() {
    let cli = get_cli();
    match cli.command {
        Commands::Pair(settings) => {
            run_pair(*settings);
        },
        Commands::Batch(settings) => {
            run_batch(*settings);
        }
    }

    info!("Process finished successfully.");
}
