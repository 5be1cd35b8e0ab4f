use anyhow::Result;
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use speech_harvest::{
    read_urls, BatchRunner, CommandTranscriber, Config, DatasetWriter, LocalFetcher,
    MediaFetcher, MultiWindowPlanner, Transcriber, TranscriptFile, WholeClipPlanner,
    WindowPlanner, YtDlpFetcher,
};

/// Content-length strategy for window planning
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Long recordings: lead, random middle, energy peak, and tail
    /// windows
    Long,
    /// Short clips: one window over the whole duration
    Short,
}

#[derive(Parser)]
#[command(name = "speech-harvest")]
#[command(about = "Build a capped sentence dataset from a batch of recordings")]
struct Args {
    /// Newline-delimited list of source URLs
    url_list: String,

    /// Window planning strategy
    #[arg(short, long, value_enum, default_value = "long")]
    mode: Mode,

    /// Seed for the sampling RNG (reproducible runs)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Config file path (without extension)
    #[arg(short, long, default_value = "config/speech-harvest")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("speech-harvest v0.1.0");
    info!("URL list: {}", args.url_list);
    info!(
        "Sampling: window {}s, cap {}",
        cfg.sampling.window_secs, cfg.sampling.cap
    );

    let urls = read_urls(&args.url_list)?;

    let fetcher: Box<dyn MediaFetcher> = if cfg.fetch.offline {
        Box::new(LocalFetcher::new(&cfg.fetch.downloads_dir))
    } else {
        Box::new(YtDlpFetcher::new(&cfg.fetch.downloads_dir))
    };

    let transcriber: Box<dyn Transcriber> = match &cfg.transcriber.transcript_dir {
        Some(dir) => Box::new(TranscriptFile::new(dir)),
        None => Box::new(CommandTranscriber::new(
            cfg.transcriber.program.clone(),
            cfg.transcriber.args.clone(),
        )),
    };

    let planner: Box<dyn WindowPlanner> = match args.mode {
        Mode::Long => Box::new(MultiWindowPlanner::new(cfg.sampling.window_secs)),
        Mode::Short => Box::new(WholeClipPlanner),
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut writer = DatasetWriter::open(&cfg.output.dir, &cfg.output.basename)?;

    let runner = BatchRunner::new(fetcher, transcriber, planner, cfg.sampling.cap);
    let stats = runner.run(&urls, &mut writer, &mut rng).await?;

    writer.export_views()?;

    info!(
        "Done: {} processed, {} skipped, {} failed, {} segments written",
        stats.processed, stats.skipped, stats.failed, stats.segments_written
    );

    Ok(())
}
