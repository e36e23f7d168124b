use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use sqldump_splitter::splitter::DEFAULT_OUTPUT_DIR;
use sqldump_splitter::{Config, DumpSplitter, Error, Event, FallibleIterator};

/// Split a SQL dump into one `<table>.sql` file per table.
// RUST_LOG=debug, RUST_LOG=scanner=trace
#[derive(Parser, Debug)]
#[command(name = "sqldump-split", version, about)]
struct Cli {
    /// SQL dump to split
    source: PathBuf,
    /// Directory receiving the table files
    #[arg(default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Config {
        Config::new(cli.source).output_dir(cli.output_dir)
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help, --version
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(1);
        }
    };
    let timer = Instant::now();
    if let Err(err) = run(&Config::from(cli)) {
        println!("{err}");
        return ExitCode::from(1);
    }
    println!(
        "All done. Execution time: {}s",
        round_millis(timer.elapsed().as_secs_f64())
    );
    ExitCode::SUCCESS
}

fn run(config: &Config) -> Result<(), Error> {
    let mut splitter = DumpSplitter::open(config)?;
    while let Some(event) = splitter.next()? {
        match event {
            Event::TableStarted { name, .. } => println!("Parsing table: {name}"),
            Event::TableFinished(summary) => println!("Finished parsing: {}", summary.name),
        }
    }
    Ok(())
}

fn round_millis(secs: f64) -> f64 {
    (secs * 1000.0).round() / 1000.0
}
