use std::io;
use std::process::exit;

use clap::{builder::RangedU64ValueParser, Parser};
use kvarray::{KeyValueStore, Shell, DEFAULT_CAPACITY};
use tracing::{error, info, Level};

const MAX_CAPACITY: u64 = 1 << 24;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Opts {
    /// Initial number of slots in the store
    #[arg(long)]
    #[arg(default_value_t = DEFAULT_CAPACITY)]
    #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(0..=MAX_CAPACITY))]
    capacity: usize,
    /// Maximum level of log lines written to stderr
    #[arg(long)]
    #[arg(default_value_t = Level::WARN)]
    log_level: Level,
}

fn main() {
    let opts = Opts::parse();
    tracing_subscriber::fmt()
        .with_max_level(opts.log_level)
        .with_writer(io::stderr)
        .init();
    info!("{}:{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    info!("initial capacity: {}", opts.capacity);

    let res = KeyValueStore::try_with_capacity(opts.capacity).and_then(|store| {
        let mut shell = Shell::new(store);
        let stdin = io::stdin();
        let stdout = io::stdout();
        let stderr = io::stderr();
        shell.run(stdin.lock(), &mut stdout.lock(), &mut stderr.lock())?;
        info!("session ended with {} entries", shell.store().size());
        Ok(())
    });

    if let Err(e) = res {
        error!("{}", e);
        exit(1)
    }
}
