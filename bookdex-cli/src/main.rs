#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]

use std::{path::PathBuf, process, time::Duration};

mod app;

use bookdex::{LookupConfig, Provider};

use clap::{Args, Parser};
use log::trace;

fn main() {
    match try_main() {
        Ok(true) => {}
        // Nothing found is not an error but callers should be able to tell.
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    }
}

fn try_main() -> eyre::Result<bool> {
    let Cli {
        isbn,
        input,
        output,
        lookup_opts,
        global_opts: GlobalOpts { verbosity, quiet },
    } = Cli::parse();

    setup_errlog(usize::from(verbosity), quiet)?;

    let config = lookup_opts.into_config();
    trace!(
        "Querying providers in order: {}",
        config
            .providers
            .iter()
            .map(|p| p.name())
            .collect::<Vec<_>>()
            .join(", ")
    );

    if let Some(input) = input {
        app::batch(&input, &output, &config)
    } else {
        // clap guarantees an ISBN is present when no input file is given.
        app::single(&isbn.unwrap_or_default(), &config)
    }
}

fn setup_errlog(verbosity: usize, quiet: bool) -> eyre::Result<()> {
    // if quiet then ignore verbosity but still show errors
    let verbosity = if quiet { 1 } else { verbosity + 2 };

    stderrlog::new().verbosity(verbosity).init()?;
    Ok(())
}

#[derive(Parser)]
#[clap(name = "bookdex")]
#[clap(about = "Look up and merge book metadata from multiple sources by ISBN")]
#[clap(version, author)]
struct Cli {
    /// A single ISBN to look up, the merged record is printed as JSON
    #[clap(required_unless_present = "input", conflicts_with = "input")]
    isbn: Option<String>,

    /// Batch mode: read one ISBN per line from this file
    #[clap(short, long, parse(from_os_str))]
    input: Option<PathBuf>,

    /// Where batch mode writes the JSON array of found records
    #[clap(short, long, parse(from_os_str), default_value = "isbn.json")]
    output: PathBuf,

    #[clap(flatten)]
    lookup_opts: LookupOpts,

    #[clap(flatten)]
    global_opts: GlobalOpts,
}

#[derive(Debug, Args)]
struct LookupOpts {
    /// Per-request timeout in seconds
    #[clap(long, default_value_t = 10)]
    timeout: u64,

    /// Delay between provider calls in milliseconds
    #[clap(long, default_value_t = 300)]
    delay: u64,

    /// Retries per provider call on network errors
    #[clap(long, default_value_t = 3)]
    max_retries: u32,

    /// Comma-separated provider order (google-books, open-library,
    /// internet-archive, open-alex, open-library-covers, abebooks-covers)
    #[clap(long, use_value_delimiter = true, parse(try_from_str))]
    providers: Vec<Provider>,
}

impl LookupOpts {
    fn into_config(self) -> LookupConfig {
        let mut config = LookupConfig {
            timeout: Duration::from_secs(self.timeout),
            delay: Duration::from_millis(self.delay),
            max_retries: self.max_retries,
            ..LookupConfig::default()
        };

        if !self.providers.is_empty() {
            config.providers = self.providers;
        }

        config
    }
}

#[derive(Debug, Args)]
struct GlobalOpts {
    /// How chatty the program is when performing commands
    ///
    /// The number of times this flag is used will increase how chatty
    /// the program is.
    #[clap(short, long, parse(from_occurrences), global = true)]
    verbosity: u8,

    /// Prevents the program from writing to stdout, errors will still be printed to stderr.
    #[clap(short, long, global = true)]
    quiet: bool,
}
