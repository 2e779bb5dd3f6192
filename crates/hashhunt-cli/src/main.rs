//! hashhunt CLI
//!
//! Digest preimage and vanity-string search.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use hashhunt_core::{
    all_algorithms, format_count, get_algorithm, keyspace_size_f64, DigestFunction, Encoding,
    HashSearch, Outcome, SearchConfig, SearchResult, ONION_ALPHABET,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "hashhunt")]
#[command(version)]
#[command(about = "Digest preimage and vanity-string search", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for an input whose digest matches a target
    Find(FindArgs),

    /// Digest piped input or a file
    Hash {
        /// Algorithm name
        #[arg(short, long, default_value = "sha256")]
        algo: String,

        /// Digest with every known algorithm
        #[arg(long)]
        all: bool,

        /// Output encoding
        #[arg(short, long, default_value = "hex")]
        encoding: String,

        /// Input file, used when nothing is piped in
        file: Option<PathBuf>,
    },

    /// List digest algorithms
    Algorithms {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List text encodings
    Encodings,

    /// Measure sequential search speed
    Benchmark {
        /// Algorithm name
        #[arg(short, long, default_value = "sha1")]
        algo: String,

        /// Prefix length
        #[arg(short, long, default_value = "8")]
        length: usize,

        /// Duration in seconds
        #[arg(short, long, default_value = "5")]
        duration: u64,
    },
}

#[derive(Args, Default)]
struct FindArgs {
    /// JSON config file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Algorithm name (sha1, sha512, md5, ...)
    #[arg(short, long)]
    algo: Option<String>,

    /// Target digest
    #[arg(short = 'x', long)]
    expected: Option<String>,

    /// Encoding of the target digest
    #[arg(short, long, default_value = "hex")]
    encoding: String,

    /// Fixed prefix length
    #[arg(short, long, conflicts_with_all = ["min_length", "max_length"])]
    length: Option<usize>,

    /// Shortest prefix length
    #[arg(long)]
    min_length: Option<usize>,

    /// Longest prefix length
    #[arg(long)]
    max_length: Option<usize>,

    /// Allowed prefix symbols
    #[arg(short = 'k', long)]
    alphabet: Option<String>,

    /// Named alphabet, used when --alphabet is not given
    #[arg(long, value_enum)]
    preset: Option<AlphabetPreset>,

    /// Fixed suffix after the prefix
    #[arg(short, long)]
    suffix: Option<String>,

    /// Enumerate in descending order
    #[arg(short, long)]
    reverse: bool,

    /// Sample candidates at random instead of enumerating
    #[arg(long)]
    random: bool,

    /// Seed for random search
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum attempts
    #[arg(long)]
    max_attempts: Option<u64>,

    /// Maximum time in seconds
    #[arg(long)]
    max_time: Option<u64>,

    /// No progress lines
    #[arg(short, long)]
    quiet: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum AlphabetPreset {
    /// Onion-service base32 symbols
    Onion,
    Lower,
    Upper,
    Digits,
    Hex,
    Alnum,
}

impl AlphabetPreset {
    fn symbols(self) -> &'static str {
        match self {
            AlphabetPreset::Onion => ONION_ALPHABET,
            AlphabetPreset::Lower => "abcdefghijklmnopqrstuvwxyz",
            AlphabetPreset::Upper => "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            AlphabetPreset::Digits => "0123456789",
            AlphabetPreset::Hex => "0123456789abcdef",
            AlphabetPreset::Alnum => {
                "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz"
            }
        }
    }
}

#[derive(Serialize)]
struct AlgorithmInfo {
    name: &'static str,
    bits: usize,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Find(args) => cmd_find(&args)?,
        Commands::Hash {
            algo,
            all,
            encoding,
            file,
        } => cmd_hash(&algo, all, &encoding, file.as_deref())?,
        Commands::Algorithms { json } => cmd_algorithms(json)?,
        Commands::Encodings => cmd_encodings(),
        Commands::Benchmark {
            algo,
            length,
            duration,
        } => cmd_benchmark(&algo, length, duration)?,
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<SearchConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
}

/// Config file values first, then explicit flags on top
fn build_config(args: &FindArgs) -> Result<SearchConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SearchConfig::default(),
    };

    if let Some(algo) = &args.algo {
        config = config.algorithm(algo);
    }
    if let Some(expected) = &args.expected {
        let encoding: Encoding = args.encoding.parse()?;
        config = config.expected_encoded(expected, encoding)?;
    }
    if let Some(len) = args.length {
        config = config.length(len);
    }
    if let Some(min) = args.min_length {
        config = config.min_length(min);
    }
    if let Some(max) = args.max_length {
        config = config.max_length(max);
    }
    if let Some(alphabet) = &args.alphabet {
        config = config.alphabet(alphabet);
    } else if let Some(preset) = args.preset {
        config = config.alphabet(preset.symbols());
    }
    if let Some(suffix) = &args.suffix {
        config = config.suffix(suffix.as_str());
    }
    if args.reverse {
        config = config.reverse(true);
    }
    if let Some(seed) = args.seed {
        config = config.seed(seed);
    }
    if let Some(max_attempts) = args.max_attempts {
        config = config.max_attempts(max_attempts);
    }
    if let Some(max_time) = args.max_time {
        config = config.max_time(Duration::from_secs(max_time));
    }
    if args.quiet || args.json {
        config = config.progress(false);
    }

    Ok(config)
}

fn cmd_find(args: &FindArgs) -> Result<()> {
    let config = build_config(args)?;
    let search = HashSearch::new(config);
    search.verify()?;

    if !args.json {
        let config = search.config();
        eprintln!("hashhunt v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Algorithm: {}", config.algorithm);
        eprintln!("Alphabet:  {}", search.allowed_alphabet());
        if config.min_length == config.max_length {
            eprintln!("Length:    {}", config.min_length);
        } else {
            eprintln!("Length:    {}..={}", config.min_length, config.max_length);
        }
        if !config.suffix.is_empty() {
            eprintln!("Suffix:    {}", String::from_utf8_lossy(&config.suffix));
        }
        eprintln!(
            "Keyspace:  {}",
            format_count(keyspace_size_f64(
                config.alphabet.len(),
                config.min_length,
                config.max_length
            ))
        );
        eprintln!(
            "Mode:      {}",
            if args.random {
                "random"
            } else if config.reverse {
                "sequential (descending)"
            } else {
                "sequential"
            }
        );
        eprintln!();
    }

    let outcome = if args.random {
        search.find_random()?
    } else {
        search.find_sequential()?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match &outcome {
        Outcome::Found(result) => print_result(result),
        Outcome::Exhausted(summary) => {
            eprintln!("Keyspace exhausted after {} attempts, no match.", summary.attempts)
        }
        Outcome::LimitReached(summary) => {
            eprintln!("No match found within limits ({} attempts).", summary.attempts)
        }
        Outcome::Cancelled(summary) => {
            eprintln!("Search cancelled after {} attempts.", summary.attempts)
        }
    }

    Ok(())
}

/// Piped stdin if present, otherwise the named file
fn read_input(file: Option<&Path>) -> Result<Vec<u8>> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        let mut data = Vec::new();
        stdin.lock().read_to_end(&mut data)?;
        return Ok(data);
    }

    let path = file.ok_or_else(|| anyhow::anyhow!("No piped data and no file provided"))?;
    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn cmd_hash(algo: &str, all: bool, encoding: &str, file: Option<&Path>) -> Result<()> {
    let encoding: Encoding = encoding.parse()?;
    let data = read_input(file)?;

    if all {
        for algorithm in all_algorithms() {
            println!(
                "{:<14} {}",
                algorithm.name,
                encoding.encode(&algorithm.compute(&data))
            );
        }
        return Ok(());
    }

    let algorithm =
        get_algorithm(algo).ok_or_else(|| anyhow::anyhow!("Unknown algorithm: {}", algo))?;
    println!("{}", encoding.encode(&algorithm.compute(&data)));

    Ok(())
}

fn cmd_algorithms(json: bool) -> Result<()> {
    if json {
        let infos: Vec<AlgorithmInfo> = all_algorithms()
            .iter()
            .map(|a| AlgorithmInfo {
                name: a.name,
                bits: a.bits,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    println!("Supported Algorithms:");
    println!("{:-<24}", "");
    println!("{:<16} {}", "Name", "Bits");
    println!("{:-<24}", "");
    for algorithm in all_algorithms() {
        println!("{:<16} {}", algorithm.name, algorithm.bits);
    }

    Ok(())
}

fn cmd_encodings() {
    for encoding in Encoding::ALL {
        println!("{}", encoding);
    }
}

// Mixed symbols so the alphabet is not a contiguous byte range
const BENCHMARK_ALPHABET: &str = "580%(=QWI+qwi*Nn";

fn cmd_benchmark(algo: &str, length: usize, duration_secs: u64) -> Result<()> {
    let algorithm =
        get_algorithm(algo).ok_or_else(|| anyhow::anyhow!("Unknown algorithm: {}", algo))?;

    eprintln!(
        "Benchmarking {} for {} seconds...",
        algorithm.name, duration_secs
    );
    eprintln!();

    // An all-zero target will not be hit
    let config = SearchConfig::new()
        .algorithm(algorithm.name)
        .expected_digest(vec![0u8; algorithm.output_bits() / 8])
        .alphabet(BENCHMARK_ALPHABET)
        .length(length)
        .max_time(Duration::from_secs(duration_secs));

    let outcome = HashSearch::new(config).find_sequential()?;
    let seconds = match &outcome {
        Outcome::Found(result) => result.time_secs,
        Outcome::Exhausted(summary)
        | Outcome::LimitReached(summary)
        | Outcome::Cancelled(summary) => summary.time_secs,
    };

    eprintln!("\nBenchmark complete!");
    println!("Attempts: {}", outcome.attempts());
    if seconds > 0.0 {
        println!(
            "Speed:    {}/s",
            format_count(outcome.attempts() as f64 / seconds)
        );
    }

    Ok(())
}

fn print_result(result: &SearchResult) {
    println!();
    println!("MATCH FOUND!");
    println!("{:-<60}", "");
    println!("Candidate:   {}", result.candidate);
    println!("Bytes (hex): {}", result.candidate_hex);
    println!("Digest:      {} ({})", result.digest_hex, result.algorithm);
    println!("{:-<60}", "");
    println!("Attempts:    {}", result.attempts);
    println!("Time:        {:.2}s", result.time_secs);
    println!("Speed:       {}/s", format_count(result.attempts_per_second));
}
