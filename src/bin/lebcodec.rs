use clap::{Parser, Subcommand};
use lebcodec::{parse_safe_integer, Leb128, LebError};
use std::error::Error;
use std::io::{self, Read};
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "LEB128 integer codec CLI", long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode integers read from stdin (one per line) as hex
    Encode,
    /// Decode hex-encoded varints read from stdin (one per line)
    Decode {
        /// Treat payloads as signed (negative) varints
        #[arg(short, long)]
        signed: bool,
        #[arg(short, long, default_value_t = 0)]
        offset: usize,
    },
    /// Print the byte length of hex-encoded varints read from stdin
    Length {
        #[arg(short, long, default_value_t = 0)]
        offset: usize,
    },
    /// Report encoded sizes and timings over fixed workloads
    Benchmark,
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_stdin_to_string() -> io::Result<String> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    Ok(input)
}

fn input_lines(input: &str) -> impl Iterator<Item = &str> {
    input.lines().map(str::trim).filter(|line| !line.is_empty())
}

fn decode_hex(line: &str) -> Result<Vec<u8>, LebError> {
    hex::decode(line).map_err(|_| LebError::InvalidInput(format!("{line:?}")))
}

fn encode_mode() -> Result<(), Box<dyn Error>> {
    let input = read_stdin_to_string()?;
    for line in input_lines(&input) {
        let value = parse_safe_integer(line)?;
        let encoded = Leb128::encode(value)?;
        debug!(value, len = encoded.len(), "encoded");
        println!("{}", hex::encode(encoded));
    }
    Ok(())
}

fn decode_mode(signed: bool, offset: usize) -> Result<(), Box<dyn Error>> {
    let input = read_stdin_to_string()?;
    for line in input_lines(&input) {
        let bytes = decode_hex(line)?;
        let value = Leb128::decode(&bytes, offset, signed)?;
        debug!(value, signed, offset, "decoded");
        println!("{value}");
    }
    Ok(())
}

fn length_mode(offset: usize) -> Result<(), Box<dyn Error>> {
    let input = read_stdin_to_string()?;
    for line in input_lines(&input) {
        let bytes = decode_hex(line)?;
        println!("{}", Leb128::get_length(&bytes, offset)?);
    }
    Ok(())
}

fn run_benchmark() -> Result<(), Box<dyn Error>> {
    let workloads = vec![
        ("small", (0i64..=255).collect::<Vec<_>>()),
        (
            "medium",
            (0i64..=1_000_000).step_by(10_000).collect::<Vec<_>>(),
        ),
        (
            "large32",
            (0i64..=4_000_000_000)
                .step_by(25_000_000)
                .collect::<Vec<_>>(),
        ),
        (
            "negative",
            (-1_000_000i64..0).step_by(7_919).collect::<Vec<_>>(),
        ),
    ];
    println!("workload,leb128(bytes/value),encode,decode");
    for (name, values) in workloads {
        let start = Instant::now();
        let encoded = values
            .iter()
            .map(|v| Leb128::encode(*v))
            .collect::<Result<Vec<_>, _>>()?;
        let encode_elapsed = start.elapsed();

        let start = Instant::now();
        for (value, bytes) in values.iter().zip(&encoded) {
            let decoded = Leb128::decode(bytes, 0, *value < 0)?;
            debug_assert_eq!(decoded, *value);
        }
        let decode_elapsed = start.elapsed();

        let total: usize = encoded.iter().map(Vec::len).sum();
        let n = values.len();
        info!(workload = name, values = n, bytes = total, "benchmark workload done");
        println!(
            "{name},{:.2},{:?},{:?}",
            total as f64 / n as f64,
            encode_elapsed,
            decode_elapsed
        );
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    match cli.command {
        Command::Encode => encode_mode(),
        Command::Decode { signed, offset } => decode_mode(signed, offset),
        Command::Length { offset } => length_mode(offset),
        Command::Benchmark => run_benchmark(),
    }
}
