use std::io::{self, Write};
use std::path::Path;
use std::process;
use std::time::Instant;

use anyhow::{Context, bail};
use clap::Parser;

use lazysplit::column::StringColumn;
use lazysplit::common::io::read_file;
use lazysplit::common::{io_error_msg, reset_sigpipe};
use lazysplit::datagen::synthetic_log_column;
use lazysplit::extract::{self, ExtractConfig};

#[derive(Parser)]
#[command(
    name = "lazysplit",
    about = "Extract one delimiter-separated field from every line, lazily"
)]
struct Cli {
    /// Field to extract (0-based)
    #[arg(short = 'f', long = "field", value_name = "N", default_value_t = 0)]
    field: usize,

    /// Field delimiter (a single byte)
    #[arg(
        short = 'd',
        long = "delimiter",
        value_name = "DELIM",
        default_value = "_"
    )]
    delimiter: String,

    /// Output slot width in bytes; longer fields are silently truncated
    #[arg(short = 'm', long = "max-len", value_name = "BYTES", default_value_t = 10)]
    max_len: usize,

    /// Line delimiter is NUL, not newline
    #[arg(short = 'z', long = "zero-terminated")]
    zero_terminated: bool,

    /// Generate ROWS synthetic log rows instead of reading input
    #[arg(long = "synthetic", value_name = "ROWS", conflicts_with = "files")]
    synthetic: Option<usize>,

    /// Seed for --synthetic
    #[arg(long = "seed", value_name = "SEED", default_value_t = 42)]
    seed: u64,

    /// Time the lazy kernel against the split-then-index baseline
    #[arg(long = "bench")]
    bench: bool,

    /// Files to process ('-' = stdin)
    files: Vec<String>,
}

fn main() {
    reset_sigpipe();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        if let Some(ioe) = e.downcast_ref::<io::Error>() {
            if ioe.kind() == io::ErrorKind::BrokenPipe {
                process::exit(0);
            }
        }
        eprintln!("lazysplit: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if cli.delimiter.len() != 1 {
        bail!("the delimiter must be a single byte");
    }
    let cfg = ExtractConfig {
        delimiter: cli.delimiter.as_bytes()[0],
        field_index: cli.field,
        max_len: cli.max_len,
    };
    // Configuration is validated here, before any pass is launched;
    // the kernel itself assumes a valid config.
    extract::validate_config(&cfg)?;

    let line_delim = if cli.zero_terminated { b'\0' } else { b'\n' };
    let col = build_column(cli, line_delim)?;

    if cli.bench {
        run_bench(&col, &cfg)
    } else {
        write_fields(&col, &cfg, line_delim)
    }
}

/// Load the input column: synthetic rows, or all files/stdin concatenated.
fn build_column(cli: &Cli, line_delim: u8) -> anyhow::Result<StringColumn> {
    if let Some(rows) = cli.synthetic {
        return synthetic_log_column(rows, cli.seed).context("generating synthetic rows");
    }

    let files = if cli.files.is_empty() {
        vec!["-".to_string()]
    } else {
        cli.files.clone()
    };

    let mut col = StringColumn::new();
    for name in &files {
        if name == "-" {
            let data = lazysplit::common::io::read_stdin()
                .map_err(|e| anyhow::anyhow!("standard input: {}", io_error_msg(&e)))?;
            col.extend_delimited(&data, line_delim)?;
        } else {
            let data = read_file(Path::new(name))
                .map_err(|e| anyhow::anyhow!("{}: {}", name, io_error_msg(&e)))?;
            col.extend_delimited(&data, line_delim)?;
        }
    }
    Ok(col)
}

/// Extract and print one field per input row, batched into a single write.
fn write_fields(col: &StringColumn, cfg: &ExtractConfig, line_delim: u8) -> anyhow::Result<()> {
    let out = extract::extract(col, cfg);

    let mut buf = Vec::with_capacity(out.row_count() * (cfg.max_len + 1));
    for field in out.iter() {
        buf.extend_from_slice(field);
        buf.push(line_delim);
    }

    let mut stdout = io::stdout().lock();
    stdout.write_all(&buf)?;
    stdout.flush()?;
    Ok(())
}

/// Time the split-then-index baseline against the lazy kernel on the same
/// column and report wall-clock times and speedup.
fn run_bench(col: &StringColumn, cfg: &ExtractConfig) -> anyhow::Result<()> {
    // Warmup: fault in pages and spin up the thread pool off the clock.
    let _ = extract::extract_split_baseline(col, cfg);
    let _ = extract::extract(col, cfg);

    let t = Instant::now();
    let baseline = extract::extract_split_baseline(col, cfg);
    let baseline_ms = t.elapsed().as_secs_f64() * 1e3;

    let t = Instant::now();
    let lazy = extract::extract(col, cfg);
    let lazy_ms = t.elapsed().as_secs_f64() * 1e3;

    if baseline != lazy {
        bail!("lazy kernel and split baseline disagree");
    }

    println!("rows:           {}", col.row_count());
    println!("split baseline: {:.3} ms", baseline_ms);
    println!("lazy kernel:    {:.3} ms", lazy_ms);
    if lazy_ms > 0.0 {
        println!("speedup:        {:.2}x", baseline_ms / lazy_ms);
    }
    Ok(())
}
