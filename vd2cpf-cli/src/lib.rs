use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::exit;

use ansi_term::{Color, Style};
use anyhow::Context;
use clap::Parser;
use flexi_logger::writers::LogWriter;
use flexi_logger::{FileSpec, Level, LevelFilter, LogSpecBuilder, Logger, LoggerHandle};
use log::{debug, info};
use once_cell::sync::OnceCell;
use path_abs::PathAbs;
use vd2cpf_core::util::default_output_path;
use vd2cpf_core::{ConvertArgs, Error, Verbosity};

// needs to be static, runtime allocated string to avoid evil hacks to
// concatenate non-trivial strings at compile-time
fn version() -> &'static str {
  static INSTANCE: OnceCell<String> = OnceCell::new();
  INSTANCE.get_or_init(|| {
    match (
      option_env!("VERGEN_GIT_SHA"),
      option_env!("VERGEN_CARGO_DEBUG"),
      option_env!("VERGEN_RUSTC_SEMVER"),
      option_env!("VERGEN_RUSTC_LLVM_VERSION"),
      option_env!("VERGEN_CARGO_TARGET_TRIPLE"),
      option_env!("VERGEN_GIT_COMMIT_DATE"),
    ) {
      (
        Some(git_hash),
        Some(debug),
        Some(rustc_ver),
        Some(llvm_ver),
        Some(target_triple),
        Some(commit_date),
      ) => {
        format!(
          "{}-unstable (rev {}) ({})

* Compiler
  rustc {} (LLVM {})

* Target Triple
  {}

* Date Info
  Commit Date:  {}",
          env!("CARGO_PKG_VERSION"),
          git_hash.get(..7).unwrap_or(git_hash),
          if debug == "true" { "debug" } else { "release" },
          rustc_ver,
          llvm_ver,
          target_triple,
          commit_date,
        )
      }
      // only the semver on a release (when git information isn't available)
      _ => env!("CARGO_PKG_VERSION").to_owned(),
    }
  })
}

/// Convert a VirtualDub / VirtualDub2 .vdscript cut list into a Cuttermaran 1.70 .cpf project
#[derive(Parser, Debug)]
#[command(name = "vd2cpf", version = version())]
pub struct CliOpts {
  /// VirtualDub script (.vdscript) to read the subset ranges from
  #[arg(short, long)]
  pub input: PathBuf,

  /// Cuttermaran project file to write [default: <input>.cpf]
  #[arg(short, long)]
  pub output: Option<PathBuf>,

  /// Video file referenced by the project
  ///
  /// Written into the project as given, the file is not opened.
  #[arg(long)]
  pub video: String,

  /// Audio file referenced by the project
  ///
  /// Written into the project as given, the file is not opened.
  #[arg(long)]
  pub audio: String,

  /// Audio start delay in milliseconds
  #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
  pub audio_delay: i64,

  /// Overwrite the output file without asking
  #[arg(short = 'y', long)]
  pub overwrite: bool,

  /// Only print warnings and errors to the terminal
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Print every parsed directive to the terminal
  #[arg(long)]
  pub verbose: bool,

  /// Also write the log to this file
  #[arg(short, long)]
  pub log_file: Option<PathBuf>,

  /// Set log level for the log file (does not affect command-line log level)
  #[arg(long, default_value_t = LevelFilter::Debug)]
  pub log_level: LevelFilter,
}

fn confirm(prompt: &str) -> io::Result<bool> {
  confirm_with(prompt, &mut io::stdin().lock(), &mut io::stdout())
}

// end of input counts as "no"
fn confirm_with(prompt: &str, input: &mut impl BufRead, output: &mut impl Write) -> io::Result<bool> {
  let mut buf = String::with_capacity(4);
  loop {
    output.write_all(prompt.as_bytes())?;
    output.flush()?;
    if input.read_line(&mut buf)? == 0 {
      writeln!(output)?;
      break Ok(false);
    }

    match buf.as_str().trim() {
      // allows enter to continue
      "y" | "Y" | "" => break Ok(true),
      "n" | "N" => break Ok(false),
      other => {
        writeln!(output, "Sorry, response {:?} is not understood.", other)?;
        buf.clear();
        continue;
      }
    }
  }
}

/// Turns the command line into validated conversion arguments.
pub fn parse_cli(args: CliOpts) -> anyhow::Result<ConvertArgs> {
  let output = args
    .output
    .clone()
    .unwrap_or_else(|| default_output_path(&args.input));
  let output: PathBuf = PathAbs::new(&output)
    .with_context(|| format!("Failed to resolve output path {:?}", output))?
    .into();

  let mut arg = ConvertArgs {
    input: args.input,
    output,
    video: args.video,
    audio: args.audio,
    audio_delay: args.audio_delay,
    overwrite: args.overwrite,
    verbosity: if args.quiet {
      Verbosity::Quiet
    } else if args.verbose {
      Verbosity::Verbose
    } else {
      Verbosity::Normal
    },
    log_file: args.log_file,
    log_level: args.log_level,
  };

  // only ask when someone can answer, otherwise validate() reports the existing file
  match arg.validate() {
    Err(Error::OutputExists(path)) if atty::is(atty::Stream::Stdin) => {
      if !confirm(&format!(
        "Output file {:?} exists. Do you want to overwrite it? [Y/n]: ",
        path
      ))? {
        println!("Not overwriting, aborting.");
        exit(0);
      }
      arg.overwrite = true;
      arg.validate()?;
    }
    result => result?,
  }

  Ok(arg)
}

pub struct StderrLogger {
  level: LevelFilter,
}

impl LogWriter for StderrLogger {
  fn write(
    &self,
    _now: &mut flexi_logger::DeferredNow,
    record: &flexi_logger::Record,
  ) -> std::io::Result<()> {
    if record.level() > self.level {
      return Ok(());
    }

    let style = if atty::is(atty::Stream::Stderr) {
      match record.level() {
        Level::Error => Style::default().fg(Color::Fixed(196)).bold(),
        Level::Warn => Style::default().fg(Color::Fixed(208)).bold(),
        Level::Info => Style::default().bold(),
        Level::Debug => Style::default().dimmed(),
        Level::Trace => Style::default(),
      }
    } else {
      Style::default()
    };

    eprintln!(
      "{} [{}] {}",
      style.paint(record.level().to_string()),
      record.module_path().unwrap_or("<unnamed>"),
      style.paint(record.args().to_string())
    );

    Ok(())
  }

  fn flush(&self) -> std::io::Result<()> {
    Ok(())
  }
}

fn terminal_level(verbosity: Verbosity) -> LevelFilter {
  match verbosity {
    Verbosity::Quiet => LevelFilter::Warn,
    Verbosity::Normal => LevelFilter::Info,
    Verbosity::Verbose => LevelFilter::Debug,
  }
}

fn start_logger(args: &ConvertArgs) -> anyhow::Result<LoggerHandle> {
  let stderr_level = terminal_level(args.verbosity);
  let module_level = if args.log_file.is_some() {
    stderr_level.max(args.log_level)
  } else {
    stderr_level
  };

  let log = LogSpecBuilder::new()
    .default(LevelFilter::Error)
    .module("vd2cpf", module_level)
    .module("vd2cpf_cli", module_level)
    .module("vd2cpf_core", module_level)
    .build();

  let writer = Box::new(StderrLogger {
    level: stderr_level,
  });

  // The handle must outlive the conversion, dropping it flushes the file writer.
  let logger = match args.log_file.as_deref() {
    Some(log_file) => {
      let log_file = PathAbs::new(log_file)?;
      let log_file: &Path = log_file.as_ref();
      Logger::with(log)
        .log_to_file_and_writer(FileSpec::try_from(log_file)?, writer)
        .start()?
    }
    None => Logger::with(log).log_to_writer(writer).start()?,
  };

  Ok(logger)
}

pub fn run() -> anyhow::Result<()> {
  let args = parse_cli(CliOpts::parse())?;
  let _logger = start_logger(&args)?;

  debug!(
    "converting {:?} -> {:?} (video {:?}, audio {:?}, delay {} ms, verbosity {})",
    args.input, args.output, args.video, args.audio, args.audio_delay, args.verbosity
  );

  let summary = args
    .convert_file()
    .with_context(|| format!("Failed to convert {:?}", args.input))?;

  info!(
    "Cuttermaran project file saved as {:?}",
    summary.output
  );

  Ok(())
}
