use clap::{Parser, ValueEnum};
use log::{debug, info, LevelFilter};
use rpn::lang::{self, Limits, Session};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::io::{self, BufRead, Write};

const EXIT: &str = "exit";

/// Line-oriented RPN calculator with variables and single-level functions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Suppress the banner and prompt, for piping scripts through.
    #[arg(short, long)]
    quiet: bool,

    /// Run these newline-separated lines instead of reading stdin.
    #[arg(short, long)]
    eval: Option<String>,

    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    /// Longest accepted token, in bytes.
    #[arg(long, default_value_t = Limits::default().max_token_len)]
    max_token_len: usize,

    /// Most operands an expression may hold at once.
    #[arg(long, default_value_t = Limits::default().max_stack_depth)]
    max_stack_depth: usize,

    /// Deepest operation tree an expression may build.
    #[arg(long, default_value_t = Limits::default().max_nesting)]
    max_nesting: usize,

    /// Most parameters a function may declare.
    #[arg(long, default_value_t = Limits::default().max_params)]
    max_params: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> LevelFilter {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    if TermLogger::init(
        args.log_level.into(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ).is_err()
    {
        eprintln!("failed to initialise logging");
    }

    let limits = Limits {
        max_token_len: args.max_token_len,
        max_stack_depth: args.max_stack_depth,
        max_nesting: args.max_nesting,
        max_params: args.max_params,
    };

    if let Some(ref script) = args.eval {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for result in lang::interpret(script, limits) {
            match result {
                Ok(outcome) => writeln!(out, "{}", outcome)?,
                Err(e) => eprintln!("error: {}", e),
            }
        }
        return Ok(());
    }

    let mut session = Session::with_limits(limits);
    info!("starting session with {:?}", session.limits());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if !args.quiet {
        writeln!(out, "RPN calculator")?;
        writeln!(out, "Enter RPN expressions, assignments or function definitions:")?;
        writeln!(out, "  x = 3 4 +")?;
        writeln!(out, "  def square a end a a *")?;
        writeln!(out, "  square x")?;
    }

    let mut lines = stdin.lock().lines();
    let mut executed = 0;
    loop {
        if !args.quiet {
            write!(out, "> ")?;
            out.flush()?;
        }
        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        if line.starts_with(EXIT) {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        executed += 1;
        match session.execute(&line) {
            Ok(outcome) => writeln!(out, "{}", outcome)?,
            Err(e) => eprintln!("error: {}", e),
        }
    }

    info!(
        "session finished after {} commands, {} variables, {} functions",
        executed,
        session.environment().len(),
        session.functions().len()
    );
    for (name, value) in session.environment().iter() {
        debug!("  {} = {}", name, value);
    }
    Ok(())
}
