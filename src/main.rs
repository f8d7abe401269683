use anyhow::{Context, Result};
use clap::Parser;
use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use zouni::error::ParserError;
use zouni::{DigOptions, Digger, Logger, StdLogger, ZouniConfig, ZouniError};

#[derive(Parser)]
#[command(name = "zouni")]
#[command(author, version, about = "Extract the declarations reachable from main in a Go program", long_about = None)]
struct Cli {
    /// Directory of the main package
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Print one line per declaration instead of its source
    #[arg(long)]
    describe: bool,

    /// Also follow package-qualified type references and their methods
    #[arg(long)]
    follow_types: bool,

    /// Dump the loaded packages before digging
    #[arg(long)]
    dump_packages: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let result = ZouniConfig::load(&cli.dir)
        .with_context(|| format!("Failed to load config for {:?}", cli.dir))
        .and_then(|config| {
            init_logger(cli.verbose || config.debug);
            run(&cli, &config)
        });

    if let Err(e) = result {
        report_error(&e);
        std::process::exit(1);
    }

    Ok(())
}

fn init_logger(debug: bool) {
    let filter = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
}

fn run(cli: &Cli, config: &ZouniConfig) -> Result<()> {
    let logger: Box<dyn Logger> = if cli.verbose {
        Box::new(StdLogger)
    } else {
        config.logger()
    };

    log::info!("Loading {:?}", cli.dir);
    let program = zouni::load(config, &cli.dir, logger.as_ref())?;

    if cli.dump_packages {
        println!("{}", program);
    }

    let options = DigOptions {
        follow_types: cli.follow_types,
    };
    let decls = Digger::new(&program, logger.as_ref())
        .with_options(options)
        .dig()?;
    log::debug!("{} declarations are reachable", decls.len());

    if cli.describe {
        for decl in &decls {
            println!("{}", decl.describe());
        }
    } else {
        let texts: Vec<&str> = decls.iter().map(|decl| decl.source_text()).collect();
        println!("{}", texts.join("\n\n"));
    }

    Ok(())
}

fn report_error(e: &anyhow::Error) {
    if let Some(ZouniError::Parse { path, error }) = e.downcast_ref::<ZouniError>() {
        if report_parse_error(path, error).is_ok() {
            return;
        }
    }
    eprintln!("{}: {:#}", "error".red().bold(), e);
}

/// 構文エラーをソースの該当箇所とともに表示する
fn report_parse_error(path: &Path, error: &ParserError) -> Result<()> {
    let source = fs::read_to_string(path)?;
    let mut files = SimpleFiles::new();
    let file_id = files.add(path.display().to_string(), source);

    let span = error.span();
    let diagnostic = Diagnostic::error()
        .with_message(error.to_string())
        .with_labels(vec![Label::primary(file_id, span.start..span.end)]);

    let writer = StandardStream::stderr(ColorChoice::Always);
    let config = codespan_reporting::term::Config::default();
    codespan_reporting::term::emit(&mut writer.lock(), &config, &files, &diagnostic)?;
    Ok(())
}
