mod cli;
mod config;
mod editor;
mod episodes;
mod error;
mod mkvtoolnix;
mod renamer;
mod tracks;
mod utils;

#[cfg(test)]
mod test_support;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Commands};
use config::AppConfig;
use editor::{DirectoryWalker, FileModifier};
use episodes::{EpisodeScraper, HtmlSource};
use mkvtoolnix::ProcessRunner;
use renamer::Renamer;
use std::path::Path;
use std::process::ExitCode;
use tracks::{ScriptedSupplier, TerminalSupplier};
use utils::{DependencyStatus, Reporter, TracingReporter, init_logging};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Cannot use config {}", path.display()))?,
        None => AppConfig::load(),
    };
    if let Some(path) = cli.mkvmerge {
        config.tools.mkvmerge = path;
    }
    if let Some(path) = cli.mkvpropedit {
        config.tools.mkvpropedit = path;
    }

    let reporter = TracingReporter;
    match cli.command {
        Commands::Edit { directory, answers } => {
            edit(&config, &directory, answers.as_deref(), &reporter)
        }
        Commands::Rename {
            names,
            directory,
            num_seasons,
            dry_run,
        } => {
            Renamer::new(&config.rename, &reporter)
                .rename_directory(&names, &directory, num_seasons, dry_run)?;
            Ok(())
        }
        Commands::Scrape {
            table_heading,
            url,
            from_html_file,
            output,
        } => {
            let source = match (from_html_file, url) {
                (Some(path), _) => HtmlSource::File(path),
                (None, Some(url)) => HtmlSource::trusted_url(&url)?,
                (None, None) => bail!("Supply a page with --url or --from-html-file"),
            };
            let scraper = EpisodeScraper::new(&reporter);
            let titles = scraper.scrape(&source, &table_heading)?;
            scraper.write_names(&titles, output.as_deref())?;
            Ok(())
        }
        Commands::Doctor => doctor(&config),
    }
}

fn edit(
    config: &AppConfig,
    directory: &Path,
    answers: Option<&Path>,
    reporter: &dyn Reporter,
) -> Result<()> {
    if !directory.is_dir() {
        bail!("{} is not a directory", directory.display());
    }
    let tools = config.tools.resolve()?;
    let runner = ProcessRunner;
    let walker = DirectoryWalker::new(FileModifier::new(&runner, &tools, reporter), reporter);

    let summary = match answers {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Cannot read answers file {}", path.display()))?;
            let mut supplier = ScriptedSupplier::from_lines(&contents);
            let summary = walker.process_directory(directory, &mut supplier);
            for answer in supplier.rejected() {
                reporter.warn(&format!("Rejected answer {:?} from {}", answer, path.display()));
            }
            reporter.info(&format!(
                "Answered {} question(s) from {}, {} answer(s) rejected",
                supplier.presented().len(),
                path.display(),
                supplier.rejected().len()
            ));
            summary
        }
        None => {
            let mut supplier = TerminalSupplier::stdio();
            walker.process_directory(directory, &mut supplier)
        }
    };

    summary.report(reporter);
    Ok(())
}

fn doctor(config: &AppConfig) -> Result<()> {
    let tools = config.tools.resolve()?;
    let status = DependencyStatus::check(&tools);

    for (path, version) in [
        (&tools.mkvmerge, &status.mkvmerge),
        (&tools.mkvpropedit, &status.mkvpropedit),
    ] {
        match version {
            Some(v) => println!("{}: {}", path.display(), v),
            None => println!("{}: not runnable", path.display()),
        }
    }

    if !status.all_available() {
        bail!("MKVToolNix is not usable");
    }
    Ok(())
}
