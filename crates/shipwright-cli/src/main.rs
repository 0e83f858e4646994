use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;

use shipwright_core::config::Config;
use shipwright_core::manifest::Manifest;
use shipwright_core::sync::{verify_release_dir, Synchronizer, VerifyIssue};
use shipwright_core::workspace::enumerate_units;
use shipwright_core::{Result, ShipwrightError, UpsertOutcome};

mod args;
use args::{Cli, Commands, Shell};

const MANIFEST_FILE: &str = "plugins.json";
const RELEASE_DIR: &str = "release";

fn main() -> ExitCode {
    let cli = Cli::parse();

    let root = resolve_root(cli.root);

    let result = match cli.command {
        Some(Commands::Sync {
            manifest,
            release_dir,
        }) => handle_sync(&root, manifest, release_dir, cli.quiet),
        Some(Commands::List { manifest }) => handle_list(&root, manifest),
        Some(Commands::Verify {
            manifest,
            release_dir,
        }) => handle_verify(&root, manifest, release_dir, cli.quiet),
        Some(Commands::Init) => handle_init(&root),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "shipwright", &mut io::stdout());
}

fn resolve_root(cli_root: Option<PathBuf>) -> PathBuf {
    if let Some(root) = cli_root {
        return root;
    }

    if let Ok(root) = std::env::var("SHIPWRIGHT_ROOT") {
        return PathBuf::from(root);
    }

    PathBuf::from(".")
}

fn manifest_path(root: &Path, flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(|| root.join(MANIFEST_FILE))
}

fn release_dir(root: &Path, flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(|| root.join(RELEASE_DIR))
}

fn handle_sync(
    root: &Path,
    manifest: Option<PathBuf>,
    release: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let config = Config::load(root)?;
    let units = enumerate_units(root, &config.publish.artifact_ext)?;

    let options = config.to_sync_options(manifest_path(root, manifest), release_dir(root, release));
    let report = Synchronizer::new(options).synchronize(&units)?;

    if quiet {
        return Ok(());
    }

    for release in &report.published {
        let label = match release.outcome {
            UpsertOutcome::Created => "new".green(),
            UpsertOutcome::Appended => "added".green(),
            UpsertOutcome::Replaced => "replaced".yellow(),
        };
        println!(
            "  {} {} {} ({})",
            "Published:".green(),
            release.id.cyan(),
            release.version,
            label
        );
    }

    println!();
    println!(
        "{} {} release(s) published, {} candidate(s) skipped, {} manifest entries.",
        "Done:".green(),
        report.published.len(),
        report.skipped,
        report.entries
    );

    Ok(())
}

fn handle_list(root: &Path, manifest: Option<PathBuf>) -> Result<()> {
    let path = manifest_path(root, manifest);
    let manifest = Manifest::load(&path)?;

    if manifest.is_empty() {
        println!("No plugins published yet ({}).", path.display());
        return Ok(());
    }

    for entry in manifest.entries() {
        println!();
        println!("{} ({})", entry.name.cyan().bold(), entry.id);
        println!("  {}", entry.description);
        println!("  provider: {}", entry.provider);
        for release in &entry.releases {
            println!(
                "  {} {} requires {} [{}]",
                release.version.yellow(),
                release.date,
                release.requires,
                release.sha512sum.get(..16).unwrap_or(&release.sha512sum)
            );
        }
    }

    Ok(())
}

fn handle_verify(
    root: &Path,
    manifest: Option<PathBuf>,
    release: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let report = verify_release_dir(&manifest_path(root, manifest), &release_dir(root, release))?;

    for issue in &report.issues {
        match issue {
            VerifyIssue::MissingArtifact { file } => {
                println!("  {} missing artifact: {}", "Issue:".red(), file);
            }
            VerifyIssue::DigestMismatch { file } => {
                println!("  {} digest mismatch: {}", "Issue:".red(), file);
            }
        }
    }

    if !report.is_clean() {
        return Err(ShipwrightError::VerificationFailed {
            issues: report.issues.len(),
        });
    }

    if !quiet {
        println!(
            "{} {} release(s) verified.",
            "Done:".green(),
            report.checked
        );
    }

    Ok(())
}

fn handle_init(root: &Path) -> Result<()> {
    let path = Config::init(root)?;
    println!("{} {}", "Created:".green(), path.display());
    Ok(())
}
