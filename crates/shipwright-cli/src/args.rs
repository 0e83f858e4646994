use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "shipwright")]
#[command(about = "Build-and-release manager for plugin ecosystems")]
#[command(version)]
pub struct Cli {
    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Workspace root containing plugin projects and shipwright.toml (default: .)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Publish built plugin artifacts: update the manifest and release directory
    Sync {
        /// Manifest file (default: <root>/plugins.json)
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Release directory (default: <root>/release)
        #[arg(long)]
        release_dir: Option<PathBuf>,
    },

    /// List manifest entries and their releases
    List {
        /// Manifest file (default: <root>/plugins.json)
        #[arg(long)]
        manifest: Option<PathBuf>,
    },

    /// Check released artifacts against the manifest digests
    Verify {
        /// Manifest file (default: <root>/plugins.json)
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Release directory (default: <root>/release)
        #[arg(long)]
        release_dir: Option<PathBuf>,
    },

    /// Write a default shipwright.toml to the workspace root
    Init,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
