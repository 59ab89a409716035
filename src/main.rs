use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use shinit::app::config::{DEBUG_VAR, is_truthy};
use shinit::{
    AppError, DiscoverOptions, LoadMode, LoadOptions, RenameOptions, ShellKind, ShellMarkers,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "shinit")]
#[command(version)]
#[command(
    about = "Discover and source shell environment files and init.d modules in a fixed order",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit the sourcing script for the calling shell to eval
    Load {
        /// Path of the entry script as the shell sees it
        #[arg(long)]
        entry: Option<PathBuf>,
        /// Version of the calling bash, if any
        #[arg(long, env = "BASH_VERSION")]
        bash_version: Option<String>,
        /// Version of the calling zsh, if any
        #[arg(long, env = "ZSH_VERSION")]
        zsh_version: Option<String>,
        /// Abort on the first failing file
        #[arg(long)]
        strict: bool,
    },
    /// Apply the current permission policy to a sourced configuration file
    #[command(hide = true)]
    Normalize { path: PathBuf },
    /// Print the snippet an init.sh evaluates
    Hook {
        #[arg(value_enum)]
        shell: ShellArg,
        /// Abort on the first failing file
        #[arg(long)]
        strict: bool,
        /// Program the snippet invokes (defaults to this executable)
        #[arg(long)]
        program: Option<String>,
    },
    /// List configuration and module files without loading them
    #[clap(visible_alias = "ls")]
    Discover {
        #[arg(long)]
        entry: Option<PathBuf>,
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Rename files from one extension to another
    RenameExt {
        dir: PathBuf,
        from: String,
        to: String,
        #[arg(short, long)]
        recursive: bool,
        #[arg(long)]
        dry_run: bool,
    },
    /// Count regular files per directory
    CountFiles {
        #[arg(default_value = ".")]
        dirs: Vec<PathBuf>,
        #[arg(short, long)]
        recursive: bool,
    },
    /// Verify that commands are available on PATH
    CheckCmds {
        #[arg(required = true)]
        commands: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ShellArg {
    Bash,
    Zsh,
}

impl From<ShellArg> for ShellKind {
    fn from(arg: ShellArg) -> Self {
        match arg {
            ShellArg::Bash => ShellKind::Bash,
            ShellArg::Zsh => ShellKind::Zsh,
        }
    }
}

fn init_tracing() {
    let fallback =
        if is_truthy(std::env::var(DEBUG_VAR).ok().as_deref()) { "shinit=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // stdout carries the script the shell evaluates; all diagnostics go to stderr.
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .init();
}

fn current_program() -> String {
    std::env::current_exe()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "shinit".to_string())
}

fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Commands::Load { entry, bash_version, zsh_version, strict } => {
            if std::io::stdout().is_terminal() {
                return Err(AppError::NotEvaluated);
            }
            let options = LoadOptions {
                entry,
                cwd: std::env::current_dir()?,
                markers: ShellMarkers::new(bash_version, zsh_version),
                mode: if strict { LoadMode::Strict } else { LoadMode::BestEffort },
                program: current_program(),
            };
            let (script, _) = shinit::load(&options)?;
            print!("{}", script);
        }
        Commands::Normalize { path } => {
            shinit::normalize(&path)?;
        }
        Commands::Hook { shell, strict, program } => {
            let program = program.unwrap_or_else(current_program);
            print!("{}", shinit::hook(shell.into(), &program, strict));
        }
        Commands::Discover { entry, json } => {
            let options = DiscoverOptions { entry, cwd: std::env::current_dir()? };
            let report = shinit::discover(&options)?;
            if json {
                let rendered = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
                println!("{}", rendered);
            } else {
                print!("{}", report.render());
            }
        }
        Commands::RenameExt { dir, from, to, recursive, dry_run } => {
            let options = RenameOptions { dir, from, to, recursive, dry_run };
            for rename in shinit::rename_ext(&options)? {
                let verb = if dry_run { "would rename" } else { "renamed" };
                println!("{} {} -> {}", verb, rename.from.display(), rename.to.display());
            }
        }
        Commands::CountFiles { dirs, recursive } => {
            for count in shinit::count_files(&dirs, recursive)? {
                println!("{}\t{}", count.files, count.dir.display());
            }
        }
        Commands::CheckCmds { commands } => {
            for found in shinit::check_cmds(&commands)? {
                println!("{}: {}", found.name, found.path.display());
            }
        }
    }
    Ok(())
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
