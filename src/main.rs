use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use menv::{
    commands,
    config::Config,
    locator::ToolLocator,
    shell::SystemShell,
    ui::{ColorMode, Ui},
};

#[derive(Parser)]
#[command(name = "menv")]
#[command(about = "Maven Environment Manager")]
#[command(
    long_about = "menv is a tool to manage maven profiles for a given folder and its children."
)]
#[command(version)]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// When to use colors: always, auto, never
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Log what menv is doing to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new profile
    #[command(visible_alias = "add")]
    New {
        /// Name of the profile to create
        name: String,
    },

    /// List all available profiles
    Ls,

    /// Set given profile as active profile for this folder and children.
    ///
    /// If no profile is given, you will be prompted to select one.
    #[command(visible_alias = "profile")]
    Set {
        /// Name of the profile to activate
        name: Option<String>,
    },

    /// Clears the local profile, if one is set in the current directory
    Clear,

    /// Removes the provided profile, including its MAVEN_OPTS
    Rm {
        /// Name of the profile to remove
        name: String,
    },

    /// Show active profile
    Ps,

    /// Edit a profile's settings.xml. Set MENV_EDITOR to change the editor (default: vi)
    Edit {
        /// Name of the profile to edit
        name: String,
    },

    /// Edit MAVEN_OPTS of the provided profile, or the active profile if none is
    /// provided, or prompt for a profile if none is active
    Editopts {
        /// Name of the profile whose MAVEN_OPTS to edit
        name: Option<String>,
    },

    /// Run maven with the active profile's settings and MAVEN_OPTS
    #[command(hide = true, disable_help_flag = true)]
    Mvn {
        /// Arguments passed to maven unchanged
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Override current maven project/.mvn folder to the active profile settings
    Mvnlocal,

    /// Override IntelliJ IDEA maven settings.xml to the active profile one
    Idea,

    /// Try to remove the IntelliJ overridden settings
    Rmidea,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: CompletionShell,
    },
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env("MENV_LOG").unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("menv=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

/// Position of a `mvn` subcommand preceded only by menv's own flags
fn mvn_position(argv: &[String]) -> Option<usize> {
    let mut i = 1;
    while let Some(arg) = argv.get(i) {
        match arg.as_str() {
            "mvn" => return Some(i),
            "--no-color" | "-v" | "--verbose" => i += 1,
            "--color" => i += 2,
            flag if flag.starts_with("--color=") => i += 1,
            _ => return None,
        }
    }
    None
}

/// Everything after `mvn` goes to maven untouched, so clap only sees what precedes it
fn try_parse_cli(argv: Vec<String>) -> Result<Cli, clap::Error> {
    let Some(pos) = mvn_position(&argv) else {
        return Cli::try_parse_from(argv);
    };

    let mut cli = Cli::try_parse_from(&argv[..=pos])?;
    cli.command = Commands::Mvn {
        args: argv[pos + 1..].to_vec(),
    };
    Ok(cli)
}

fn parse_cli() -> Cli {
    let argv: Vec<String> = std::env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    try_parse_cli(argv).unwrap_or_else(|e| e.exit())
}

fn main() -> ExitCode {
    let cli = parse_cli();
    let ui = Ui::new(cli.color, cli.no_color);

    match run(cli, &ui) {
        Ok(code) => code,
        Err(e) => {
            ui.err(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, ui: &Ui) -> Result<ExitCode> {
    let config = Config::load()?;
    init_logging(cli.verbose || config.verbose);
    config.ensure_root()?;

    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let shell = SystemShell;

    match cli.command {
        Commands::New { name } => commands::new(&config, &name, ui)?,
        Commands::Ls => commands::list(&config, &cwd, ui)?,
        Commands::Set { name } => {
            let name = match name {
                Some(name) => Some(name),
                None => commands::prompt_for_profile(
                    &config,
                    std::io::stdin().lock(),
                    anstream::stdout(),
                )?,
            };
            if let Some(name) = name {
                commands::set(&config, &cwd, &name, ui)?;
            }
        }
        Commands::Clear => commands::clear(&config, &cwd, ui)?,
        Commands::Rm { name } => commands::remove(&config, &name, ui)?,
        Commands::Ps => commands::ps(&cwd, ui)?,
        Commands::Edit { name } => commands::edit(&config, &name, ui, &shell)?,
        Commands::Editopts { name } => {
            let name = match commands::editopts_target(name, &cwd) {
                Some(name) => Some(name),
                None => commands::prompt_for_profile(
                    &config,
                    std::io::stdin().lock(),
                    anstream::stdout(),
                )?,
            };
            if let Some(name) = name {
                commands::edit_opts(&config, &name, ui, &shell)?;
            }
        }
        Commands::Mvn { args } => {
            let locator = ToolLocator::from_env(&cwd);
            let code = commands::mvn(&config, &cwd, &args, ui, &shell, &locator)?;
            return Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)));
        }
        Commands::Mvnlocal => commands::mvnlocal(&config, &cwd, ui)?,
        Commands::Idea => commands::idea(&config, &cwd, ui)?,
        Commands::Rmidea => commands::rmidea(&config, &cwd, ui)?,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }
    }

    Ok(ExitCode::SUCCESS)
}
