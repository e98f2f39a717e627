pub mod commands;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::exit;
use tracing::debug;

use crate::common::error::WrapperError;
use crate::common::result::WrapperResult;
use crate::common::templates::TemplateProcessor;
use crate::infrastructure::filesystem::config_store::DEFAULT_CONFIG_NAME;
use crate::infrastructure::filesystem::credential_store::default_cache_path;

use commands::{ConfigCommand, ProjectCommandRunner};

const VERSION_INFO: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_DATE"),
    ")"
);

/// sqlcl-wrapper - SQLcl project commands with a per-project connection config
#[derive(Parser)]
#[command(name = "sqlcl-wrapper")]
#[command(about = "Run SQLcl project commands using a per-project connection config")]
#[command(version = VERSION_INFO)]
pub struct Cli {
    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// SQL client executable
    #[arg(long, env = "SQLCL_WRAPPER_CLIENT", default_value = "sql")]
    pub client: String,

    /// Password cache file (defaults to a file beside the executable)
    #[arg(long, env = "SQLCL_WRAPPER_CACHE")]
    pub cache_file: Option<PathBuf>,

    /// Configuration file name at the git project root
    #[arg(long, env = "SQLCL_WRAPPER_CONFIG_NAME", default_value = DEFAULT_CONFIG_NAME)]
    pub config_name: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate, show or edit the configuration file
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Run `project <args>` through SQLcl; `project export` also reorganizes the exported DDL
    #[command(disable_help_flag = true)]
    Project {
        /// Arguments passed on to the SQLcl project command
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Anything else is accepted and ignored
    #[command(external_subcommand)]
    Other(Vec<String>),
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Interactively create the configuration file
    Generate {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
        ignored: Vec<String>,
    },

    /// Print the configuration
    Show {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
        ignored: Vec<String>,
    },

    /// Change one key: `config edit <key> <value>`
    Edit {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct WrapperSettings {
    pub client: String,
    pub cache_file: Option<PathBuf>,
    pub config_name: String,
}

impl WrapperSettings {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            client: cli.client.clone(),
            cache_file: cli.cache_file.clone(),
            config_name: cli.config_name.clone(),
        }
    }

    /// Explicit cache file, or the default beside the executable
    pub fn cache_path(&self) -> WrapperResult<PathBuf> {
        match &self.cache_file {
            Some(path) => Ok(path.clone()),
            None => default_cache_path()
                .map_err(|e| WrapperError::credential_error_with_source(e.to_string(), e)),
        }
    }
}

/// Global options that consume the following word
const VALUE_OPTIONS: [&str; 3] = ["--client", "--cache-file", "--config-name"];

/// CLI application runner
pub struct CliApp {
    args: Vec<String>,
}

impl CliApp {
    pub fn new() -> Self {
        Self::from_args(std::env::args_os().map(|a| a.to_string_lossy().into_owned()))
    }

    /// Runner for an explicit argument list, program name first
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let cli = match Cli::try_parse_from(&self.args) {
            Ok(cli) => cli,
            Err(e) => return self.handle_parse_error(e),
        };

        if cli.no_color {
            colored::control::set_override(false);
        }

        let settings = WrapperSettings::from_cli(&cli);
        match Self::handle_command(&cli, &settings).await {
            Ok(()) => Ok(()),
            Err(e) => {
                report_error(&e, &settings.config_name);
                exit(e.exit_code());
            }
        }
    }

    /// Help and version are printed by clap. Input clap rejects is a usage
    /// error under `config` and ignored everywhere else.
    fn handle_parse_error(&self, error: clap::Error) -> anyhow::Result<()> {
        match error.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => error.exit(),
            kind if command_word(&self.args) == Some("config") => {
                debug!("Rejected config arguments: {:?}", kind);
                let usage = commands::config::config_usage_error();
                report_error(&usage, DEFAULT_CONFIG_NAME);
                exit(usage.exit_code());
            }
            kind => {
                debug!("Ignoring unrecognized input: {:?}", kind);
                Ok(())
            }
        }
    }

    async fn handle_command(cli: &Cli, settings: &WrapperSettings) -> WrapperResult<()> {
        match &cli.command {
            Some(Commands::Config { action }) => {
                ConfigCommand::new(settings).execute(action.as_ref()).await
            }
            Some(Commands::Project { args }) => {
                ProjectCommandRunner::new(settings).execute(args).await
            }
            Some(Commands::Other(words)) => {
                debug!("Ignoring unrecognized command: {}", words.join(" "));
                Ok(())
            }
            None => {
                debug!("No command given");
                Ok(())
            }
        }
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}

/// First word after the global options, as the command router sees it
fn command_word(args: &[String]) -> Option<&str> {
    let mut words = args.iter().skip(1);
    while let Some(word) = words.next() {
        if VALUE_OPTIONS.contains(&word.as_str()) {
            words.next();
            continue;
        }
        let is_global_flag = word == "--no-color"
            || VALUE_OPTIONS
                .iter()
                .any(|option| word.strip_prefix(option).is_some_and(|rest| rest.starts_with('=')));
        if !is_global_flag {
            return Some(word.as_str());
        }
    }
    None
}

fn report_error(error: &WrapperError, config_name: &str) {
    match error {
        WrapperError::UsageError { message } => println!("{}", message),
        WrapperError::ConfigMissing { path } => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| config_name.to_string());
            print!("{}", TemplateProcessor::new().config_missing_message(&name));
        }
        other => eprintln!("{} {}", "Error:".red().bold(), other),
    }
}
