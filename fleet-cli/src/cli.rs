use std::io::IsTerminal;

use anyhow::Result;
use clap::{Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use tracing::debug;

use crate::commands::{
    self, Context, Invocation, Permission, app, devices, note,
    options::{DeviceArgs, YesArgs},
};
use crate::config::Config;
use crate::error::CliError;
use crate::prompt::{PipedStdin, TerminalPrompter};
use crate::server::PlatformClient;
use crate::util::logging::init_tracing;

#[derive(Parser, Debug)]
#[command(name = "fleet")]
#[command(version, about = "Manage applications and devices on the fleet platform", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = app::LIST.description, long_about = app::LIST.help)]
    Apps,

    #[command(args_conflicts_with_subcommands = true)]
    #[command(about = "Show, create, restart or remove an application", long_about = app::INFO.help)]
    App(AppArgs),

    #[command(about = note::SET.description, long_about = note::SET.help)]
    Note(NoteArgs),

    /// Device commands
    #[command(subcommand)]
    Devices(DevicesCommands),
}

#[derive(Args, Debug)]
struct AppArgs {
    #[command(subcommand)]
    command: Option<AppCommands>,

    /// Application name to show
    name: Option<String>,
}

#[derive(Subcommand, Debug)]
enum AppCommands {
    #[command(about = app::CREATE.description, long_about = app::CREATE.help)]
    Create {
        /// Application name
        name: String,

        #[arg(short = 't', long = "type", value_name = "TYPE", help = app::TYPE.description)]
        device_type: Option<String>,
    },

    #[command(about = app::RESTART.description, long_about = app::RESTART.help)]
    Restart {
        /// Application name
        name: String,
    },

    #[command(about = app::REMOVE.description, long_about = app::REMOVE.help)]
    Rm {
        /// Application name
        name: String,

        #[command(flatten)]
        yes: YesArgs,
    },
}

#[derive(Args, Debug)]
struct NoteArgs {
    /// Note text, read from stdin when omitted
    note: Option<String>,

    #[command(flatten)]
    device: DeviceArgs,
}

#[derive(Subcommand, Debug)]
enum DevicesCommands {
    #[command(about = devices::SUPPORTED.description, long_about = devices::SUPPORTED.help)]
    Supported,
}

impl Commands {
    fn into_invocation(self) -> Result<Invocation> {
        let invocation = match self {
            Commands::Apps => Invocation::AppList,
            Commands::App(AppArgs { command, name }) => match (command, name) {
                (Some(AppCommands::Create { name, device_type }), _) => {
                    Invocation::AppCreate { name, device_type }
                }
                (Some(AppCommands::Restart { name }), _) => Invocation::AppRestart { name },
                (Some(AppCommands::Rm { name, yes }), _) => Invocation::AppRemove {
                    name,
                    yes: yes.yes,
                },
                (None, Some(name)) => Invocation::AppInfo { name },
                (None, None) => anyhow::bail!("Missing application name"),
            },
            Commands::Note(NoteArgs { note, device }) => Invocation::NoteSet {
                note,
                device: device.device,
            },
            Commands::Devices(DevicesCommands::Supported) => Invocation::DevicesSupported,
        };
        Ok(invocation)
    }
}

/// Session token for a command, or an error when it needs a login.
pub fn authorize(config: &Config, permission: Permission) -> Result<String> {
    match permission {
        Permission::Public => Ok(config.api_token.clone().unwrap_or_default()),
        Permission::User => config
            .api_token
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| CliError::NotLoggedIn.into()),
    }
}

pub async fn cli() -> Result<()> {
    let matches = Cli::command()
        .after_help(commands::primary_help())
        .get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let config = Config::load()?;
    init_tracing(&config.log_level);

    let invocation = cli.command.into_invocation()?;
    let info = invocation.info();
    debug!("running `{}`", info.signature);

    invocation.validate()?;
    let token = authorize(&config, info.permission)?;
    let platform = PlatformClient::from_config(&config, &token)?;

    let mut stdout = std::io::stdout();
    let ansi = stdout.is_terminal() && std::env::var_os("NO_COLOR").is_none();
    let mut ctx = Context {
        platform: &platform,
        prompter: &TerminalPrompter,
        input: &PipedStdin,
        out: &mut stdout,
        ansi,
    };
    invocation.run(&mut ctx).await
}
