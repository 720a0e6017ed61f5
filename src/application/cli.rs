use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use owo_colors::OwoColorize;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::ui::help_text;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::services::SessionIdentity;
use crate::infrastructure::storage::FileStore;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

async fn print_session() -> Result<()> {
    let identity = SessionIdentity::new(Box::<FileStore>::default());
    println!("{}", identity.get_or_create_session_id().await);

    return Ok(());
}

async fn reset_session() -> Result<()> {
    let identity = SessionIdentity::new(Box::<FileStore>::default());
    identity.forget().await?;
    println!("Forgot the stored session. The next chat starts a new conversation.");

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_session() -> Command {
    return Command::new("session")
        .about("Inspect the session shared with the dialogue engine.")
        .subcommand(
            Command::new("show")
                .about("Print the session id, creating one if this client has none yet."),
        )
        .subcommand(
            Command::new("reset")
                .about("Forget the stored session id so the next chat starts from scratch."),
        );
}

fn arg_dialogue_url() -> Arg {
    return Arg::new(ConfigKey::DialogueURL.to_string())
        .short('u')
        .long(ConfigKey::DialogueURL.to_string())
        .env("IVF_INTAKE_DIALOGUE_URL")
        .num_args(1)
        .help(format!(
            "Base URL of the dialogue engine. The client posts turns to <url>/chat. [default: {}]",
            Config::default(ConfigKey::DialogueURL)
        ))
        .global(true);
}

fn arg_health_check_timeout() -> Arg {
    return Arg::new(ConfigKey::HealthCheckTimeout.to_string())
        .long(ConfigKey::HealthCheckTimeout.to_string())
        .env("IVF_INTAKE_HEALTH_CHECK_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds before timing out when health checking the dialogue engine. [default: {}]",
            Config::default(ConfigKey::HealthCheckTimeout)
        ))
        .global(true);
}

fn arg_request_timeout() -> Arg {
    return Arg::new(ConfigKey::RequestTimeout.to_string())
        .long(ConfigKey::RequestTimeout.to_string())
        .env("IVF_INTAKE_REQUEST_TIMEOUT")
        .num_args(1)
        .help("Time to wait in milliseconds for a reply before giving up on a turn. Waits indefinitely when unset.")
        .global(true);
}

fn arg_storage_file() -> Arg {
    return Arg::new(ConfigKey::StorageFile.to_string())
        .long(ConfigKey::StorageFile.to_string())
        .env("IVF_INTAKE_STORAGE_FILE")
        .num_args(1)
        .help(format!(
            "Path to the file remembering the session id between runs. [default: {}]",
            Config::default(ConfigKey::StorageFile)
        ))
        .global(true);
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") || line.starts_with("ANSWERING:") {
                return format!("CHAT {line}").bold().underline().to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("ivf-intake")
        .about(about)
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(Command::new("chat").about("Start or continue the intake conversation."))
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_session())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("IVF_INTAKE_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(arg_dialogue_url())
        .arg(arg_health_check_timeout())
        .arg(arg_request_timeout())
        .arg(arg_storage_file())
        .arg(
            Arg::new(ConfigKey::Username.to_string())
                .long(ConfigKey::Username.to_string())
                .env("IVF_INTAKE_USERNAME")
                .num_args(1)
                .help("Your name displayed next to your messages.")
                .global(true),
        );
}

/// Parses arguments and runs any one-shot subcommand. Returns true when the
/// chat should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("chat", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("session", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            match subcmd_matches.subcommand() {
                Some(("show", _)) => {
                    print_session().await?;
                }
                Some(("reset", _)) => {
                    reset_session().await?;
                }
                _ => {
                    subcommand_session().print_long_help()?;
                }
            }
            return Ok(false);
        }
        _ => {
            Config::load(vec![&matches]).await?;
        }
    }

    return Ok(true);
}
