use anyhow::Result;
use clap::Parser;

use tl_relay::cli::commands::{channel, langs, preinstall, run};
use tl_relay::cli::{Args, ChannelRef, Command};
use tl_relay::config::Settings;
use tl_relay::control::ControlCommand;
use tl_relay::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.global.verbose, args.global.log_json);
    let settings = args.global.settings();

    match args.command {
        Command::Run { preinstall } => {
            run::run_relay(&settings, &preinstall).await?;
        }
        Command::Enable { channel: at, to } => {
            configure(&settings, at, ControlCommand::Enable { target: to })?;
        }
        Command::Disable { channel: at } => {
            configure(&settings, at, ControlCommand::Disable)?;
        }
        Command::SetTarget { guild, target } => {
            channel::run_guild_target(&settings, guild, &target)?;
        }
        Command::ClearTarget { channel: at } => {
            configure(&settings, at, ControlCommand::ClearTarget)?;
        }
        Command::Status { channel: at } => {
            configure(&settings, at, ControlCommand::Status)?;
        }
        Command::Langs => {
            langs::print_languages(&settings)?;
        }
        Command::Preinstall { pairs } => {
            preinstall::run_preinstall(&settings, &pairs).await?;
        }
    }

    Ok(())
}

fn configure(settings: &Settings, at: ChannelRef, command: ControlCommand) -> Result<()> {
    channel::run_channel_command(settings, at.guild, at.channel, command)
}
