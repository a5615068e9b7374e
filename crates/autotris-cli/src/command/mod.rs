use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::{self, DefaultTarget};

use self::{
    play::{AutoPlayArg, ManualPlayArg},
    simulate::SimulateArg,
};

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Write log records to this file (filter with `RUST_LOG`)
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play manually, with the automated player available on demand
    #[command(name = "play")]
    ManualPlay(#[clap(flatten)] ManualPlayArg),
    /// Watch the automated player
    #[command(name = "auto-play")]
    AutoPlay(#[clap(flatten)] AutoPlayArg),
    /// Run a headless game with the automated player and print a JSON report
    Simulate(#[clap(flatten)] SimulateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let mode = args
        .mode
        .unwrap_or(Mode::ManualPlay(ManualPlayArg::default()));

    let default_target = match mode {
        Mode::Simulate(_) => DefaultTarget::Stderr,
        Mode::ManualPlay(_) | Mode::AutoPlay(_) => DefaultTarget::Disabled,
    };
    logging::init(args.log_file.as_deref(), default_target)?;

    match mode {
        Mode::ManualPlay(arg) => play::run_manual(&arg)?,
        Mode::AutoPlay(arg) => play::run_auto(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_play_is_default_mode() {
        let args = CommandArgs::try_parse_from(["autotris"]).unwrap();
        assert!(args.mode.is_none());
        assert!(args.log_file.is_none());
    }

    #[test]
    fn test_global_log_file_after_subcommand() {
        let args =
            CommandArgs::try_parse_from(["autotris", "simulate", "--log-file", "run.log"]).unwrap();
        assert_eq!(args.log_file, Some(PathBuf::from("run.log")));
        assert!(matches!(args.mode, Some(Mode::Simulate(_))));
    }

    #[test]
    fn test_step_ms_must_be_positive() {
        for mode in ["play", "auto-play"] {
            let result = CommandArgs::try_parse_from(["autotris", mode, "--step-ms", "0"]);
            assert!(result.is_err(), "{mode}");
            let result = CommandArgs::try_parse_from(["autotris", mode, "--step-ms", "1"]);
            assert!(result.is_ok(), "{mode}");
        }
    }

    #[test]
    fn test_invalid_seed_is_rejected() {
        let result = CommandArgs::try_parse_from(["autotris", "auto-play", "--seed", "xyz"]);
        assert!(result.is_err());
    }
}
