use std::{ffi::OsString, fmt::Display, io::Write};

use clap::Parser;

use crate::{
    args::Opts,
    child,
    config::Config,
    privileges::assume_identity,
    result::{Error, Result},
    stdio::reopen_stdin_as_null,
    username::Username,
};

/// Progress through a single launch. Failure at any stage ends the launch.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Stage {
    Start,
    ArgsValidated,
    StdinHardened,
    IdentityAssumed,
    ChildSpawned,
    ChildReaped,
    Done,
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::ArgsValidated => "arguments validated",
            Stage::StdinHardened => "stdin hardened",
            Stage::IdentityAssumed => "identity assumed",
            Stage::ChildSpawned => "child spawned",
            Stage::ChildReaped => "child reaped",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

fn enter(stage: Stage) {
    log::debug!("stage: {}", stage);
}

/// Checks the command line: the program name plus exactly one valid username.
pub fn parse_args<I, T>(config: &Config, args: I) -> Result<Username>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.len() != 2 {
        return Err(Error::Usage)
    }
    let opts = Opts::try_parse_from(args).map_err(|_| Error::Usage)?;
    Username::parse(config, &opts.username)
}

/// Runs one launch: validate, harden stdin, switch identity, spawn the quota
/// script and wait for it. `Ok` only if the script exited with code 0.
pub fn run<I, T>(config: &Config, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    enter(Stage::Start);
    let username = parse_args(config, args)?;

    enter(Stage::ArgsValidated);
    reopen_stdin_as_null()?;

    enter(Stage::StdinHardened);
    assume_identity(&config.identity)?;

    enter(Stage::IdentityAssumed);
    let child = child::spawn(config, &username)?;

    enter(Stage::ChildSpawned);
    let reaped = child.wait()?;

    enter(Stage::ChildReaped);
    reaped.into_result()?;

    enter(Stage::Done);
    Ok(())
}

/// Turns the outcome of [`run`] into the process exit code.
///
/// Usage errors go to `stderr`; everything else goes to the log only.
pub fn report<W: Write>(config: &Config, result: &Result<()>, stderr: &mut W) -> i32 {
    match result {
        Ok(()) => 0,
        Err(Error::Usage) => {
            let _ = writeln!(stderr, "{}", config.usage());
            1
        },
        Err(e) => {
            log::error!("{}", e);
            1
        },
    }
}
