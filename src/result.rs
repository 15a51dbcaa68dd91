use std::{fmt, path::PathBuf};

use nix::sys::signal::Signal;

use crate::child::Termination;

#[derive(Debug)]
pub enum Error {
    /// Wrong argument count or a username that fails validation.
    Usage,
    ConfigSyntax(toml::de::Error),
    InvalidConfig(String),
    CloseStdin(nix::Error),
    OpenNullDevice(nix::Error),
    StdinSlot(i32),
    SetGroups { gid: u32, cause: nix::Error },
    SetGid { gid: u32, cause: nix::Error },
    SetUid { uid: u32, cause: nix::Error },
    IdentityMismatch { uid: u32, gid: u32, euid: u32, egid: u32 },
    Spawn { script: PathBuf, cause: std::io::Error },
    Wait { pid: u32, cause: std::io::Error },
    ChildFailed { pid: u32, termination: Termination },
}

impl From<toml::de::Error> for Error {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigSyntax(value)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Usage => write!(f, "invalid usage"),
            Error::ConfigSyntax(e) => write!(f, "built-in configuration is malformed: {}", e),
            Error::InvalidConfig(msg) => write!(f, "built-in configuration is invalid: {}", msg),
            Error::CloseStdin(e) => write!(f, "close(0) failed: {}", e),
            Error::OpenNullDevice(e) => write!(f, "open(/dev/null) failed: {}", e),
            Error::StdinSlot(fd) => write!(f, "/dev/null opened as fd {} instead of fd 0", fd),
            Error::SetGroups { gid, cause } => write!(f, "setgroups([{}]) failed: {}", gid, cause),
            Error::SetGid { gid, cause } => write!(f, "setgid({}) failed: {}", gid, cause),
            Error::SetUid { uid, cause } => write!(f, "setuid({}) failed: {}", uid, cause),
            Error::IdentityMismatch { uid, gid, euid, egid } => write!(
                f,
                "identity is euid {} egid {} after switching to uid {} gid {}",
                euid, egid, uid, gid,
            ),
            Error::Spawn { script, cause } => write!(
                f,
                "cannot execute {}: {} (errno {})",
                script.display(),
                cause,
                cause.raw_os_error().unwrap_or(0),
            ),
            Error::Wait { pid, cause } => write!(f, "waiting for child process {} failed: {}", pid, cause),
            Error::ChildFailed { pid, termination } => match termination {
                Termination::Exited(code) => {
                    write!(f, "child process {} exited with {}", pid, code)
                },
                Termination::Signaled(signum) => match Signal::try_from(*signum) {
                    Ok(sig) => write!(f, "child process {} received unexpected signal {} ({})", pid, signum, sig),
                    Err(_) => write!(f, "child process {} received unexpected signal {}", pid, signum),
                },
                Termination::Anomalous(raw) => write!(
                    f,
                    "child process {} neither exited nor was signalled; status {:08x}",
                    pid, raw,
                ),
            },
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ConfigSyntax(e) => Some(e),
            Error::CloseStdin(e) | Error::OpenNullDevice(e) => Some(e),
            Error::SetGroups { cause, .. } | Error::SetGid { cause, .. } | Error::SetUid { cause, .. } => Some(cause),
            Error::Spawn { cause, .. } | Error::Wait { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
