use std::{os::unix::process::ExitStatusExt, process::{Child, Command, ExitStatus}};

use crate::{config::Config, result::{Error, Result}, username::Username};

/// How the quota script ended.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Termination {
    Exited(i32),
    Signaled(i32),
    /// Neither exited nor signalled; carries the raw wait status.
    Anomalous(i32),
}

impl From<ExitStatus> for Termination {
    fn from(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            Termination::Exited(code)
        } else if let Some(signum) = status.signal() {
            Termination::Signaled(signum)
        } else {
            Termination::Anomalous(status.into_raw())
        }
    }
}

impl Termination {
    pub fn success(&self) -> bool {
        *self == Termination::Exited(0)
    }
}

/// The running quota script. Consumed by [`QuotaChild::wait`].
#[derive(Debug)]
pub struct QuotaChild {
    process: Child,
}

/// Starts the quota script with `username` as its only argument.
///
/// The child inherits our descriptors and identity. Its environment is rebuilt
/// from the configuration and its working directory is pinned, so nothing the
/// caller set up leaks into a privileged process. If the exec fails, the error
/// comes back here rather than running on in the child.
pub fn spawn(config: &Config, username: &Username) -> Result<QuotaChild> {
    log::info!("running {} {}", config.script.display(), username);
    let process = Command::new(&config.script)
        .arg(username.as_str())
        .env_clear()
        .envs(config.environment.resolve(|name| std::env::var_os(name)))
        .current_dir(&config.working_directory)
        .spawn()
        .map_err(|cause| Error::Spawn { script: config.script.clone(), cause })?;
    Ok(QuotaChild { process })
}

impl QuotaChild {
    pub fn id(&self) -> u32 {
        self.process.id()
    }

    /// Blocks until the script terminates. There is no timeout.
    pub fn wait(mut self) -> Result<Reaped> {
        let pid = self.id();
        let status = self.process.wait().map_err(|cause| Error::Wait { pid, cause })?;
        log::debug!("child process {} finished with {:?}", pid, status);
        Ok(Reaped { pid, termination: Termination::from(status) })
    }
}

/// A child that has been waited for.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Reaped {
    pub pid: u32,
    pub termination: Termination,
}

impl Reaped {
    /// Only a zero exit is success; the script's own exit code is not passed on.
    pub fn into_result(self) -> Result<()> {
        if self.termination.success() {
            Ok(())
        } else {
            Err(Error::ChildFailed { pid: self.pid, termination: self.termination })
        }
    }
}
