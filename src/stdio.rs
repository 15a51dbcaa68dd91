use std::os::unix::io::RawFd;

use nix::{errno::Errno, fcntl::{open, OFlag}, libc::STDIN_FILENO, sys::stat::Mode, unistd::close};

use crate::result::{Error, Result};

const NULL_DEVICE: &str = "/dev/null";

/// Replaces standard input with the null device.
///
/// The freshly opened descriptor must land in slot 0; anything else means the
/// descriptor table is not what we expect and the launcher must not go on.
/// Standard output and standard error are left alone since they carry the
/// script's report back to the caller.
pub fn reopen_stdin_as_null() -> Result<()> {
    log::debug!("replacing fd {} with {}", STDIN_FILENO, NULL_DEVICE);
    match close(STDIN_FILENO) {
        // Already closed by whoever started us; the slot is free either way.
        Ok(()) | Err(Errno::EBADF) => {},
        Err(e) => return Err(Error::CloseStdin(e)),
    }

    let fd: RawFd = open(NULL_DEVICE, OFlag::O_RDWR, Mode::empty()).map_err(Error::OpenNullDevice)?;
    if fd != STDIN_FILENO {
        let _ = close(fd);
        return Err(Error::StdinSlot(fd))
    }
    Ok(())
}
