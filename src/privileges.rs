use nix::unistd::{getegid, geteuid, getgid, getuid, setgid, setuid};

use crate::{config::Identity, result::{Error, Result}};

/// Permanently switch real, effective and saved ids to `identity`.
///
/// Groups are set first, while we still hold the privilege to do so. When
/// running as root the caller's supplementary groups are replaced by the target
/// gid alone. There is no way back: the launcher exits shortly after the child
/// it spawns does.
pub fn assume_identity(identity: &Identity) -> Result<()> {
    log::info!(
        "assuming uid {} gid {} (was uid {} euid {} gid {} egid {})",
        identity.uid, identity.gid, getuid(), geteuid(), getgid(), getegid(),
    );
    if is_root() {
        reset_groups(identity)?;
    }
    setgid(identity.gid()).map_err(|cause| Error::SetGid { gid: identity.gid, cause })?;
    setuid(identity.uid()).map_err(|cause| Error::SetUid { uid: identity.uid, cause })?;

    if !is_identity(identity) {
        return Err(Error::IdentityMismatch {
            uid: identity.uid,
            gid: identity.gid,
            euid: geteuid().as_raw(),
            egid: getegid().as_raw(),
        })
    }
    Ok(())
}

#[cfg(not(target_vendor = "apple"))]
fn reset_groups(identity: &Identity) -> Result<()> {
    nix::unistd::setgroups(&[identity.gid()]).map_err(|cause| Error::SetGroups { gid: identity.gid, cause })
}

// setgroups is not exposed for Apple targets; only Linux installs are supported
#[cfg(target_vendor = "apple")]
fn reset_groups(_identity: &Identity) -> Result<()> {
    Ok(())
}

/// True if both real and effective ids match `identity`.
pub fn is_identity(identity: &Identity) -> bool {
    getuid() == identity.uid()
        && geteuid() == identity.uid()
        && getgid() == identity.gid()
        && getegid() == identity.gid()
}

pub fn is_root() -> bool {
    geteuid().is_root()
}

/// The identity the process is currently running as.
pub fn current_identity() -> Identity {
    Identity { uid: geteuid().as_raw(), gid: getegid().as_raw() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_identity_matches_effective_ids() {
        let identity = current_identity();
        assert_eq!(identity.uid(), geteuid());
        assert_eq!(identity.gid(), getegid());
    }

    #[test]
    fn unrepresentable_ids_are_refused() {
        // (uid_t)-1 and (gid_t)-1 are invalid even for root, so nothing changes
        let before = current_identity();
        match assume_identity(&Identity { uid: u32::MAX, gid: u32::MAX }) {
            Err(Error::SetGroups { cause, .. }) | Err(Error::SetGid { cause, .. }) => {
                assert_eq!(cause, nix::errno::Errno::EINVAL)
            },
            other => panic!("wrong result: {:#?}", other),
        }
        assert_eq!(current_identity(), before);
    }

    #[test]
    fn is_identity_rejects_other_ids() {
        let identity = current_identity();
        let other = Identity { uid: identity.uid.wrapping_add(1), gid: identity.gid };
        assert!(!is_identity(&other));
        let other = Identity { uid: identity.uid, gid: identity.gid.wrapping_add(1) };
        assert!(!is_identity(&other));
    }
}
