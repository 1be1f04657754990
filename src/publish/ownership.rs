// src/publish/ownership.rs
// =============================================================================
// Sets the owner and permission bits of the published sitemap.
//
// The web server runs as a service account (www-data on Debian/Ubuntu) and
// must be able to read the file. SystemOwnership looks the account up in the
// OS user and group databases and applies chown + chmod. ModeOnly skips the
// chown, which is what you want when not running as root (and in tests).
//
// Rust concepts:
// - Traits: OwnershipSetter lets the publisher work with either strategy
// - unsafe + libc: getpwnam_r/getgrnam_r are plain C functions that fill a
//   caller-owned buffer, so concurrent lookups do not trample each other
// =============================================================================

use crate::error::{Result, SitemapError};
use std::ffi::{CStr, CString};
use std::fs::{self, Permissions};
use std::io;
use std::{mem, ptr};
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tracing::debug;

/// rw-r--r--
pub const OUTPUT_MODE: u32 = 0o644;

pub trait OwnershipSetter {
    fn apply(&self, path: &Path, account: &str, mode: u32) -> Result<()>;
}

/// chown to `account:account`, then chmod
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOwnership;

impl OwnershipSetter for SystemOwnership {
    fn apply(&self, path: &Path, account: &str, mode: u32) -> Result<()> {
        let uid = lookup_uid(account)?;
        let gid = lookup_gid(account)?;
        debug!(path = %path.display(), account, uid, gid, "changing owner");

        std::os::unix::fs::chown(path, Some(uid), Some(gid)).map_err(|source| {
            SitemapError::Ownership {
                what: "owner",
                path: path.to_path_buf(),
                source,
            }
        })?;
        set_mode(path, mode)
    }
}

/// chmod only; the file keeps whatever owner created it
#[derive(Debug, Default, Clone, Copy)]
pub struct ModeOnly;

impl OwnershipSetter for ModeOnly {
    fn apply(&self, path: &Path, _account: &str, mode: u32) -> Result<()> {
        set_mode(path, mode)
    }
}

fn set_mode(path: &Path, mode: u32) -> Result<()> {
    fs::set_permissions(path, Permissions::from_mode(mode)).map_err(|source| {
        SitemapError::Ownership {
            what: "permissions",
            path: path.to_path_buf(),
            source,
        }
    })
}

fn c_name(kind: &'static str, name: &str) -> Result<CString> {
    CString::new(name).map_err(|_| SitemapError::UnknownAccount {
        kind,
        name: name.to_string(),
    })
}

// Start small; the _r calls report ERANGE when the record does not fit.
const INITIAL_BUFFER: usize = 1024;
const MAX_BUFFER: usize = 1024 * 1024;

// Runs one reentrant lookup, growing the scratch buffer on ERANGE.
// `call` returns the libc status and the id if an entry was found.
fn lookup_id<F>(kind: &'static str, name: &str, mut call: F) -> Result<u32>
where
    F: FnMut(&CStr, &mut [libc::c_char]) -> (libc::c_int, Option<u32>),
{
    let c_name = c_name(kind, name)?;
    let mut buf: Vec<libc::c_char> = vec![0; INITIAL_BUFFER];
    loop {
        match call(&c_name, &mut buf) {
            (libc::ERANGE, _) if buf.len() < MAX_BUFFER => {
                let len = buf.len() * 2;
                buf.resize(len, 0);
            }
            (0, Some(id)) => return Ok(id),
            (0 | libc::ENOENT | libc::ESRCH, None) => {
                return Err(SitemapError::UnknownAccount {
                    kind,
                    name: name.to_string(),
                })
            }
            (rc, _) => {
                return Err(SitemapError::AccountLookup {
                    kind,
                    name: name.to_string(),
                    source: io::Error::from_raw_os_error(rc),
                })
            }
        }
    }
}

pub fn lookup_uid(user: &str) -> Result<u32> {
    lookup_id("user", user, |name, buf| {
        let mut entry: libc::passwd = unsafe { mem::zeroed() };
        let mut found: *mut libc::passwd = ptr::null_mut();
        let rc = unsafe {
            libc::getpwnam_r(name.as_ptr(), &mut entry, buf.as_mut_ptr(), buf.len(), &mut found)
        };
        (rc, (!found.is_null()).then_some(entry.pw_uid))
    })
}

pub fn lookup_gid(group: &str) -> Result<u32> {
    lookup_id("group", group, |name, buf| {
        let mut entry: libc::group = unsafe { mem::zeroed() };
        let mut found: *mut libc::group = ptr::null_mut();
        let rc = unsafe {
            libc::getgrnam_r(name.as_ptr(), &mut entry, buf.as_mut_ptr(), buf.len(), &mut found)
        };
        (rc, (!found.is_null()).then_some(entry.gr_gid))
    })
}
