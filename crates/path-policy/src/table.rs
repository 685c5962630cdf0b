//! The compiled-in tool table.
//!
//! Each entry says whether a binary found on `$PATH` may be run during the
//! build. Anything not listed here gets [`Preset::Missing`].

use crate::config::Preset;

use Preset::{Allowed, Forbidden, LinuxOnlyPrebuilt};

pub const DEFAULT_TABLE: &[(&str, Preset)] = &[
    ("bash", Allowed),
    ("brotli", Allowed),
    ("ccache", Allowed),
    ("cpio", Allowed),
    ("curl", Allowed),
    ("date", Allowed),
    ("diff", Allowed),
    ("dlv", Allowed),
    ("expr", Allowed),
    ("flock", Allowed),
    ("fuser", Allowed),
    ("gcert", Allowed),
    ("gcertstatus", Allowed),
    ("gcloud", Allowed),
    ("getopt", Allowed),
    ("git", Allowed),
    ("hexdump", Allowed),
    ("jar", Allowed),
    ("java", Allowed),
    ("javap", Allowed),
    ("locale", Allowed),
    ("lsof", Allowed),
    ("ld.lld", Allowed),
    ("llvm-ar", Allowed),
    ("nproc", Allowed),
    ("openssl", Allowed),
    ("patch", Allowed),
    ("pkg-config", Allowed),
    ("pstree", Allowed),
    ("python3", Allowed),
    ("python3.6", Allowed),
    ("python3.7", Allowed),
    ("python3.8", Allowed),
    ("python3.9", Allowed),
    ("python3.10", Allowed),
    ("repo", Allowed),
    ("rsync", Allowed),
    ("sh", Allowed),
    ("stubby", Allowed),
    ("tar", Allowed),
    ("tr", Allowed),
    ("unzip", Allowed),
    ("zip", Allowed),
    ("zipdetails", Allowed),
    ("arm-linux-androidkernel-as", Allowed),
    ("arm-linux-androidkernel-ld", Allowed),
    // Host toolchain is removed; use the in-tree toolchain instead.
    // GCC also can't find cc1 through the interposer.
    ("ar", Forbidden),
    ("as", Forbidden),
    ("cc", Forbidden),
    ("clang", Forbidden),
    ("clang++", Forbidden),
    ("gcc", Forbidden),
    ("g++", Forbidden),
    ("ld", Allowed), // HACK
    ("ld.bfd", Forbidden),
    ("ld.gold", Forbidden),
    ("perl", Allowed), // HACK
    // Toybox tools that only work on Linux.
    ("pgrep", LinuxOnlyPrebuilt),
    ("pkill", LinuxOnlyPrebuilt),
    ("ps", LinuxOnlyPrebuilt),
];

/// Host utilities allowed only on platforms lacking Linux prebuilts.
pub const DARWIN_NATIVE_TOOLS: &[&str] = &["sw_vers", "xcrun"];
