use serde::{Deserialize, Serialize};

/// How the PATH interposer treats one host tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathConfig {
    /// Whether to create the symlink in the new PATH for this tool.
    pub symlink: bool,
    /// Whether usages of this tool are recorded.
    pub log: bool,
    /// Whether to exit with an error instead of invoking the underlying tool.
    pub error: bool,
    /// Whether the build ships a Linux-only prebuilt of this tool. Other
    /// platforms fall back to the host executable.
    #[serde(default)]
    pub linux_only_prebuilt: bool,
}

/// Runs from `$PATH` non-hermetically. Keep this list as short as possible:
/// every entry is a build input that is not shipped in the source tree.
pub const ALLOWED: PathConfig = PathConfig {
    symlink: true,
    log: false,
    error: false,
    linux_only_prebuilt: false,
};

/// Specifically disallowed; calling it looks like "executable not found".
pub const FORBIDDEN: PathConfig = PathConfig {
    symlink: false,
    log: true,
    error: true,
    linux_only_prebuilt: false,
};

/// Allowed, but every access is logged.
pub const LOG: PathConfig = PathConfig {
    symlink: true,
    log: true,
    error: false,
    linux_only_prebuilt: false,
};

/// Applied to every tool the table does not mention. The symlink is still
/// created so usage can be logged, but invocation fails.
pub const MISSING: PathConfig = PathConfig {
    symlink: true,
    log: true,
    error: true,
    linux_only_prebuilt: false,
};

/// A prebuilt exists for Linux only, so running it from `$PATH` is only
/// allowed on platforms without that prebuilt.
pub const LINUX_ONLY_PREBUILT: PathConfig = PathConfig {
    symlink: false,
    log: true,
    error: true,
    linux_only_prebuilt: true,
};

/// Named policy presets usable in the literal table and in override files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Allowed,
    Forbidden,
    Log,
    Missing,
    LinuxOnlyPrebuilt,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Allowed,
        Preset::Forbidden,
        Preset::Log,
        Preset::Missing,
        Preset::LinuxOnlyPrebuilt,
    ];

    /// The flag set this preset stands for.
    pub const fn config(self) -> PathConfig {
        match self {
            Preset::Allowed => ALLOWED,
            Preset::Forbidden => FORBIDDEN,
            Preset::Log => LOG,
            Preset::Missing => MISSING,
            Preset::LinuxOnlyPrebuilt => LINUX_ONLY_PREBUILT,
        }
    }

    /// Find the preset whose flags equal `config`, if any.
    pub fn classify(config: &PathConfig) -> Option<Preset> {
        Self::ALL.into_iter().find(|p| p.config() == *config)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Preset::Allowed => "allowed",
            Preset::Forbidden => "forbidden",
            Preset::Log => "log",
            Preset::Missing => "missing",
            Preset::LinuxOnlyPrebuilt => "linux_only_prebuilt",
        }
    }
}

impl From<Preset> for PathConfig {
    fn from(preset: Preset) -> Self {
        preset.config()
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
