use serde::{Deserialize, Serialize};

/// Host operating system family, as far as tool policy cares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    Linux,
    Darwin,
    Windows,
    Other(String),
}

impl Platform {
    /// Detect the platform this process was compiled for.
    pub fn host() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS name (`std::env::consts::OS` or a user-supplied string).
    /// `macos` and `darwin` are treated alike.
    pub fn from_os(os: &str) -> Self {
        match os.to_ascii_lowercase().as_str() {
            "linux" => Platform::Linux,
            "macos" | "darwin" => Platform::Darwin,
            "windows" => Platform::Windows,
            other => Platform::Other(other.to_string()),
        }
    }

    /// True where the Linux-only prebuilts are unavailable and the host
    /// versions are trusted instead.
    pub fn lacks_linux_prebuilts(&self) -> bool {
        matches!(self, Platform::Darwin)
    }
}

impl std::str::FromStr for Platform {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_os(s))
    }
}

impl From<String> for Platform {
    fn from(os: String) -> Self {
        Self::from_os(&os)
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.to_string()
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Linux => f.write_str("linux"),
            Platform::Darwin => f.write_str("darwin"),
            Platform::Windows => f.write_str("windows"),
            Platform::Other(os) => f.write_str(os),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_os_aliases() {
        assert_eq!(Platform::from_os("linux"), Platform::Linux);
        assert_eq!(Platform::from_os("macos"), Platform::Darwin);
        assert_eq!(Platform::from_os("Darwin"), Platform::Darwin);
        assert_eq!(Platform::from_os("windows"), Platform::Windows);
        assert_eq!(
            Platform::from_os("freebsd"),
            Platform::Other("freebsd".to_string())
        );
    }

    #[test]
    fn only_darwin_lacks_prebuilts() {
        assert!(Platform::Darwin.lacks_linux_prebuilts());
        assert!(!Platform::Linux.lacks_linux_prebuilts());
        assert!(!Platform::Windows.lacks_linux_prebuilts());
        assert!(!Platform::from_os("freebsd").lacks_linux_prebuilts());
    }

    #[test]
    fn host_matches_compile_target() {
        let host = Platform::host();
        if cfg!(target_os = "macos") {
            assert_eq!(host, Platform::Darwin);
        } else if cfg!(target_os = "linux") {
            assert_eq!(host, Platform::Linux);
        }
    }

    #[test]
    fn deserialize_from_yaml() {
        let p: Platform = serde_yml::from_str("darwin").unwrap();
        assert_eq!(p, Platform::Darwin);
        let p: Platform = serde_yml::from_str("macos").unwrap();
        assert_eq!(p, Platform::Darwin);
        let p: Platform = serde_yml::from_str("plan9").unwrap();
        assert_eq!(p, Platform::Other("plan9".to_string()));
    }
}
