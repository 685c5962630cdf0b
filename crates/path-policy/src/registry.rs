use std::collections::HashMap;

use tracing::{debug, info, trace};

use crate::config::{PathConfig, Preset, ALLOWED, MISSING};
use crate::decision::ToolDecision;
use crate::platform::Platform;
use crate::schema::OverrideFile;
use crate::table::{DARWIN_NATIVE_TOOLS, DEFAULT_TABLE};

// ---------------------------------------------------------------------------
// ToolPolicyRegistry
// ---------------------------------------------------------------------------

/// Maps executable names to the [`PathConfig`] the PATH interposer enforces.
///
/// Build one with [`ToolPolicyRegistry::for_platform`] (or
/// [`ToolPolicyRegistry::for_host`]) during startup, then share it by
/// reference or `Arc`. Lookups only need `&self`.
#[derive(Clone)]
pub struct ToolPolicyRegistry {
    entries: HashMap<String, PathConfig>,
    /// Platform the adjustments were last applied for.
    adjusted_for: Option<Platform>,
}

impl std::fmt::Debug for ToolPolicyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolPolicyRegistry")
            .field("num_tools", &self.entries.len())
            .field("adjusted_for", &self.adjusted_for)
            .finish()
    }
}

impl ToolPolicyRegistry {
    /// Populate a registry from a literal `(name, preset)` table. Later
    /// duplicates replace earlier ones.
    pub fn from_table(table: &[(&str, Preset)]) -> Self {
        let entries = table
            .iter()
            .map(|(name, preset)| (name.to_string(), preset.config()))
            .collect();
        Self {
            entries,
            adjusted_for: None,
        }
    }

    /// The compiled-in table with no platform adjustment applied.
    pub fn builtin() -> Self {
        Self::from_table(DEFAULT_TABLE)
    }

    /// The compiled-in table adjusted for `platform`.
    pub fn for_platform(platform: &Platform) -> Self {
        Self::build(platform, None)
    }

    /// The compiled-in table adjusted for the platform this process runs on.
    pub fn for_host() -> Self {
        Self::for_platform(&Platform::host())
    }

    /// Full startup sequence: built-in table, then site overrides, then the
    /// platform adjustment. Overrides land before the adjustment so a
    /// `linux_only_prebuilt` override is relaxed on Darwin like any other.
    pub fn build(platform: &Platform, overrides: Option<&OverrideFile>) -> Self {
        let mut registry = Self::builtin();
        if let Some(file) = overrides {
            registry.apply_overrides(file);
        }
        registry.apply_platform_adjustments(platform);
        info!(
            platform = %platform,
            num_tools = registry.len(),
            "tool policy registry built"
        );
        registry
    }

    // -- Build-time mutation ------------------------------------------------

    /// Replace or add entries from an override file.
    pub fn apply_overrides(&mut self, file: &OverrideFile) {
        for tool in &file.tools {
            let config = tool.preset.config();
            match self.entries.insert(tool.name.clone(), config) {
                Some(previous) if previous != config => info!(
                    tool = %tool.name,
                    preset = %tool.preset,
                    "override replaced built-in tool policy"
                ),
                Some(_) => trace!(tool = %tool.name, "override matches built-in policy"),
                None => debug!(tool = %tool.name, preset = %tool.preset, "override added tool"),
            }
        }
    }

    /// Adapt the table for `platform`.
    ///
    /// On platforms without the Linux-only prebuilts the host's native
    /// helpers become Allowed, and so does every `linux_only_prebuilt`
    /// entry. Every other platform is left untouched. Re-applying is a no-op.
    pub fn apply_platform_adjustments(&mut self, platform: &Platform) {
        if self.adjusted_for.as_ref() == Some(platform) {
            debug!(%platform, "platform adjustments already applied");
        }
        self.adjusted_for = Some(platform.clone());

        if !platform.lacks_linux_prebuilts() {
            return;
        }

        for tool in DARWIN_NATIVE_TOOLS {
            self.entries.insert(tool.to_string(), ALLOWED);
        }

        // No prebuilts for this platform, so trust the host versions.
        for (name, config) in self.entries.iter_mut() {
            if config.linux_only_prebuilt {
                debug!(tool = %name, %platform, "allowing host tool in place of linux-only prebuilt");
                *config = ALLOWED;
            }
        }
    }

    // -- Queries ------------------------------------------------------------

    /// Policy for `name`, or [`MISSING`] when the tool is not listed.
    ///
    /// Matching is exact: no case folding and no path stripping.
    pub fn lookup(&self, name: &str) -> PathConfig {
        self.get(name).copied().unwrap_or(MISSING)
    }

    /// Explicit entry for `name`, if one exists.
    pub fn get(&self, name: &str) -> Option<&PathConfig> {
        self.entries.get(name)
    }

    /// Resolve `name` into the action the interposer should take.
    pub fn decide(&self, name: &str) -> ToolDecision {
        let decision = ToolDecision::new(name, &self.lookup(name), self.contains(name));
        trace!(tool = name, action = ?decision.action, "tool policy decided");
        decision
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn adjusted_for(&self) -> Option<&Platform> {
        self.adjusted_for.as_ref()
    }

    /// All explicit entries, sorted by tool name.
    pub fn entries(&self) -> Vec<(&str, PathConfig)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(name, config)| (name.as_str(), *config))
            .collect();
        entries.sort_unstable_by_key(|(name, _)| *name);
        entries
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
