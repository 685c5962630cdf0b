use serde::Serialize;

use crate::config::PathConfig;

/// What the interposer should do with one invocation of a host tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDecision {
    /// Tool name as looked up.
    pub tool: String,
    /// The resolved action to take.
    pub action: ToolAction,
    /// Whether a shim for the tool belongs on the interposed PATH.
    pub symlink: bool,
    /// Whether the tool had an explicit entry in the registry.
    pub listed: bool,
    /// Human-readable reason explaining the decision.
    pub reason: String,
}

/// The action the interposer takes after policy lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolAction {
    /// Run the host tool silently.
    Allow,
    /// Run the host tool and record the usage.
    AllowWithLog,
    /// Refuse to run the tool.
    Block,
}

impl ToolAction {
    /// `error` wins over `log`.
    pub fn from_config(config: &PathConfig) -> Self {
        if config.error {
            ToolAction::Block
        } else if config.log {
            ToolAction::AllowWithLog
        } else {
            ToolAction::Allow
        }
    }

    /// Whether an invocation with this action should produce a usage record.
    pub fn is_logged(self) -> bool {
        !matches!(self, ToolAction::Allow)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ToolAction::Allow => "allow",
            ToolAction::AllowWithLog => "allow_with_log",
            ToolAction::Block => "block",
        }
    }
}

impl std::fmt::Display for ToolAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToolDecision {
    pub(crate) fn new(tool: &str, config: &PathConfig, listed: bool) -> Self {
        let action = ToolAction::from_config(config);
        let reason = match (action, listed) {
            (ToolAction::Block, _) => format!("{tool:?} is not allowed to be used"),
            (_, false) => format!("{tool:?} is not listed in the tool policy"),
            (ToolAction::AllowWithLog, true) => format!("{tool:?} is allowed; usage is logged"),
            (ToolAction::Allow, true) => format!("{tool:?} is allowed"),
        };
        Self {
            tool: tool.to_string(),
            action,
            symlink: config.symlink,
            listed,
            reason,
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.action == ToolAction::Block
    }
}
