use serde::{Deserialize, Serialize};

/// One recorded invocation of (or decision about) a host tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageEntry {
    pub id: uuid::Uuid,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub event_type: UsageEventType,
    pub source: UsageSource,
    /// Executable name as the interposer saw it.
    pub tool: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<DecisionRecord>,
}

impl UsageEntry {
    /// Create an entry with a fresh UUID v4 and the current UTC timestamp.
    /// `args`, `details` and `decision` start empty.
    pub fn new(event_type: UsageEventType, source: UsageSource, tool: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            timestamp: chrono::Utc::now(),
            event_type,
            source,
            tool: tool.into(),
            args: Vec::new(),
            details: serde_json::Value::Null,
            decision: None,
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    /// Attach the policy decision that produced this entry.
    pub fn with_decision(mut self, decision: DecisionRecord) -> Self {
        self.decision = Some(decision);
        self
    }
}

/// The category of usage event being recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageEventType {
    /// The tool ran and its policy asks for usage to be recorded.
    ToolLogged,
    /// The tool was refused.
    ToolBlocked,
}

/// Where the event came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageSource {
    pub component: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
}

impl UsageSource {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            platform: None,
            working_dir: None,
        }
    }
}

/// Flattened policy decision attached to an entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub action: String,
    pub symlink: bool,
    pub listed: bool,
    pub reason: String,
}
