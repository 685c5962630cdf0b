use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use path_policy::{PathConfig, Platform, Preset, ToolAction, ToolDecision, ToolPolicyRegistry};
use usage_log::{DecisionRecord, UsageEntry, UsageEventType, UsageSink, UsageSource};

const COMPONENT: &str = "path-policy";

/// One row of `list` output.
#[derive(Debug, Serialize)]
pub struct ToolRow<'a> {
    pub tool: &'a str,
    pub preset: Option<Preset>,
    #[serde(flatten)]
    pub config: PathConfig,
}

fn preset_label(config: &PathConfig) -> String {
    Preset::classify(config)
        .map(|p| p.to_string())
        .unwrap_or_else(|| "custom".to_string())
}

fn flags(config: &PathConfig) -> String {
    format!(
        "symlink={} log={} error={} linux_only_prebuilt={}",
        config.symlink, config.log, config.error, config.linux_only_prebuilt
    )
}

/// Human-readable policy for one tool.
pub fn render_lookup(registry: &ToolPolicyRegistry, tool: &str) -> String {
    let config = registry.lookup(tool);
    let mut out = format!("{tool}: {} ({})", preset_label(&config), flags(&config));
    if !registry.contains(tool) {
        out.push_str(" [not listed]");
    }
    out
}

pub fn list_rows(registry: &ToolPolicyRegistry) -> Vec<ToolRow<'_>> {
    registry
        .entries()
        .into_iter()
        .map(|(tool, config)| ToolRow {
            tool,
            preset: Preset::classify(&config),
            config,
        })
        .collect()
}

/// Every row as an aligned text table.
pub fn render_table(rows: &[ToolRow<'_>]) -> String {
    let width = rows.iter().map(|r| r.tool.len()).max().unwrap_or(0);
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(
            out,
            "{:<width$}  {:<19}  {}",
            row.tool,
            preset_label(&row.config),
            flags(&row.config)
        );
    }
    out
}

pub fn render_json_lines(rows: &[ToolRow<'_>]) -> serde_json::Result<String> {
    let mut out = String::new();
    for row in rows {
        out.push_str(&serde_json::to_string(row)?);
        out.push('\n');
    }
    Ok(out)
}

fn event_type(action: ToolAction) -> Option<UsageEventType> {
    match action {
        ToolAction::Allow => None,
        ToolAction::AllowWithLog => Some(UsageEventType::ToolLogged),
        ToolAction::Block => Some(UsageEventType::ToolBlocked),
    }
}

/// Usage record for a checked invocation, or `None` when the policy does
/// not ask for one.
pub fn usage_entry(
    registry: &ToolPolicyRegistry,
    decision: &ToolDecision,
    args: &[String],
    platform: &Platform,
) -> Option<UsageEntry> {
    let event_type = event_type(decision.action)?;
    let source = UsageSource {
        component: COMPONENT.to_string(),
        platform: Some(platform.to_string()),
        working_dir: std::env::current_dir()
            .ok()
            .map(|d| d.display().to_string()),
    };
    let entry = UsageEntry::new(event_type, source, &decision.tool)
        .with_args(args.to_vec())
        .with_details(serde_json::json!({
            "num_tools": registry.len(),
            "version": env!("CARGO_PKG_VERSION"),
        }))
        .with_decision(DecisionRecord {
            action: decision.action.as_str().to_string(),
            symlink: decision.symlink,
            listed: decision.listed,
            reason: decision.reason.clone(),
        });
    Some(entry)
}

/// Result of `check`: what to print and whether the tool may run.
#[derive(Debug)]
pub struct CheckOutcome {
    pub decision: ToolDecision,
    /// Whether a usage record was appended.
    pub recorded: bool,
}

impl CheckOutcome {
    pub fn permitted(&self) -> bool {
        !self.decision.is_blocked()
    }

    pub fn message(&self) -> String {
        if self.permitted() {
            self.decision.reason.clone()
        } else {
            format!("{COMPONENT}: {}", self.decision.reason)
        }
    }
}

/// Decide one invocation and append a usage record to `usage_log` when
/// the policy asks for it. The log file is left untouched otherwise.
pub async fn run_check(
    registry: &ToolPolicyRegistry,
    platform: &Platform,
    tool: &str,
    args: &[String],
    usage_log: &Path,
) -> Result<CheckOutcome> {
    let decision = registry.decide(tool);
    debug!(tool, action = %decision.action, "checked invocation");

    let recorded = match usage_entry(registry, &decision, args, platform) {
        Some(entry) => {
            let (sink, handle) = UsageSink::start(usage_log)
                .await
                .context("failed to open usage log")?;
            sink.log(entry).await;
            drop(sink);
            handle.await.context("usage writer task failed")?;
            true
        }
        None => false,
    };

    Ok(CheckOutcome { decision, recorded })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linux() -> ToolPolicyRegistry {
        ToolPolicyRegistry::for_platform(&Platform::Linux)
    }

    #[test]
    fn lookup_listed_tool() {
        assert_eq!(
            render_lookup(&linux(), "clang"),
            "clang: forbidden (symlink=false log=true error=true linux_only_prebuilt=false)"
        );
    }

    #[test]
    fn lookup_unlisted_tool() {
        let out = render_lookup(&linux(), "totally-unknown-tool");
        assert!(out.starts_with("totally-unknown-tool: missing"), "{out}");
        assert!(out.ends_with("[not listed]"), "{out}");
    }

    #[test]
    fn list_rows_cover_registry() {
        let registry = ToolPolicyRegistry::for_platform(&Platform::Darwin);
        let rows = list_rows(&registry);
        assert_eq!(rows.len(), registry.len());
        let ps = rows.iter().find(|r| r.tool == "ps").unwrap();
        assert_eq!(ps.preset, Some(Preset::Allowed));
    }

    #[test]
    fn table_is_aligned() {
        let registry = linux();
        let rows = list_rows(&registry);
        let width = rows.iter().map(|r| r.tool.len()).max().unwrap();
        let table = render_table(&rows);
        assert_eq!(table.lines().count(), registry.len());
        for line in table.lines() {
            assert_eq!(&line[width..width + 2], "  ", "{line}");
            assert_ne!(line.as_bytes()[width + 2], b' ', "{line}");
        }
    }

    #[test]
    fn json_lines_flatten_config() {
        let registry = linux();
        let rows = list_rows(&registry);
        let out = render_json_lines(&rows).unwrap();
        let first: serde_json::Value = serde_json::from_str(out.lines().next().unwrap()).unwrap();
        assert!(first.get("tool").is_some());
        assert!(first.get("symlink").is_some());
        assert!(first.get("linux_only_prebuilt").is_some());

        let pgrep = out
            .lines()
            .map(|l| serde_json::from_str::<serde_json::Value>(l).unwrap())
            .find(|v| v["tool"] == "pgrep")
            .unwrap();
        assert_eq!(pgrep["preset"], "linux_only_prebuilt");
    }

    #[test]
    fn usage_entry_for_blocked_tool() {
        let registry = linux();
        let decision = registry.decide("gcc");
        let entry = usage_entry(&registry, &decision, &["-c".to_string()], &Platform::Linux).unwrap();
        assert_eq!(entry.event_type, UsageEventType::ToolBlocked);
        assert_eq!(entry.tool, "gcc");
        assert_eq!(entry.args, ["-c"]);
        assert_eq!(entry.source.platform.as_deref(), Some("linux"));
        assert_eq!(entry.details["num_tools"], registry.len());
        let record = entry.decision.unwrap();
        assert_eq!(record.action, "block");
        assert!(record.listed);
    }

    #[test]
    fn allowed_tool_has_no_usage_entry() {
        let registry = linux();
        let decision = registry.decide("git");
        assert!(usage_entry(&registry, &decision, &[], &Platform::Linux).is_none());
    }

    fn read_entries(path: &Path) -> Vec<UsageEntry> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn check_blocked_tool_records_usage() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("usage.jsonl");
        let registry = linux();

        let outcome = run_check(&registry, &Platform::Linux, "gcc", &["-c".to_string(), "x.c".to_string()], &log)
            .await
            .unwrap();
        assert!(!outcome.permitted());
        assert!(outcome.recorded);
        assert_eq!(outcome.message(), "path-policy: \"gcc\" is not allowed to be used");

        let entries = read_entries(&log);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event_type, UsageEventType::ToolBlocked);
        assert_eq!(entries[0].tool, "gcc");
        assert_eq!(entries[0].args, ["-c", "x.c"]);
        assert!(entries[0].decision.as_ref().unwrap().listed);
    }

    #[tokio::test]
    async fn check_allowed_tool_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("usage.jsonl");

        let outcome = run_check(&linux(), &Platform::Linux, "git", &[], &log)
            .await
            .unwrap();
        assert!(outcome.permitted());
        assert!(!outcome.recorded);
        assert_eq!(outcome.message(), "\"git\" is allowed");
        assert!(!log.exists());
    }

    #[tokio::test]
    async fn check_unlisted_tool_is_blocked_and_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("usage.jsonl");

        let outcome = run_check(&linux(), &Platform::Linux, "totally-unknown-tool", &[], &log)
            .await
            .unwrap();
        assert!(!outcome.permitted());
        assert!(!outcome.decision.listed);

        let entries = read_entries(&log);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event_type, UsageEventType::ToolBlocked);
        let record = entries[0].decision.as_ref().unwrap();
        assert!(!record.listed);
        assert!(record.symlink);
    }

    #[tokio::test]
    async fn check_logged_tool_runs_and_records() {
        let overrides = path_policy::loader::load_overrides_from_str(
            "version: \"1.0\"\ntools:\n  - name: \"make\"\n    preset: log\n",
        )
        .unwrap();
        let registry = ToolPolicyRegistry::build(&Platform::Linux, Some(&overrides));
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("usage.jsonl");

        for _ in 0..2 {
            let outcome = run_check(&registry, &Platform::Linux, "make", &[], &log)
                .await
                .unwrap();
            assert!(outcome.permitted());
            assert!(outcome.recorded);
        }

        let entries = read_entries(&log);
        assert_eq!(entries.len(), 2);
        assert!(entries
            .iter()
            .all(|e| e.event_type == UsageEventType::ToolLogged));
        assert_eq!(entries[0].decision.as_ref().unwrap().action, "allow_with_log");
    }
}
