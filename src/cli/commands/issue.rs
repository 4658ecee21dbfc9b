//! Issue CLI commands.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::de::DeserializeOwned;

use crate::cli::output::{output, truncate, CommandOutput};
use crate::cli::types::Commands;
use crate::domain::models::{
    IssueCreate, IssueImport, IssueImported, IssueLink, IssueModel, IssueModify,
    IssueRelationship, IssueSearch, IssueTransited, Relationship,
};
use crate::domain::ports::IssueTracker;

/// JSON payload source: a file path, or `-` for stdin
#[derive(Args, Debug)]
pub struct PayloadArgs {
    /// Request payload in JSON (camelCase or snake_case field names)
    #[arg(default_value = "-")]
    pub payload: PathBuf,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    #[command(flatten)]
    pub payload: PayloadArgs,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    pub payload: PayloadArgs,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Issue id or key
    pub issue_id: String,

    #[command(flatten)]
    pub payload: PayloadArgs,
}

#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Issue id or key the link starts from
    pub issue_id: String,

    /// Relationship (relates, dependent, depends, subtask, parent, duplicates, duplicated, epic)
    pub relationship: Relationship,

    /// Linked issue id or key
    pub issue: String,
}

#[derive(Args, Debug)]
pub struct TransitArgs {
    /// Issue id or key
    pub issue_id: String,

    /// Transition id
    pub transition_id: i64,
}

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Query language expression
    #[arg(short, long)]
    pub query: Option<String>,

    /// Queue key
    #[arg(long)]
    pub queue: Option<String>,

    /// Comma-separated issue keys
    #[arg(long)]
    pub keys: Option<String>,

    /// Additional fields to expand
    #[arg(long)]
    pub expand: Option<String>,

    /// Field filter (format: "field=value", repeatable)
    #[arg(short, long, value_parser = parse_key_val)]
    pub filter: Vec<(String, String)>,
}

impl From<SearchArgs> for IssueSearch {
    fn from(args: SearchArgs) -> Self {
        let filter = (!args.filter.is_empty()).then(|| args.filter.into_iter().collect());
        Self {
            filter,
            query: args.query,
            expand: args.expand,
            keys: args.keys,
            queue: args.queue,
        }
    }
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid filter `{s}`: expected field=value"))?;
    if key.trim().is_empty() {
        return Err(format!("invalid filter `{s}`: empty field name"));
    }
    Ok((key.trim().to_string(), value.trim().to_string()))
}

/// Read a JSON payload from a file, or stdin for `-`
pub fn read_payload<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read payload from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read payload file {}", path.display()))?
    };

    serde_json::from_str(&raw).context("Failed to parse request payload")
}

impl CommandOutput for IssueModel {
    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("{}: {}", self.key, truncate(&self.summary, 72)),
            format!("Queue:    {}", self.queue.key),
            format!("Type:     {}", self.issue_type.display),
            format!("Status:   {}", self.status.display),
            format!("Priority: {}", self.priority.display),
            format!("Author:   {}", self.created_by.display),
        ];
        if let Some(assignee) = &self.assignee {
            lines.push(format!("Assignee: {}", assignee.display));
        }
        lines.push(format!("Created:  {}", self.created_at.format("%Y-%m-%d %H:%M:%S %:z")));
        lines.join("\n")
    }
}

impl CommandOutput for IssueImported {
    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("Imported {}: {}", self.key, truncate(&self.summary, 72)),
            format!("Queue:  {}", self.queue.key),
            format!("Status: {}", self.status.display),
        ];
        if let Some(resolution) = &self.resolution {
            lines.push(format!("Resolution: {}", resolution.display));
        }
        lines.join("\n")
    }
}

impl CommandOutput for IssueRelationship {
    fn to_human(&self) -> String {
        format!(
            "Link {} ({}, {}) -> {}: {}",
            self.id,
            self.link_type.id,
            self.direction,
            self.object.key,
            self.object.display
        )
    }
}

impl CommandOutput for IssueTransited {
    fn to_human(&self) -> String {
        format!("Transition {} moved the issue to {}", self.id, self.to.display)
    }
}

/// Dispatch an issue command against a tracker
pub async fn execute(command: Commands, tracker: &dyn IssueTracker, json_mode: bool) -> Result<()> {
    match command {
        Commands::Import(args) => {
            let request: IssueImport = read_payload(&args.payload.payload)?;
            let imported = tracker
                .import_issue(&request)
                .await
                .context("Failed to import issue")?;
            output(&imported, json_mode);
        }

        Commands::Create(args) => {
            let request: IssueCreate = read_payload(&args.payload.payload)?;
            let created = tracker
                .create_issue(&request)
                .await
                .context("Failed to create issue")?;
            output(&created, json_mode);
        }

        Commands::Edit(args) => {
            let request: IssueModify = read_payload(&args.payload.payload)?;
            let issue = tracker
                .edit_issue(&args.issue_id, &request)
                .await
                .with_context(|| format!("Failed to edit issue {}", args.issue_id))?;
            output(&issue, json_mode);
        }

        Commands::Link(args) => {
            let request = IssueLink::new(args.relationship, args.issue);
            let link = tracker
                .link_issues(&args.issue_id, &request)
                .await
                .with_context(|| format!("Failed to link issue {}", args.issue_id))?;
            output(&link, json_mode);
        }

        Commands::Transit(args) => {
            let transited = tracker
                .transit_issue(&args.issue_id, args.transition_id)
                .await
                .with_context(|| format!("Failed to transit issue {}", args.issue_id))?;
            output(&transited, json_mode);
        }

        Commands::Search(args) => {
            let request = IssueSearch::from(args);
            let issue = tracker
                .search_issue(&request)
                .await
                .context("Failed to search issues")?;
            output(&issue, json_mode);
        }
    }

    Ok(())
}
