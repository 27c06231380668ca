//! Flat-directory Markdown [`TaskProvider`]: one `<task_id>.md` file per
//! task, with a conventional heading structure:
//!
//! ```text
//! # Task title
//!
//! Free-form context paragraph(s).
//!
//! ## Implementation Details
//! Guidance paragraph(s).
//!
//! ## Acceptance Criteria
//! - criterion one
//! - criterion two
//!
//! ## Priority
//! high
//! ```
//!
//! Only the title and at least one acceptance criterion are required; the
//! other sections default to empty.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use wfk_domain::error::{Error, Result};
use wfk_domain::ports::{TaskDescriptor, TaskPriority, TaskProvider};

/// Reads task descriptors from `<root>/<task_id>.md` files.
pub struct MarkdownTaskProvider {
    root: PathBuf,
}

impl MarkdownTaskProvider {
    /// Build a provider rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, task_id: &str) -> PathBuf {
        self.root.join(format!("{task_id}.md"))
    }
}

#[async_trait]
impl TaskProvider for MarkdownTaskProvider {
    async fn get_task(&self, task_id: &str) -> Result<TaskDescriptor> {
        let path = self.path_for(task_id);
        let raw = std::fs::read_to_string(&path).map_err(|_| Error::TaskNotFound {
            task_id: task_id.to_owned(),
        })?;
        parse_descriptor(task_id, &raw)
    }

    async fn list_ready_tasks(&self) -> Result<Vec<TaskDescriptor>> {
        let mut tasks = Vec::new();
        if !self.root.exists() {
            return Ok(tasks);
        }
        for entry in walkdir::WalkDir::new(&self.root).max_depth(1) {
            let entry = entry.map_err(|e| Error::io("walking task directory", e.into()))?;
            if entry.file_type().is_dir() {
                continue;
            }
            let Some(task_id) = stem_of(entry.path()) else {
                continue;
            };
            match self.get_task(&task_id).await {
                Ok(descriptor) => tasks.push(descriptor),
                Err(e) => {
                    tracing::warn!(path = %entry.path().display(), error = %e, "skipping unparseable task file");
                }
            }
        }
        Ok(tasks)
    }
}

fn stem_of(path: &Path) -> Option<String> {
    if path.extension().and_then(|e| e.to_str()) != Some("md") {
        return None;
    }
    path.file_stem().and_then(|s| s.to_str()).map(str::to_owned)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    ImplementationDetails,
    AcceptanceCriteria,
    Priority,
    Other,
}

fn parse_descriptor(task_id: &str, raw: &str) -> Result<TaskDescriptor> {
    let parser = Parser::new_ext(raw, Options::ENABLE_TASKLISTS);

    let mut title = String::new();
    let mut context = String::new();
    let mut implementation_details = String::new();
    let mut acceptance_criteria = Vec::new();
    let mut priority_raw = String::new();

    let mut section = Section::Preamble;
    let mut heading_level: Option<HeadingLevel> = None;
    let mut heading_text = String::new();
    let mut in_item = false;
    let mut item_text = String::new();

    for event in parser {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                heading_level = Some(level);
                heading_text.clear();
            }
            Event::End(TagEnd::Heading(_)) => {
                section = classify_heading(heading_level, &heading_text);
                if heading_level == Some(HeadingLevel::H1) {
                    title = heading_text.trim().to_owned();
                }
                heading_level = None;
            }
            Event::Start(Tag::Item) => {
                in_item = true;
                item_text.clear();
            }
            Event::End(TagEnd::Item) => {
                if section == Section::AcceptanceCriteria {
                    acceptance_criteria.push(item_text.trim().to_owned());
                }
                in_item = false;
            }
            Event::Text(text) | Event::Code(text) => {
                if heading_level.is_some() {
                    heading_text.push_str(&text);
                } else if in_item {
                    item_text.push_str(&text);
                } else {
                    match section {
                        Section::Preamble => push_paragraph_text(&mut context, &text),
                        Section::ImplementationDetails => push_paragraph_text(&mut implementation_details, &text),
                        Section::Priority => push_paragraph_text(&mut priority_raw, &text),
                        Section::AcceptanceCriteria | Section::Other => {}
                    }
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if in_item {
                    item_text.push(' ');
                }
            }
            _ => {}
        }
    }

    if title.is_empty() {
        return Err(Error::TemplateMalformed {
            path: task_id.to_owned(),
            reason: "task file has no H1 title".to_owned(),
        });
    }

    let priority = parse_priority(priority_raw.trim());

    Ok(TaskDescriptor {
        task_id: task_id.to_owned(),
        title,
        context: context.trim().to_owned(),
        implementation_details: implementation_details.trim().to_owned(),
        acceptance_criteria,
        priority,
    })
}

fn classify_heading(level: Option<HeadingLevel>, text: &str) -> Section {
    if level != Some(HeadingLevel::H2) {
        return Section::Other;
    }
    match text.trim().to_ascii_lowercase().as_str() {
        "implementation details" => Section::ImplementationDetails,
        "acceptance criteria" => Section::AcceptanceCriteria,
        "priority" => Section::Priority,
        _ => Section::Other,
    }
}

fn push_paragraph_text(buf: &mut String, text: &str) {
    if !buf.is_empty() {
        buf.push(' ');
    }
    buf.push_str(text);
}

fn parse_priority(raw: &str) -> Option<TaskPriority> {
    match raw.to_ascii_lowercase().as_str() {
        "low" => Some(TaskPriority::Low),
        "medium" => Some(TaskPriority::Medium),
        "high" => Some(TaskPriority::High),
        _ => None,
    }
}
