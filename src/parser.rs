//! Turns the free-form answer of the language model into a task list.
//!
//! The model is asked for a layout like this, but nothing guarantees it:
//!
//! ```text
//! <answer>
//! How to bake bread:
//!
//! Task 1: Gather ingredients
//! 1. Buy flour
//! 2. Buy yeast
//! [Image: ingredients on a counter]
//! </answer>
//! ```
//!
//! Parsing is a single pass over trimmed lines with one piece of state, the
//! task currently open. Each line is classified in priority order:
//!
//! 1. a line starting with `Task` opens a new task (closing the open one);
//! 2. `<digits>. <text>` adds a subtask to the open task;
//! 3. `[Image: ...]` or `[Video: ...]` replaces the open task's media;
//! 4. anything else is ignored.
//!
//! Lines that don't fit are dropped rather than reported. The parser never
//! fails: garbage in gives an empty list out.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::{Subtask, Task};

const ANSWER_OPEN: &str = "<answer>";
const ANSWER_CLOSE: &str = "</answer>";
const TASK_PREFIX: &str = "Task";
const MEDIA_PREFIXES: [&str; 2] = ["[Image:", "[Video:"];

static STEP_PATTERN: OnceLock<Regex> = OnceLock::new();

fn step_pattern() -> &'static Regex {
    STEP_PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]+)\.\s(.+)").expect("step pattern is a valid regex")
    })
}

/// How a single trimmed line is treated.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line<'a> {
    Header(&'a str),
    /// The ordinal stays as written; it is never read as a number.
    Step { ordinal: &'a str, text: &'a str },
    Media(&'a str),
    Other,
}

fn classify(line: &str) -> Line<'_> {
    if line.starts_with(TASK_PREFIX) {
        return Line::Header(line);
    }

    if let Some(caps) = step_pattern().captures(line) {
        let (Some(digits), Some(text)) = (caps.get(1), caps.get(2)) else {
            return Line::Other;
        };
        return Line::Step {
            ordinal: digits.as_str(),
            text: text.as_str(),
        };
    }

    if MEDIA_PREFIXES.iter().any(|p| line.starts_with(p)) {
        return Line::Media(line);
    }

    Line::Other
}

/// Remove `<answer>` / `</answer>` wrapper markers wherever they occur.
fn strip_answer_markers(raw: &str) -> String {
    raw.replace(ANSWER_OPEN, "").replace(ANSWER_CLOSE, "")
}

/// Parse a raw model response into an ordered list of tasks.
///
/// Total over all inputs. Steps and media lines attach only to the task open
/// when they are read; ones that appear before the first header are dropped.
/// Step numbering is neither kept nor checked.
pub fn parse_response(raw: &str) -> Vec<Task> {
    let text = strip_answer_markers(raw);

    let mut tasks = Vec::new();
    let mut current: Option<Task> = None;
    let mut dropped = 0usize;

    for (index, line) in text.trim().split('\n').enumerate() {
        let line = line.trim();

        let kind = classify(line);
        if let Line::Header(header) = kind {
            if let Some(done) = current.replace(Task::new(header)) {
                tasks.push(done);
            }
            continue;
        }

        let Some(task) = current.as_mut() else {
            if kind != Line::Other {
                tracing::debug!(line = index + 1, "Dropping line outside of any task");
            }
            if !line.is_empty() {
                dropped += 1;
            }
            continue;
        };

        match kind {
            Line::Step { ordinal, text } => {
                tracing::trace!(line = index + 1, ordinal, "Step");
                task.subtasks.push(Subtask::new(text));
            }
            Line::Media(media) => {
                if let Some(previous) = task.media.replace(media.to_string()) {
                    tracing::trace!(line = index + 1, %previous, "Media annotation replaced");
                }
            }
            Line::Header(_) | Line::Other => {
                if !line.is_empty() {
                    dropped += 1;
                }
            }
        }
    }

    if let Some(done) = current.take() {
        tasks.push(done);
    }

    tracing::debug!(
        tasks = tasks.len(),
        subtasks = tasks.iter().map(|t| t.subtasks.len()).sum::<usize>(),
        dropped,
        "Parsed model response"
    );

    tasks
}
