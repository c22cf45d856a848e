//! ASCII tree rendering for checklists.

use crate::models::{Checklist, Subtask, Task};

const OPEN: char = '☐';
const DONE: char = '☑';

fn check_symbol(subtask: &Subtask) -> char {
    if subtask.completed {
        DONE
    } else {
        OPEN
    }
}

/// Render tasks as an ASCII tree.
///
/// Example output:
/// ```text
/// Task 1: Gather ingredients
/// ├── ☑ Buy flour
/// ├── ☐ Buy eggs
/// └── [Image: ingredients laid out]
/// Task 2: Mix batter
/// └── ☐ Combine dry ingredients
/// ```
pub fn render_tasks(tasks: &[Task]) -> String {
    let mut output = String::new();
    for task in tasks {
        render_task(&mut output, task);
    }
    output
}

/// Render a checklist with its question as title and a progress line.
pub fn render_checklist(checklist: &Checklist) -> String {
    let (done, total) = checklist.progress();
    let mut output = format!(
        "How to {}\n{}/{} steps done\n\n",
        checklist.question, done, total
    );
    output.push_str(&render_tasks(&checklist.tasks));
    output
}

fn render_task(output: &mut String, task: &Task) {
    output.push_str(&task.text);
    output.push('\n');

    let mut children: Vec<String> = task
        .subtasks
        .iter()
        .map(|s| format!("{} {}", check_symbol(s), s.text))
        .collect();
    if let Some(media) = &task.media {
        children.push(media.clone());
    }

    for (i, child) in children.iter().enumerate() {
        let branch = if i == children.len() - 1 {
            "└── "
        } else {
            "├── "
        };
        output.push_str(branch);
        output.push_str(child);
        output.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_task(text: &str, steps: &[(&str, bool)], media: Option<&str>) -> Task {
        let mut task = Task::new(text);
        for (step, completed) in steps {
            let mut subtask = Subtask::new(*step);
            subtask.completed = *completed;
            task.subtasks.push(subtask);
        }
        task.media = media.map(str::to_string);
        task
    }

    #[test]
    fn test_task_without_children() {
        let output = render_tasks(&[make_task("Task 1: Rest", &[], None)]);
        assert_eq!(output, "Task 1: Rest\n");
    }

    #[test]
    fn test_subtasks_and_media() {
        let tasks = vec![
            make_task(
                "Task 1: Gather ingredients",
                &[("Buy flour", true), ("Buy eggs", false)],
                Some("[Image: ingredients laid out]"),
            ),
            make_task("Task 2: Mix batter", &[("Combine dry ingredients", false)], None),
        ];
        let expected = "Task 1: Gather ingredients\n├── ☑ Buy flour\n├── ☐ Buy eggs\n└── [Image: ingredients laid out]\nTask 2: Mix batter\n└── ☐ Combine dry ingredients\n";
        assert_eq!(render_tasks(&tasks), expected);
    }

    #[test]
    fn test_checklist_header() {
        let checklist = Checklist::new(
            "make pancakes",
            vec![make_task("Task 1: Mix", &[("Whisk", true), ("Rest", false)], None)],
        );
        let output = render_checklist(&checklist);
        assert!(output.starts_with("How to make pancakes\n1/2 steps done\n\n"));
        assert!(output.ends_with("Task 1: Mix\n├── ☑ Whisk\n└── ☐ Rest\n"));
    }
}
