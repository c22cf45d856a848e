//! The instruction sent along with every question.
//!
//! The layout it asks for is exactly what [`crate::parser`] understands, so
//! changes here and there go together.

const PROMPT_HEAD: &str = r#"You are an assistant that answers "how to" and "how do I" questions with a practical, step-by-step guide. The guide is a list of main tasks, each with its own numbered steps, plus image or video suggestions where a visual would help.

Read the user's question:
<question>
"#;

const PROMPT_TAIL: &str = r#"
</question>

Then:
1. Break the goal into the main tasks needed to reach it. Each task should be a meaningful milestone.
2. For each task, write clear numbered steps that explain how to complete it.
3. Where a visual would help, add one suggestion on its own line:
   - [Image: what the image should show]
   - [Video: what the video should demonstrate]
4. Reply in exactly this layout:
   <answer>
   How to [the user's question, restated]:

   Task 1: [Name of the first task]
   1. [Step]
   2. [Step]
   3. [Step]
   [Image or Video suggestion, if any]

   Task 2: [Name of the second task]
   1. [Step]
   2. [Step]
   [Image or Video suggestion, if any]

   (more tasks as needed)
   </answer>

Keep the language simple and avoid jargon unless it is needed. Tailor every task and step to the question asked."#;

/// Build the full prompt for a question.
pub fn build_prompt(question: &str) -> String {
    let mut prompt = String::with_capacity(PROMPT_HEAD.len() + question.len() + PROMPT_TAIL.len());
    prompt.push_str(PROMPT_HEAD);
    prompt.push_str(question);
    prompt.push_str(PROMPT_TAIL);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_question_in_tags() {
        let prompt = build_prompt("change a bike tire");
        assert!(prompt.contains("<question>\nchange a bike tire\n</question>"));
    }

    #[test]
    fn describes_every_line_shape_the_parser_reads() {
        let prompt = build_prompt("x");
        assert!(prompt.contains("<answer>"));
        assert!(prompt.contains("Task 1:"));
        assert!(prompt.contains("1. [Step]"));
        assert!(prompt.contains("[Image:"));
        assert!(prompt.contains("[Video:"));
    }
}
