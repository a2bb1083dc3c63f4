//! Prompt templates for the recall dialogue.
//!
//! Three deterministic builders, each a pure function of its explicit
//! inputs. The controller supplies every field; nothing here reads or
//! mutates session state.

use crate::analyzer::NO_MATCH_SENTINEL;

/// Build the question-generation prompt.
///
/// The forbidden list is always the active target plus every fragment
/// still waiting in the queue, so the model can neither state the
/// current answer nor leak a future one.
pub fn question_prompt(
    narrative: &str,
    target: &str,
    recalled: &[String],
    forbidden: &[String],
) -> String {
    format!(
        r#"You are a question-writing assistant helping a person with memory loss recall specific keywords from their own story. Your task is to write the single question that will lead them to say the target keyword themselves.

Instructions:
1. Understand the full story in context.
2. Picture the situation surrounding the target keyword.
3. Write one clear, open-ended question the person can answer by producing the target keyword on their own. (For example: "Where did you eat that day?", "How did you travel there?", "What was the weather like?")
4. ABSOLUTE RULE: the question must not contain any word from the forbidden word list below. This is the most important rule.

Information:
- Full story: {narrative}
- Target keyword: {target}
- Already recalled keywords: {recalled}
- Forbidden word list: {forbidden}

Write the question as a single sentence."#,
        narrative = narrative,
        target = target,
        recalled = quote_list(recalled),
        forbidden = quote_list(forbidden),
    )
}

/// Build the answer-analysis prompt.
pub fn analysis_prompt(all_fragments: &[String], answer: &str) -> String {
    format!(
        r#"You analyze a person's answer. Determine which keywords from the full keyword list below appear in the answer. Find every keyword that is clearly mentioned or strongly implied, and reply with only a comma-separated list of those keywords. If none of the keywords apply, reply with exactly {sentinel}.

# Full keyword list:
{all_fragments}

# Answer:
{answer}"#,
        sentinel = NO_MATCH_SENTINEL,
        all_fragments = quote_list(all_fragments),
        answer = answer,
    )
}

/// Build the hint-generation prompt.
pub fn hint_prompt(narrative: &str, target: &str) -> String {
    format!(
        r#"You are a kind counselor offering a hint to a person with memory loss. Without giving the answer away, help them associate their way to the keyword they are stuck on.

# Full story:
{narrative}

# Keyword being elicited:
{target}

Write one easier, more specific hint question that helps them think of this keyword."#,
        narrative = narrative,
        target = target,
    )
}

fn quote_list(items: &[String]) -> String {
    if items.is_empty() {
        return "(none)".to_string();
    }
    items
        .iter()
        .map(|item| format!("\"{item}\""))
        .collect::<Vec<_>>()
        .join(", ")
}
