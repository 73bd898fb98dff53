use crate::models::ChatTurn;

// Only the most recent turns are replayed to the model
pub const HISTORY_WINDOW: usize = 10;

pub const SYSTEM_PROMPT: &str = r#"You are a Power Query (M language) assistant. You only output valid Power Query M code.
- Assume the data is in a table named "testData" in the current workbook unless the user says otherwise.
- Output only the M code, optionally with short comments. No markdown code fences unless the user asks.
- If the user describes columns (e.g. Entity, Region, Scenario, Unused FTE), use those names in the query.
- For "top N" requests, use Table.FirstN and sorting. For filters, use Table.SelectRows."#;

const USER_LABEL: &str = "User request:";
const CODE_CUE: &str = "Power Query M code:";

/// The slice of `history` that makes it into the prompt, oldest first.
pub fn recent_turns(history: &[ChatTurn]) -> &[ChatTurn] {

    let start = history.len().saturating_sub(HISTORY_WINDOW);
    &history[start..]

}

/// Flatten the system instruction, recent history and the new message into one
/// completion prompt. Content is passed through verbatim.
pub fn compose(system_prompt: &str, history: &[ChatTurn], user_message: &str) -> String {

    let mut parts: Vec<String> = Vec::with_capacity(HISTORY_WINDOW + 2);
    parts.push(system_prompt.to_string());

    for turn in recent_turns(history) {
        let label = if turn.is_user() { "User" } else { "Assistant" };
        parts.push(format!("{}:\n{}", label, turn.content));
    }

    parts.push(format!("{}\n\n{}\n\n{}", USER_LABEL, user_message, CODE_CUE));

    parts.join("\n\n")

}

#[cfg(test)]
mod tests {

    use super::*;

    fn turn(role: &str, content: &str) -> ChatTurn {

        ChatTurn { role: role.to_string(), content: content.to_string() }

    }

    #[test]
    fn test_empty_history() {

        let prompt = compose(SYSTEM_PROMPT, &[], "top 5 regions by revenue");

        assert!(prompt.starts_with(SYSTEM_PROMPT));
        assert!(prompt.contains("\n\nUser request:\n\ntop 5 regions by revenue"));
        assert!(prompt.ends_with("Power Query M code:"));

    }

    #[test]
    fn test_roles_are_labelled() {

        let history = vec![
            turn("user", "sum revenue"),
            turn("assistant", "Table.Group(...)"),
            turn("system", "ignored role name")
        ];

        let prompt = compose("SYS", &history, "now by region");

        assert_eq!(
            prompt,
            "SYS\n\nUser:\nsum revenue\n\nAssistant:\nTable.Group(...)\n\nAssistant:\nignored role name\n\nUser request:\n\nnow by region\n\nPower Query M code:"
        );

    }

    #[test]
    fn test_only_last_ten_turns_kept_in_order() {

        let history: Vec<ChatTurn> = (1..=12)
            .map(|i| turn(if i % 2 == 1 { "user" } else { "assistant" }, &format!("turn-{:02}", i)))
            .collect();

        let prompt = compose("SYS", &history, "next");

        assert!(!prompt.contains("turn-01"));
        assert!(!prompt.contains("turn-02"));

        let positions: Vec<usize> = (3..=12)
            .map(|i| prompt.find(&format!("turn-{:02}", i)).expect("kept turn missing"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "kept turns must stay in order");

    }

    #[test]
    fn test_cue_follows_message() {

        let prompt = compose("SYS", &[turn("user", "Power Query M code:")], "filter to EMEA");

        let message_at = prompt.find("filter to EMEA").unwrap();
        let cue_at = prompt.rfind("Power Query M code:").unwrap();
        assert!(cue_at > message_at);

    }

    #[test]
    fn test_recent_turns_short_history() {

        let history = vec![turn("user", "a"), turn("assistant", "b")];
        assert_eq!(recent_turns(&history).len(), 2);
        assert!(recent_turns(&[]).is_empty());

    }

}
