//! Follow-up question hints for the gathering phase.

const DURATION_QUESTION: &str = "How long have you had these symptoms?";
const SEVERITY_QUESTION: &str = "How severe is it (mild/moderate/severe)?";
const MEDICATION_QUESTION: &str = "Are you taking any medications?";
const TREND_QUESTION: &str = "Is it getting better, worse, or staying the same?";

/// Picks up to two questions the user has not already answered.
pub fn follow_up_questions(user_text: &str) -> Vec<&'static str> {
    let input = user_text.to_lowercase();
    let mut questions = Vec::with_capacity(4);

    if !mentions_duration(&input) {
        questions.push(DURATION_QUESTION);
    }
    if !mentions_severity(&input) {
        questions.push(SEVERITY_QUESTION);
    }
    if !input.contains("medication") && !input.contains("taking") {
        questions.push(MEDICATION_QUESTION);
    }
    questions.push(TREND_QUESTION);

    questions.truncate(2);
    questions
}

/// Renders questions as a numbered list.
pub fn numbered(questions: &[&str]) -> String {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| format!("{}. {}", i + 1, q))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A number followed by day/hour/week, e.g. "2 days", "3hours".
fn mentions_duration(input: &str) -> bool {
    number_followed_by(input, |rest| {
        let rest = rest.trim_start();
        ["day", "hour", "week"].iter().any(|unit| rest.starts_with(unit))
    })
}

/// A severity word or an "n/10" score.
fn mentions_severity(input: &str) -> bool {
    ["mild", "moderate", "severe"].iter().any(|w| input.contains(w))
        || number_followed_by(input, |rest| rest.starts_with("/10"))
}

fn number_followed_by(input: &str, test: impl Fn(&str) -> bool) -> bool {
    let mut chars = input.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        if !c.is_ascii_digit() {
            continue;
        }
        while let Some((_, next)) = chars.peek() {
            if next.is_ascii_digit() {
                chars.next();
            } else {
                break;
            }
        }
        let rest = match chars.peek() {
            Some((idx, _)) => &input[*idx..],
            None => "",
        };
        if test(rest) {
            return true;
        }
    }
    false
}
