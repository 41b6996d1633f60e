//! Prompt answers supplied up front in a start request

use std::collections::VecDeque;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::controller::Prompt;

/// Body of a start request. Absent, null or empty fields mean "use the default".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartAnswers {
    #[serde(default)]
    pub focus_minutes: Option<Value>,
    #[serde(default)]
    pub break_minutes: Option<Value>,
    #[serde(default)]
    pub sessions: Option<Value>,
}

/// Answers the controller's prompts in order: focus, break, session count
#[derive(Debug, Clone)]
pub struct RequestPrompt {
    answers: VecDeque<Option<String>>,
}

impl RequestPrompt {
    pub fn new(answers: StartAnswers) -> Self {
        Self {
            answers: [answers.focus_minutes, answers.break_minutes, answers.sessions]
                .into_iter()
                .map(|value| value.and_then(answer_text))
                .collect(),
        }
    }
}

/// Numbers and strings are passed on as text for the controller to parse
fn answer_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

impl Prompt for RequestPrompt {
    fn prompt(&mut self, message: &str, default_value: u64) -> Option<String> {
        let answer = self.answers.pop_front().flatten();
        debug!("{} (default {}) -> {:?}", message, default_value, answer);
        answer
    }
}
