//! 从每周的`mca.json`中读取选择题，并在终端中渲染与判分。
//!
//! 文件内容为题目数组，每道题形如：
//!
//! ```json
//! {
//!     "question": "Select all which apply",
//!     "options": { "option text": [true, "feedback"] },
//!     "multi-choice": false
//! }
//! ```

use crate::error::{Error, Result};
use json::JsonValue;
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// 一个选项。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Choice {
    pub text: String,
    pub correct: bool,
    pub feedback: String,
}

/// 一道选择题。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub title: String,
    /// 选项，保持文件中的顺序。
    pub choices: Vec<Choice>,
    pub multi_choice: bool,
}

/// 对一个已选选项的反馈。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub correct: bool,
    pub message: String,
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.correct { "✔️" } else { "❌" };
        write!(f, "{mark} {}", self.message)
    }
}

/// 第`week`周题目文件的位置：`root/WeekNN/.answers/mca.json`。
pub fn fixture_path(root: &Path, week: u32) -> PathBuf {
    root.join(format!("Week{week:02}"))
        .join(".answers")
        .join("mca.json")
}

impl Question {
    fn from_json(v: &JsonValue) -> Result<Self> {
        let title = v["question"]
            .as_str()
            .ok_or_else(|| Error::Quiz("`question` must be a string".into()))?
            .to_string();
        let multi_choice = v["multi-choice"]
            .as_bool()
            .ok_or_else(|| Error::Quiz("`multi-choice` must be a boolean".into()))?;
        if !v["options"].is_object() {
            return Err(Error::Quiz("`options` must be an object".into()));
        }
        let choices = v["options"]
            .entries()
            .map(|(text, pair)| {
                let correct = pair[0].as_bool();
                let feedback = pair[1].as_str();
                match (pair.is_array() && pair.len() == 2, correct, feedback) {
                    (true, Some(correct), Some(feedback)) => Ok(Choice {
                        text: text.to_string(),
                        correct,
                        feedback: feedback.to_string(),
                    }),
                    _ => Err(Error::Quiz(format!(
                        "option `{text}` must be a [bool, string] pair"
                    ))),
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            title,
            choices,
            multi_choice,
        })
    }

    /// 解析整个题目文件。
    pub fn parse_all(text: &str) -> Result<Vec<Self>> {
        let root = json::parse(text)?;
        if !root.is_array() {
            return Err(Error::Quiz("top level must be an array of questions".into()));
        }
        root.members().map(Self::from_json).collect()
    }

    /// 读取第`week`周的第`number`题（从1开始计数）。
    pub fn load_week(root: &Path, week: u32, number: usize) -> Result<Self> {
        let text = fs::read_to_string(fixture_path(root, week))?;
        let mut all = Self::parse_all(&text)?;
        if number == 0 || number > all.len() {
            return Err(Error::QuestionNotFound {
                week,
                number,
                available: all.len(),
            });
        }
        Ok(all.swap_remove(number - 1))
    }

    /// 终端中展示的题面。多选题的选项以`[ ]`开头，单选题以`( )`开头。
    pub fn render(&self) -> String {
        let bullet = if self.multi_choice { "[ ]" } else { "( )" };
        let mut out = String::new();
        if !self.title.is_empty() {
            out.push_str(&self.title);
            out.push('\n');
        }
        for (i, c) in self.choices.iter().enumerate() {
            out.push_str(&format!("{bullet} {}. {}\n", i + 1, c.text));
        }
        out
    }

    /// 对选中的选项（从1开始编号）给出反馈。单选题必须恰好选择一项。
    pub fn answer(&self, selections: &[usize]) -> Result<Vec<Feedback>> {
        let selected: BTreeSet<usize> = selections.iter().copied().collect();
        if !self.multi_choice && selected.len() != 1 {
            return Err(Error::InvalidSelection(format!(
                "single-choice question expects exactly one option, got {}",
                selected.len()
            )));
        }
        selected
            .into_iter()
            .map(|n| {
                let c = n
                    .checked_sub(1)
                    .and_then(|i| self.choices.get(i))
                    .ok_or_else(|| {
                        Error::InvalidSelection(format!(
                            "option {n} is not in 1..={}",
                            self.choices.len()
                        ))
                    })?;
                Ok(Feedback {
                    correct: c.correct,
                    message: c.feedback.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"[
        {
            "question": "Select all which apply",
            "options": {
                "Fat is bright in T1": [true, "Correct!"],
                "Fibers are bright in T1": [false, "Incorrect!"],
                "None of the above": [false, "Incorrect!"]
            },
            "multi-choice": false
        },
        {
            "question": "Which volume CAN we use as motion-correction reference?",
            "options": {
                "The first volume": [false, "Avoid the first volumes."],
                "The middle volume": [true, "We typically employ the middle volume."],
                "Any settled volume": [true, "Indeed."]
            },
            "multi-choice": true
        }
    ]"#;

    #[test]
    fn test_parse_keeps_option_order() {
        let qs = Question::parse_all(FIXTURE).unwrap();
        assert_eq!(qs.len(), 2);
        assert!(!qs[0].multi_choice);
        assert_eq!(qs[0].choices[1].text, "Fibers are bright in T1");
        assert!(qs[1].choices[2].correct);
    }

    #[test]
    fn test_render() {
        let qs = Question::parse_all(FIXTURE).unwrap();
        let text = qs[1].render();
        assert!(text.starts_with("Which volume"));
        assert!(text.contains("[ ] 2. The middle volume\n"));
        assert!(qs[0].render().contains("( ) 1. Fat is bright in T1\n"));
    }

    #[test]
    fn test_answer_single_choice() {
        let q = &Question::parse_all(FIXTURE).unwrap()[0];
        let fb = q.answer(&[1]).unwrap();
        assert_eq!(fb[0].to_string(), "✔️ Correct!");
        assert!(matches!(q.answer(&[1, 2]), Err(Error::InvalidSelection(_))));
        assert!(q.answer(&[]).is_err());
        assert!(q.answer(&[4]).is_err());
    }

    #[test]
    fn test_answer_multi_choice() {
        let q = &Question::parse_all(FIXTURE).unwrap()[1];
        let fb = q.answer(&[3, 1, 3]).unwrap();
        assert_eq!(fb.len(), 2);
        assert_eq!(fb[0].to_string(), "❌ Avoid the first volumes.");
        assert!(fb[1].correct);
        assert!(q.answer(&[0]).is_err());
    }

    #[test]
    fn test_malformed_fixture() {
        assert!(matches!(
            Question::parse_all(r#"{"question": "x"}"#),
            Err(Error::Quiz(_))
        ));
        assert!(matches!(
            Question::parse_all(r#"[{"question": "x", "options": {"a": [1, "b"]}, "multi-choice": false}]"#),
            Err(Error::Quiz(_))
        ));
        assert!(matches!(Question::parse_all("[oops"), Err(Error::Json(_))));
    }

    #[test]
    fn test_load_week() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture_path(dir.path(), 2);
        assert!(path.ends_with("Week02/.answers/mca.json"));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, FIXTURE).unwrap();
        let q = Question::load_week(dir.path(), 2, 2).unwrap();
        assert!(q.multi_choice);
        assert!(matches!(
            Question::load_week(dir.path(), 2, 3),
            Err(Error::QuestionNotFound { available: 2, .. })
        ));
        assert!(matches!(
            Question::load_week(dir.path(), 3, 1),
            Err(Error::Io(_))
        ));
    }
}
