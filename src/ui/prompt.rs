use crate::utils::error::Result;
use std::collections::VecDeque;

/// 逐行讀取使用者輸入。`None` 代表 EOF 或中斷
pub trait Prompt {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// 以 rustyline 讀取終端機輸入，保留歷史紀錄
#[cfg(feature = "cli")]
pub struct LinePrompt {
    editor: rustyline::DefaultEditor,
}

#[cfg(feature = "cli")]
impl LinePrompt {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: rustyline::DefaultEditor::new()?,
        })
    }
}

#[cfg(feature = "cli")]
impl Prompt for LinePrompt {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        use rustyline::error::ReadlineError;

        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                        tracing::debug!("Could not record input history: {}", e);
                    }
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// 依序回放預先準備的輸入，用完即視為 EOF
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    lines: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// 已顯示過的提示文字
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl Prompt for ScriptedPrompt {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_prompt_replays_then_eof() {
        let mut prompt = ScriptedPrompt::new(["1", "Simba"]);
        assert_eq!(prompt.read_line("> ").unwrap().as_deref(), Some("1"));
        assert_eq!(prompt.read_line("name: ").unwrap().as_deref(), Some("Simba"));
        assert_eq!(prompt.read_line("> ").unwrap(), None);
        assert_eq!(prompt.prompts(), &["> ", "name: ", "> "]);
        assert_eq!(prompt.remaining(), 0);
    }
}
