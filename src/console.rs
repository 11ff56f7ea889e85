use std::collections::VecDeque;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// Line-oriented input for interactive prompting.
///
/// `Ok(None)` means input ended — end-of-file or an interrupt. Callers
/// treat that as "cancel what you were asking about", never as a reason
/// to tear the whole session down.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>>;
}

/// Terminal-backed source with line editing and history.
pub struct EditorSource {
    editor: DefaultEditor,
}

impl EditorSource {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Memory-backed source that replays a fixed script, then reports end of
/// input. Prompts are ignored.
///
/// Public so tests (and embedding callers) can drive actions and whole
/// sessions without a terminal.
pub struct ScriptedSource {
    lines: VecDeque<String>,
}

impl ScriptedSource {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|line| line.to_string()).collect(),
        }
    }
}

impl LineSource for ScriptedSource {
    fn read_line(&mut self, _prompt: &str) -> anyhow::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_source_replays_then_ends() {
        let mut source = ScriptedSource::new(&["first", "second"]);

        assert_eq!(source.read_line("> ").unwrap(), Some("first".to_string()));
        assert_eq!(source.read_line("> ").unwrap(), Some("second".to_string()));
        assert_eq!(source.read_line("> ").unwrap(), None);
        // Stays ended.
        assert_eq!(source.read_line("> ").unwrap(), None);
    }
}
