use std::collections::HashSet;

/// Text buffer the generator writes the script into
///
/// Tracks the current indentation (four spaces per level, as Python
/// expects) and which one-off preludes have already been emitted.
#[derive(Debug, Default)]
pub struct ScriptWriter {
    buffer: String,
    indent_level: usize,
    emitted: HashSet<String>,
}

impl ScriptWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Write `text` at the current indentation and end the line
    pub fn add_line(&mut self, text: &str) {
        if !text.is_empty() {
            self.buffer.push_str(&"    ".repeat(self.indent_level));
            self.buffer.push_str(text);
        }
        self.buffer.push('\n');
    }

    pub fn blank_line(&mut self) {
        self.buffer.push('\n');
    }

    /// `# text` line
    pub fn comment(&mut self, text: &str) {
        self.add_line(&format!("# {}", text));
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Run `write` the first time `key` is seen, skip it afterwards
    ///
    /// Returns whether anything was written.
    pub fn once<F>(&mut self, key: &str, write: F) -> bool
    where
        F: FnOnce(&mut Self),
    {
        if !self.emitted.insert(key.to_string()) {
            return false;
        }
        write(self);
        true
    }

    pub fn output(&self) -> &str {
        &self.buffer
    }

    pub fn into_output(self) -> String {
        self.buffer
    }
}
