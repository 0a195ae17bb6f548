/// Line ending detected in a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Ordered lines of one file's text.
///
/// Every edit consumes the buffer and hands back a new one, so no two
/// callers ever share a mutable view of the same text. A trailing newline
/// shows up as a final empty line and survives the round trip through
/// [`SourceBuffer::into_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBuffer {
    lines: Vec<String>,
    ending: LineEnding,
}

impl SourceBuffer {
    pub fn parse(text: &str) -> Self {
        let ending = LineEnding::detect(text);
        let lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        Self { lines, ending }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.is_empty())
    }

    pub fn ending(&self) -> LineEnding {
        self.ending
    }

    pub fn replace_line(mut self, index: usize, text: String) -> Self {
        if let Some(line) = self.lines.get_mut(index) {
            *line = text;
        }
        self
    }

    pub fn remove_line(mut self, index: usize) -> Self {
        if index < self.lines.len() {
            self.lines.remove(index);
        }
        self
    }

    /// Remove the inclusive line span `start..=end`, clamped to the buffer.
    pub fn remove_range(mut self, start: usize, end: usize) -> Self {
        if start < self.lines.len() && start <= end {
            let end = end.min(self.lines.len() - 1);
            self.lines.drain(start..=end);
        }
        self
    }

    /// Inserts before `index`; an index past the end appends.
    pub fn insert_lines(mut self, index: usize, new_lines: Vec<String>) -> Self {
        let at = index.min(self.lines.len());
        self.lines.splice(at..at, new_lines);
        self
    }

    pub fn into_text(self) -> String {
        self.lines.join(self.ending.as_str())
    }
}
