//! Prologue detection: leading comments, blank lines and `"use …";` directives.
//!
//! New statements go after the prologue so license headers and mode pragmas
//! stay at the very top of the file.

use once_cell::sync::Lazy;
use regex::Regex;

use super::buffer::SourceBuffer;

static DIRECTIVE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*(['"])use [\w ]+['"]\s*;"#).unwrap());

/// What a single line contributes to the prologue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    BlockCommentContinuation,
    BlockCommentStart,
    LineComment,
    Blank,
    Directive,
    Code,
}

impl LineClass {
    fn is_comment(&self) -> bool {
        matches!(
            self,
            LineClass::BlockCommentContinuation | LineClass::BlockCommentStart | LineClass::LineComment
        )
    }
}

/// Line classifier that carries block-comment state across lines.
#[derive(Debug, Default)]
pub struct PrologueScanner {
    in_block_comment: bool,
}

impl PrologueScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify(&mut self, line_index: usize, line: &str) -> LineClass {
        let trimmed = line.trim();

        if self.in_block_comment {
            return match trimmed.find("*/") {
                Some(close) => {
                    self.in_block_comment = false;
                    if is_comment_tail(&trimmed[close + 2..]) {
                        LineClass::BlockCommentContinuation
                    } else {
                        LineClass::Code
                    }
                }
                None => LineClass::BlockCommentContinuation,
            };
        }

        if let Some(body) = trimmed.strip_prefix("/*") {
            return match body.find("*/") {
                Some(close) if is_comment_tail(&body[close + 2..]) => LineClass::BlockCommentStart,
                Some(_) => LineClass::Code,
                None => {
                    self.in_block_comment = true;
                    LineClass::BlockCommentStart
                }
            };
        }

        if trimmed.starts_with("//") || (line_index == 0 && trimmed.starts_with("#!")) {
            LineClass::LineComment
        } else if trimmed.is_empty() {
            LineClass::Blank
        } else if DIRECTIVE_PATTERN.is_match(line) {
            LineClass::Directive
        } else {
            LineClass::Code
        }
    }
}

/// Text after a closing `*/` that keeps the line a pure comment line
fn is_comment_tail(rest: &str) -> bool {
    let rest = rest.trim();
    rest.is_empty() || rest.starts_with("//")
}

fn ends_statement_or_block(line: &str) -> bool {
    let line = line.trim_end();
    line.ends_with(';') || line.ends_with("*/")
}

fn is_import_line(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with("import ") || line.starts_with("import{")
}

/// Where a new statement belongs and whether it needs a blank line after it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertionPoint {
    pub line_index: usize,
    pub blank_after: bool,
}

/// Locate the insertion line after the prologue of `buffer`.
pub fn find_insertion_point(buffer: &SourceBuffer) -> InsertionPoint {
    let mut scanner = PrologueScanner::new();
    let mut last_directive = None;
    let mut last_comment = None;
    let mut first_code = None;

    for (index, line) in buffer.lines().iter().enumerate() {
        match scanner.classify(index, line) {
            LineClass::Code => {
                first_code = Some(index);
                break;
            }
            LineClass::Directive => last_directive = Some(index),
            class if class.is_comment() => last_comment = Some(index),
            _ => {}
        }
    }

    let line_index = match last_directive.max(last_comment) {
        Some(anchor) => anchor + 1,
        None => first_code.unwrap_or(0),
    };

    let blank_after = match buffer.line(line_index) {
        None => false,
        Some(following) if following.trim().is_empty() || is_import_line(following) => false,
        Some(_) => match line_index.checked_sub(1).and_then(|i| buffer.line(i)) {
            Some(preceding) => !ends_statement_or_block(preceding),
            None => true,
        },
    };

    InsertionPoint {
        line_index,
        blank_after,
    }
}

/// Insert `to_insert` after the leading comments and directive prologue of `source`.
pub fn insert_after_directives_and_comments(source: &str, to_insert: &str) -> String {
    let buffer = SourceBuffer::parse(source);
    let point = find_insertion_point(&buffer);

    let mut new_lines: Vec<String> = to_insert
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
        .collect();
    if point.blank_after {
        new_lines.push(String::new());
    }

    buffer.insert_lines(point.line_index, new_lines).into_text()
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMPORT: &str = "import { test } from './file';";

    #[test]
    fn test_inserts_after_use_directives() {
        let source = "'use strict';\n'use client';\nconst x = 1;";
        assert_eq!(
            insert_after_directives_and_comments(source, IMPORT),
            "'use strict';\n'use client';\nimport { test } from './file';\nconst x = 1;"
        );
    }

    #[test]
    fn test_inserts_after_comments() {
        let source = "// Comment\n/* Block comment */\nconst x = 1;";
        assert_eq!(
            insert_after_directives_and_comments(source, IMPORT),
            "// Comment\n/* Block comment */\nimport { test } from './file';\nconst x = 1;"
        );
    }

    #[test]
    fn test_inserts_after_multi_line_block_comment() {
        let source = "/* \n * Block comment\n */\nconst x = 1;";
        assert_eq!(
            insert_after_directives_and_comments(source, IMPORT),
            "/* \n * Block comment\n */\nimport { test } from './file';\nconst x = 1;"
        );
    }

    #[test]
    fn test_line_comment_gets_blank_separator() {
        let source = "// Comment\nconst x = 1;";
        assert_eq!(
            insert_after_directives_and_comments(source, IMPORT),
            "// Comment\nimport { test } from './file';\n\nconst x = 1;"
        );
    }

    #[test]
    fn test_no_prologue_inserts_before_first_code_line() {
        let source = "\nconst x = 1;\n";
        assert_eq!(
            insert_after_directives_and_comments(source, IMPORT),
            "\nimport { test } from './file';\n\nconst x = 1;\n"
        );
    }

    #[test]
    fn test_existing_imports_need_no_separator() {
        let source = "import { a } from './a';\nconst x = 1;";
        assert_eq!(
            insert_after_directives_and_comments(source, IMPORT),
            "import { test } from './file';\nimport { a } from './a';\nconst x = 1;"
        );
    }

    #[test]
    fn test_empty_buffer() {
        assert_eq!(insert_after_directives_and_comments("", IMPORT), format!("{}\n", IMPORT));
    }

    #[test]
    fn test_blank_line_after_directive_is_kept() {
        let source = "'use client';\n\nexport const x = 1;";
        assert_eq!(
            insert_after_directives_and_comments(source, IMPORT),
            "'use client';\nimport { test } from './file';\n\nexport const x = 1;"
        );
    }

    #[test]
    fn test_comments_after_code_are_ignored() {
        let source = "const x = 1;\n// trailing note\n";
        assert_eq!(
            insert_after_directives_and_comments(source, IMPORT),
            "import { test } from './file';\n\nconst x = 1;\n// trailing note\n"
        );
    }

    #[test]
    fn test_close_marker_inside_line_comment_does_not_open_block() {
        let source = "// matches src/*.ts */\nconst x = 1;";
        let mut scanner = PrologueScanner::new();
        assert_eq!(scanner.classify(0, "// matches src/*.ts */"), LineClass::LineComment);
        assert_eq!(scanner.classify(1, "const x = 1;"), LineClass::Code);
        assert!(insert_after_directives_and_comments(source, IMPORT)
            .starts_with("// matches src/*.ts */\nimport { test }"));
    }

    #[test]
    fn test_block_comment_spanning_line_comment_syntax() {
        let mut scanner = PrologueScanner::new();
        assert_eq!(scanner.classify(0, "/*"), LineClass::BlockCommentStart);
        assert_eq!(
            scanner.classify(1, " // not code"),
            LineClass::BlockCommentContinuation
        );
        assert_eq!(scanner.classify(2, " */"), LineClass::BlockCommentContinuation);
        assert_eq!(scanner.classify(3, "let y;"), LineClass::Code);
    }

    #[test]
    fn test_code_after_block_close_is_code() {
        let mut scanner = PrologueScanner::new();
        assert_eq!(scanner.classify(0, "/* a */ const x = 1;"), LineClass::Code);
    }

    #[test]
    fn test_shebang_counts_as_comment() {
        let source = "#!/usr/bin/env node\nmain();";
        assert_eq!(
            insert_after_directives_and_comments(source, IMPORT),
            "#!/usr/bin/env node\nimport { test } from './file';\n\nmain();"
        );
    }

    #[test]
    fn test_crlf_is_preserved() {
        let source = "'use strict';\r\nconst x = 1;\r\n";
        assert_eq!(
            insert_after_directives_and_comments(source, IMPORT),
            "'use strict';\r\nimport { test } from './file';\r\nconst x = 1;\r\n"
        );
    }
}
