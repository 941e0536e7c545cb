//! Header detection and replacement.
//!
//! The header of a file is, in order:
//!
//! 1. an interpreter line (`#!...`) and the blank lines after it, for
//!    languages with a shebang template
//! 2. tooling directives matched by the language's skip patterns
//! 3. the leading run of line comments and blank lines
//!
//! Rewriting drops parts 1 and 3, keeps part 2 verbatim and emits the new
//! banner in their place. A new interpreter line is followed by a blank line
//! unless directives follow it directly. Everything from the first other line onwards is
//! copied byte for byte, so rewriting a file twice gives the same result as
//! rewriting it once.

use crate::language::CommentSyntax;

use super::render::Banner;

/// The leading region of a file that a rewrite replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderRegion {
    /// Interpreter line plus the blank lines after it
    pub shebang_lines: usize,
    /// Directive lines kept above the banner
    pub skip_line_count: usize,
    /// Comment and blank lines removed
    pub comment_line_count: usize,
    /// Index of the first line of the comment block
    pub insertion_offset: usize,
}

fn strip_eol(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

impl HeaderRegion {
    /// Locate the header in `lines` (with or without terminators).
    pub fn detect<S: AsRef<str>>(lines: &[S], syntax: &CommentSyntax) -> Self {
        let mut index = 0;
        let mut region = HeaderRegion::default();

        let starts_with_shebang = lines
            .first()
            .is_some_and(|line| line.as_ref().starts_with("#!"));

        if syntax.shebang.is_some() && starts_with_shebang {
            index = 1;
            while index < lines.len() && lines[index].as_ref().trim().is_empty() {
                index += 1;
            }
            region.shebang_lines = index;
        }

        let mut seen_comment = false;

        while index < lines.len() {
            let line = strip_eol(lines[index].as_ref());

            if !seen_comment && syntax.is_skip_line(line) {
                region.skip_line_count += 1;
            } else if syntax.is_line_comment(line) || line.trim().is_empty() {
                seen_comment = true;
                region.comment_line_count += 1;
            } else {
                break;
            }
            index += 1;
        }

        region.insertion_offset = region.shebang_lines + region.skip_line_count;
        region
    }

    /// Index of the first body line.
    pub fn body_offset(&self) -> usize {
        self.insertion_offset + self.comment_line_count
    }
}

/// Line terminator used by `content`: CRLF if its first line ends in CRLF.
fn line_ending(content: &str) -> &'static str {
    match content.find('\n') {
        Some(pos) if content[..pos].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

/// Replace the header of `content` with `banner`.
///
/// # Example
///
/// ```rust
/// use codetoolslib::banner::{rewrite, Banner};
/// use codetoolslib::Language;
///
/// let banner = Banner {
///     shebang: None,
///     lines: vec!["#    a.py".to_string(), "#".to_string()],
/// };
/// let syntax = Language::Python.syntax().unwrap();
///
/// let once = rewrite("# old header\n\nimport os\n", syntax, &banner);
/// assert_eq!(once, "#    a.py\n#\n\nimport os\n");
/// assert_eq!(rewrite(&once, syntax, &banner), once);
/// ```
pub fn rewrite(content: &str, syntax: &CommentSyntax, banner: &Banner) -> String {
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let region = HeaderRegion::detect(&lines, syntax);
    let eol = line_ending(content);

    let mut out = String::with_capacity(content.len() + 512);

    let skipped = &lines[region.shebang_lines..region.insertion_offset];

    // Encoding cookies only count on the first two lines
    if let Some(shebang) = &banner.shebang {
        out.push_str(shebang);
        out.push_str(eol);
        if skipped.is_empty() {
            out.push_str(eol);
        }
    }

    for line in skipped {
        out.push_str(line);
        if !line.ends_with('\n') {
            out.push_str(eol);
        }
    }

    for line in &banner.lines {
        out.push_str(line);
        out.push_str(eol);
    }
    out.push_str(eol);

    for line in &lines[region.body_offset()..] {
        out.push_str(line);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;
    use proptest::prelude::*;

    fn banner(marker: &str) -> Banner {
        Banner {
            shebang: None,
            lines: vec![
                format!("{}    file", marker),
                marker.to_string(),
                format!("{}   Copyright (c) 2024 ACME", marker),
            ],
        }
    }

    fn python() -> &'static CommentSyntax {
        Language::Python.syntax().unwrap()
    }

    fn cpp() -> &'static CommentSyntax {
        Language::Cpp.syntax().unwrap()
    }

    #[test]
    fn test_detect_plain_header() {
        let lines = ["// one", "", "// two", "int x;", "// not header"];
        let region = HeaderRegion::detect(&lines, cpp());

        assert_eq!(region.skip_line_count, 0);
        assert_eq!(region.comment_line_count, 3);
        assert_eq!(region.insertion_offset, 0);
        assert_eq!(region.body_offset(), 3);
    }

    #[test]
    fn test_detect_skip_lines() {
        let lines = [
            "# -*- coding: utf-8 -*-\n",
            "# type: ignore\n",
            "# header\n",
            "# mypy: strict\n",
            "import os\n",
        ];
        let region = HeaderRegion::detect(&lines, python());

        assert_eq!(region.skip_line_count, 2);
        // A directive after the first comment line belongs to the comment block
        assert_eq!(region.comment_line_count, 2);
        assert_eq!(region.insertion_offset, 2);
    }

    #[test]
    fn test_detect_shebang() {
        let lines = ["#!/usr/bin/env python3", "", "# header", "x = 1"];
        let region = HeaderRegion::detect(&lines, python());

        assert_eq!(region.shebang_lines, 2);
        assert_eq!(region.comment_line_count, 1);
        assert_eq!(region.insertion_offset, 2);
        assert_eq!(region.body_offset(), 3);
    }

    #[test]
    fn test_detect_no_header() {
        let lines = ["int main() {}", "// trailing"];
        let region = HeaderRegion::detect(&lines, cpp());
        assert_eq!(region, HeaderRegion::default());
    }

    #[test]
    fn test_rewrite_replaces_header() {
        let content = "// old banner\n// more\n\n#include <x.h>\n// keep me\n";
        let out = rewrite(content, cpp(), &banner("//"));

        assert_eq!(
            out,
            "//    file\n//\n//   Copyright (c) 2024 ACME\n\n#include <x.h>\n// keep me\n"
        );
    }

    #[test]
    fn test_rewrite_without_header() {
        let out = rewrite("int x;\n", cpp(), &banner("//"));
        assert!(out.ends_with("ACME\n\nint x;\n"));
    }

    #[test]
    fn test_rewrite_empty_file() {
        let out = rewrite("", python(), &banner("#"));
        assert_eq!(out, "#    file\n#\n#   Copyright (c) 2024 ACME\n\n");
    }

    #[test]
    fn test_rewrite_keeps_skip_lines_above_banner() {
        let content = "// @ts-nocheck\n// old\nexport {};\n";
        let ts = Language::TypeScript.syntax().unwrap();
        let out = rewrite(content, ts, &banner("//"));

        assert!(out.starts_with("// @ts-nocheck\n//    file\n"));
        assert!(out.ends_with("ACME\n\nexport {};\n"));
        assert!(!out.contains("// old"));
    }

    #[test]
    fn test_rewrite_skip_line_without_newline() {
        let out = rewrite("# type: ignore", python(), &banner("#"));
        assert!(out.starts_with("# type: ignore\n#    file\n"));
    }

    #[test]
    fn test_rewrite_shebang() {
        let mut with_shebang = banner("#");
        with_shebang.shebang = Some("#!/usr/bin/env python3".to_string());

        let out = rewrite("# old\nimport os\n", python(), &with_shebang);
        assert!(out.starts_with("#!/usr/bin/env python3\n\n#    file\n"));
        assert_eq!(rewrite(&out, python(), &with_shebang), out);

        // Dropping the flag removes the interpreter line again
        let out = rewrite(&out, python(), &banner("#"));
        assert!(out.starts_with("#    file\n"));
    }

    #[test]
    fn test_rewrite_shebang_keeps_coding_cookie_on_line_two() {
        let mut with_shebang = banner("#");
        with_shebang.shebang = Some("#!/usr/bin/env python3".to_string());

        let out = rewrite("# coding: utf-8\nimport os\n", python(), &with_shebang);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "#!/usr/bin/env python3");
        assert_eq!(lines[1], "# coding: utf-8");
        assert_eq!(lines[2], "#    file");
        assert_eq!(rewrite(&out, python(), &with_shebang), out);

        // An existing blank line between the two is dropped as well
        let spaced = "#!/usr/bin/python\n\n# -*- coding: latin-1 -*-\n# old\nx = 1\n";
        let out = rewrite(spaced, python(), &with_shebang);
        assert!(out.starts_with("#!/usr/bin/env python3\n# -*- coding: latin-1 -*-\n#    file\n"));
        assert!(out.ends_with("ACME\n\nx = 1\n"));
    }

    #[test]
    fn test_rewrite_node_shebang() {
        let js = Language::JavaScript.syntax().unwrap();
        let mut with_shebang = banner("//");
        with_shebang.shebang = Some("#!/usr/bin/env node".to_string());

        let out = rewrite("#!/usr/bin/node\nconsole.log(1);\n", js, &with_shebang);
        assert_eq!(
            out,
            "#!/usr/bin/env node\n\n//    file\n//\n//   Copyright (c) 2024 ACME\n\nconsole.log(1);\n"
        );
        assert_eq!(rewrite(&out, js, &with_shebang), out);
    }

    #[test]
    fn test_rewrite_crlf() {
        let content = "// old\r\n\r\nint x;\r\nint y;";
        let out = rewrite(content, cpp(), &banner("//"));

        assert_eq!(
            out,
            "//    file\r\n//\r\n//   Copyright (c) 2024 ACME\r\n\r\nint x;\r\nint y;"
        );
        assert_eq!(rewrite(&out, cpp(), &banner("//")), out);
    }

    #[test]
    fn test_rewrite_body_without_final_newline() {
        let out = rewrite("# old\nprint(1)", python(), &banner("#"));
        assert!(out.ends_with("\n\nprint(1)"));
    }

    fn python_line() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("# comment".to_string()),
            Just("".to_string()),
            Just("   ".to_string()),
            Just("# type: ignore".to_string()),
            Just("#!/bin/sh".to_string()),
            Just("import os".to_string()),
            Just("x = 1  # trailing".to_string()),
            Just("\"\"\"doc\"\"\"".to_string()),
            "[a-z =]{1,12}",
        ]
    }

    proptest! {
        #[test]
        fn prop_rewrite_is_idempotent(
            lines in prop::collection::vec(python_line(), 0..12),
            crlf in any::<bool>(),
            shebang in any::<bool>(),
        ) {
            let eol = if crlf { "\r\n" } else { "\n" };
            let content = lines.join(eol);
            let mut banner = banner("#");
            if shebang {
                banner.shebang = Some("#!/usr/bin/env python3".to_string());
            }

            let once = rewrite(&content, python(), &banner);
            let twice = rewrite(&once, python(), &banner);
            prop_assert_eq!(twice, once);
        }

        #[test]
        fn prop_rewrite_preserves_body(
            header in prop::collection::vec(
                prop_oneof![Just("// c".to_string()), Just("".to_string())],
                0..6,
            ),
            body in prop::collection::vec(python_line(), 0..8),
        ) {
            let mut content = String::new();
            for line in &header {
                content.push_str(line);
                content.push('\n');
            }
            let body_text = format!("int x;\n{}", body.join("\n"));
            content.push_str(&body_text);

            let out = rewrite(&content, cpp(), &banner("//"));
            prop_assert!(out.ends_with(&body_text));
            prop_assert!(!out[..out.len() - body_text.len()].contains("// c"));
        }
    }
}
