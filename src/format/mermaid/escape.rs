// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Escape a label for a single notation line: `"` becomes `\"`, newlines become `\n`.
///
/// A backslash is doubled only when the next character would otherwise read as an escape
/// (`\`, `"`, `n` or a newline), so delimiter-like labels such as `/x\` keep their text.
pub(crate) fn escape_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut chars = label.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\\' if matches!(chars.peek(), Some('\\' | '"' | 'n' | '\n')) => {
                out.push_str("\\\\")
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Inverse of [`escape_label`]. Other backslash sequences are kept as written.
pub(crate) fn unescape_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut chars = label.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let decoded = match chars.peek() {
            Some('"') => '"',
            Some('n') => '\n',
            Some('\\') => '\\',
            _ => {
                out.push('\\');
                continue;
            }
        };
        out.push(decoded);
        chars.next();
    }
    out
}
