//! Shared fixtures for integration tests: a workspace with realistic editor
//! actions registered, mirroring the host actions lessons script against.

#![allow(dead_code)]

use trainer_core::workspace::Workspace;

/// Number of line comments in `text`
pub fn comment_lines(text: &str) -> usize {
    text.lines()
        .filter(|line| line.trim_start().starts_with("//"))
        .count()
}

/// Register a `CommentByLineComment` handler that toggles a `// ` prefix on
/// the line containing the caret, plus a couple of no-op selection actions.
pub fn register_editor_actions(workspace: &Workspace) {
    workspace
        .dispatcher
        .register_action_fn("CommentByLineComment", |ctx| {
            let editor = &ctx.editor;
            let document = editor.document();
            let offset = editor.caret_offset();
            let text = document.text();

            let line_start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
            let line_end = text[line_start..]
                .find('\n')
                .map_or(text.len(), |i| line_start + i);
            let line = &text[line_start..line_end];

            let indent_len = line.len() - line.trim_start().len();
            let toggled = match line.trim_start().strip_prefix("// ") {
                Some(stripped) => format!("{}{}", &line[..indent_len], stripped),
                None => format!("// {line}"),
            };

            let mut updated = String::with_capacity(text.len() + 3);
            updated.push_str(&text[..line_start]);
            updated.push_str(&toggled);
            updated.push_str(&text[line_end..]);
            document.replace_all("toggle line comment", &updated);
            Ok(())
        });

    workspace
        .dispatcher
        .register_action_fn("EditorDownWithSelection", |_ctx| Ok(()));
    workspace
        .dispatcher
        .register_action_fn("EditorSelectWord", |_ctx| Ok(()));
}
