//! Terminal rendering of a form view.

use std::fmt::Write as _;

use colored::*;
use formsmith_form::{Choice, Control, FormView, InputKind, RenderedField};

/// Render `view` as terminal text, one block per field.
pub fn render_view(view: &FormView) -> String {
    let mut out = String::new();
    match view {
        FormView::Placeholder { title, hint } => {
            let _ = writeln!(out, "{}", title.bold());
            let _ = writeln!(out, "{}", hint.dimmed());
        }
        FormView::Form {
            title,
            fields,
            submitted,
        } => {
            let _ = writeln!(out, "{}", title.bold().underline());
            for field in fields {
                out.push('\n');
                render_field(&mut out, field);
            }
            if let Some(notice) = submitted {
                let _ = writeln!(out, "\n{}", notice.green());
            }
        }
    }
    out
}

fn render_field(out: &mut String, field: &RenderedField) {
    let marker = if field.required {
        format!(" {}", "*".red())
    } else {
        String::new()
    };
    let _ = writeln!(out, "{}{}", field.label.bold(), marker);

    let text = field.value.as_text().unwrap_or_default();
    let line = match &field.control {
        Control::TextInput {
            input_kind,
            placeholder,
        } => {
            let kind = match input_kind {
                InputKind::Text => "",
                InputKind::Number => " #",
            };
            format!("[{kind} {} ]", shown_or_placeholder(text, placeholder))
        }
        Control::TextArea { placeholder } => {
            format!("[¶ {} ]", shown_or_placeholder(text, placeholder))
        }
        Control::Select {
            placeholder,
            options,
        } => {
            let current = options
                .iter()
                .find(|c| c.selected)
                .map(|c| c.value.normal())
                .unwrap_or_else(|| placeholder.dimmed());
            format!("[ {current} ▾ ]")
        }
        Control::RadioGroup { options } => choices(options, "(•)", "( )"),
        Control::CheckboxGroup { options } => choices(options, "[x]", "[ ]"),
        Control::FilePicker => {
            if text.is_empty() {
                format!("[ {} ]", "Choose file".dimmed())
            } else {
                format!("[ {text} ]")
            }
        }
    };
    let _ = writeln!(out, "  {line}");

    if let Some(error) = &field.error {
        let _ = writeln!(out, "  {}", error.red());
    }
}

fn shown_or_placeholder(text: &str, placeholder: &str) -> ColoredString {
    if text.is_empty() {
        placeholder.dimmed()
    } else {
        text.normal()
    }
}

fn choices(options: &[Choice], on: &str, off: &str) -> String {
    options
        .iter()
        .map(|choice| {
            let mark = if choice.selected { on } else { off };
            format!("{mark} {}", choice.value)
        })
        .collect::<Vec<_>>()
        .join("  ")
}
