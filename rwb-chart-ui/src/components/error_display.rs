//! Dismissable alert banner for start-up and configuration problems.

use dioxus::prelude::*;

/// Non-blank lines of a message, trimmed; each renders as its own row.
pub fn message_lines(message: &str) -> Vec<&str> {
    message
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    /// Shows a close button when set.
    #[props(default)]
    pub on_dismiss: Option<EventHandler<()>>,
}

#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    let lines = message_lines(&props.message);
    if lines.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            role: "alert",
            style: "display: flex; align-items: flex-start; gap: 8px; padding: 8px 12px; margin: 8px 0; background: #fff8e1; color: #8a4b00; border-left: 4px solid #f4a22b; font-size: 14px;",
            span { style: "font-size: 18px; line-height: 1;", "⚠" }
            div {
                style: "flex: 1;",
                for line in lines {
                    div { "{line}" }
                }
            }
            if let Some(on_dismiss) = props.on_dismiss {
                button {
                    r#type: "button",
                    title: "ปิด",
                    style: "border: none; background: transparent; color: inherit; cursor: pointer; font-size: 16px;",
                    onclick: move |_| on_dismiss.call(()),
                    "×"
                }
            }
        }
    }
}
