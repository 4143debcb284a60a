//! Small HTML building blocks shared by every layout.
//!
//! A slot is one editable field. With edit mode off it renders as static text
//! (or its placeholder when empty); with edit mode on it renders as a control
//! carrying `data-path`, which the page script posts back on every input.

use std::fmt::Write;

use crate::models::field_path::FieldPath;
use crate::models::profile::join_list;
use crate::render::RenderContext;
use crate::wizard::enhance::EnhanceTarget;

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
pub fn percent_encode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || b"-._~".contains(&byte) {
            out.push(byte as char);
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}

/// Single-line slot.
pub fn slot(
    ctx: &RenderContext<'_>,
    path: FieldPath,
    value: &str,
    placeholder: &str,
    class: &str,
) -> String {
    if ctx.edit_mode {
        return format!(
            r#"<input type="text" class="slot {class}" data-path="{path}" value="{value}" placeholder="{placeholder}">"#,
            path = escape(&path.to_string()),
            value = escape(value),
            placeholder = escape(placeholder),
        );
    }
    static_text(value, placeholder, class)
}

/// Multi-line slot. Static text keeps its line breaks through `white-space: pre-wrap`.
pub fn text_area(
    ctx: &RenderContext<'_>,
    path: FieldPath,
    value: &str,
    placeholder: &str,
    class: &str,
) -> String {
    if ctx.edit_mode {
        return format!(
            r#"<textarea class="slot {class}" data-path="{path}" rows="4" placeholder="{placeholder}">{value}</textarea>"#,
            path = escape(&path.to_string()),
            value = escape(value),
            placeholder = escape(placeholder),
        );
    }
    static_text(value, placeholder, &format!("{class} body-text"))
}

fn static_text(value: &str, placeholder: &str, class: &str) -> String {
    if value.is_empty() {
        format!(
            r#"<span class="{class} placeholder">{}</span>"#,
            escape(placeholder)
        )
    } else {
        format!(r#"<span class="{class}">{}</span>"#, escape(value))
    }
}

/// A comma-joined list field (`skills`, `qualities`): one text area in edit
/// mode, one tag per entry otherwise.
pub fn tag_list(
    ctx: &RenderContext<'_>,
    path: FieldPath,
    items: &[String],
    tag_class: &str,
) -> String {
    if ctx.edit_mode {
        return format!(
            r#"<textarea class="slot list-blob" data-path="{path}" rows="3" placeholder="Separe por vírgulas">{value}</textarea>"#,
            path = escape(&path.to_string()),
            value = escape(&join_list(items)),
        );
    }
    let mut out = String::from(r#"<div class="tags">"#);
    for item in items.iter().filter(|i| !i.is_empty()) {
        let _ = write!(out, r#"<span class="{tag_class}">{}</span>"#, escape(item));
    }
    out.push_str("</div>");
    out
}

/// "Improve" button for an enhancement target. Rendered only in edit mode;
/// disabled with a progress label while the target is busy.
pub fn improve_button(ctx: &RenderContext<'_>, target: &EnhanceTarget, label: &str) -> String {
    if !ctx.edit_mode {
        return String::new();
    }
    let suffix = match target {
        EnhanceTarget::Experience { id } => format!("experiences/{}", percent_encode(id)),
        other => other.to_string(),
    };
    let action = escape(&format!("enhance/{suffix}"));
    if ctx.is_busy(target) {
        format!(r#"<button type="button" class="improve busy" data-action="{action}" disabled>Melhorando…</button>"#)
    } else {
        format!(
            r#"<button type="button" class="improve" data-action="{action}">{}</button>"#,
            escape(label)
        )
    }
}

/// Photo frame; empty when the profile has no photo.
pub fn photo(url: &str, class: &str) -> String {
    if url.trim().is_empty() {
        return format!(r#"<div class="{class} photo-empty"></div>"#);
    }
    format!(
        r#"<div class="{class}"><img src="{}" alt=""></div>"#,
        escape(url)
    )
}

pub fn section_title(title: &str, class: &str) -> String {
    format!(r#"<h3 class="{class}">{}</h3>"#, escape(title))
}
