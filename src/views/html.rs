// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTML building blocks shared by every page.

use super::mount::{Loadable, PLACEHOLDER};
use super::navigation::{Menu, LOGOUT_PATH};
use super::notice::Notice;
use crate::models::FieldErrors;
use std::fmt::Write;

/// Escape text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Render `data` with `render`, or the placeholder while it is pending.
pub fn loadable<T>(data: &Loadable<T>, render: impl FnOnce(&T) -> String) -> String {
    match data {
        Loadable::Ready(value) => render(value),
        Loadable::Pending => format!(r#"<p class="placeholder">{}</p>"#, PLACEHOLDER),
    }
}

fn menu(menu: &Menu) -> String {
    let mut out = String::from(r#"<nav><ul class="pages">"#);
    for item in &menu.pages {
        let _ = write!(out, r#"<li><a href="{}">{}</a></li>"#, item.path, item.label);
    }
    out.push_str("</ul>");
    if !menu.settings.is_empty() {
        out.push_str(r#"<ul class="settings">"#);
        for item in &menu.settings {
            if item.path == LOGOUT_PATH {
                let _ = write!(
                    out,
                    r#"<li><form method="post" action="{}"><button type="submit">{}</button></form></li>"#,
                    item.path, item.label
                );
            } else {
                let _ = write!(out, r#"<li><a href="{}">{}</a></li>"#, item.path, item.label);
            }
        }
        out.push_str("</ul>");
    }
    out.push_str("</nav>");
    out
}

/// Full document around a page body.
pub fn layout(title: &str, nav: &Menu, notice: Option<&Notice>, body: &str) -> String {
    let notice = notice
        .map(|n| {
            format!(
                r#"<div class="notice notice-{}" role="status">{}</div>"#,
                n.level,
                escape(&n.message)
            )
        })
        .unwrap_or_default();
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            r#"<html lang="en"><head><meta charset="utf-8">"#,
            r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#,
            "<title>{title} | Coupons</title></head>",
            "<body><header>{menu}</header>{notice}<main><h1>{title}</h1>{body}</main></body></html>"
        ),
        title = escape(title),
        menu = menu(nav),
        notice = notice,
        body = body,
    )
}

/// A labelled input with its validation message, if any.
pub fn field(label: &str, name: &str, kind: &str, value: &str, errors: &FieldErrors) -> String {
    let error = errors
        .get(name)
        .map(|msg| format!(r#"<span class="field-error">{}</span>"#, escape(msg)))
        .unwrap_or_default();
    format!(
        r#"<label>{label} <input type="{kind}" name="{name}" value="{value}"></label>{error}"#,
        label = escape(label),
        kind = kind,
        name = name,
        value = escape(value),
        error = error,
    )
}

/// A `<select>` with `selected` preselected.
pub fn select(
    label: &str,
    name: &str,
    options: &[(&str, &str)],
    selected: &str,
    errors: &FieldErrors,
) -> String {
    let mut out = format!(r#"<label>{} <select name="{}">"#, escape(label), name);
    for (value, text) in options {
        let marker = if *value == selected { " selected" } else { "" };
        let _ = write!(
            out,
            r#"<option value="{}"{}>{}</option>"#,
            escape(value),
            marker,
            escape(text)
        );
    }
    out.push_str("</select></label>");
    if let Some(msg) = errors.get(name) {
        let _ = write!(out, r#"<span class="field-error">{}</span>"#, escape(msg));
    }
    out
}

/// A POST-only button, used for deletes, purchases and logout.
pub fn post_button(action: &str, label: &str) -> String {
    format!(
        r#"<form method="post" action="{}" class="inline"><button type="submit">{}</button></form>"#,
        escape(action),
        escape(label)
    )
}
