//! `/api/settings/*` routes — illustration style and grid column pickers.
//!
//! Both pickers only offer declared options, but the POST handlers still
//! validate: a stale page or hand-made request gets an inline error and
//! the setting is left as it was.

use crate::game::options::{GridColumns, Style};
use crate::game::session::Session;
use crate::routes::util::{error_fragment, get_param, parse_form_body};

// ── /api/settings/style ────────────────────────────────────────────

pub fn handle_style_get(session: &Session, _query: &str) -> String {
    render_style_picker(session)
}

/// Handle POST /api/settings/style
/// Body: style={blocky|realistic}
pub fn handle_style_post(session: &mut Session, body: &str) -> String {
    let params = parse_form_body(body);
    let value = get_param(&params, "style").unwrap_or("");
    match session.store.set_style(value) {
        Ok(_) => render_style_picker(session),
        Err(e) => format!("{}{}", error_fragment(&e.to_string()), render_style_picker(session)),
    }
}

fn render_style_picker(session: &Session) -> String {
    let current = session.store.state().style;
    let mut h = String::with_capacity(512);
    h.push_str(r#"<div id="style-picker" class="flex gap-2">"#);
    for style in Style::ALL {
        h.push_str(&format!(
            r##"<button class="{}" hx-post="/api/settings/style" hx-vals='{{"style":"{}"}}' hx-target="#style-picker" hx-swap="outerHTML">{}</button>"##,
            if style == current { "btn btn-active" } else { "btn" },
            style.as_str(),
            style.label()
        ));
    }
    h.push_str("</div>");
    h
}

// ── /api/settings/grid ─────────────────────────────────────────────

pub fn handle_grid_get(session: &Session, _query: &str) -> String {
    render_grid_picker(session)
}

/// Handle POST /api/settings/grid
/// Body: columns={auto|3|4|5|6|8|10}
pub fn handle_grid_post(session: &mut Session, body: &str) -> String {
    let params = parse_form_body(body);
    let value = get_param(&params, "columns").unwrap_or("");
    match session.store.set_grid_preference(value) {
        Ok(_) => render_grid_picker(session),
        Err(e) => format!("{}{}", error_fragment(&e.to_string()), render_grid_picker(session)),
    }
}

fn render_grid_picker(session: &Session) -> String {
    let current = session.store.state().grid_columns;
    let mut h = String::with_capacity(768);
    h.push_str(r#"<div id="grid-picker" class="flex gap-1">"#);
    for option in GridColumns::options() {
        h.push_str(&format!(
            r##"<button class="{}" hx-post="/api/settings/grid" hx-vals='{{"columns":"{}"}}' hx-target="#grid-picker" hx-swap="outerHTML">{}</button>"##,
            if option == current { "btn btn-active" } else { "btn" },
            option,
            option.label()
        ));
    }
    h.push_str("</div>");
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_picker_marks_current() {
        let session = Session::in_memory();
        let html = handle_style_get(&session, "");
        assert!(html.contains(r#"<button class="btn btn-active" hx-post="/api/settings/style" hx-vals='{"style":"realistic"}'"#));
        assert!(html.contains("Blocky"));
    }

    #[test]
    fn style_post_applies_declared_style() {
        let mut session = Session::in_memory();
        handle_style_post(&mut session, "style=blocky");
        assert_eq!(session.store.state().style, Style::Blocky);
    }

    #[test]
    fn style_post_rejects_retired_style() {
        let mut session = Session::in_memory();
        let html = handle_style_post(&mut session, "style=cartoon");
        assert!(html.contains("invalid style option"));
        assert_eq!(session.store.state().style, Style::Realistic);
    }

    #[test]
    fn grid_post_applies_and_rejects() {
        let mut session = Session::in_memory();
        handle_grid_post(&mut session, "columns=6");
        assert_eq!(session.store.state().grid_columns, GridColumns::Fixed(6));

        let html = handle_grid_post(&mut session, "columns=9");
        assert!(html.contains("invalid grid option"));
        assert_eq!(session.store.state().grid_columns, GridColumns::Fixed(6));
    }

    #[test]
    fn grid_picker_lists_all_options() {
        let session = Session::in_memory();
        let html = handle_grid_get(&session, "");
        assert_eq!(html.matches("<button").count(), 7);
        assert!(html.contains(r#"{"columns":"auto"}"#));
    }
}
