//! `/api/secret` — pick the robot the other players have to guess.

use crate::assets::PICKER_IMAGE_SIZE;
use crate::catalog::ROBOTS;
use crate::game::session::Session;
use crate::routes::board::render_image;
use crate::routes::util::{error_fragment, escape_html, get_param, parse_form_body};

pub fn handle_secret_get(session: &Session, _query: &str) -> String {
    render_picker(session)
}

/// Handle POST /api/secret
/// Body: name={robot}. An empty or missing name clears the selection.
pub fn handle_secret_post(session: &mut Session, body: &str) -> String {
    let params = parse_form_body(body);
    let name = get_param(&params, "name").filter(|n| !n.is_empty());
    match session.store.set_secret_robot(name) {
        Ok(()) => render_picker(session),
        Err(e) => format!("{}{}", error_fragment(&e.to_string()), render_picker(session)),
    }
}

fn render_picker(session: &Session) -> String {
    let style = session.store.state().style;
    let selected = session.store.secret_robot();

    let mut h = String::with_capacity(ROBOTS.len() * 600 + 512);
    h.push_str(r#"<div id="secret-picker" class="p-4">"#);
    h.push_str(r#"<p class="text-lg font-bold">Select Your Robot</p>"#);

    match selected {
        Some(robot) => {
            h.push_str(r#"<div class="secret-current flex items-center gap-3">"#);
            h.push_str(&render_image(session, robot, style, PICKER_IMAGE_SIZE, "h-12 w-12 rounded"));
            h.push_str(&format!(
                r#"<span class="font-semibold">{}</span><span>{}</span>"#,
                escape_html(robot.name),
                robot.purpose.label()
            ));
            h.push_str(
                r##"<button name="name" value="" hx-post="/api/secret" hx-target="#secret-picker" hx-swap="outerHTML">Clear</button>"##,
            );
            h.push_str("</div>");
        }
        None => h.push_str(r#"<p class="text-sm">No robot chosen yet</p>"#),
    }

    h.push_str(r#"<div class="grid grid-cols-3 sm:grid-cols-4 md:grid-cols-5 gap-3">"#);
    for robot in ROBOTS {
        let is_selected = selected.is_some_and(|s| s.name == robot.name);
        h.push_str(&format!(
            r##"<button class="secret-option{}" name="name" value="{}" hx-post="/api/secret" hx-target="#secret-picker" hx-swap="outerHTML">"##,
            if is_selected { " selected" } else { "" },
            escape_html(robot.name)
        ));
        h.push_str(&render_image(session, robot, style, PICKER_IMAGE_SIZE, "h-full w-full object-cover"));
        h.push_str(&format!(r#"<p class="text-xs truncate">{}</p></button>"#, escape_html(robot.name)));
    }
    h.push_str("</div></div>");
    h
}
