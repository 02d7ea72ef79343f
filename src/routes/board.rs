//! `/api/robots*` and `/api/status` routes — the card grid, single cards,
//! the detail view and the remaining/eliminated counter.
//!
//! Cards carry `data-robot` so the page's pointer handlers can forward
//! press/move/release to `/api/gesture`. Every `<img>` falls back once to
//! the purpose-colored placeholder on load error.

use crate::assets::{self, BOARD_IMAGE_SIZE};
use crate::catalog::{self, ROBOTS, Robot};
use crate::game::options::{GridColumns, Style};
use crate::game::session::Session;
use crate::routes::util::{error_fragment, escape_html, get_flag, get_param, parse_form_body, parse_query};

// ── GET /api/robots ────────────────────────────────────────────────

/// Handle GET /api/robots?hide={bool}
/// Returns the full card grid. With `hide=true` eliminated robots are
/// omitted; otherwise they are sorted to the end.
pub fn handle_robots_get(session: &Session, query: &str) -> String {
    let params = parse_query(query);
    render_board(session, get_flag(&params, "hide"))
}

// ── GET /api/robots/detail ─────────────────────────────────────────

/// Handle GET /api/robots/detail?name={robot}
pub fn handle_detail_get(session: &Session, query: &str) -> String {
    let params = parse_query(query);
    match get_param(&params, "name").and_then(catalog::find_robot) {
        Some(robot) => render_detail(session, robot),
        None => error_fragment("Robot not found"),
    }
}

// ── POST /api/robots/toggle ────────────────────────────────────────

/// Handle POST /api/robots/toggle
/// Body: name={robot}. Returns the re-rendered card. Unknown names are
/// still toggled (harmless) but render an error since there is no card.
pub fn handle_toggle_post(session: &mut Session, body: &str) -> String {
    let params = parse_form_body(body);
    let name = match get_param(&params, "name") {
        Some(n) if !n.is_empty() => n,
        _ => return error_fragment("Missing name parameter"),
    };
    session.store.toggle_elimination(name);
    match catalog::find_robot(name) {
        Some(robot) => render_card(session, robot),
        None => error_fragment(&format!("Robot not found: {}", name)),
    }
}

// ── GET /api/status ────────────────────────────────────────────────

/// Handle GET /api/status?hide={bool}
pub fn handle_status_get(session: &Session, query: &str) -> String {
    let params = parse_query(query);
    render_status(session, get_flag(&params, "hide"))
}

// ── Rendering ──────────────────────────────────────────────────────

pub fn render_status(session: &Session, hidden: bool) -> String {
    let store = &session.store;
    let mut h = String::with_capacity(512);
    h.push_str(r#"<div id="status" class="flex gap-4 text-sm">"#);
    h.push_str(&format!(
        r#"<span>{} of {} robots remaining{}</span>"#,
        store.remaining_count(),
        ROBOTS.len(),
        if hidden { " (filtered)" } else { "" }
    ));
    h.push_str(&format!(
        r#"<span><strong>{}</strong> eliminated</span>"#,
        store.eliminated_count()
    ));
    if store.is_degraded() {
        h.push_str(r#"<span class="text-amber-600">Progress will not be saved on this device</span>"#);
    }
    h.push_str("</div>");
    h
}

pub fn render_board(session: &Session, hide_eliminated: bool) -> String {
    let robots = session.store.visible_robots(hide_eliminated);
    let grid = grid_class(session.store.state().grid_columns, robots.len());

    let mut h = String::with_capacity(robots.len() * 900 + 512);
    h.push_str(&render_status(session, hide_eliminated));
    h.push_str(&format!(r#"<div id="board" class="grid gap-3 {}">"#, grid));
    for robot in robots {
        h.push_str(&render_card(session, robot));
    }
    h.push_str("</div>");
    h
}

/// One flippable card. The back face shows when the robot is eliminated.
pub fn render_card(session: &Session, robot: &Robot) -> String {
    let style = session.store.state().style;
    let flipped = session.store.is_eliminated(robot.name);
    let name = escape_html(robot.name);

    let mut h = String::with_capacity(900);
    h.push_str(&format!(
        r#"<div id="card-{slug}" class="robot-card relative aspect-[3/4] cursor-pointer select-none touch-manipulation" data-robot="{name}">"#,
        slug = assets::slug(robot.name),
        name = name
    ));
    h.push_str(&format!(
        r#"<div class="flip-card absolute inset-0{}">"#,
        if flipped { " flipped" } else { "" }
    ));

    // Front
    h.push_str(r#"<div class="flip-card-face absolute inset-0 flex flex-col overflow-hidden">"#);
    h.push_str(&render_image(session, robot, style, BOARD_IMAGE_SIZE, "h-full w-full object-cover"));
    h.push_str(r#"<div class="mt-auto p-3">"#);
    h.push_str(&format!(r#"<h3 class="text-sm font-bold truncate">{}</h3>"#, name));
    h.push_str(&format!(
        r##"<span class="badge" style="background:#{}">{}</span>"##,
        robot.purpose.hex_color(),
        robot.purpose.label()
    ));
    h.push_str("</div></div>");

    // Back
    h.push_str(r#"<div class="flip-card-face flip-card-back absolute inset-0 flex flex-col items-center justify-center">"#);
    h.push_str(&format!(r#"<h3 class="text-xs font-medium px-2">{}</h3>"#, name));
    h.push_str(r#"<span class="badge-outline">Eliminated</span>"#);
    h.push_str("</div>");

    h.push_str("</div></div>");
    h
}

/// Detail view opened by a long press: attributes, sensors, and the robot
/// in every style.
pub fn render_detail(session: &Session, robot: &Robot) -> String {
    let current = session.store.state().style;
    let mut h = String::with_capacity(2048);
    h.push_str(r#"<div class="robot-detail p-4">"#);
    h.push_str(&format!(r#"<h2 class="text-xl font-bold">{}</h2>"#, escape_html(robot.name)));

    h.push_str(r#"<div class="grid grid-cols-2 gap-2">"#);
    for (style, _) in session.assets.all_style_urls(robot) {
        h.push_str(&format!(
            r#"<figure class="{}">"#,
            if style == current { "ring-2 ring-primary" } else { "" }
        ));
        h.push_str(&render_image(session, robot, style, BOARD_IMAGE_SIZE, "w-full rounded"));
        h.push_str(&format!(r#"<figcaption>{}</figcaption></figure>"#, style.label()));
    }
    h.push_str("</div>");

    h.push_str(r#"<dl class="grid grid-cols-2 gap-2 mt-4">"#);
    for (label, value) in [
        ("Purpose", robot.purpose.label()),
        ("Movement", robot.movement.label()),
        ("Environment", robot.environment.label()),
        ("Control", robot.control.label()),
    ] {
        h.push_str(&format!(r#"<div><dt>{}</dt><dd class="font-semibold">{}</dd></div>"#, label, value));
    }
    h.push_str("</dl>");

    h.push_str(&format!(r#"<p class="mt-4 text-xs">Sensors ({})</p><ul class="flex flex-wrap gap-1">"#, robot.sensors.len()));
    for sensor in robot.sensors {
        h.push_str(&format!(r#"<li class="badge-outline">{}</li>"#, escape_html(sensor)));
    }
    h.push_str("</ul></div>");
    h
}

/// `<img>` for a generated illustration with a one-shot placeholder fallback.
/// The fallback URL sits in `data-fallback` so it never lands inside a
/// script string.
pub fn render_image(session: &Session, robot: &Robot, style: Style, size: u32, class: &str) -> String {
    format!(
        r#"<img src="{src}" alt="{alt}" class="{class}" loading="lazy" data-fallback="{fallback}" onerror="this.onerror=null;this.src=this.dataset.fallback">"#,
        src = escape_html(&session.assets.image_url(robot, style)),
        alt = escape_html(robot.name),
        class = class,
        fallback = escape_html(&assets::placeholder_url(robot, size)),
    )
}

/// Tailwind column classes. Fixed preferences map directly; `auto` grows
/// with the number of visible cards.
pub fn grid_class(columns: GridColumns, visible: usize) -> &'static str {
    match columns {
        GridColumns::Fixed(3) => "grid-cols-2 sm:grid-cols-3 md:grid-cols-3 lg:grid-cols-3 xl:grid-cols-3",
        GridColumns::Fixed(4) => "grid-cols-2 sm:grid-cols-3 md:grid-cols-4 lg:grid-cols-4 xl:grid-cols-4",
        GridColumns::Fixed(5) => "grid-cols-2 sm:grid-cols-3 md:grid-cols-4 lg:grid-cols-5 xl:grid-cols-5",
        GridColumns::Fixed(6) => "grid-cols-2 sm:grid-cols-3 md:grid-cols-4 lg:grid-cols-6 xl:grid-cols-6",
        GridColumns::Fixed(8) => "grid-cols-2 sm:grid-cols-3 md:grid-cols-4 lg:grid-cols-6 xl:grid-cols-8",
        GridColumns::Fixed(_) => "grid-cols-2 sm:grid-cols-4 md:grid-cols-5 lg:grid-cols-8 xl:grid-cols-10",
        GridColumns::Auto => match visible {
            0..=4 => "grid-cols-2 sm:grid-cols-2 md:grid-cols-4 lg:grid-cols-4",
            5..=6 => "grid-cols-2 sm:grid-cols-3 md:grid-cols-6 lg:grid-cols-6",
            7..=8 => "grid-cols-2 sm:grid-cols-4 md:grid-cols-4 lg:grid-cols-8",
            9..=12 => "grid-cols-3 sm:grid-cols-4 md:grid-cols-6 lg:grid-cols-6 xl:grid-cols-12",
            _ => "grid-cols-3 sm:grid-cols-4 md:grid-cols-5 lg:grid-cols-6 xl:grid-cols-8 2xl:grid-cols-10",
        },
    }
}
