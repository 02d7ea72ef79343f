//! Robot Guess Who in-browser WASM server.
//!
//! Exports `handle_request(method, path, query, body)` for the Service Worker
//! bridge to call. Uses `matchit` for URL routing — the same router
//! engine that powers Axum.
//!
//! The page keeps no game state of its own: eliminations, settings and the
//! secret robot live in the session store, which persists every change to
//! localStorage and survives reloads.

use wasm_bindgen::prelude::*;

pub mod assets;
pub mod catalog;
pub mod error;
pub mod game;
pub mod gesture;
pub mod routes;
pub mod storage;

use crate::game::session::{with_session, with_session_mut};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
}

/// Host configuration, called once after the module loads.
///
/// * `base_url`      — prefix for generated robot images (e.g. "/guess-who/")
/// * `long_press_ms` — hold time before a press opens the detail view; 0 keeps the default
#[wasm_bindgen]
pub fn configure(base_url: &str, long_press_ms: u32) {
    with_session_mut(|s| s.configure(base_url, long_press_ms));
    log::info!("configured: base_url={:?} long_press_ms={}", base_url, long_press_ms);
}

/// Process an HTTP-like request and return an HTML fragment.
///
/// Called from JavaScript (Web Worker) via wasm-bindgen.
///
/// # Arguments
/// * `method` — HTTP method (e.g., "GET", "POST")
/// * `path`   — URL path (e.g., "/api/robots")
/// * `query`  — Query string (e.g., "?hide=true")
/// * `body`   — Request body (e.g., POST form data). Empty string for GET requests.
///
/// # Returns
/// An HTML string fragment suitable for HTMX to swap into the DOM.
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    // Build the router. matchit compiles route patterns into a radix tree.
    let mut router = matchit::Router::new();

    // Board
    router.insert("/api/robots", "robots").ok();
    router.insert("/api/robots/detail", "robot_detail").ok();
    router.insert("/api/robots/toggle", "robot_toggle").ok();
    router.insert("/api/status", "status").ok();

    // Settings and secret robot
    router.insert("/api/settings/style", "style").ok();
    router.insert("/api/settings/grid", "grid").ok();
    router.insert("/api/secret", "secret").ok();

    // Game lifecycle
    router.insert("/api/game/reset", "game_reset").ok();
    router.insert("/api/game/resume", "game_resume").ok();
    router.insert("/api/game/state", "game_state").ok();
    router.insert("/api/game/import", "game_import").ok();
    router.insert("/api/game/share", "game_share").ok();

    router.insert("/api/gesture", "gesture").ok();

    match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            // GET routes
            ("robots", "GET") => with_session(|s| routes::board::handle_robots_get(s, query)),
            ("robot_detail", "GET") => with_session(|s| routes::board::handle_detail_get(s, query)),
            ("status", "GET") => with_session(|s| routes::board::handle_status_get(s, query)),
            ("style", "GET") => with_session(|s| routes::settings::handle_style_get(s, query)),
            ("grid", "GET") => with_session(|s| routes::settings::handle_grid_get(s, query)),
            ("secret", "GET") => with_session(|s| routes::secret::handle_secret_get(s, query)),
            ("game_resume", "GET") => with_session(|s| routes::game::handle_resume_get(s, query)),
            ("game_state", "GET") => with_session(|s| routes::game::handle_state_get(s, query)),
            ("game_share", "GET") => with_session(|s| routes::game::handle_share_get(s, query)),

            // POST routes
            ("robot_toggle", "POST") => {
                with_session_mut(|s| routes::board::handle_toggle_post(s, body))
            }
            ("style", "POST") => with_session_mut(|s| routes::settings::handle_style_post(s, body)),
            ("grid", "POST") => with_session_mut(|s| routes::settings::handle_grid_post(s, body)),
            ("secret", "POST") => with_session_mut(|s| routes::secret::handle_secret_post(s, body)),
            ("game_reset", "POST") => with_session_mut(|s| routes::game::handle_reset_post(s, body)),
            ("game_resume", "POST") => {
                with_session_mut(|s| routes::game::handle_resume_post(s, body))
            }
            ("game_import", "POST") => {
                with_session_mut(|s| routes::game::handle_import_post(s, body))
            }
            ("game_share", "POST") => with_session_mut(|s| routes::game::handle_share_post(s, body)),
            ("gesture", "POST") => {
                with_session_mut(|s| routes::gesture::handle_gesture_post(s, body))
            }

            _ => method_not_allowed(),
        },
        Err(_) => not_found(),
    }
}

fn not_found() -> String {
    r#"<span class="text-red-600">404 — route not found</span>"#.to_string()
}

fn method_not_allowed() -> String {
    r#"<span class="text-red-600">405 — method not allowed</span>"#.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::session::{Session, replace_session};
    use crate::game::store::GameStore;
    use crate::storage::{Gateway, MemoryBackend, STORAGE_KEY};

    fn fresh() {
        replace_session(Session::in_memory());
    }

    #[test]
    fn returns_404_for_unknown_route() {
        let html = handle_request("GET", "/api/nonexistent", "", "");
        assert!(html.contains("404"));
    }

    #[test]
    fn returns_405_for_wrong_method() {
        let html = handle_request("POST", "/api/status", "", "");
        assert!(html.contains("405"));
        let html = handle_request("GET", "/api/game/reset", "", "");
        assert!(html.contains("405"));
    }

    #[test]
    fn routes_robots() {
        fresh();
        let html = handle_request("GET", "/api/robots", "", "");
        assert_eq!(html.matches(r#"class="robot-card"#).count(), catalog::ROBOTS.len());
        assert!(html.contains("24 of 24 robots remaining"));
    }

    #[test]
    fn routes_toggle_then_hide() {
        fresh();
        let card = handle_request("POST", "/api/robots/toggle", "", "name=Mars+Rover");
        assert!(card.contains("flipped"));

        let html = handle_request("GET", "/api/robots", "?hide=true", "");
        assert!(!html.contains(r#"data-robot="Mars Rover""#));
        assert!(html.contains("23 of 24 robots remaining"));
        fresh();
    }

    #[test]
    fn routes_detail() {
        fresh();
        let html = handle_request("GET", "/api/robots/detail", "?name=Deep+Sea+Explorer", "");
        assert!(html.contains("Sensors (4)"));
    }

    #[test]
    fn routes_settings_and_secret() {
        fresh();
        let html = handle_request("POST", "/api/settings/style", "", "style=blocky");
        assert!(html.contains("style-picker"));
        let html = handle_request("POST", "/api/settings/grid", "", "columns=4");
        assert!(html.contains("grid-picker"));
        handle_request("POST", "/api/secret", "", "name=Pool+Cleaner");

        let json = handle_request("GET", "/api/game/state", "", "");
        assert!(json.contains(r#""style":"blocky""#));
        assert!(json.contains(r#""gridColumns":4"#));
        assert!(json.contains(r#""secretRobot":"Pool Cleaner""#));
        fresh();
    }

    #[test]
    fn routes_reset_and_resume() {
        let saved = r#"{"version":2,"eliminated":{"Mars Rover":true}}"#;
        let backend = MemoryBackend::with_entry(STORAGE_KEY, saved);
        replace_session(Session::new(GameStore::open(Gateway::new(Box::new(backend)))));
        assert!(handle_request("GET", "/api/game/resume", "", "").contains("Welcome Back!"));
        handle_request("POST", "/api/game/reset", "", "");
        assert!(handle_request("GET", "/api/game/resume", "", "").is_empty());
        assert!(handle_request("GET", "/api/status", "", "").contains("24 of 24"));
    }

    #[test]
    fn routes_import_and_share() {
        fresh();
        let html = handle_request(
            "POST",
            "/api/game/import",
            "",
            r#"{"version":2,"eliminated":{"Cave Mapper":true},"style":"realistic","gridColumns":"auto","secretRobot":null}"#,
        );
        assert!(html.contains("successfully"));
        let share = handle_request("GET", "/api/game/share", "", "");
        assert!(share.contains("share-code"));
        fresh();
    }

    #[test]
    fn routes_gesture() {
        fresh();
        let json = handle_request("POST", "/api/gesture", "", "event=down&name=Mars+Rover&x=0&y=0");
        assert!(json.contains(r#""delayMs":400"#));
        let json = handle_request("POST", "/api/gesture", "", "event=up&x=0&y=0");
        assert!(json.contains(r#""gesture":"click""#));
        fresh();
    }

    #[test]
    fn configure_changes_base_url_and_delay() {
        fresh();
        configure("/guess-who/", 650);
        let html = handle_request("GET", "/api/robots/detail", "?name=Mars+Rover", "");
        assert!(html.contains("/guess-who/generated/mars_rover_"));
        let json = handle_request("POST", "/api/gesture", "", "event=down&name=Mars+Rover&x=0&y=0");
        assert!(json.contains(r#""delayMs":650"#));
        fresh();
    }
}
