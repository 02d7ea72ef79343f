//! `/api/game/*` routes — reset, the welcome-back prompt, and snapshot
//! export/import.

use crate::game::session::Session;
use crate::routes::board::render_board;
use crate::routes::util::{error_fragment, escape_html, get_param, parse_form_body};

// ── POST /api/game/reset ───────────────────────────────────────────

/// Handle POST /api/game/reset
/// Clears eliminations and the secret robot, then returns the fresh board.
pub fn handle_reset_post(session: &mut Session, _body: &str) -> String {
    session.store.reset();
    session.store.acknowledge_resume();
    render_board(session, false)
}

// ── /api/game/resume ───────────────────────────────────────────────

/// Handle GET /api/game/resume
/// Returns the "Welcome back" prompt when a saved game has progress and the
/// prompt has not been answered this session; otherwise an empty fragment.
pub fn handle_resume_get(session: &Session, _query: &str) -> String {
    if !session.store.should_offer_resume() {
        return String::new();
    }
    let mut h = String::with_capacity(768);
    h.push_str(r#"<div id="resume-prompt" class="p-4">"#);
    h.push_str(r#"<p class="text-xl font-bold">Welcome Back!</p>"#);
    h.push_str(&format!(
        r#"<p>You have a game in progress with {} robot{} eliminated. Continue where you left off, or start a new game?</p>"#,
        session.store.eliminated_count(),
        if session.store.eliminated_count() == 1 { "" } else { "s" }
    ));
    h.push_str(r##"<button hx-post="/api/game/resume" hx-target="#resume-prompt" hx-swap="outerHTML">Continue Game</button>"##);
    h.push_str(r##"<button hx-post="/api/game/reset" hx-target="#board-root">Start New Game</button>"##);
    h.push_str("</div>");
    h
}

/// Handle POST /api/game/resume ("Continue Game").
pub fn handle_resume_post(session: &mut Session, _body: &str) -> String {
    session.store.acknowledge_resume();
    String::new()
}

// ── GET /api/game/state ────────────────────────────────────────────

/// Handle GET /api/game/state
/// Returns the snapshot JSON, the same shape that is persisted.
pub fn handle_state_get(session: &Session, _query: &str) -> String {
    session.store.export_json()
}

// ── POST /api/game/import ──────────────────────────────────────────

/// Handle POST /api/game/import
/// Body: raw snapshot JSON. Fields that do not validate take defaults.
pub fn handle_import_post(session: &mut Session, body: &str) -> String {
    match session.store.import_json(body) {
        Ok(()) => r#"<span class="text-emerald-600">Game imported successfully</span>"#.to_string(),
        Err(e) => error_fragment(&format!("Import failed: {}", e)),
    }
}

// ── /api/game/share ────────────────────────────────────────────────

/// Handle GET /api/game/share
/// Returns a copyable share code for moving the game to another device.
pub fn handle_share_get(session: &Session, _query: &str) -> String {
    format!(
        r#"<input id="share-code" readonly class="w-full font-mono text-xs" value="{}">"#,
        escape_html(&session.store.export_share_code())
    )
}

/// Handle POST /api/game/share
/// Body: code={share code}
pub fn handle_share_post(session: &mut Session, body: &str) -> String {
    let params = parse_form_body(body);
    let code = get_param(&params, "code").unwrap_or("");
    if code.is_empty() {
        return error_fragment("Missing code parameter");
    }
    match session.store.import_share_code(code) {
        Ok(()) => render_board(session, false),
        Err(e) => error_fragment(&format!("Import failed: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::options::Style;
    use crate::game::store::GameStore;
    use crate::storage::{Gateway, MemoryBackend, STORAGE_KEY};

    #[test]
    fn reset_keeps_style_and_returns_board() {
        let mut session = Session::in_memory();
        session.store.toggle_elimination("Mars Rover");
        session.store.set_style("blocky").unwrap();
        session.store.set_secret_robot(Some("Pool Cleaner")).unwrap();

        let html = handle_reset_post(&mut session, "");
        assert!(html.contains(r#"id="board""#));
        assert!(!session.store.is_eliminated("Mars Rover"));
        assert_eq!(session.store.state().secret_robot, None);
        assert_eq!(session.store.state().style, Style::Blocky);
    }

    fn session_with_saved_game(raw: &str) -> Session {
        let backend = MemoryBackend::with_entry(STORAGE_KEY, raw);
        Session::new(GameStore::open(Gateway::new(Box::new(backend))))
    }

    #[test]
    fn resume_prompt_only_for_saved_progress() {
        let mut session = Session::in_memory();
        session.store.toggle_elimination("Mars Rover");
        assert!(handle_resume_get(&session, "").is_empty());

        let mut session = session_with_saved_game(r#"{"version":2,"eliminated":{"Mars Rover":true}}"#);
        let html = handle_resume_get(&session, "");
        assert!(html.contains("Welcome Back!"));
        assert!(html.contains("1 robot eliminated"));

        handle_resume_post(&mut session, "");
        assert!(handle_resume_get(&session, "").is_empty());
    }

    #[test]
    fn state_get_returns_snapshot_json() {
        let mut session = Session::in_memory();
        session.store.toggle_elimination("Mars Rover");
        let json = handle_state_get(&session, "");
        assert!(json.contains(r#""eliminated":{"Mars Rover":true}"#));
        assert!(json.contains(r#""version":2"#));
    }

    #[test]
    fn import_accepts_legacy_and_rejects_garbage() {
        let mut session = Session::in_memory();
        let html = handle_import_post(
            &mut session,
            r#"{"state":{"flippedRobots":{"Cave Mapper":true},"imageStyle":"blocky"},"version":0}"#,
        );
        assert!(html.contains("successfully"));
        assert!(session.store.is_eliminated("Cave Mapper"));
        assert_eq!(session.store.state().style, Style::Blocky);

        let html = handle_import_post(&mut session, "{{{");
        assert!(html.contains("Import failed"));
        assert!(session.store.is_eliminated("Cave Mapper"));
    }

    #[test]
    fn share_code_moves_a_game() {
        let mut source = Session::in_memory();
        source.store.toggle_elimination("Dancing Robot");
        let html = handle_share_get(&source, "");
        let code = source.store.export_share_code();
        assert!(html.contains(&code));

        let mut target = Session::in_memory();
        let board = handle_share_post(&mut target, &format!("code={}", code));
        assert!(board.contains(r#"id="board""#));
        assert!(target.store.is_eliminated("Dancing Robot"));
    }

    #[test]
    fn share_post_requires_code() {
        let mut session = Session::in_memory();
        assert!(handle_share_post(&mut session, "").contains("Missing code"));
        assert!(handle_share_post(&mut session, "code=%%%").contains("Import failed"));
    }
}
