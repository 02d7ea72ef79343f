//! `POST /api/gesture` — pointer events from the board, classified into
//! click (flip the card) or long press (open the detail view).
//!
//! Body: `event={down|move|up|cancel|fire}&name={robot}&x={n}&y={n}&gen={n}`
//!
//! Replies are JSON so the page can act on them without parsing HTML:
//!
//! ```text
//! {"arm":{"generation":3,"delayMs":400}}         start a timer, then POST event=fire&gen=3
//! {"clearTimer":true}                             drop the pending timer
//! {"gesture":"click","robot":"…","html":"…"}      card flipped; swap the card
//! {"gesture":"long_press","robot":"…","html":"…"} show the detail view
//! {}                                              nothing to do
//! ```

use serde::Serialize;

use crate::catalog;
use crate::game::session::Session;
use crate::gesture::{Gesture, Point, TimerRequest};
use crate::routes::board::{render_card, render_detail};
use crate::routes::util::{get_param, parse_form_body};

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GestureReply {
    #[serde(skip_serializing_if = "Option::is_none")]
    arm: Option<TimerRequest>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    clear_timer: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    gesture: Option<Gesture>,
    #[serde(skip_serializing_if = "Option::is_none")]
    robot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl GestureReply {
    fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

pub fn handle_gesture_post(session: &mut Session, body: &str) -> String {
    let params = parse_form_body(body);
    let coord = |key: &str| {
        get_param(&params, key)
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(0.0)
    };
    let at = Point::new(coord("x"), coord("y"));

    let reply = match get_param(&params, "event").unwrap_or("") {
        "down" => match get_param(&params, "name").filter(|n| !n.is_empty()) {
            Some(name) => {
                session.gesture_target = Some(name.to_string());
                GestureReply {
                    arm: Some(session.gesture.begin(at)),
                    ..GestureReply::default()
                }
            }
            None => GestureReply::error("Missing name parameter"),
        },
        "move" => GestureReply {
            clear_timer: session.gesture.moved(at),
            ..GestureReply::default()
        },
        "up" => {
            let gesture = session.gesture.end(at);
            let target = session.gesture_target.take();
            resolve(session, gesture, target)
        }
        "cancel" => {
            session.gesture.cancel();
            session.gesture_target = None;
            GestureReply {
                clear_timer: true,
                ..GestureReply::default()
            }
        }
        "fire" => {
            let generation = get_param(&params, "gen")
                .and_then(|g| g.parse::<u32>().ok())
                .unwrap_or(0);
            let gesture = session.gesture.timer_fired(generation);
            let target = session.gesture_target.clone();
            resolve(session, gesture, target)
        }
        other => GestureReply::error(format!("Unknown gesture event: {}", other)),
    };
    reply.to_json()
}

/// Turn a classified gesture into its store action and reply.
fn resolve(session: &mut Session, gesture: Option<Gesture>, target: Option<String>) -> GestureReply {
    let (Some(gesture), Some(name)) = (gesture, target) else {
        return GestureReply::default();
    };
    let html = match gesture {
        Gesture::Click => {
            session.store.toggle_elimination(&name);
            catalog::find_robot(&name).map(|robot| render_card(session, robot))
        }
        Gesture::LongPress => catalog::find_robot(&name).map(|robot| render_detail(session, robot)),
    };
    GestureReply {
        gesture: Some(gesture),
        robot: Some(name),
        html,
        ..GestureReply::default()
    }
}
