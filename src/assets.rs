//! Asset resolver — robot illustration URLs.
//!
//! Generated images live at `<base>/generated/<slug>_<style>.png`, written
//! by the offline generation script under the same naming. When an image
//! fails to load in the page, the `<img>` falls back once to a placeholder
//! colored by the robot's purpose.

use crate::catalog::Robot;
use crate::game::options::Style;

/// Placeholder image service.
pub const PLACEHOLDER_HOST: &str = "https://placehold.co";

/// Placeholder size on the board.
pub const BOARD_IMAGE_SIZE: u32 = 400;

/// Placeholder size in the secret-robot picker.
pub const PICKER_IMAGE_SIZE: u32 = 200;

/// Where generated images are served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    pub base_url: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            base_url: "/".to_string(),
        }
    }
}

impl AssetConfig {
    pub fn image_url(&self, robot: &Robot, style: Style) -> String {
        image_url(&self.base_url, robot.name, style)
    }

    /// One URL per declared style, in `Style::ALL` order.
    pub fn all_style_urls(&self, robot: &Robot) -> Vec<(Style, String)> {
        Style::ALL
            .into_iter()
            .map(|style| (style, self.image_url(robot, style)))
            .collect()
    }
}

/// Filesystem/URL-safe form of a robot name: lowercase, each run of
/// characters outside `[a-z0-9]` collapsed to `_`, no leading or trailing
/// `_`.
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_sep = false;
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(c);
        } else {
            pending_sep = true;
        }
    }
    out
}

/// `<slug>_<style>.png`
pub fn generated_file_name(name: &str, style: Style) -> String {
    format!("{}_{}.png", slug(name), style.as_str())
}

pub fn image_url(base: &str, name: &str, style: Style) -> String {
    format!(
        "{}/generated/{}",
        base.trim_end_matches('/'),
        generated_file_name(name, style)
    )
}

/// Placeholder image for a robot whose generated image failed to load.
/// Text is the name with spaces turned into `+`, then percent-encoded.
pub fn placeholder_url(robot: &Robot, size: u32) -> String {
    let text = encode_uri_component(&robot.name.replace(' ', "+"));
    format!(
        "{}/{size}x{size}/{}/ffffff/png?text={}",
        PLACEHOLDER_HOST,
        robot.purpose.hex_color(),
        text,
        size = size
    )
}

/// Percent-encode everything except the characters JavaScript's
/// `encodeURIComponent` leaves alone.
fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 3);
    for b in input.bytes() {
        match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(b as char),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}
