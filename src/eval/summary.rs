//! Text rendering of the pattern analysis for advisors

use crate::board::display::join_coords;
use crate::board::Stone;

use super::patterns::Pattern;

pub const NO_PATTERNS: &str = "No notable patterns found.";

/// Render patterns grouped by owner, opponent of `perspective` first.
///
/// Within a group shapes are listed most severe first; ties keep discovery
/// order. Each entry names the shape and the cells that would complete or
/// extend it, or "already won" for a five.
pub fn analysis_text(patterns: &[Pattern], perspective: Stone) -> String {
    if patterns.is_empty() {
        return NO_PATTERNS.to_string();
    }

    let opponent = perspective.opponent();
    let mut text = String::from("Board analysis\n");
    render_group(
        &mut text,
        patterns,
        opponent,
        "cells to block",
        "nothing that needs blocking",
    );
    text.push('\n');
    render_group(
        &mut text,
        patterns,
        perspective,
        "cells to attack",
        "no notable chances",
    );
    text
}

fn render_group(text: &mut String, patterns: &[Pattern], owner: Stone, verb: &str, none: &str) {
    let mut group: Vec<&Pattern> = patterns.iter().filter(|p| p.owner == owner).collect();
    if group.is_empty() {
        text.push_str(&format!("{} ({}): {}.\n", owner.name(), owner.symbol(), none));
        return;
    }

    group.sort_by_key(|p| p.shape);
    text.push_str(&format!("{} ({}), {}:\n", owner.name(), owner.symbol(), verb));
    for pattern in group {
        let cells = if pattern.recommended.is_empty() {
            "already won".to_string()
        } else {
            join_coords(&pattern.recommended)
        };
        text.push_str(&format!(
            "- [{}] {}\n  -> {}\n",
            pattern.shape, pattern.description, cells
        ));
    }
}
