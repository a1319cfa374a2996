//! Stream event formatting: human-readable lines for stderr and JSON objects for `--json`.

use serde_json::{json, Value};
use weft::{RouteState, StreamEvent};

/// Answer text shown in an update line is cut to this many chars.
const UPDATE_PREVIEW_LEN: usize = 60;

/// Truncates a string to at most `max` chars; appends "..." when truncated. UTF-8 safe.
pub fn truncate_display(s: &str, max: usize) -> String {
    const SUFFIX: &str = "...";
    if max <= SUFFIX.len() {
        return s.chars().take(max).collect();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let head: String = s.chars().take(max - SUFFIX.len()).collect();
    format!("{}{}", head, SUFFIX)
}

/// One stderr line per node-scoped event; `None` for `Values`, which only repeats
/// the last update.
pub fn format_event(event: &StreamEvent<RouteState>) -> Option<String> {
    match event {
        StreamEvent::TaskStart { node_id } => Some(format!("Entering: {}", node_id)),
        StreamEvent::TaskEnd {
            node_id,
            result: Ok(()),
        } => Some(format!("Leaving: {}", node_id)),
        StreamEvent::TaskEnd {
            node_id,
            result: Err(e),
        } => Some(format!("Failed: {}: {}", node_id, e)),
        StreamEvent::Updates { node_id, state } => {
            let route = state.route.map(|r| r.as_str()).unwrap_or("-");
            let mut line = format!("  {} route={}", node_id, route);
            if let Some(answer) = &state.answer {
                line.push_str(&format!(
                    " answer={:?}",
                    truncate_display(answer, UPDATE_PREVIEW_LEN)
                ));
            }
            Some(line)
        }
        StreamEvent::Values(_) => None,
    }
}

/// JSON object for one event: `type` plus `node_id`/`state`/`error` as applicable.
pub fn event_json(event: &StreamEvent<RouteState>) -> Value {
    match event {
        StreamEvent::TaskStart { node_id } => json!({ "type": "task_start", "node_id": node_id }),
        StreamEvent::TaskEnd { node_id, result } => match result {
            Ok(()) => json!({ "type": "task_end", "node_id": node_id, "ok": true }),
            Err(e) => json!({ "type": "task_end", "node_id": node_id, "ok": false, "error": e }),
        },
        StreamEvent::Updates { node_id, state } => {
            json!({ "type": "updates", "node_id": node_id, "state": state })
        }
        StreamEvent::Values(state) => json!({ "type": "values", "state": state }),
    }
}
