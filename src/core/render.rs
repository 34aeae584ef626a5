//! Text rendering shared by the egui and terminal views

use serde_json::Value;

/// Shown in place of the snapshot until the first `STATE_UPDATE` arrives
pub const SNAPSHOT_PLACEHOLDER: &str = "Waiting for Engine Stream...";

/// Pretty-print the snapshot with 2-space indentation, or the placeholder
pub fn snapshot_text(snapshot: Option<&Value>) -> String {
    match snapshot {
        Some(ui) => serde_json::to_string_pretty(ui).unwrap_or_else(|_| ui.to_string()),
        None => SNAPSHOT_PLACEHOLDER.to_string(),
    }
}

/// Compact age string ("4s", "2m 05s", "1h 03m")
pub fn format_age(seconds: f64) -> String {
    let secs = seconds.max(0.0) as u64;
    if secs >= 3600 {
        format!("{}h {:02}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn placeholder_when_absent() {
        assert_eq!(snapshot_text(None), "Waiting for Engine Stream...");
    }

    #[test]
    fn pretty_prints_with_two_spaces() {
        let ui = json!({"count": 1});
        assert_eq!(snapshot_text(Some(&ui)), "{\n  \"count\": 1\n}");
    }

    #[test]
    fn age_formatting() {
        assert_eq!(format_age(-1.0), "0s");
        assert_eq!(format_age(4.7), "4s");
        assert_eq!(format_age(125.0), "2m 05s");
        assert_eq!(format_age(3780.0), "1h 03m");
    }
}
