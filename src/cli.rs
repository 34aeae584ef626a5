//! Terminal view helpers: stdin line → command

use crate::core::ping_payload;
use serde_json::{json, Value};

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Quit,
    /// Send this payload as an intent
    Intent(Value),
}

/// Interpret one line typed by the user.
///
/// Empty or `ping` sends the Ping intent and `quit`/`exit` stops. A line that
/// parses as JSON (scalars included) is sent verbatim; anything else is wrapped
/// as `{"text": line}`.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    match line {
        "" | "ping" => Command::Intent(ping_payload()),
        "quit" | "exit" => Command::Quit,
        _ => match serde_json::from_str::<Value>(line) {
            Ok(payload) => Command::Intent(payload),
            Err(_) => Command::Intent(json!({ "text": line })),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ping_and_quit() {
        assert_eq!(parse_command(""), Command::Intent(ping_payload()));
        assert_eq!(parse_command("  ping\n"), Command::Intent(ping_payload()));
        assert_eq!(parse_command("quit"), Command::Quit);
        assert_eq!(parse_command("exit"), Command::Quit);
    }

    #[test]
    fn json_payload_sent_verbatim() {
        assert_eq!(
            parse_command(r#"{"name":"ping"}"#),
            Command::Intent(json!({"name": "ping"}))
        );
        assert_eq!(parse_command("[1,2]"), Command::Intent(json!([1, 2])));
        assert_eq!(parse_command("42"), Command::Intent(json!(42)));
        assert_eq!(parse_command(r#""hello""#), Command::Intent(json!("hello")));
        assert_eq!(parse_command("true"), Command::Intent(json!(true)));
        assert_eq!(parse_command("null"), Command::Intent(Value::Null));
    }

    #[test]
    fn plain_text_wrapped() {
        assert_eq!(
            parse_command("open the pod bay doors"),
            Command::Intent(json!({"text": "open the pod bay doors"}))
        );
        assert_eq!(parse_command("{oops"), Command::Intent(json!({"text": "{oops"})));
    }
}
