//! Plain-text cards for the terminal.

use std::fmt::Display;
use std::io::{self, Write};

use chrono::TimeZone;
use mural_core::{parse_timestamp, Board, Message};

/// Creation time as `dd/mm/yyyy HH:MM:SS` in `tz`. Text that is not a
/// recognised timestamp is shown as-is; a missing one renders empty.
pub fn format_created_at<Tz>(message: &Message, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match message.created_at.as_deref() {
        None => String::new(),
        Some(raw) => match parse_timestamp(raw) {
            Some(instant) => instant.with_timezone(tz).format("%d/%m/%Y %H:%M:%S").to_string(),
            None => raw.to_string(),
        },
    }
}

pub fn write_card<W, Tz>(out: &mut W, message: &Message, tz: &Tz) -> io::Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let id = message
        .id
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "-".to_string());
    let when = format_created_at(message, tz);
    if when.is_empty() {
        writeln!(out, "[{id}] {}", message.display_author())?;
    } else {
        writeln!(out, "[{id}] {}  {when}", message.display_author())?;
    }
    for line in message.body.as_deref().unwrap_or("").lines() {
        writeln!(out, "    {line}")?;
    }
    Ok(())
}

pub fn write_board<W, Tz>(out: &mut W, board: &Board, tz: &Tz) -> io::Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    writeln!(out, "Mural ({})", board.mode())?;
    if board.is_empty() {
        writeln!(out, "No messages yet. Use `mural post` to write the first one.")?;
        return Ok(());
    }
    for (index, message) in board.messages().iter().enumerate() {
        if index > 0 {
            writeln!(out)?;
        }
        write_card(out, message, tz)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Utc};
    use mural_core::{MessageId, OrderMode};

    use super::*;

    fn message(author: Option<&str>, created_at: Option<&str>) -> Message {
        Message {
            id: Some(MessageId::Number(4)),
            author: author.map(str::to_string),
            body: Some("linha um\nlinha dois".to_string()),
            created_at: created_at.map(str::to_string),
        }
    }

    fn render_card(message: &Message) -> String {
        let mut out = Vec::new();
        write_card(&mut out, message, &Utc).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn card_with_author_and_time() {
        let card = render_card(&message(Some("Ana"), Some("2024-02-01T13:05:09Z")));
        assert_eq!(card, "[4] Ana  01/02/2024 13:05:09\n    linha um\n    linha dois\n");
    }

    #[test]
    fn card_without_author_or_time() {
        let card = render_card(&message(None, None));
        assert_eq!(card, "[4] Anônimo\n    linha um\n    linha dois\n");
    }

    #[test]
    fn time_uses_given_zone_and_keeps_unparsable_text() {
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        let m = message(Some("Ana"), Some("2024-02-01T02:00:00Z"));
        assert_eq!(format_created_at(&m, &brt), "31/01/2024 23:00:00");
        let m = message(Some("Ana"), Some("ontem"));
        assert_eq!(format_created_at(&m, &brt), "ontem");
    }

    #[test]
    fn empty_board_hint() {
        let mut out = Vec::new();
        write_board(&mut out, &Board::new(OrderMode::OldestFirst), &Utc).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Mural (oldest-first)\n"));
        assert!(text.contains("No messages yet"));
    }
}
