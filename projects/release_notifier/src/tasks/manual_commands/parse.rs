#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Release { link: String },
    Playlist { link: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    NotACommand,
    Malformed { command: &'static str },
    WrongCode { command: &'static str },
    Accepted(Command),
}

/// `/release <code> <link>`, `/playlist <code> <link>` (or `/p`).
/// A `@botname` suffix on the command is ignored.
pub fn parse_command(text: &str, expected_code: &str) -> ParseOutcome {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let Some(&head) = parts.first() else {
        return ParseOutcome::NotACommand;
    };

    let name = head.split('@').next().unwrap_or(head);
    let command = match name {
        "/release" => "/release",
        "/playlist" | "/p" => "/playlist",
        _ => return ParseOutcome::NotACommand,
    };

    let [_, code, link] = parts.as_slice() else {
        return ParseOutcome::Malformed { command };
    };

    if *code != expected_code {
        return ParseOutcome::WrongCode { command };
    }

    let link = link.to_string();
    ParseOutcome::Accepted(match command {
        "/release" => Command::Release { link },
        _ => Command::Playlist { link },
    })
}
