#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NewGame,
    Position(Vec<String>),
    Display,
    Moves,
    Status,
    Play(Option<String>),
    Go(Vec<String>),
    SetOption(Vec<String>),
    Sim(Vec<String>),
    Host(Option<String>),
    Join(Option<String>),
    Wait,
    Leave,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parts: Vec<&str> = trimmed.split_whitespace().collect();

    let owned_parts = || parts.iter().map(|p| (*p).to_string()).collect::<Vec<String>>();
    let arg = |i: usize| parts.get(i).map(|v| (*v).to_string());

    let cmd = match parts[0] {
        "newgame" => Command::NewGame,
        "position" => Command::Position(owned_parts()),
        "d" => Command::Display,
        "moves" => Command::Moves,
        "status" => Command::Status,
        "play" => Command::Play(arg(1)),
        "go" => Command::Go(owned_parts()),
        "setoption" => Command::SetOption(owned_parts()),
        "sim" => Command::Sim(owned_parts()),
        "host" => Command::Host(arg(1)),
        "join" => Command::Join(arg(1)),
        "wait" => Command::Wait,
        "leave" => Command::Leave,
        "quit" => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    };

    Some(cmd)
}
