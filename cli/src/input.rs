use skirmish_engine::api::Command;
use skirmish_engine::Direction;

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Engine(Command),
    Spells,
    Help,
    Quit,
}

/// Map a typed line onto a command. Direction errors keep the engine's
/// `INVALID_DIRECTION` wording.
pub fn parse_line(line: &str) -> Result<Input, String> {
    let lowered = line.trim().to_lowercase();
    let mut words = lowered.split_whitespace();
    let Some(head) = words.next() else {
        return Err("Please enter an action!".to_string());
    };
    let rest: Vec<&str> = words.collect();

    let input = match (head, rest.as_slice()) {
        ("quit" | "exit" | "q", []) => Input::Quit,
        ("help" | "?", []) => Input::Help,
        ("spells", []) | ("check", ["spells"]) => Input::Spells,
        ("status", _) => Input::Engine(Command::Status),
        ("actions", []) => Input::Engine(Command::Actions),
        ("attack" | "a", _) => Input::Engine(Command::Attack),
        ("end", [] | ["turn"]) => Input::Engine(Command::EndTurn),
        ("move" | "m" | "go", [dir]) => Input::Engine(Command::Move(parse_direction(dir)?)),
        ("move" | "m" | "go", _) => return Err("Usage: move <direction>".to_string()),
        ("cast", []) => return Err("Usage: cast <spell>".to_string()),
        ("cast", spell) => Input::Engine(Command::Cast(spell.join("_"))),
        (word, []) => match word.parse::<Direction>() {
            Ok(dir) => Input::Engine(Command::Move(dir)),
            Err(_) => return Err(unknown(line)),
        },
        _ => return Err(unknown(line)),
    };
    Ok(input)
}

fn parse_direction(word: &str) -> Result<Direction, String> {
    word.parse::<Direction>()
        .map_err(|e| format!("{} [{}]. Use: north, south, east, west, northeast, northwest, southeast, southwest", e, e.code()))
}

fn unknown(line: &str) -> String {
    format!("Unknown command '{}'. Type 'help' for the command list.", line.trim())
}
