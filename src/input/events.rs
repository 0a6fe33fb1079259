use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Informational commands that never touch the locator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Greeting followed by usage help
    Start,
    Help,
    /// The plain map without a marker
    Map,
}

impl Command {
    /// Parse a slash command such as `/map` or `/help@SomeBot`
    pub fn parse(text: &str) -> Option<Self> {
        let name = text.trim().strip_prefix('/')?;
        let name = name.split_whitespace().next().unwrap_or("");
        let name = name.split('@').next().unwrap_or("");
        match name.to_ascii_lowercase().as_str() {
            "start" => Some(Command::Start),
            "help" => Some(Command::Help),
            "map" => Some(Command::Map),
            _ => None,
        }
    }
}

/// One incoming message from a front-end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Request {
    Command(Command),
    /// Free text expected to hold "latitude, longitude"
    Text(String),
    /// A structured location share
    Location(LatLng),
    /// Slash command that is not recognised
    UnknownCommand(String),
}

impl Request {
    /// Classify a raw text message
    pub fn from_message(text: &str) -> Self {
        if text.trim_start().starts_with('/') {
            match Command::parse(text) {
                Some(command) => Request::Command(command),
                None => Request::UnknownCommand(text.trim().to_string()),
            }
        } else {
            Request::Text(text.to_string())
        }
    }

    pub fn location(latitude: f64, longitude: f64) -> Self {
        Request::Location(LatLng::new(latitude, longitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("  /HELP "), Some(Command::Help));
        assert_eq!(Command::parse("/map@where_bot"), Some(Command::Map));
        assert_eq!(Command::parse("/map please"), Some(Command::Map));
        assert_eq!(Command::parse("/weather"), None);
        assert_eq!(Command::parse("map"), None);
    }

    #[test]
    fn test_from_message() {
        assert_eq!(Request::from_message("/map"), Request::Command(Command::Map));
        assert_eq!(
            Request::from_message("60.21662, 29.75197"),
            Request::Text("60.21662, 29.75197".to_string())
        );
        assert_eq!(
            Request::from_message("/nope"),
            Request::UnknownCommand("/nope".to_string())
        );
    }
}
