//! Chat command tokenizing.
//!
//! A chat line is a command when it starts with `!` or `*`. The first
//! whitespace-separated token is the command, the trimmed remainder is the
//! parameter. Matching is case-sensitive and done by the plugins.

/// A tokenized chat command, borrowing from the original message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatCommand<'a> {
    pub command: &'a str,
    pub param: &'a str,
}

impl<'a> ChatCommand<'a> {
    /// Tokenizes `message`, or returns `None` for ordinary chat.
    ///
    /// ```rust
    /// use hostrota_protocol::ChatCommand;
    ///
    /// let cmd = ChatCommand::parse("!start  30 ").unwrap();
    /// assert_eq!(cmd.command, "!start");
    /// assert_eq!(cmd.param, "30");
    ///
    /// assert!(ChatCommand::parse("gl hf").is_none());
    /// ```
    pub fn parse(message: &'a str) -> Option<Self> {
        let message = message.trim();
        if !(message.starts_with('!') || message.starts_with('*')) {
            return None;
        }
        let (command, param) = match message.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (message, ""),
        };
        Some(Self { command, param })
    }
}
