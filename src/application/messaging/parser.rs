//! Message parser - Splits raw message text into an alias and arguments

/// Outcome of tokenizing one raw message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// No leading command prefix; the message is not a command
    NotACommand,
    /// Prefix present but no alias token followed it
    MissingAlias,
    /// A command invocation: alias plus whitespace-split arguments
    Invocation { alias: String, args: Vec<String> },
}

/// Parses incoming message text into command invocations
pub struct MessageParser {
    prefix: String,
}

impl MessageParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Tokenize one raw message.
    ///
    /// Strips the prefix and splits the remainder on whitespace into
    /// `[alias, args..]`. Pure over its input, so re-parsing the same text
    /// yields the same outcome.
    pub fn parse(&self, text: &str) -> ParseOutcome {
        let Some(rest) = text.strip_prefix(&self.prefix) else {
            return ParseOutcome::NotACommand;
        };

        let mut tokens = rest.split_whitespace();
        match tokens.next() {
            None => ParseOutcome::MissingAlias,
            Some(alias) => ParseOutcome::Invocation {
                alias: alias.to_string(),
                args: tokens.map(str::to_string).collect(),
            },
        }
    }
}
