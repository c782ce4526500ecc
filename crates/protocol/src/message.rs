//! Message module - typed decoding of server lines
//!
//! Every line is split on single spaces into a command name followed by
//! positional tokens. Parameters use `key=value` and must appear in the
//! documented order; entity kinds (`terrain`, `food`, `ally`, `ennemy`) are
//! bare words. A line is fully decoded into a [`ServerMessage`] before any
//! field is used.

use arrayvec::ArrayVec;
use thiserror::Error;

/// Longest legal message: `print x y ally character_index hit_point symbol`.
pub const MAX_TOKENS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("empty message")]
    Empty,

    #[error("connection closed by server")]
    Closed,

    #[error("unknown command {0:?}")]
    UnknownCommand(String),

    #[error("message has more than {} tokens", MAX_TOKENS)]
    TooManyTokens,

    #[error("{command}: missing {field}")]
    MissingField {
        command: &'static str,
        field: &'static str,
    },

    #[error("{command}: expected {expected}=<value>, found {found:?}")]
    UnexpectedToken {
        command: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("{field}: {value:?} is not a valid integer")]
    InvalidInteger { field: &'static str, value: String },

    #[error("{field}: {value:?} is not a single character")]
    InvalidSymbol { field: &'static str, value: String },

    #[error("print: unknown entity {0:?}")]
    UnknownEntity(String),

    #[error("{command}: unexpected trailing token {found:?}")]
    TrailingTokens { command: &'static str, found: String },

    #[error("cell ({x}, {y}) is outside the {width}x{height} world")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("parameters received after the handshake")]
    RepeatedHandshake,

    #[error("action? received while no turn can start")]
    UnexpectedPrompt,
}

/// What a `print` message describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Terrain {
        kind: char,
    },
    Food {
        hit_point: i64,
        symbol: char,
    },
    Ally {
        character_index: u32,
        hit_point: i64,
        symbol: char,
    },
    /// Spelled `ennemy` on the wire.
    Enemy {
        character_index: u32,
        hit_point: i64,
        symbol: char,
    },
}

impl Entity {
    /// The tile symbol stored in the world for this entity.
    pub fn symbol(&self) -> char {
        match *self {
            Entity::Terrain { kind } => kind,
            Entity::Food { symbol, .. }
            | Entity::Ally { symbol, .. }
            | Entity::Enemy { symbol, .. } => symbol,
        }
    }
}

/// Turn prompt: the server waits for one command about this character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionPrompt {
    pub x: u32,
    pub y: u32,
    pub character_index: u32,
    pub hit_point: i64,
    pub symbol: char,
}

/// A decoded server line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerMessage {
    Parameters { width: u32, height: u32 },
    Print { x: u32, y: u32, entity: Entity },
    Hide { x: u32, y: u32 },
    Action(ActionPrompt),
    End,
}

impl ServerMessage {
    /// Decode one line (a trailing newline, if any, is ignored).
    ///
    /// # Examples
    ///
    /// ```
    /// use orogue_protocol::{Entity, ServerMessage};
    ///
    /// let msg = ServerMessage::parse("print x=3 y=4 terrain type=0").unwrap();
    /// assert_eq!(
    ///     msg,
    ///     ServerMessage::Print { x: 3, y: 4, entity: Entity::Terrain { kind: '0' } }
    /// );
    /// assert!(ServerMessage::parse("").is_err());
    /// ```
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ProtocolError::Empty);
        }

        let mut tokens: ArrayVec<&str, MAX_TOKENS> = ArrayVec::new();
        for token in line.split(' ') {
            tokens
                .try_push(token)
                .map_err(|_| ProtocolError::TooManyTokens)?;
        }

        let (&name, rest) = tokens.split_first().ok_or(ProtocolError::Empty)?;
        match name {
            "parameters" => {
                let mut f = Fields::new("parameters", rest);
                let width = f.uint("width")?;
                let height = f.uint("height")?;
                f.finish()?;
                Ok(ServerMessage::Parameters { width, height })
            }
            "print" => {
                let mut f = Fields::new("print", rest);
                let x = f.uint("x")?;
                let y = f.uint("y")?;
                let entity = match f.word("entity")? {
                    "terrain" => Entity::Terrain {
                        kind: f.symbol("type")?,
                    },
                    "food" => Entity::Food {
                        hit_point: f.int("hit_point")?,
                        symbol: f.symbol("symbol")?,
                    },
                    "ally" => Entity::Ally {
                        character_index: f.uint("character_index")?,
                        hit_point: f.int("hit_point")?,
                        symbol: f.symbol("symbol")?,
                    },
                    "ennemy" => Entity::Enemy {
                        character_index: f.uint("character_index")?,
                        hit_point: f.int("hit_point")?,
                        symbol: f.symbol("symbol")?,
                    },
                    other => return Err(ProtocolError::UnknownEntity(other.to_string())),
                };
                f.finish()?;
                Ok(ServerMessage::Print { x, y, entity })
            }
            "hide" => {
                let mut f = Fields::new("hide", rest);
                let x = f.uint("x")?;
                let y = f.uint("y")?;
                f.finish()?;
                Ok(ServerMessage::Hide { x, y })
            }
            "action?" => {
                let mut f = Fields::new("action?", rest);
                let prompt = ActionPrompt {
                    x: f.uint("x")?,
                    y: f.uint("y")?,
                    character_index: f.uint("character_index")?,
                    hit_point: f.int("hit_point")?,
                    symbol: f.symbol("symbol")?,
                };
                f.finish()?;
                Ok(ServerMessage::Action(prompt))
            }
            "end" => {
                Fields::new("end", rest).finish()?;
                Ok(ServerMessage::End)
            }
            other => Err(ProtocolError::UnknownCommand(other.to_string())),
        }
    }

    /// Wire name of the command.
    pub fn name(&self) -> &'static str {
        match self {
            ServerMessage::Parameters { .. } => "parameters",
            ServerMessage::Print { .. } => "print",
            ServerMessage::Hide { .. } => "hide",
            ServerMessage::Action(_) => "action?",
            ServerMessage::End => "end",
        }
    }
}

/// Ordered cursor over the tokens following the command name.
struct Fields<'a> {
    command: &'static str,
    tokens: std::slice::Iter<'a, &'a str>,
}

impl<'a> Fields<'a> {
    fn new(command: &'static str, tokens: &'a [&'a str]) -> Self {
        Self {
            command,
            tokens: tokens.iter(),
        }
    }

    fn word(&mut self, field: &'static str) -> Result<&'a str, ProtocolError> {
        self.tokens
            .next()
            .copied()
            .ok_or(ProtocolError::MissingField {
                command: self.command,
                field,
            })
    }

    fn value(&mut self, key: &'static str) -> Result<&'a str, ProtocolError> {
        let token = self.word(key)?;
        match token.split_once('=') {
            Some((k, v)) if k == key => Ok(v),
            _ => Err(ProtocolError::UnexpectedToken {
                command: self.command,
                expected: key,
                found: token.to_string(),
            }),
        }
    }

    fn uint(&mut self, key: &'static str) -> Result<u32, ProtocolError> {
        let v = self.value(key)?;
        v.parse().map_err(|_| ProtocolError::InvalidInteger {
            field: key,
            value: v.to_string(),
        })
    }

    fn int(&mut self, key: &'static str) -> Result<i64, ProtocolError> {
        let v = self.value(key)?;
        v.parse().map_err(|_| ProtocolError::InvalidInteger {
            field: key,
            value: v.to_string(),
        })
    }

    fn symbol(&mut self, key: &'static str) -> Result<char, ProtocolError> {
        let v = self.value(key)?;
        let mut chars = v.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ProtocolError::InvalidSymbol {
                field: key,
                value: v.to_string(),
            }),
        }
    }

    fn finish(mut self) -> Result<(), ProtocolError> {
        match self.tokens.next() {
            None => Ok(()),
            Some(token) => Err(ProtocolError::TrailingTokens {
                command: self.command,
                found: token.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_handshake() {
        assert_eq!(
            ServerMessage::parse("parameters width=10 height=12\n"),
            Ok(ServerMessage::Parameters {
                width: 10,
                height: 12
            })
        );
    }

    #[test]
    fn parses_every_print_variant() {
        assert_eq!(
            ServerMessage::parse("print x=1 y=2 food hit_point=5 symbol=f"),
            Ok(ServerMessage::Print {
                x: 1,
                y: 2,
                entity: Entity::Food {
                    hit_point: 5,
                    symbol: 'f'
                }
            })
        );
        assert_eq!(
            ServerMessage::parse("print x=1 y=2 ally character_index=3 hit_point=10 symbol=h"),
            Ok(ServerMessage::Print {
                x: 1,
                y: 2,
                entity: Entity::Ally {
                    character_index: 3,
                    hit_point: 10,
                    symbol: 'h'
                }
            })
        );
        let enemy = ServerMessage::parse("print x=0 y=0 ennemy character_index=0 hit_point=-2 symbol=h")
            .unwrap();
        match enemy {
            ServerMessage::Print { entity, .. } => {
                assert_eq!(entity.symbol(), 'h');
                assert!(matches!(entity, Entity::Enemy { hit_point: -2, .. }));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn parses_action_prompt_hide_and_end() {
        assert_eq!(
            ServerMessage::parse("action? x=3 y=3 character_index=1 hit_point=10 symbol=h"),
            Ok(ServerMessage::Action(ActionPrompt {
                x: 3,
                y: 3,
                character_index: 1,
                hit_point: 10,
                symbol: 'h'
            }))
        );
        assert_eq!(
            ServerMessage::parse("hide x=3 y=4"),
            Ok(ServerMessage::Hide { x: 3, y: 4 })
        );
        assert_eq!(ServerMessage::parse("end"), Ok(ServerMessage::End));
    }

    #[test]
    fn rejects_empty_and_unknown() {
        assert_eq!(ServerMessage::parse(""), Err(ProtocolError::Empty));
        assert_eq!(ServerMessage::parse("  \r\n"), Err(ProtocolError::Empty));
        assert_eq!(
            ServerMessage::parse("explode x=1"),
            Err(ProtocolError::UnknownCommand("explode".to_string()))
        );
        assert_eq!(
            ServerMessage::parse("print x=1 y=1 wall type=0"),
            Err(ProtocolError::UnknownEntity("wall".to_string()))
        );
    }

    #[test]
    fn rejects_fields_out_of_order() {
        assert_eq!(
            ServerMessage::parse("hide y=3 x=4"),
            Err(ProtocolError::UnexpectedToken {
                command: "hide",
                expected: "x",
                found: "y=3".to_string()
            })
        );
    }

    #[test]
    fn rejects_missing_and_trailing_fields() {
        assert_eq!(
            ServerMessage::parse("print x=1 y=1"),
            Err(ProtocolError::MissingField {
                command: "print",
                field: "entity"
            })
        );
        assert_eq!(
            ServerMessage::parse("end now"),
            Err(ProtocolError::TrailingTokens {
                command: "end",
                found: "now".to_string()
            })
        );
        assert_eq!(
            ServerMessage::parse("print x=1 y=1 terrain type=0 type=1 a b"),
            Err(ProtocolError::TooManyTokens)
        );
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            ServerMessage::parse("hide x=-1 y=0"),
            Err(ProtocolError::InvalidInteger {
                field: "x",
                value: "-1".to_string()
            })
        );
        assert_eq!(
            ServerMessage::parse("print x=1 y=1 terrain type=01"),
            Err(ProtocolError::InvalidSymbol {
                field: "type",
                value: "01".to_string()
            })
        );
        assert_eq!(
            ServerMessage::parse("print x=1 y=1 terrain type="),
            Err(ProtocolError::InvalidSymbol {
                field: "type",
                value: String::new()
            })
        );
    }
}
