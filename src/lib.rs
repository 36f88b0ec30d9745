//! A turn-based snake game driven by reaction votes on a chat-platform
//! message.
//!
//! Once per configured interval a tick reads the votes accumulated on the
//! previous game message, resolves them into a direction, advances the
//! snake on its grid, renders the result as emoji text, publishes a new
//! message with fresh voting controls, and persists the whole session to a
//! single JSON file.
//!
//! The chat platform itself is an injected collaborator: implement
//! [`ChatClient`] for your platform of choice and hand it to
//! [`SnakeGame`]. Command parsing, permissions, and presence belong to the
//! host shell, not this crate.

mod consts;

pub mod chat;
pub mod config;
pub mod direction;
pub mod game;
pub mod grid;
pub mod render;
pub mod session;
pub mod sim;
pub mod util;
pub mod vote;

pub use crate::chat::{ChannelId, ChatClient, ChatError, GamePost, MessageId, ReactionSymbol};
pub use crate::config::{Config, ConfigError};
pub use crate::direction::Facing;
pub use crate::game::{GameError, SnakeGame, TickError};
pub use crate::grid::{Cell, Grid, GridError, Point};
pub use crate::session::{SaveFile, Session, SessionConfig};
pub use crate::sim::Expression;
pub use crate::util::{Rgb, UnixTime};
pub use crate::vote::Controls;
