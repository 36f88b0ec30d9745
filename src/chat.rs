//! The seam between the game engine and the host chat platform.
//!
//! The engine never talks to a network; it drives an injected [`ChatClient`]
//! and leaves message formatting, rate limiting, and permissions to the
//! host shell.

use crate::consts;
use crate::util::{Rgb, UnixTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Identifier of the chat channel the game is anchored to
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ChannelId(pub u64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a published game message
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A reaction control attached to a published message for players to vote
/// with
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ReactionSymbol {
    Up,
    Down,
    Left,
    Right,
    Like,
    Retweet,
}

impl ReactionSymbol {
    /// The Unicode emoji the host platform shows for this control
    pub fn emoji(self) -> &'static str {
        match self {
            ReactionSymbol::Up => consts::UP_EMOJI,
            ReactionSymbol::Down => consts::DOWN_EMOJI,
            ReactionSymbol::Left => consts::LEFT_EMOJI,
            ReactionSymbol::Right => consts::RIGHT_EMOJI,
            ReactionSymbol::Like => consts::LIKE_EMOJI,
            ReactionSymbol::Retweet => consts::RETWEET_EMOJI,
        }
    }
}

/// One game update ready for publication.
///
/// `next_update` is `None` only on the message announcing the snake's death,
/// which shows no countdown and takes no votes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GamePost {
    pub grid_text: String,
    pub score: u32,
    pub best_score: u32,
    pub color: Rgb,
    pub next_update: Option<UnixTime>,
}

/// Everything the engine needs from the host chat platform.
///
/// `Channel` and `Message` are opaque handles owned by the implementation;
/// the engine only threads them between calls within a single tick.
pub trait ChatClient {
    type Channel;
    type Message;

    /// Look up the channel the game lives in.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the channel does not exist or cannot be accessed.
    /// The engine treats that as a stop condition.
    fn fetch_channel(&mut self, id: ChannelId) -> Result<Self::Channel, ChatError>;

    /// Fetch a previously published game message to read its votes.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the message cannot be fetched; the engine treats
    /// that as a stop condition.
    fn fetch_message(
        &mut self,
        channel: &Self::Channel,
        id: MessageId,
    ) -> Result<Self::Message, ChatError>;

    /// Publish a game update and return the new message's id.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the message could not be posted.
    fn post(&mut self, channel: &Self::Channel, post: &GamePost) -> Result<MessageId, ChatError>;

    /// Attach voting reactions to a published message, in order.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a reaction could not be attached.
    fn attach_reaction_controls(
        &mut self,
        channel: &Self::Channel,
        message: MessageId,
        symbols: &[ReactionSymbol],
    ) -> Result<(), ChatError>;

    /// Read the per-control reaction counts accumulated on a fetched
    /// message. Controls nobody reacted with may be absent from the map.
    fn read_reaction_counts(&self, message: &Self::Message) -> HashMap<ReactionSymbol, u32>;
}

/// Failure reported by the host chat platform
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ChatError {
    #[error("not found")]
    NotFound,
    #[error("request failed: {0}")]
    Request(String),
}
