//! The game session state machine: owns the persisted document and runs
//! the tick cycle of tally → simulate → render → publish → persist.

use crate::chat::{ChannelId, ChatClient, ChatError, GamePost, MessageId};
use crate::config::Config;
use crate::grid::GridError;
use crate::render;
use crate::session::{LoadError, SaveError, SaveFile, Session};
use crate::sim;
use crate::util::UnixTime;
use crate::vote::Controls;
use rand::rngs::ThreadRng;
use rand::Rng;
use thiserror::Error;
use tracing::{error, info, warn};

/// A voting-controlled snake game anchored to a single chat channel.
///
/// At most one session is active at a time, and its document is only ever
/// touched through `&mut self`, so no two ticks can overlap. Issuing
/// [`start`][SnakeGame::start] replaces the active session outright, which
/// is what cancels any previously scheduled update.
#[derive(Clone, Debug)]
pub struct SnakeGame<C, R = ThreadRng> {
    client: C,
    store: SaveFile,
    session: Option<Session>,
    rng: R,
}

impl<C: ChatClient> SnakeGame<C> {
    pub fn new(client: C, store: SaveFile) -> SnakeGame<C> {
        SnakeGame::new_with_rng(client, store, rand::rng())
    }
}

impl<C: ChatClient, R: Rng> SnakeGame<C, R> {
    pub fn new_with_rng(client: C, store: SaveFile, rng: R) -> SnakeGame<C, R> {
        SnakeGame {
            client,
            store,
            session: None,
            rng,
        }
    }

    /// The active session document, if any
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// When the next tick is due
    pub fn next_update(&self) -> Option<UnixTime> {
        self.session.as_ref().map(|s| s.next_update_time)
    }

    /// Render the active session's board
    pub fn render_current(&self) -> Option<String> {
        self.session
            .as_ref()
            .map(|s| render::render(&s.grid, s.facial_expression))
    }

    /// Start a new game in `channel`, capturing a configuration snapshot
    /// and carrying over the best score from any existing save. A save that
    /// exists but cannot be read counts as no save at all.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the fresh session cannot be created or persisted.
    pub fn start(&mut self, channel: ChannelId, config: &Config) -> Result<(), GameError> {
        self.start_at(channel, config, UnixTime::now())
    }

    /// [`start`][SnakeGame::start] with an explicit wall-clock time
    pub fn start_at(
        &mut self,
        channel: ChannelId,
        config: &Config,
        now: UnixTime,
    ) -> Result<(), GameError> {
        let best_score = match self.store.load() {
            Ok(Some(previous)) => previous.best_score,
            Ok(None) => 0,
            Err(e) => {
                warn!("existing save is unreadable, starting fresh: {e}");
                0
            }
        };
        let session = Session::create(channel, config.snapshot(), best_score, now, &mut self.rng)?;
        self.store.save(&session)?;
        info!(channel = %channel, best_score, "game session started");
        self.session = Some(session);
        Ok(())
    }

    /// Reload the persisted session, e.g. after a restart or once an
    /// operator has fixed whatever raised a stop condition. Returns `false`
    /// if there is nothing to resume.
    ///
    /// # Errors
    ///
    /// Returns `Err` if an existing save cannot be read.
    pub fn resume(&mut self) -> Result<bool, GameError> {
        match self.store.load()? {
            Some(session) => {
                info!(channel = %session.channel_id, "game session resumed");
                self.session = Some(session);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Delete the persisted game; a no-op if none exists.
    ///
    /// # Errors
    ///
    /// Returns `Err` if an existing save file could not be removed.
    pub fn reset(&mut self) -> Result<(), GameError> {
        self.store.delete()?;
        self.session = None;
        info!("game session reset");
        Ok(())
    }

    /// Run one scheduled update.
    ///
    /// # Errors
    ///
    /// See [`TickError`]; errors for which [`TickError::is_stop`] is true
    /// mean the chat anchor is gone and the loop must be resumed manually.
    pub fn tick(&mut self) -> Result<(), TickError> {
        self.tick_at(UnixTime::now())
    }

    /// [`tick`][SnakeGame::tick] with an explicit wall-clock time
    pub fn tick_at(&mut self, now: UnixTime) -> Result<(), TickError> {
        let Some(session) = self.session.as_mut() else {
            return Err(TickError::NotStarted);
        };
        let channel_id = session.channel_id;
        let channel = self
            .client
            .fetch_channel(channel_id)
            .map_err(|source| TickError::ChannelUnavailable {
                channel: channel_id,
                source,
            })?;

        if let Some(message_id) = session.last_message_id {
            let message = self
                .client
                .fetch_message(&channel, message_id)
                .map_err(|source| TickError::MessageUnavailable {
                    channel: channel_id,
                    message: message_id,
                    source,
                })?;
            let counts = self.client.read_reaction_counts(&message);
            session.facing = session
                .configuration
                .controls()
                .resolve(&counts, session.facing);
            let mut scores = session.scoreboard();
            let expression =
                sim::advance(&mut session.grid, session.facing, &mut scores, &mut self.rng)?;
            session.set_scoreboard(scores);
            session.facial_expression = expression;
            info!(
                facing = %session.facing,
                score = session.score,
                dead = expression.is_dead(),
                "tick simulated"
            );
            if expression.is_dead() {
                publish_dead(&mut self.client, &channel, session)?;
                let frequency = session.configuration.update_frequency;
                let best = session.best_score.max(session.score);
                let mut fresh = Session::create(
                    channel_id,
                    session.configuration,
                    best,
                    now,
                    &mut self.rng,
                )?;
                fresh.next_update_time = now.plus_minutes(frequency);
                self.store.save(&fresh)?;
                info!(
                    best_score = fresh.best_score,
                    next_update = %fresh.next_update_time,
                    "snake died; fresh session scheduled"
                );
                *session = fresh;
                return Ok(());
            }
        }
        // First tick after creation has no votes to read; it just publishes
        // the board and starts collecting reactions.
        publish_update(&mut self.client, &self.store, &channel, session, now)
    }

    /// Drive the tick loop: sleep until each session's `next_update_time`,
    /// tick, repeat. Returns the error that terminated the loop so the host
    /// shell can notify an operator.
    pub fn run(&mut self) -> TickError {
        loop {
            let Some(next) = self.next_update() else {
                return TickError::NotStarted;
            };
            let wait = next.since(UnixTime::now());
            if !wait.is_zero() {
                std::thread::sleep(wait);
            }
            if let Err(e) = self.tick() {
                error!("tick failed: {e}");
                return e;
            }
        }
    }
}

/// Publish the current board with voting controls attached, then persist
/// the session with its new anchor message and schedule.
fn publish_update<C: ChatClient>(
    client: &mut C,
    store: &SaveFile,
    channel: &C::Channel,
    session: &mut Session,
    now: UnixTime,
) -> Result<(), TickError> {
    let next_update = now.plus_minutes(session.configuration.update_frequency);
    let controls = session.configuration.controls();
    let mut grid_text = render::render(&session.grid, session.facial_expression);
    if matches!(controls, Controls::Twitter { .. }) {
        grid_text.push_str(&render::control_legend(session.facing));
    }
    let post = GamePost {
        grid_text,
        score: session.score,
        best_score: session.best_score,
        color: session.configuration.embed_color,
        next_update: Some(next_update),
    };
    let message_id =
        client
            .post(channel, &post)
            .map_err(|source| TickError::PublishFailed {
                channel: session.channel_id,
                source,
            })?;
    client
        .attach_reaction_controls(channel, message_id, &controls.reaction_controls(session.facing))
        .map_err(|source| TickError::PublishFailed {
            channel: session.channel_id,
            source,
        })?;
    session.last_message_id = Some(message_id);
    session.last_save_time = now;
    session.next_update_time = next_update;
    store.save(session)?;
    Ok(())
}

/// Publish the final board of a dead snake: no countdown, no controls, and
/// the session is not persisted in this state.
fn publish_dead<C: ChatClient>(
    client: &mut C,
    channel: &C::Channel,
    session: &Session,
) -> Result<(), TickError> {
    let post = GamePost {
        grid_text: render::render(&session.grid, session.facial_expression),
        score: session.score,
        best_score: session.best_score,
        color: session.configuration.embed_color,
        next_update: None,
    };
    client
        .post(channel, &post)
        .map_err(|source| TickError::PublishFailed {
            channel: session.channel_id,
            source,
        })?;
    Ok(())
}

/// Failure of a session-management operation (`start`, `resume`, `reset`)
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Save(#[from] SaveError),
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Failure of a scheduled update.
///
/// The chat-facing variants are stop conditions: the game has lost its
/// anchor in the channel and cannot continue until an operator intervenes
/// and resumes it. The remaining variants are contract or storage
/// violations, which also halt the loop but point at the deployment rather
/// than the chat platform.
#[derive(Debug, Error)]
pub enum TickError {
    #[error("no active game session")]
    NotStarted,
    #[error("game channel {channel} could not be fetched; it may have been deleted or be inaccessible")]
    ChannelUnavailable {
        channel: ChannelId,
        #[source]
        source: ChatError,
    },
    #[error("game message {message} in channel {channel} could not be fetched")]
    MessageUnavailable {
        channel: ChannelId,
        message: MessageId,
        #[source]
        source: ChatError,
    },
    #[error("failed to publish game update to channel {channel}")]
    PublishFailed {
        channel: ChannelId,
        #[source]
        source: ChatError,
    },
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Save(#[from] SaveError),
}

impl TickError {
    /// Whether this error means the chat anchor is gone and the game must
    /// be resumed manually once the problem is fixed
    pub fn is_stop(&self) -> bool {
        matches!(
            self,
            TickError::ChannelUnavailable { .. }
                | TickError::MessageUnavailable { .. }
                | TickError::PublishFailed { .. }
        )
    }
}
