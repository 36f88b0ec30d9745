//! The persisted game document and its on-disk home.

use crate::chat::{ChannelId, MessageId};
use crate::direction::Facing;
use crate::grid::{Grid, GridError};
use crate::sim::{Expression, Scoreboard};
use crate::util::{Rgb, UnixTime};
use crate::vote::Controls;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The configuration snapshot a session is created with.
///
/// Captured once at session creation and carried inside the persisted
/// document, so live edits to the global configuration never change a game
/// already in progress.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SessionConfig {
    pub grid_height: usize,
    pub grid_width: usize,
    /// Minutes between ticks
    pub update_frequency: u64,
    pub twitter_controls: bool,
    /// Percent band around a 1:1 like/retweet ratio treated as a tie
    pub tie_threshold: u8,
    pub embed_color: Rgb,
}

impl SessionConfig {
    /// The voting policy this snapshot selects
    pub fn controls(&self) -> Controls {
        if self.twitter_controls {
            Controls::Twitter {
                tie_threshold: self.tie_threshold,
            }
        } else {
            Controls::Arrows
        }
    }
}

/// One game's full persisted state.
///
/// `last_message_id` is `None` until the first message has been published;
/// a tick in that state publishes the current grid without simulating.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Session {
    pub start_time: UnixTime,
    pub last_save_time: UnixTime,
    pub next_update_time: UnixTime,
    pub channel_id: ChannelId,
    pub last_message_id: Option<MessageId>,
    pub configuration: SessionConfig,
    pub facial_expression: Expression,
    pub score: u32,
    pub best_score: u32,
    pub facing: Facing,
    pub grid: Grid,
}

impl Session {
    /// Create a fresh session document: new grid, facing down, zero score,
    /// first tick scheduled immediately.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the configured grid is too small to hold a head and
    /// an apple.
    pub fn create<R: Rng>(
        channel_id: ChannelId,
        configuration: SessionConfig,
        best_score: u32,
        now: UnixTime,
        rng: &mut R,
    ) -> Result<Session, GridError> {
        let grid = Grid::new(configuration.grid_height, configuration.grid_width, rng)?;
        Ok(Session {
            start_time: now,
            last_save_time: now,
            next_update_time: now,
            channel_id,
            last_message_id: None,
            configuration,
            facial_expression: Expression::Normal,
            score: 0,
            best_score,
            facing: Facing::Down,
            grid,
        })
    }

    pub(crate) fn scoreboard(&self) -> Scoreboard {
        Scoreboard {
            score: self.score,
            best: self.best_score,
        }
    }

    pub(crate) fn set_scoreboard(&mut self, scores: Scoreboard) {
        self.score = scores.score;
        self.best_score = scores.best;
    }
}

/// The single JSON file a session is persisted in, fully overwritten on
/// every save.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaveFile {
    path: PathBuf,
}

impl SaveFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> SaveFile {
        SaveFile { path: path.into() }
    }

    /// Return the default save file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("snakevote").join("save.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted session, or `None` if no save file exists.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file exists but cannot be read or parsed.
    /// Callers that treat a corrupt save as "no existing session" make that
    /// choice themselves.
    pub fn load(&self) -> Result<Option<Session>, LoadError> {
        let src = match fs_err::read(&self.path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice(&src)
            .map(Some)
            .map_err(LoadError::deserialize)
    }

    /// Write the session out, replacing any previous save.
    ///
    /// # Errors
    ///
    /// Returns `Err` if serialization or the write fails.
    pub fn save(&self, session: &Session) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string(session).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(&self.path, &src).map_err(SaveError::write)?;
        Ok(())
    }

    /// Delete the save file; not an error if none exists.
    ///
    /// # Errors
    ///
    /// Returns `Err` if an existing file could not be removed.
    pub fn delete(&self) -> Result<(), SaveError> {
        match fs_err::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SaveError::remove(e)),
        }
    }
}

#[derive(Debug, Error)]
#[error("Failed to save game session to disk")]
pub struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }

    fn remove(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Remove(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize game session")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write game session to disk")]
    Write(#[source] std::io::Error),
    #[error("failed to remove save file")]
    Remove(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read game session from disk")]
pub struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read save file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize game session")]
    Deserialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn config() -> SessionConfig {
        SessionConfig {
            grid_height: 4,
            grid_width: 5,
            update_frequency: 30,
            twitter_controls: false,
            tie_threshold: 10,
            embed_color: Rgb(255, 204, 77),
        }
    }

    fn session() -> Session {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        Session::create(ChannelId(42), config(), 7, UnixTime(1_700_000_000), &mut rng).unwrap()
    }

    #[test]
    fn create_fresh_session() {
        let session = session();
        assert_eq!(session.start_time, UnixTime(1_700_000_000));
        assert_eq!(session.next_update_time, UnixTime(1_700_000_000));
        assert_eq!(session.last_message_id, None);
        assert_eq!(session.facing, Facing::Down);
        assert_eq!(session.facial_expression, Expression::Normal);
        assert_eq!(session.score, 0);
        assert_eq!(session.best_score, 7);
        assert_eq!(session.grid.height(), 4);
        assert_eq!(session.grid.width(), 5);
    }

    #[test]
    fn controls_follow_snapshot() {
        assert_eq!(config().controls(), Controls::Arrows);
        let twitter = SessionConfig {
            twitter_controls: true,
            ..config()
        };
        assert_eq!(twitter.controls(), Controls::Twitter { tie_threshold: 10 });
    }

    #[test]
    fn serialization_round_trip_is_idempotent() {
        let session = session();
        let first = serde_json::to_string(&session).unwrap();
        let reloaded: Session = serde_json::from_str(&first).unwrap();
        assert_eq!(reloaded, session);
        let second = serde_json::to_string(&reloaded).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn save_load_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveFile::new(dir.path().join("state").join("save.json"));
        assert_eq!(store.load().unwrap(), None);
        let session = session();
        store.save(&session).unwrap();
        assert_eq!(store.load().unwrap(), Some(session.clone()));
        let raw = fs_err::read_to_string(store.path()).unwrap();
        assert!(raw.ends_with('\n'));
        // Saving again fully overwrites
        let mut changed = session;
        changed.score = 3;
        store.save(&changed).unwrap();
        assert_eq!(store.load().unwrap(), Some(changed));
        store.delete().unwrap();
        assert_eq!(store.load().unwrap(), None);
        // Deleting a missing file is a no-op
        store.delete().unwrap();
    }

    #[test]
    fn corrupt_save_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveFile::new(dir.path().join("save.json"));
        fs_err::write(store.path(), b"{not json").unwrap();
        assert!(store.load().is_err());
    }
}
