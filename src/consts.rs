//! Assorted constants & hard-coded configuration
use crate::util::Rgb;

/// Rendered symbol for an empty grid cell
pub(crate) const BLANK_SYMBOL: &str = ":black_large_square:";

/// Rendered symbol for the apple
pub(crate) const APPLE_SYMBOL: &str = ":apple:";

/// Rendered symbol for a snake body segment
pub(crate) const BODY_SYMBOL: &str = ":yellow_square:";

/// Rendered symbol for the tail tip (a body segment with one tick of life
/// left)
pub(crate) const TAIL_SYMBOL: &str = ":yellow_circle:";

/// Rendered symbol for the snake's head in its normal state
pub(crate) const HEAD_NORMAL_SYMBOL: &str = ":flushed:";

/// Rendered symbol for the snake's head on the tick it eats an apple
pub(crate) const HEAD_EATING_SYMBOL: &str = ":weary:";

/// Rendered symbol for the snake's head on the tick it dies
pub(crate) const HEAD_DEAD_SYMBOL: &str = ":dizzy_face:";

/// Reaction emoji voting "up" in arrow mode (UPWARDS BLACK ARROW)
pub(crate) const UP_EMOJI: &str = "\u{2B06}\u{FE0F}";

/// Reaction emoji voting "down" in arrow mode (DOWNWARDS BLACK ARROW)
pub(crate) const DOWN_EMOJI: &str = "\u{2B07}\u{FE0F}";

/// Reaction emoji voting "left" in arrow mode (LEFTWARDS BLACK ARROW)
pub(crate) const LEFT_EMOJI: &str = "\u{2B05}\u{FE0F}";

/// Reaction emoji voting "right" in arrow mode (BLACK RIGHTWARDS ARROW)
pub(crate) const RIGHT_EMOJI: &str = "\u{27A1}\u{FE0F}";

/// Reaction emoji for a "like" vote in twitter mode (HEAVY BLACK HEART)
pub(crate) const LIKE_EMOJI: &str = "\u{2764}\u{FE0F}";

/// Reaction emoji for a "retweet" vote in twitter mode (ANTICLOCKWISE
/// DOWNWARDS AND UPWARDS OPEN CIRCLE ARROWS)
pub(crate) const RETWEET_EMOJI: &str = "\u{1F504}";

/// Default grid height when no configuration file is present
pub(crate) const DEFAULT_GRID_HEIGHT: usize = 10;

/// Default grid width when no configuration file is present
pub(crate) const DEFAULT_GRID_WIDTH: usize = 10;

/// Default minutes between ticks
pub(crate) const DEFAULT_UPDATE_FREQUENCY: u64 = 60;

/// Default percent band around a 1:1 like/retweet ratio treated as a tie
pub(crate) const DEFAULT_TIE_THRESHOLD: u8 = 10;

/// Default embed color for published game messages
pub(crate) const DEFAULT_EMBED_COLOR: Rgb = Rgb(255, 204, 77);

/// Default command prefix for the host chat shell
pub(crate) const DEFAULT_COMMAND_PREFIX: &str = "!";

/// Default presence text for the host chat shell
pub(crate) const DEFAULT_STARTUP_ACTIVITY: &str = "snake";
