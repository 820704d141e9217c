//! Constants for board sizes, scoring, and territory display.
//!
//! Board size is chosen at runtime (see [`crate::config::BoardSize`]); this
//! module only holds the fixed tunables shared by the engines.

use std::time::Duration;

// =============================================================================
// Board Geometry
// =============================================================================

/// Board sizes a session can be configured with.
pub const SUPPORTED_SIZES: [usize; 3] = [9, 13, 19];

/// Board size used when none is given.
pub const DEFAULT_SIZE: usize = 19;

/// Offsets to the four orthogonal neighbors as (dx, dy).
/// Order: West, East, North, South
pub const DELTA: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

// =============================================================================
// Scoring
// =============================================================================

/// Compensation points awarded to White for moving second.
pub const DEFAULT_KOMI: f32 = 6.5;

// =============================================================================
// Influence Heuristic (display only)
// =============================================================================

/// Maximum Manhattan distance a stone radiates influence to.
pub const INFLUENCE_RADIUS: usize = 5;

/// Distance decay factor: contribution is `1 / (1 + d * INFLUENCE_DECAY)`.
pub const INFLUENCE_DECAY: f64 = 0.5;

/// Accumulated influence above which an empty point is tinted Black
/// (and below the negation of which it is tinted White).
pub const INFLUENCE_THRESHOLD: f64 = 0.2;

// =============================================================================
// Territory Highlights
// =============================================================================

/// How long a territory change highlight stays visible.
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(4000);

// =============================================================================
// Text Rendering
// =============================================================================

/// Black stone in board diagrams.
pub const STONE_BLACK: char = 'X';

/// White stone in board diagrams.
pub const STONE_WHITE: char = 'O';

/// Empty point in board diagrams.
pub const EMPTY: char = '.';
