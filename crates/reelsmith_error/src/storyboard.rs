//! Storyboard validation errors.

/// Storyboard validation failures, surfaced inline to the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StoryboardErrorKind {
    /// Segment durations do not add up to the video duration
    #[display("Segment durations add up to {}s but the video is {}s", total, target)]
    DurationMismatch {
        /// Sum of segment durations
        total: u32,
        /// Target video duration
        target: u32,
    },
    /// A segment has no description (1-based position)
    #[display("Segment {} has no description", _0)]
    BlankSegment(usize),
    /// No time left for another segment
    #[display("Storyboard already fills all {}s", _0)]
    Full(u32),
    /// No segment with this id
    #[display("Unknown segment: {}", _0)]
    UnknownSegment(u32),
    /// Removing the only segment is not allowed
    #[display("A storyboard needs at least one segment")]
    LastSegment,
    /// Operation not allowed in the current view
    #[display("Operation requires the {} view", _0)]
    WrongView(&'static str),
    /// Preview text is empty
    #[display("Preview script is empty")]
    EmptyPreview,
    /// Target duration must be positive
    #[display("Video duration must be at least 1s")]
    ZeroTarget,
    /// Duration not offered by the selected model
    #[display("Model {} does not offer {}s videos", model, seconds)]
    UnsupportedDuration {
        /// Model identifier
        model: String,
        /// Requested duration
        seconds: u32,
    },
}

/// Storyboard error with location tracking.
///
/// # Examples
///
/// ```
/// use reelsmith_error::{StoryboardError, StoryboardErrorKind};
///
/// let err = StoryboardError::new(StoryboardErrorKind::DurationMismatch { total: 8, target: 10 });
/// assert!(format!("{}", err).contains("8s"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storyboard Error: {} at line {} in {}", kind, line, file)]
pub struct StoryboardError {
    /// The kind of error that occurred
    pub kind: StoryboardErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StoryboardError {
    /// Create a new storyboard error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryboardErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
