//! Storyboard state machine.

use crate::preview::{collapse_separators, format_preview, parse_preview, TimedLine};
use crate::Segment;
use derive_getters::Getters;
use reelsmith_core::ModelVariant;
use reelsmith_error::{StoryboardError, StoryboardErrorKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Duration given to a new segment when enough time is left.
pub const DEFAULT_SEGMENT_SECONDS: u32 = 5;

/// Result type for storyboard operations.
pub type StoryboardResult<T> = Result<T, StoryboardError>;

/// Which view the storyboard is in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum StoryboardView {
    /// Segment list, editable
    #[default]
    Edit,
    /// Flattened script, editable as raw text
    Preview {
        /// Current preview text
        text: String,
    },
}

/// Segments reconciled against a target video duration.
///
/// The sum of segment durations never exceeds the target, and there is
/// always at least one segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Storyboard {
    /// Segments in playback order
    segments: Vec<Segment>,
    /// Target video duration in seconds
    target: u32,
    /// Current view
    view: StoryboardView,
    #[getter(skip)]
    next_id: u32,
}

impl Storyboard {
    /// Create a storyboard with one blank segment spanning `target` seconds.
    pub fn new(target: u32) -> StoryboardResult<Self> {
        if target == 0 {
            return Err(StoryboardError::new(StoryboardErrorKind::ZeroTarget));
        }
        Ok(Self {
            segments: vec![Segment::new(1, target)],
            target,
            view: StoryboardView::Edit,
            next_id: 2,
        })
    }

    /// Create a storyboard for a model and duration selection.
    pub fn for_model(model: ModelVariant, seconds: u32) -> StoryboardResult<Self> {
        check_model(model, seconds)?;
        Self::new(seconds)
    }

    /// Sum of segment durations.
    pub fn total(&self) -> u32 {
        self.segments.iter().map(|s| s.duration).sum()
    }

    /// Seconds not yet assigned to a segment.
    pub fn remaining(&self) -> u32 {
        self.target.saturating_sub(self.total())
    }

    /// Whether the segments exactly fill the target.
    pub fn is_balanced(&self) -> bool {
        self.total() == self.target
    }

    /// Look up a segment.
    pub fn segment(&self, id: u32) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }

    /// Largest duration segment `id` may take: the target minus all other segments.
    pub fn max_duration_for(&self, id: u32) -> StoryboardResult<u32> {
        let segment = self
            .segment(id)
            .ok_or_else(|| StoryboardError::new(StoryboardErrorKind::UnknownSegment(id)))?;
        let others = self.total() - segment.duration;
        Ok(self.target.saturating_sub(others))
    }

    /// Set a segment's duration, clamped to `1..=max_duration_for(id)`.
    ///
    /// Returns the duration actually applied.
    #[instrument(skip(self), fields(target = self.target))]
    pub fn set_duration(&mut self, id: u32, requested: u32) -> StoryboardResult<u32> {
        self.require_edit()?;
        let max = self.max_duration_for(id)?.max(1);
        let applied = requested.clamp(1, max);
        if applied != requested {
            debug!(applied, "Clamped segment duration");
        }
        if let Some(segment) = self.segments.iter_mut().find(|s| s.id == id) {
            segment.duration = applied;
        }
        Ok(applied)
    }

    /// Replace a segment's description.
    pub fn set_description(&mut self, id: u32, text: impl Into<String>) -> StoryboardResult<()> {
        self.require_edit()?;
        let segment = self
            .segments
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoryboardError::new(StoryboardErrorKind::UnknownSegment(id)))?;
        segment.description = text.into();
        Ok(())
    }

    /// Append a segment of `min(5, remaining)` seconds and return its id.
    ///
    /// # Errors
    ///
    /// Fails when the segments already fill the target.
    #[instrument(skip(self), fields(target = self.target))]
    pub fn add_segment(&mut self) -> StoryboardResult<u32> {
        self.require_edit()?;
        let remaining = self.remaining();
        if remaining == 0 {
            return Err(StoryboardError::new(StoryboardErrorKind::Full(self.target)));
        }
        let id = self.next_id;
        self.next_id += 1;
        self.segments
            .push(Segment::new(id, DEFAULT_SEGMENT_SECONDS.min(remaining)));
        debug!(id, "Added segment");
        Ok(id)
    }

    /// Remove a segment. The last remaining segment cannot be removed.
    pub fn remove_segment(&mut self, id: u32) -> StoryboardResult<Segment> {
        self.require_edit()?;
        let index = self
            .segments
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StoryboardError::new(StoryboardErrorKind::UnknownSegment(id)))?;
        if self.segments.len() == 1 {
            return Err(StoryboardError::new(StoryboardErrorKind::LastSegment));
        }
        Ok(self.segments.remove(index))
    }

    /// Change the target duration and reconcile the segments against it.
    ///
    /// Segments are replayed in order; one that would overrun the new target is
    /// truncated, and every segment after the target is reached is dropped. An
    /// empty result becomes one blank segment spanning the whole target. Any
    /// preview in progress is discarded.
    #[instrument(skip(self), fields(from = self.target))]
    pub fn set_target(&mut self, target: u32) -> StoryboardResult<()> {
        if target == 0 {
            return Err(StoryboardError::new(StoryboardErrorKind::ZeroTarget));
        }

        let mut cumulative = 0;
        let mut kept = Vec::with_capacity(self.segments.len());
        for mut segment in self.segments.drain(..) {
            if cumulative >= target {
                debug!(id = segment.id, "Dropped segment past new target");
                continue;
            }
            if cumulative + segment.duration > target {
                segment.duration = target - cumulative;
                debug!(id = segment.id, duration = segment.duration, "Truncated segment");
            }
            cumulative += segment.duration;
            kept.push(segment);
        }

        if kept.is_empty() {
            kept.push(Segment::new(self.next_id, target));
            self.next_id += 1;
        }

        self.segments = kept;
        self.target = target;
        self.view = StoryboardView::Edit;
        Ok(())
    }

    /// Change the target from a model and duration selection.
    pub fn select(&mut self, model: ModelVariant, seconds: u32) -> StoryboardResult<()> {
        check_model(model, seconds)?;
        self.set_target(seconds)
    }

    /// Cumulative `(start, end)` offsets of each segment.
    pub fn timeline(&self) -> Vec<(u32, u32)> {
        let mut start = 0;
        self.segments
            .iter()
            .map(|segment| {
                let range = (start, start + segment.duration);
                start = range.1;
                range
            })
            .collect()
    }

    /// Check that the segments can be turned into a preview.
    pub fn validate(&self) -> StoryboardResult<()> {
        let total = self.total();
        if total != self.target {
            return Err(StoryboardError::new(StoryboardErrorKind::DurationMismatch {
                total,
                target: self.target,
            }));
        }
        if let Some(position) = self.segments.iter().position(|s| !s.is_described()) {
            return Err(StoryboardError::new(StoryboardErrorKind::BlankSegment(
                position + 1,
            )));
        }
        Ok(())
    }

    /// Switch to the preview view and return the generated script.
    #[instrument(skip(self), fields(segments = self.segments.len()))]
    pub fn enter_preview(&mut self) -> StoryboardResult<&str> {
        self.require_edit()?;
        self.validate()?;
        self.view = StoryboardView::Preview {
            text: format_preview(&self.segments),
        };
        debug!("Entered preview");
        Ok(self.preview_text().unwrap_or_default())
    }

    /// Preview text, if in the preview view.
    pub fn preview_text(&self) -> Option<&str> {
        match &self.view {
            StoryboardView::Preview { text } => Some(text),
            StoryboardView::Edit => None,
        }
    }

    /// Replace the raw preview text.
    pub fn edit_preview(&mut self, text: impl Into<String>) -> StoryboardResult<()> {
        match &mut self.view {
            StoryboardView::Preview { text: current } => {
                *current = text.into();
                Ok(())
            }
            StoryboardView::Edit => Err(wrong_view("preview")),
        }
    }

    /// Timed lines of the current preview text.
    pub fn preview_lines(&self) -> StoryboardResult<Vec<TimedLine>> {
        self.preview_text()
            .map(parse_preview)
            .ok_or_else(|| wrong_view("preview"))
    }

    /// Leave the preview, discarding raw text edits.
    pub fn back_to_edit(&mut self) {
        self.view = StoryboardView::Edit;
    }

    /// The final prompt: preview text with separators collapsed to single line breaks.
    ///
    /// # Errors
    ///
    /// Fails outside the preview view or when the preview text is blank.
    pub fn finalize(&self) -> StoryboardResult<String> {
        let text = self.preview_text().ok_or_else(|| wrong_view("preview"))?;
        let prompt = collapse_separators(text);
        if prompt.is_empty() {
            return Err(StoryboardError::new(StoryboardErrorKind::EmptyPreview));
        }
        Ok(prompt)
    }

    fn require_edit(&self) -> StoryboardResult<()> {
        match self.view {
            StoryboardView::Edit => Ok(()),
            StoryboardView::Preview { .. } => Err(wrong_view("edit")),
        }
    }
}

#[track_caller]
fn wrong_view(view: &'static str) -> StoryboardError {
    StoryboardError::new(StoryboardErrorKind::WrongView(view))
}

fn check_model(model: ModelVariant, seconds: u32) -> StoryboardResult<()> {
    if model.supports(seconds) {
        Ok(())
    } else {
        Err(StoryboardError::new(
            StoryboardErrorKind::UnsupportedDuration {
                model: model.to_string(),
                seconds,
            },
        ))
    }
}
