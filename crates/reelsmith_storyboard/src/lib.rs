//! Storyboard reconciler.
//!
//! A storyboard is an ordered list of timed segments whose durations must add
//! up to the target video duration. It has two views: an editable segment list
//! and a flattened preview script with `[start s-end s]` tags. The preview text
//! becomes the final prompt.
//!
//! # Example
//!
//! ```
//! use reelsmith_storyboard::Storyboard;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut board = Storyboard::new(10)?;
//! let first = board.segments()[0].id;
//! board.set_duration(first, 4)?;
//! board.set_description(first, "A")?;
//! let second = board.add_segment()?;
//! board.set_description(second, "B")?;
//!
//! let preview = board.enter_preview()?;
//! assert_eq!(preview, "[0s-4s] A\n[4s-10s] B");
//! assert_eq!(board.finalize()?, "[0s-4s] A\n[4s-10s] B");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod preview;
mod segment;
mod storyboard;

pub use preview::{collapse_separators, parse_preview, TimedLine};
pub use segment::Segment;
pub use storyboard::{Storyboard, StoryboardResult, StoryboardView, DEFAULT_SEGMENT_SECONDS};
