//! Instruction templates for prompt optimization.

use reelsmith_core::OptimizeMode;

const SINGLE: &str = "You rewrite prompts for a text-to-video model. \
Turn the user's idea into one vivid, concrete prompt: describe the subject, \
setting, lighting, camera framing and movement, and mood. Keep any @handles \
exactly as written. Reply with the rewritten prompt only.";

const SEGMENTS: &str = "You rewrite one scene of a multi-scene video storyboard. \
Make the scene description concrete and visual in one or two sentences: \
action, framing, camera movement. Do not add timestamps or scene numbers. \
Keep any @handles exactly as written. Reply with the rewritten scene only.";

const SCRIPT: &str = "You rewrite a timed video script. Each line starts with a \
tag like [0s-4s]. Keep every tag and its times unchanged and keep the lines in \
order; rewrite only the text after each tag so the scenes are concrete, visual, \
and flow into each other. Keep any @handles exactly as written. Reply with the \
script only, one tagged line per scene.";

/// System instruction used for an optimization mode.
pub fn instructions_for(mode: OptimizeMode) -> &'static str {
    match mode {
        OptimizeMode::Single => SINGLE,
        OptimizeMode::Segments => SEGMENTS,
        OptimizeMode::Script => SCRIPT,
    }
}
