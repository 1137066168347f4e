//! The instruction sent to the scene generator.

/// Shown when the topic or the location is missing.
pub const MISSING_INPUT_WARNING: &str = "Please enter both a topic and a location.";

/// Builds the scene prompt. Both inputs are expected to be trimmed and
/// non-empty.
#[must_use]
pub fn build_scene_prompt(topic: &str, location: &str) -> String {
    format!(
        "Imagine a vivid, surreal, and fun scene where the concept of '{topic}' is \
         memorably placed inside '{location}' as part of a memory palace. Do not be \
         logical — be imaginative and symbolic."
    )
}
