//! Console prefix formatting
//!
//! Builds the `[timestamp] glyph [LEVEL]` prefix for a record. The prefix is
//! returned separately from the content; the console receives it as its own
//! argument.

use super::log_level::{LevelDescriptor, LevelRegistry, LevelSelector, LogOptions};
use super::timestamp::{SharedClock, Zone};
use colored::Color;

/// Color used for the timestamp segment
pub const TIMESTAMP_COLOR: Color = Color::BrightBlack;

const RESET: &str = "\x1b[0m";

/// Wrap `text` in the ANSI foreground sequence for `color`
///
/// # Examples
///
/// ```
/// use errlog::core::paint;
/// use colored::Color;
///
/// assert_eq!(paint("[INFO]", Color::Green), "\x1b[32m[INFO]\x1b[0m");
/// ```
#[must_use]
pub fn paint(text: &str, color: Color) -> String {
    format!("\x1b[{}m{}{}", color.to_fg_str(), text, RESET)
}

/// Formatted prefix together with the level it was built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefix {
    pub text: String,
    pub level: LevelDescriptor,
}

pub struct RecordFormatter {
    zone: Zone,
    show_timestamp: bool,
    clock: SharedClock,
}

impl RecordFormatter {
    pub fn new(zone: Zone, show_timestamp: bool, clock: SharedClock) -> Self {
        Self {
            zone,
            show_timestamp,
            clock,
        }
    }

    /// Resolve a selector to a descriptor.
    ///
    /// Inline options look the inline level up by name first and fall back to
    /// the inline descriptor itself. `None` means the level is unknown.
    pub fn resolve(
        &self,
        selector: &LevelSelector,
        registry: &LevelRegistry,
    ) -> Option<LevelDescriptor> {
        match selector {
            LevelSelector::Key(key) => registry.resolve(key).cloned(),
            LevelSelector::Inline(options) => options.level.as_ref().map(|inline| {
                registry
                    .resolve(&inline.name)
                    .cloned()
                    .unwrap_or_else(|| inline.to_descriptor())
            }),
        }
    }

    /// Build the prefix for a record, or `None` for an unknown level.
    pub fn format(&self, selector: &LevelSelector, registry: &LevelRegistry) -> Option<Prefix> {
        let level = self.resolve(selector, registry)?;
        let options = selector.options();

        let tag = if options.is_some_and(|o| o.hide_level) {
            String::new()
        } else {
            Self::tag(&level)
        };

        let text = match self.timestamp_segment(options) {
            Some(stamp) if tag.is_empty() => stamp,
            Some(stamp) => format!("{} {}", stamp, tag),
            None => tag,
        };

        Some(Prefix { text, level })
    }

    fn tag(level: &LevelDescriptor) -> String {
        let tag = match level.glyph() {
            Some(glyph) => format!("{} [{}]", glyph, level.display_name()),
            None => format!("[{}]", level.display_name()),
        };
        match level.color() {
            Some(color) => paint(&tag, color),
            None => tag,
        }
    }

    fn timestamp_segment(&self, options: Option<&LogOptions>) -> Option<String> {
        // A per-call `false` suppresses; a per-call `true` cannot re-enable.
        let suppressed = options.and_then(|o| o.timestamp) == Some(false);
        if !self.show_timestamp || suppressed {
            return None;
        }
        let stamp = format!("[{}]", self.zone.display(&self.clock.now()));
        Some(paint(&stamp, TIMESTAMP_COLOR))
    }
}
