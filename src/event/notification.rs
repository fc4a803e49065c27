use std::fmt;
use std::str::FromStr;

use crate::error::PaintError;

/// The notification kinds `DrawingState` emits, addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notification {
    /// The cursor of an active stroke moved
    StrokeUpdated,
    /// The active stroke was released
    StrokeEnded,
    ColorChanged,
    WidthChanged,
    OpacityChanged,
}

impl Notification {
    pub const ALL: [Notification; 5] = [
        Self::StrokeUpdated,
        Self::StrokeEnded,
        Self::ColorChanged,
        Self::WidthChanged,
        Self::OpacityChanged,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::StrokeUpdated => "stroke-updated",
            Self::StrokeEnded => "stroke-ended",
            Self::ColorChanged => "style-changed:color",
            Self::WidthChanged => "style-changed:width",
            Self::OpacityChanged => "style-changed:opacity",
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Notification {
    type Err = PaintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| PaintError::UnknownNotification(s.to_string()))
    }
}
