//! Transition families and per-item visual state

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Delay between making an item displayable and starting its reveal
pub const REVEAL_TICK: Duration = Duration::from_millis(10);

/// Visual style of show/hide transitions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionFamily {
    /// Opacity plus scale(0.8)
    #[default]
    Fade,
    /// Opacity plus a vertical 20px offset
    Slide,
    /// Opacity only
    Plain,
}

impl TransitionFamily {
    /// Resolve a configured family token
    ///
    /// Tokens are matched loosely: anything mentioning `fade` is a fade,
    /// anything mentioning `slide` is a slide, everything else is plain.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        let token = token.to_ascii_lowercase();
        if token.contains("fade") {
            Self::Fade
        } else if token.contains("slide") {
            Self::Slide
        } else {
            Self::Plain
        }
    }

    #[must_use]
    pub const fn reveal_duration(self) -> Duration {
        match self {
            Self::Fade | Self::Slide => Duration::from_millis(400),
            Self::Plain => Duration::from_millis(300),
        }
    }

    #[must_use]
    pub const fn hide_duration(self) -> Duration {
        match self {
            Self::Fade | Self::Slide => Duration::from_millis(300),
            Self::Plain => Duration::from_millis(200),
        }
    }

    /// Transform a revealed item starts from
    #[must_use]
    pub const fn reveal_from(self) -> Transform {
        match self {
            Self::Fade => Transform::Shrunk,
            Self::Slide => Transform::Offset(20),
            Self::Plain => Transform::Identity,
        }
    }

    /// Transform a hidden item ends at
    #[must_use]
    pub const fn hide_to(self) -> Transform {
        match self {
            Self::Fade => Transform::Shrunk,
            Self::Slide => Transform::Offset(-20),
            Self::Plain => Transform::Identity,
        }
    }
}

impl FromStr for TransitionFamily {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_token(s))
    }
}

impl fmt::Display for TransitionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fade => f.write_str("fade"),
            Self::Slide => f.write_str("slide"),
            Self::Plain => f.write_str("plain"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Opacity {
    Transparent,
    Opaque,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transform {
    Identity,
    /// scale(0.8)
    Shrunk,
    /// Vertical offset in pixels
    Offset(i16),
}

/// Presentation state of one item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemVisual {
    /// Whether the item takes part in layout at all
    pub displayed: bool,
    pub opacity: Opacity,
    pub transform: Transform,
    /// Duration of the transition currently driving opacity/transform
    pub transition: Option<Duration>,
}

impl ItemVisual {
    /// Displayed and at rest, without a running transition
    #[must_use]
    pub const fn resting() -> Self {
        Self {
            displayed: true,
            opacity: Opacity::Opaque,
            transform: Transform::Identity,
            transition: None,
        }
    }

    /// Not displayed
    #[must_use]
    pub const fn concealed() -> Self {
        Self {
            displayed: false,
            opacity: Opacity::Transparent,
            transform: Transform::Identity,
            transition: None,
        }
    }
}
