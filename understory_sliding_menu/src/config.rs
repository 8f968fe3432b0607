// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sliding menu configuration and attribute parsing.
//!
//! [`SlidingMenuConfig`] is a plain struct with sensible defaults. Hosts that
//! describe menus in markup can build one with
//! [`SlidingMenuConfig::from_attributes`]:
//!
//! ```
//! use core::time::Duration;
//! use understory_sliding_menu::config::{MenuSide, SlideDistance, SlidingMenuConfig};
//!
//! let config = SlidingMenuConfig::from_attributes([
//!     ("side", "right"),
//!     ("max-slide-distance", "240px"),
//!     ("swipe-target-width", "40px"),
//!     ("type", "overlay"),
//! ])
//! .unwrap();
//!
//! assert_eq!(config.side, MenuSide::Right);
//! assert_eq!(config.max_slide_distance, Some(SlideDistance::Pixels(240.0)));
//! assert_eq!(config.swipe_target_width, Some(40.0));
//! assert_eq!(config.animator, "overlay");
//! assert_eq!(config.settle_delay, Duration::from_millis(400));
//! ```

use alloc::string::{String, ToString};
use core::time::Duration;

use crate::error::Error;

/// Edge the menu is mounted on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MenuSide {
    /// Menu slides in from the left edge.
    #[default]
    Left,
    /// Menu slides in from the right edge.
    Right,
}

impl MenuSide {
    /// Parse a `side` attribute; anything other than `right` is left.
    #[must_use]
    pub fn from_attribute(value: &str) -> Self {
        if value.trim() == "right" {
            Self::Right
        } else {
            Self::Left
        }
    }

    /// Returns `true` for a right-mounted menu.
    #[must_use]
    pub fn is_right(self) -> bool {
        self == Self::Right
    }

    /// Sign applied to horizontal deltas so that movement toward the open
    /// state is positive.
    #[must_use]
    pub fn direction(self) -> f64 {
        match self {
            Self::Left => 1.0,
            Self::Right => -1.0,
        }
    }
}

/// How far a fully open menu slides.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SlideDistance {
    /// Percentage of the main panel width.
    Percent(f64),
    /// Absolute width in pixels.
    Pixels(f64),
}

impl SlideDistance {
    /// Used when no `max-slide-distance` is configured.
    pub const DEFAULT: Self = Self::Percent(90.0);

    /// Parse `NN%`, `NNpx` or a bare pixel count.
    pub fn parse(value: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidAttribute {
            attribute: "max-slide-distance",
            value: value.to_string(),
        };
        let trimmed = value.trim();
        let (number, percent) = if let Some(number) = trimmed.strip_suffix('%') {
            (number, true)
        } else {
            (trimmed.strip_suffix("px").unwrap_or(trimmed), false)
        };
        let number: f64 = number.trim().parse().map_err(|_| invalid())?;
        if !number.is_finite() || number < 0.0 {
            return Err(invalid());
        }
        Ok(if percent {
            Self::Percent(number)
        } else {
            Self::Pixels(number)
        })
    }

    /// Width in pixels for a main panel `container_width` wide.
    #[must_use]
    pub fn resolve(self, container_width: f64) -> f64 {
        match self {
            Self::Percent(percent) => percent / 100.0 * container_width,
            Self::Pixels(pixels) => pixels,
        }
    }
}

impl Default for SlideDistance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Parse a `swipe-target-width` attribute (`NNpx` or `NN`).
///
/// Negative widths are kept; they resolve to the full main panel width.
pub fn parse_swipe_target_width(value: &str) -> Result<f64, Error> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed);
    match number.trim().parse::<f64>() {
        Ok(width) if width.is_finite() => Ok(width),
        _ => Err(Error::InvalidAttribute {
            attribute: "swipe-target-width",
            value: value.to_string(),
        }),
    }
}

/// Parse a `swipeable` attribute: empty or `true` enables swiping.
#[must_use]
pub fn parse_swipeable(value: &str) -> bool {
    matches!(value.trim(), "" | "true")
}

/// Resolve the edge zone an opening gesture must start in.
///
/// An explicit non-negative width wins; otherwise the whole main panel is a
/// valid target.
#[must_use]
pub fn resolve_swipe_target_width(configured: Option<f64>, main_width: f64) -> f64 {
    match configured {
        Some(width) if width >= 0.0 => width,
        _ => main_width,
    }
}

/// Configuration for one sliding menu.
#[derive(Clone, Debug, PartialEq)]
pub struct SlidingMenuConfig {
    /// Edge the menu is mounted on.
    pub side: MenuSide,
    /// Fully open distance; `None` means [`SlideDistance::DEFAULT`].
    pub max_slide_distance: Option<SlideDistance>,
    /// Whether drag and swipe gestures move the menu.
    pub swipeable: bool,
    /// Edge zone for opening gestures; `None` means the whole main panel.
    pub swipe_target_width: Option<f64>,
    /// Animator registry key.
    pub animator: String,
    /// Page shown in the main panel at construction.
    pub main_page: Option<String>,
    /// Page shown in the menu panel at construction.
    pub menu_page: Option<String>,
    /// Fallback wait before deferred setup when the host never reports that
    /// layout has settled.
    pub settle_delay: Duration,
}

impl Default for SlidingMenuConfig {
    fn default() -> Self {
        Self {
            side: MenuSide::Left,
            max_slide_distance: None,
            swipeable: true,
            swipe_target_width: None,
            animator: String::from("default"),
            main_page: None,
            menu_page: None,
            settle_delay: Duration::from_millis(400),
        }
    }
}

impl SlidingMenuConfig {
    /// Build a configuration from markup attributes.
    ///
    /// Recognized names are `side`, `max-slide-distance`, `swipeable`,
    /// `swipe-target-width`, `type`, `main-page` and `menu-page`. Unknown
    /// attributes are ignored.
    pub fn from_attributes<'a>(
        attributes: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, Error> {
        let mut config = Self::default();
        for (name, value) in attributes {
            match name {
                "side" => config.side = MenuSide::from_attribute(value),
                "max-slide-distance" => {
                    config.max_slide_distance = Some(SlideDistance::parse(value)?);
                }
                "swipeable" => config.swipeable = parse_swipeable(value),
                "swipe-target-width" => {
                    config.swipe_target_width = Some(parse_swipe_target_width(value)?);
                }
                "type" => config.animator = value.trim().to_string(),
                "main-page" => config.main_page = Some(value.to_string()),
                "menu-page" => config.menu_page = Some(value.to_string()),
                _ => log::trace!("sliding menu: ignoring attribute `{name}`"),
            }
        }
        Ok(config)
    }

    /// The configured slide distance, or the default.
    #[must_use]
    pub fn slide_distance(&self) -> SlideDistance {
        self.max_slide_distance.unwrap_or_default()
    }
}
