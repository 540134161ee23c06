// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the in-app stories module.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::InappstoriesError;

/// Host-assigned handle identifying a native view instance.
///
/// The embedding host addresses views by tag when dispatching commands, the
/// same way a React-style shell addresses native views by numeric tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewTag(pub u32);

impl std::fmt::Display for ViewTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque RGB color, stored as 0xRRGGBB.
///
/// Serialized as a `#rrggbb` hex string because that is the wire format the
/// host scripting layer exchanges colors in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    /// Fallback color used when the host supplies none (or an invalid one).
    pub const BLUE: Color = Color(0x0000FF);

    /// Parse a `#rrggbb` (or bare `rrggbb`) hex string.
    pub fn parse_hex(s: &str) -> crate::error::Result<Self> {
        let trimmed = s.trim().trim_start_matches('#');
        if trimmed.len() != 6 {
            return Err(InappstoriesError::InvalidColor(s.to_string()));
        }
        let rgb = u32::from_str_radix(trimmed, 16)
            .map_err(|_| InappstoriesError::InvalidColor(s.to_string()))?;
        Ok(Color(rgb))
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06x}", self.0 & 0xFF_FF_FF)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Lifecycle states of a story view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Freshly created, nothing requested yet.
    Initial,
    /// A load is in flight.
    Loading,
    /// Load finished; the view shows the given color.
    Loaded { color: Color },
}

impl ViewState {
    /// Stable string label used in state-change events.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Loading => "loading",
            Self::Loaded { .. } => "loaded",
        }
    }
}

/// Payload of an engine event emitted to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingletonEvent {
    /// Mirrors the event name, so listeners multiplexing one channel can
    /// dispatch on the payload alone.
    #[serde(rename = "type")]
    pub event_type: String,
}

/// Extra data attached to a `loaded` state-change event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadedStateData {
    pub color: Color,
}

/// Payload of a view state-change event emitted to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateChangeEvent {
    pub view_tag: ViewTag,
    /// One of `initial`, `loading`, `loaded`.
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<LoadedStateData>,
}

impl StateChangeEvent {
    /// Build the wire payload for a state transition on the given view.
    pub fn new(view_tag: ViewTag, state: &ViewState) -> Self {
        let data = match state {
            ViewState::Loaded { color } => Some(LoadedStateData { color: *color }),
            _ => None,
        };
        Self {
            view_tag,
            state: state.label().to_string(),
            data,
        }
    }
}
