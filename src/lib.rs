//! Composable panel toolkit for character-cell UIs.
//!
//! Invariant: after any `scroll()` call, a scroll window's selection cursor
//! lies inside the visible window (`offset <= cursor < offset + list_height`
//! whenever the list is non-empty and the viewport has at least one row).
//!
//! # Public API Overview
//! - Build widgets ([`Panel`], [`ScrollWindow`], [`TextField`],
//!   [`CompletionOverlay`], [`ProgressBar`], [`Grid`]) against the backend
//!   traits [`Screen`] and [`Window`].
//! - Feed decoded input as [`Key`] values; navigation runs through
//!   [`ScrollBindings`] and [`ScrollIntent`].
//! - Resolve logical colors through a caller-owned [`Palette`]; attribute
//!   values stay opaque to the toolkit.
//!
//! The terminal driver itself (raw mode, escape decoding, color-pair setup,
//! the outer event loop) is the host's concern; this crate only consumes the
//! backend traits.

pub mod config;
pub mod logging;

pub mod core;
pub mod widgets;

mod error;

#[doc(hidden)]
pub mod testing;

/// Scroll navigation intents and key tables.
pub use crate::core::bindings::{ScrollBindings, ScrollIntent};

/// Logical color pairs and the attribute registry.
pub use crate::core::colors::{ColorPair, Palette};

/// Geometry primitives.
pub use crate::core::geometry::{BorderMask, Rect};

/// Decoded key values delivered by the host's input decoder.
pub use crate::core::key::Key;

/// Backend interfaces and the opaque attribute type.
pub use crate::core::screen::{Attr, Screen, Size, Window, WriteRejected};

/// Behavior shared by panel-backed widgets.
pub use crate::core::widget::Widget;

/// Caller-facing error values.
pub use crate::error::Error;

/// Built-in widgets.
pub use crate::widgets::{
    CompletionAction, CompletionOverlay, CompletionSource, FieldState, Grid, ItemRow, Panel,
    ProgressBar, ScrollKeyResponse, ScrollWindow, TextField,
};
