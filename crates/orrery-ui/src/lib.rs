//! Parameter panel model for editing the body tree at runtime.
//!
//! The panel is a pure model: a flat, pre-order list of the bodies in the
//! tree, a selection cursor, and ranged adjustments that write straight into
//! the live body fields. The app layer maps key presses onto
//! [`ParameterPanel::select_next`], [`ParameterPanel::select_prev`] and
//! [`ParameterPanel::adjust`].

mod panel;

pub use panel::{Field, PanelEntry, ParameterPanel};
