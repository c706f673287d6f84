//! Color theme constants for the DataMind UI
//!
//! Defines the minimal dark color palette used throughout the UI.

use ratatui::style::Color;

/// Primary border color
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Accent color for highlights and the active session
pub const COLOR_ACCENT: Color = Color::LightBlue;

/// User message bubbles
pub const COLOR_USER: Color = Color::Cyan;

/// Assistant message bubbles
pub const COLOR_ASSISTANT: Color = Color::White;

/// SQL code blocks
pub const COLOR_SQL: Color = Color::Yellow;

/// Step indicator chips
pub const COLOR_STEP: Color = Color::Green;

/// Approval card awaiting a decision
pub const COLOR_APPROVAL_PENDING: Color = Color::Magenta;

/// Confirmed sent state
pub const COLOR_APPROVAL_SENT: Color = Color::LightGreen;

/// Rejected state
pub const COLOR_APPROVAL_REJECTED: Color = Color::Red;

/// Dim text for hints and less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// Chart bars and series
pub const COLOR_CHART: Color = Color::LightBlue;
