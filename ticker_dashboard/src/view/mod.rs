//! Presentation layer: number formatting, coin glyphs, and table rendering.
//!
//! - `format` — price, volume, and change formatters.
//! - `icons` — static symbol-to-glyph table.
//! - `table` — renders a `DashboardSnapshot` as text or JSON.
pub mod format;
pub mod icons;
pub mod table;
