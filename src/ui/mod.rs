//! Terminal UI rendering using ratatui.
//!
//! Each view is implemented in its own submodule with a `render` function
//! that draws the view snapshots held by [`App`](crate::app::App). Nothing
//! here fetches data or blocks.
//!
//! ## Submodules
//!
//! - [`dashboard`]: Latest reading, local tier and sparkline trends
//! - [`alerts`]: Numbered alert blocks coloured by severity
//! - [`location`]: GPS coordinates
//! - [`health`]: Current sample and on-demand assessment
//! - [`history`]: Heat-cycle prediction table
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ View Content                         │
//! │ (dashboard/alerts/.../history)       │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top:
//!    - common::render_help
//! ```

pub mod alerts;
pub mod common;
pub mod dashboard;
pub mod health;
pub mod history;
pub mod location;
pub mod theme;

pub use theme::Theme;
