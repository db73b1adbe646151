//! A resume presented as a desktop in the terminal: icons, a start menu, a
//! taskbar and overlapping windows that show resume sections or small apps.
//!
//! The window manager ([`window::WindowManager`]) and the placement engine
//! ([`layout::floating`]) are independent of the terminal and can be driven
//! directly; [`desktop::Desktop`] wires them to crossterm input and ratatui
//! output.

pub mod clock;
pub mod component_context;
pub mod components;
pub mod config;
pub mod constants;
pub mod content_key;
pub mod desktop;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod keybindings;
pub mod layout;
pub mod runner;
pub mod screens;
pub mod state;
pub mod taskbar;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod window;

pub use config::DesktopConfig;
pub use content_key::ContentKey;
pub use desktop::Desktop;
pub use error::DesktopError;
pub use resume_markup::ContentNode;
