// Shared UI pieces drawn around and over the screens

pub mod drawer;
pub mod footer;
pub mod header;
pub mod help_overlay;

pub use drawer::{Drawer, DrawerEntry, DrawerOutcome};
pub use footer::{Footer, FOOTER_HEIGHT};
pub use header::{Header, HEADER_HEIGHT};
pub use help_overlay::HelpOverlay;
