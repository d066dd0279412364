//! Activity modules for the TUI, one per screen.

pub mod destination;
pub mod gallery;
pub mod register;

pub use destination::DestinationActivity;
pub use gallery::GalleryActivity;
pub use register::RegisterActivity;
