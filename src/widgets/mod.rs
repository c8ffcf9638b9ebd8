// Reusable UI widgets

pub mod logo;
pub mod toast;

pub use logo::CinedkLogo;
pub use toast::{Toast, ToastManager, ToastVariant, ToastWidget};
