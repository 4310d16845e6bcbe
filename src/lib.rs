pub mod cli;
pub mod config;
pub mod error;
pub mod notify;
pub mod presenter;
pub mod preview;
pub mod selection;
pub mod session;
pub mod transport;

pub use mri_classify_common as common;
