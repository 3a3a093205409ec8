//! HTTP request handlers.

pub mod hello;
pub mod redirect;

pub use hello::hello_handler;
pub use redirect::{RedirectHandler, RedirectLayer};
