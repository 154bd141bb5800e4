//! Request handlers.

pub mod health;
pub mod thumbnail;
pub mod upload;
pub mod videos;

pub use health::*;
pub use thumbnail::*;
pub use upload::*;
pub use videos::*;
