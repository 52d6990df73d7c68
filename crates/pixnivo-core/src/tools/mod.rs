//! The tool orchestrators.
//!
//! Each tool chains the pipeline stages for one uploaded file:
//!
//! - [`convert`]: validate, decode, encode once to the target format.
//! - [`compress`]: validate, decode, shrink to the long-edge cap, then search
//!   for a quality that fits the byte budget.
//! - [`resize`]: validate, decode, fit into a box, encode once.
//!
//! Validation happens before any byte is decoded. Every stage boundary checks
//! the operation's [`Ticket`](crate::session::Ticket), and the result is only
//! returned through [`Ticket::commit`](crate::session::Ticket::commit).

mod compress;
mod convert;
mod error;
mod resize;
mod source;

pub use compress::{compress, CompressOutcome};
pub use convert::{convert, jpg_to_png, png_to_jpg};
pub use error::ToolError;
pub use resize::{resize, ResizeRequest};
pub use source::SourceImage;
