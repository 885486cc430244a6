//! # Events Module
//!
//! Progress reporting decoupled from rendering.
//!
//! ## Design
//! Scanner and transfer workers emit events through a channel; the CLI
//! subscribes and drives the progress bar. Workers never touch the terminal.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Transfer(TransferEvent::FileCopied(p)) = event {
//!             println!("{} files, {} bytes", p.files_copied, p.bytes_copied);
//!         }
//!     }
//! });
//!
//! engine.run(&jobs, &sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
