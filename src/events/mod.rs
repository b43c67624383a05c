//! # Events Module
//!
//! Progress reporting for long-running batch comparisons.
//!
//! The engine sends events through a channel so any host (CLI, GUI,
//! service) can subscribe without the engine knowing about it.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = events::channel();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Batch(BatchEvent::Progress(p)) = event {
//!             println!("{:.0}%", p.percent());
//!         }
//!     }
//! });
//!
//! comparator.rank_with_events(&query, &candidates, &sender)?;
//! ```

mod channel;
mod types;

pub use channel::{channel, EventReceiver, EventSender};
pub use types::*;
