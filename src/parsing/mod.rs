//! Readers that turn event files into matcher inputs.
//!
//! ## Example
//!
//! ```rust,no_run
//! use jet_parton_matcher::parsing::event::parse_event_file;
//! use std::path::Path;
//!
//! let event = parse_event_file(Path::new("event.json")).unwrap();
//! println!("{} jets, {} partons", event.jets.len(), event.partons.len());
//! ```

pub mod event;
