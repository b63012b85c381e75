//! Control surface helpers
//!
//! Pure string-in/string-out pieces of the page: parsing what the user typed
//! and formatting what the readouts show. DOM wiring lives in the binary.

pub mod input;
pub mod readout;

pub use input::{InputError, parse_non_negative, parse_track_length};
pub use readout::{Readout, marker_style, toggle_icon, toggle_label};
