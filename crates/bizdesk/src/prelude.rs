pub use bizdesk_core::prelude::*;

// vim: ts=4
