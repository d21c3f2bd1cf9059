pub use crate::app::App;
pub use bizdesk_types::prelude::*;

pub use tracing::{debug, error, info, warn};

// vim: ts=4
