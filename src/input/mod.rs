//! Form input behaviour: the phone mask, the keystroke filter, and the
//! blur-time validators.

pub mod keys;
pub mod phone;
pub mod validate;
