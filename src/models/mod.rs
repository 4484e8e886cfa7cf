//! Data types flowing through the monitor: decoded change events, their
//! path breakdown, and the notifications built from them.

mod change_event;
mod location;
mod notification;

pub use change_event::{ChangeEvent, ChangeEventType};
pub use location::EventLocation;
pub use notification::{NotificationKind, NotificationPayload};
