mod channel;
mod notification;

pub use channel::{EventChannel, Subscriber};
pub use notification::Notification;
