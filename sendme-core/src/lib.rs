pub mod channel;
pub mod clock;
pub mod events;
pub mod pii;
pub mod telemetry;

pub use channel::{DeepLinkChannel, MessageChannel, RecordingChannel};
pub use clock::{Clock, FixedClock, SystemClock};
pub use pii::Masked;
