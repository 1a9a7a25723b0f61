pub mod schedule_item;
pub mod user;

pub use schedule_item::{ScheduleFields, ScheduleItem};
pub use user::{NewUser, User, DEFAULT_ROLE};
