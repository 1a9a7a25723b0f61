pub mod dto;
pub mod extract;
pub mod format;
pub mod validate;

pub use dto::{
    LoginRequest, RegisterRequest, ScheduleItemDto, ScheduleItemInput, TokenResponse, UserPatch,
};
pub use extract::ApiJson;
