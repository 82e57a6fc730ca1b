pub mod love;
pub mod love_event;
