pub mod item;
pub mod tracked_item;
pub mod user;
