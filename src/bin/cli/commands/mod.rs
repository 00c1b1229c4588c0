pub mod add;
pub mod digest;
pub mod due;
pub mod list;
pub mod pick;
pub mod quiz;
pub mod reveal;
pub mod review;
pub mod rm;
