pub mod artist;
pub mod enums;
pub mod show;
pub mod venue;

pub use enums::{Genre, Genres, UsState};
