pub mod discover;
pub mod hook;
pub mod load;
pub mod normalize;
pub mod utils;
