pub mod source;
pub mod split;
