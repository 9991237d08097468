pub mod common;
pub mod conflicts;
pub mod editor;
pub mod export;
pub mod owned;
pub mod survival;
pub mod timeline;
