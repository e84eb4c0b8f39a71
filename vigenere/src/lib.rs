pub mod console;
pub mod display;
pub mod files;
