pub mod analyze;
pub mod encode;
pub mod encrypt;
pub mod error;
pub mod refine;
