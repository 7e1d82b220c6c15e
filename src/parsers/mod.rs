pub mod common;
pub mod cpp;
pub mod includes;

pub use cpp::CppTranslationUnit;
pub use includes::{FileOrigin, IncludeDirective, IncludeResolver};
