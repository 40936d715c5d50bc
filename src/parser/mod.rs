//! Parser and resolver for runtime parameter declaration files

pub mod ast;
mod declarations;
pub mod lexer;

pub use ast::*;
pub use declarations::{parse_declarations, resolve_files, split_path_list};
