//! The studio's line-oriented command language.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`error`] | `ScriptError` |
//! | [`lexer`] | `Lexer`, `Token` |
//! | [`parser`] | `Command`, `Statement`, `parse_script` |

pub mod error;
pub mod lexer;
pub mod parser;

pub use error::ScriptError;
pub use parser::{parse_script, Command, Statement};
