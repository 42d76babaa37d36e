//! Generic parsing machinery: source positions, an input cursor for
//! tokenizers, operator tables, and the shunting yard algorithm.

pub mod cursor;
pub mod operator;
pub mod shunting_yard;
pub mod source;
