//! Display primitives shared by list-style command output.

pub mod table;

pub use table::{list_table, render_list};
