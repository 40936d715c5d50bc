//! Template expansion for the generated Fortran module
//!
//! A template is ordinary Fortran source with placeholder lines:
//!
//! ```text
//! module extern_probin_module
//!   use amrex_fort_module, only : rt => amrex_real
//!   implicit none
//!   private
//!
//!   @@declarations@@
//!   @@namelist@@
//! end module extern_probin_module
//! ```
//!
//! Each placeholder line is replaced by the block its keyword generates,
//! indented to the placeholder's column. Every other line is copied as is.

mod expander;
mod placeholder;

pub use expander::{expand_template, Expansion, BANNER};
pub use placeholder::{scan_line, Keyword, Placeholder, DELIMITER};
