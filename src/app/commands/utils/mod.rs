//! Small file utilities that ship alongside the loader.

pub mod check_cmds;
pub mod count_files;
pub mod rename_ext;
