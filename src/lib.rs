//! workswitch library - snapshot and restore work/personal desktop sessions

pub mod automation;
pub mod cli;
pub mod inspector;
pub mod profile;
pub mod switcher;
