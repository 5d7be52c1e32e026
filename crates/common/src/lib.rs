//! Process-level plumbing shared by the workspace binaries.

pub mod logging;
