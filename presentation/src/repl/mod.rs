//! Interactive session loop

pub mod session_loop;
