pub mod init;
pub mod items;
pub mod misc;
pub mod session;
