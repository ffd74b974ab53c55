pub mod check;
pub mod explain;
pub mod fix;
pub mod init;
pub mod project;
