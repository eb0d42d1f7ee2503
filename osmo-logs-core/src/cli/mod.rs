pub mod conf;
pub mod logs;
