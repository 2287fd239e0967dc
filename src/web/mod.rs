//! Server-rendered form page

pub mod handlers;
