// src/models/mod.rs

pub mod assignment;
pub mod question;
pub mod submission;
