// src/models/mod.rs

pub mod application;
pub mod lead;
pub mod magic_link;
pub mod purchase;
