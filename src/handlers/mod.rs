// src/handlers/mod.rs

pub mod admin;
pub mod applications;
pub mod auth;
pub mod leads;
pub mod masterclass;
pub mod quiz;
