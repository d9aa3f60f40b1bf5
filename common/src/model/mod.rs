//! Domain models for the transfer service

pub mod account;
pub mod transfer;
