//! Backend bridge: command queue from UI to a tokio worker thread and event intake back.

pub mod commands;
pub mod runtime;
