// Module exports for services

pub mod drag;
pub mod edit;
pub mod measure;
pub mod undo;
