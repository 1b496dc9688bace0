// Public library interface for playtime-collage
// The collage binary and the diagnostic tools all go through these modules

pub mod config;
pub mod layout;
pub mod library;
pub mod render;
