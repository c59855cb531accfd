// Service module exports
// Pure week-layout logic plus the feed and settings I/O used by the shell

pub mod bucketing;
pub mod feed;
pub mod grid;
pub mod layout;
pub mod locale;
pub mod navigation;
pub mod settings;
