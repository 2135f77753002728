pub mod dto;
pub mod event;
pub mod handler;
pub mod service;
pub mod template;
