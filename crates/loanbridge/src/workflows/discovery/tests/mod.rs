mod common;
mod plan;
mod service;
mod visa;
