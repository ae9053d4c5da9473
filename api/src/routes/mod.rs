pub mod health_route;
pub mod summarize;
pub mod webhook;
