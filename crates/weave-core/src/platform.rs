//! Host integration points.
//!
//! The registry never drives a render pass itself. When state changes it asks
//! the scheduler for one, and the host decides when to run it.

/// Receives render requests triggered by state writes.
pub trait RenderScheduler {
    /// Called once each time the registry goes from "clean" to "render requested".
    fn request_render(&self);
}

#[derive(Default)]
pub struct DefaultScheduler;

impl RenderScheduler for DefaultScheduler {
    fn request_render(&self) {}
}
