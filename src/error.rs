use thiserror::Error;

/// Failures while bringing up or running the watch window.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create framebuffer: {0}")]
    Pixels(#[from] pixels::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
}
