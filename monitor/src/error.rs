use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("monitor {name:?} already registered with a different kind")]
    TypeConflict { name: String },
}
