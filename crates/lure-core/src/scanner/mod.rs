pub mod command;
pub mod controller;
pub mod sleeper;
pub mod state;

pub use command::{ScanCommand, ScanHandle};
pub use controller::ScanController;
pub use sleeper::{RecordingSleeper, Sleeper, TokioSleeper};
pub use state::{ScanState, ScanStatus};
