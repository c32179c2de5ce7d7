//! cast-control: drive a cast-capable media device through an external CLI
//!
//! The device is controlled with `<tool> -d <device> <command> [args...]` (normally
//! `catt`). Every invocation is synchronous with its own timeout and never raises:
//! failures come back as a non-zero [`CommandOutput`]. Long-running "cast and serve"
//! invocations go through the supervised [`BackgroundCaster`]. The default build
//! enables a `mock` backend so higher layers can be tested without a device.

mod types;
pub use types::{clamp_volume, CommandOutput, ControllerConfig, VOLUME_STEP};

mod error;
pub use error::{ControlError, Result};

mod traits;
pub use traits::DeviceController;

mod catt;
pub use catt::CattController;

mod background;
pub use background::{BackgroundCaster, CastStatus};

#[cfg(feature = "mock")]
mod mock;

#[cfg(feature = "mock")]
pub use mock::{Invocation, MockController};
