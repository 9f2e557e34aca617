pub mod api;
pub mod event;
pub mod model;
pub mod printer;
pub mod recorder;
pub mod store;

pub use api::{DEFAULT_MAX_OUTPUTS, OutputApi, PLAYGROUND_SESSION_ID, Subscription};
pub use event::OutputEvent;
pub use model::{OutputType, SessionOutput};
pub use store::{FileOutputStore, InMemoryOutputStore, OutputStore, UpdateFn};
