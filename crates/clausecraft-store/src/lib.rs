pub mod draft;
pub mod local;

pub use draft::Draft;
pub use local::{LocalDraftStore, StoreError};
