pub mod api;
pub mod costing;
pub mod model;
pub mod session;

pub use api::{ApiError, CatalogApi, CreateEstimateRequest, EstimateApi, PdfDetail};
pub use model::*;
pub use session::{
    DraftSession, MemoryStorage, PersistentSession, STEP_COUNT, SessionStorage, StorageError,
};
