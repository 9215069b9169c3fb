pub mod crane;
pub mod registry;
pub mod tandem;

pub use crane::{CraneEnvelope, CraneModel, CraneType, EnvelopeError, UnknownCraneType};
pub use registry::{CraneRegistry, LoadSummary, RegistryError};
pub use tandem::{CraneShare, MultiCraneAnalysis, MultiCraneLift, TandemCrane};
