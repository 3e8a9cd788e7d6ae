pub mod latency;
pub use latency::{FixedLatency, Latency, NoLatency, StoreOp};
pub mod entity_repo;
pub use entity_repo::{EntityRepository, EntityStore};
pub mod company_repo;
pub use company_repo::{CompanyInfoRepository, CompanyInfoStore};
pub mod seed;
