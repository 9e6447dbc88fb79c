//! Infrastructure configuration modules.

pub mod analysis;
pub mod logging;
pub mod rpc;
pub mod settings;
pub mod storage;

pub use analysis::AnalysisConfig;
pub use logging::LoggingConfig;
pub use rpc::RpcConfig;
pub use settings::Config;
pub use storage::StorageConfig;
