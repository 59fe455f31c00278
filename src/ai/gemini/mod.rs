pub mod client;
pub mod diagnosis;
pub mod types;

pub use client::GeminiHttpClient;
pub use diagnosis::GeminiDiagnosisClient;
