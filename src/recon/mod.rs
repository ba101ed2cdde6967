pub mod analyzer;
pub mod correction;
pub mod engine;
pub mod suggestion;
pub mod validator;

pub use analyzer::DiscrepancyAnalyzer;
pub use correction::CorrectionGenerator;
pub use engine::ReconciliationEngine;
pub use suggestion::SuggestionGenerator;
pub use validator::ReconciliationValidator;
