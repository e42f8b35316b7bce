mod advice;
pub mod engine;
pub mod finding;
pub mod rules;
pub mod severity;

pub use engine::{AnalyzedRequest, RuleEngine, Thresholds, analyze_records, evaluate};
pub use finding::{Finding, RuleId, sort_by_severity};
pub use rules::Rule;
pub use severity::Severity;
