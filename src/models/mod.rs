mod forms;
mod record;

pub use forms::{AnalyzeForm, LoginForm, SignupForm};
pub use record::{AnalysisRecord, RECORD_HEADER};
