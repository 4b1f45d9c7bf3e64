pub mod format;
pub mod inputs;
pub mod interpret;
pub mod metrics;
pub mod scenario;
pub mod thresholds;

pub use inputs::CampaignInputs;
pub use interpret::{interpretation_lines, verdict, CampaignVerdict};
pub use metrics::{derive_metrics, DerivedMetrics};
pub use scenario::{load_scenarios, load_scenarios_file, ScenarioRecord};
