pub mod acceptance;
pub mod content;
pub mod flow_step;
pub mod state;
pub mod template;

pub use acceptance::{gate, AcceptanceTracker};
pub use content::{ContentBlock, KeyboardKind, NoticeKind, ScreenContent};
pub use flow_step::FlowStep;
pub use state::{FlowInputs, StepInputs};
pub use template::{template, Completion, FormField, StepTemplate, TemplateBlock};
