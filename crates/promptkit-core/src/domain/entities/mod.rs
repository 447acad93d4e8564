pub mod render_record;
pub mod template;

pub use render_record::RenderRecord;
pub use template::{PromptTemplate, TemplateBuilder, TemplateRecord};
