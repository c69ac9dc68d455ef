pub mod builtin;
pub mod registry;
pub mod renderer;
pub mod scanner;
pub mod source;
pub mod tokens;

pub use registry::{Registry, TemplateOrigin, TemplateSummary};
pub use renderer::{render, RenderOptions, RenderReport, RenderedFile};
pub use source::{FileContents, Template, TemplateFile};
pub use tokens::Substitutions;
