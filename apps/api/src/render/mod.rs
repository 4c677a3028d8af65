// Dual renderer: one document, two pure projections.
// `preview` feeds the live editor, `export` feeds the PDF download.
// Shared wording, ordering and date rules live in `format`.

pub mod export;
pub mod format;
pub mod handlers;
pub mod preview;
pub mod typst;

pub use export::{render_export, EXPORT_FILENAME};
pub use format::DateLocale;
pub use preview::render_preview;
pub use typst::{PdfCompiler, RenderError, TypstCompiler};

use crate::models::resume::Resume;

/// Renders `resume` to PDF bytes through `compiler`.
pub async fn export_pdf(
    compiler: &dyn PdfCompiler,
    resume: &Resume,
    locale: DateLocale,
) -> Result<Vec<u8>, RenderError> {
    let source = render_export(resume, locale).to_typst();
    compiler.compile(&source).await
}
