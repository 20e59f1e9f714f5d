//! Conversion routes: which remote endpoint handles which file.
//!
//! The route is chosen from the filename extension alone. No content sniffing
//! happens anywhere in the crate: a PDF renamed to `report.doc` is sent to the
//! Word→PDF endpoint and the remote API gets to reject it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output filename for a PDF converted to Word.
pub const WORD_OUTPUT_FILENAME: &str = "converted_word.docx";

/// Output filename for a Word document converted to PDF.
pub const PDF_OUTPUT_FILENAME: &str = "converted_pdf.pdf";

/// One of the two remote conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// `.pdf` → `.docx`
    PdfToWord,
    /// `.doc` / `.docx` → `.pdf`
    WordToPdf,
}

impl Route {
    /// Select the route for `filename`, or `None` when the extension is not
    /// one we convert.
    ///
    /// Matching is exact and case-sensitive: `REPORT.PDF` is not routed.
    pub fn from_filename(filename: &str) -> Option<Route> {
        Self::from_extension(extension(filename))
    }

    /// Select the route for a bare extension (without the leading dot).
    pub fn from_extension(ext: &str) -> Option<Route> {
        match ext {
            "pdf" => Some(Route::PdfToWord),
            "docx" | "doc" => Some(Route::WordToPdf),
            _ => None,
        }
    }

    /// Path of the remote endpoint, relative to the API base URL.
    pub fn endpoint_path(self) -> &'static str {
        match self {
            Route::PdfToWord => "convert/pdf/to/word",
            Route::WordToPdf => "convert/convert/to/pdf",
        }
    }

    /// Filename attached to the uploaded multipart part.
    pub fn upload_filename(self) -> &'static str {
        match self {
            Route::PdfToWord => "file.pdf",
            Route::WordToPdf => "file.docx",
        }
    }

    /// MIME type declared for the uploaded part.
    pub fn input_mime(self) -> &'static str {
        match self {
            Route::PdfToWord => "application/pdf",
            Route::WordToPdf => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    /// Fixed filename of the converted document sent back to the user.
    pub fn output_filename(self) -> &'static str {
        match self {
            Route::PdfToWord => WORD_OUTPUT_FILENAME,
            Route::WordToPdf => PDF_OUTPUT_FILENAME,
        }
    }

    /// Caption shown under the converted document.
    pub fn caption(self) -> &'static str {
        match self {
            Route::PdfToWord => "Converted to Word!",
            Route::WordToPdf => "Converted to PDF!",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::PdfToWord => f.write_str("PDF → Word"),
            Route::WordToPdf => f.write_str("Word → PDF"),
        }
    }
}

/// Everything after the last `'.'` of `filename`.
///
/// A name without a dot is returned whole, so `"pdf"` has extension `"pdf"`
/// and `"README"` has extension `"README"`. A trailing dot yields `""`.
pub fn extension(filename: &str) -> &str {
    filename.rsplit('.').next().unwrap_or(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension() {
        assert_eq!(extension("report.pdf"), "pdf");
        assert_eq!(extension("archive.tar.gz"), "gz");
        assert_eq!(extension("my.notes.docx"), "docx");
        assert_eq!(extension("trailing."), "");
        assert_eq!(extension("README"), "README");
        assert_eq!(extension(""), "");
    }

    #[test]
    fn pdf_routes_to_word() {
        for name in ["report.pdf", "a.b.pdf", ".pdf", "pdf"] {
            let route = Route::from_filename(name);
            assert_eq!(route, Some(Route::PdfToWord), "{name}");
            assert_eq!(route.map(Route::output_filename), Some("converted_word.docx"));
        }
    }

    #[test]
    fn word_routes_to_pdf() {
        for name in ["letter.docx", "letter.doc", "v1.2.doc"] {
            let route = Route::from_filename(name);
            assert_eq!(route, Some(Route::WordToPdf), "{name}");
            assert_eq!(route.map(Route::output_filename), Some("converted_pdf.pdf"));
        }
    }

    #[test]
    fn other_extensions_are_not_routed() {
        for name in ["notes.txt", "image.png", "report.PDF", "letter.Docx", "pdf.zip", "", "x."] {
            assert_eq!(Route::from_filename(name), None, "{name}");
        }
    }

    #[test]
    fn route_constants() {
        assert_eq!(Route::PdfToWord.endpoint_path(), "convert/pdf/to/word");
        assert_eq!(Route::WordToPdf.endpoint_path(), "convert/convert/to/pdf");
        assert_eq!(Route::PdfToWord.upload_filename(), "file.pdf");
        assert_eq!(Route::WordToPdf.upload_filename(), "file.docx");
        assert_eq!(Route::PdfToWord.caption(), "Converted to Word!");
        assert_eq!(Route::WordToPdf.caption(), "Converted to PDF!");
        assert_eq!(Route::PdfToWord.input_mime(), "application/pdf");
    }

    #[test]
    fn route_serialises_snake_case() {
        let json = serde_json::to_string(&Route::PdfToWord).unwrap();
        assert_eq!(json, "\"pdf_to_word\"");
    }
}
