//! Route a document to the right remote conversion and hand back the result.
//!
//! ```text
//! (filename, bytes) ──▶ Route::from_filename ──▶ DocumentConverter::convert ──▶ ConvertedDocument
//!                             │
//!                             └─ None ──▶ ConvertError::UnsupportedExtension (no remote call)
//! ```
//!
//! The dispatcher is stateless: it borrows the input bytes for the duration
//! of one call and shares nothing mutable between calls, so a single
//! instance can serve every chat concurrently.

use crate::error::ConvertError;
use crate::route::Route;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Something that can perform a remote conversion for a given route.
///
/// [`crate::client::CloudmersiveClient`] is the production implementation.
#[async_trait]
pub trait DocumentConverter: Send + Sync {
    /// Convert `data` along `route`, returning the converted file bytes.
    async fn convert(&self, route: Route, data: &[u8]) -> Result<Vec<u8>, ConvertError>;
}

/// A successfully converted document, ready to send back.
#[derive(Clone, PartialEq, Eq)]
pub struct ConvertedDocument {
    pub route: Route,
    /// Fixed output filename for the route.
    pub filename: &'static str,
    /// Caption to show alongside the file.
    pub caption: &'static str,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ConvertedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertedDocument")
            .field("route", &self.route)
            .field("filename", &self.filename)
            .field("caption", &self.caption)
            .field("bytes", &format_args!("<{} bytes>", self.bytes.len()))
            .finish()
    }
}

/// Maps filenames to conversion routes and runs them.
#[derive(Clone)]
pub struct Dispatcher {
    converter: Arc<dyn DocumentConverter>,
}

impl Dispatcher {
    pub fn new(converter: Arc<dyn DocumentConverter>) -> Self {
        Self { converter }
    }

    /// Convert `data`, choosing the route from the extension of `filename`.
    ///
    /// # Errors
    /// - [`ConvertError::UnsupportedExtension`] when the extension is not
    ///   `pdf`, `doc` or `docx`. The converter is not called.
    /// - Whatever the converter returns for a failed remote call, typically
    ///   [`ConvertError::RemoteFailure`].
    pub async fn dispatch(
        &self,
        filename: &str,
        data: &[u8],
    ) -> Result<ConvertedDocument, ConvertError> {
        let Some(route) = Route::from_filename(filename) else {
            debug!("No route for '{}'", filename);
            return Err(ConvertError::unsupported(filename));
        };

        info!(%route, filename, input_bytes = data.len(), "Starting conversion");
        let start = Instant::now();

        match self.converter.convert(route, data).await {
            Ok(bytes) => {
                info!(
                    %route,
                    output_bytes = bytes.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Conversion complete"
                );
                Ok(ConvertedDocument {
                    route,
                    filename: route.output_filename(),
                    caption: route.caption(),
                    bytes,
                })
            }
            Err(e) => {
                warn!(
                    %route,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    error = %e,
                    "Conversion failed"
                );
                Err(e)
            }
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("converter", &"<dyn DocumentConverter>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every call and answers with a canned result.
    struct FakeConverter {
        calls: Mutex<Vec<(Route, Vec<u8>)>>,
        status: Option<u16>,
    }

    impl FakeConverter {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                status: None,
            })
        }

        fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                status: Some(status),
            })
        }

        fn calls(&self) -> Vec<(Route, Vec<u8>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DocumentConverter for FakeConverter {
        async fn convert(&self, route: Route, data: &[u8]) -> Result<Vec<u8>, ConvertError> {
            self.calls.lock().unwrap().push((route, data.to_vec()));
            match self.status {
                None => Ok(format!("converted:{}", route.output_filename()).into_bytes()),
                Some(status) => Err(ConvertError::RemoteFailure {
                    route,
                    status,
                    detail: "fake".into(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn pdf_goes_to_word() {
        let fake = FakeConverter::ok();
        let dispatcher = Dispatcher::new(fake.clone());

        let doc = dispatcher.dispatch("report.pdf", b"%PDF-1.7").await.unwrap();

        assert_eq!(doc.route, Route::PdfToWord);
        assert_eq!(doc.filename, "converted_word.docx");
        assert_eq!(doc.caption, "Converted to Word!");
        assert_eq!(doc.bytes, b"converted:converted_word.docx");
        assert_eq!(fake.calls(), vec![(Route::PdfToWord, b"%PDF-1.7".to_vec())]);
    }

    #[tokio::test]
    async fn doc_and_docx_go_to_pdf() {
        let fake = FakeConverter::ok();
        let dispatcher = Dispatcher::new(fake.clone());

        for name in ["letter.doc", "letter.docx"] {
            let doc = dispatcher.dispatch(name, b"PK").await.unwrap();
            assert_eq!(doc.route, Route::WordToPdf);
            assert_eq!(doc.filename, "converted_pdf.pdf");
        }
        assert_eq!(fake.calls().len(), 2);
    }

    #[tokio::test]
    async fn unknown_extension_makes_no_call() {
        let fake = FakeConverter::ok();
        let dispatcher = Dispatcher::new(fake.clone());

        let err = dispatcher.dispatch("notes.txt", b"hello").await.unwrap_err();

        match err {
            ConvertError::UnsupportedExtension { filename, extension } => {
                assert_eq!(filename, "notes.txt");
                assert_eq!(extension, "txt");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn remote_failure_is_propagated() {
        let fake = FakeConverter::failing(500);
        let dispatcher = Dispatcher::new(fake.clone());

        let err = dispatcher.dispatch("report.pdf", b"%PDF").await.unwrap_err();

        assert!(matches!(err, ConvertError::RemoteFailure { status: 500, .. }));
        assert_eq!(fake.calls().len(), 1);
    }

    #[tokio::test]
    async fn input_is_left_untouched() {
        let fake = FakeConverter::ok();
        let dispatcher = Dispatcher::new(fake);
        let data = b"%PDF-1.4 body".to_vec();
        let before = data.clone();

        dispatcher.dispatch("a.pdf", &data).await.unwrap();
        dispatcher.dispatch("b.pdf", &data).await.unwrap();

        assert_eq!(data, before);
    }

    #[test]
    fn debug_hides_payload() {
        let doc = ConvertedDocument {
            route: Route::WordToPdf,
            filename: Route::WordToPdf.output_filename(),
            caption: Route::WordToPdf.caption(),
            bytes: vec![0; 4096],
        };
        let dbg = format!("{doc:?}");
        assert!(dbg.contains("<4096 bytes>"), "got: {dbg}");
    }
}
