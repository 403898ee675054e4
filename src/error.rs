use miette::Diagnostic;
use thiserror::Error;

/// Main error type for atlasify operations
#[derive(Error, Diagnostic, Debug)]
pub enum AtlasError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(atlasify::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(atlasify::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(atlasify::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("expected {expected} components, found {found}")]
    #[diagnostic(
        code(atlasify::count_mismatch),
        help("Adjust min_pixels or alpha_threshold until every sprite is detected exactly once; `atlasify inspect` lists what was found")
    )]
    CountMismatch { expected: usize, found: usize },

    #[error("{sheet}: {source}")]
    #[diagnostic(code(atlasify::sheet))]
    Sheet {
        sheet: String,
        #[source]
        source: Box<AtlasError>,
    },

    #[error("{failed} of {total} sheet(s) failed")]
    #[diagnostic(code(atlasify::batch))]
    Batch { failed: usize, total: usize },
}

impl AtlasError {
    /// Attach the sheet name to an error raised while processing it.
    pub fn in_sheet(self, sheet: impl Into<String>) -> Self {
        AtlasError::Sheet {
            sheet: sheet.into(),
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, AtlasError>;
