use crate::error::IoError;
use crate::sheet::Sheet;
use crate::spreadsheet::Spreadsheet;
use crate::traits::SpreadsheetReader;
use std::time::Instant;

#[derive(Debug, Default)]
pub struct LoaderStats {
    pub sheets_loaded: usize,
    pub sheets_skipped: usize,
    pub rows_loaded: usize,
    pub cells_loaded: usize,
    pub load_time_ms: u64,
    /// `skip_hidden` was requested but the backend has no notion of hidden sheets.
    pub hidden_unsupported: bool,
}

#[derive(Clone, Debug, Default)]
pub struct LoaderOptions {
    /// Skip sheets the backend reports as hidden.
    pub skip_hidden: bool,
}

/// Reads every sheet of a backend into a [`Spreadsheet`].
///
/// Backend errors are converted into [`IoError`] unchanged, so adapters that
/// already report `IoError` (JSON, CSV) keep their variant.
pub struct SpreadsheetLoader<B: SpreadsheetReader> {
    backend: B,
    options: LoaderOptions,
    stats: LoaderStats,
}

impl<B> SpreadsheetLoader<B>
where
    B: SpreadsheetReader,
    IoError: From<B::Error>,
{
    pub fn new(backend: B) -> Self {
        Self::with_options(backend, LoaderOptions::default())
    }

    pub fn with_options(backend: B, options: LoaderOptions) -> Self {
        Self {
            backend,
            options,
            stats: LoaderStats::default(),
        }
    }

    pub fn stats(&self) -> &LoaderStats {
        &self.stats
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    pub fn load(&mut self) -> Result<Spreadsheet, IoError> {
        let start = Instant::now();
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("load_spreadsheet").entered();

        if self.options.skip_hidden && !self.backend.capabilities().hidden_sheets {
            #[cfg(feature = "tracing")]
            tracing::warn!("backend cannot report hidden sheets; loading every sheet");
            self.stats.hidden_unsupported = true;
        }

        let names = self.backend.sheet_names()?;

        let mut spreadsheet = Spreadsheet::new();
        for name in names {
            let data = self.backend.read_sheet(&name)?;

            if data.hidden && self.options.skip_hidden {
                #[cfg(feature = "tracing")]
                tracing::warn!(sheet = %name, "skipping hidden sheet");
                self.stats.sheets_skipped += 1;
                continue;
            }

            let sheet = Sheet::from_sheet_data(name, &data);
            self.stats.sheets_loaded += 1;
            self.stats.rows_loaded += sheet.rows().len();
            self.stats.cells_loaded += sheet.rows().iter().map(|r| r.cells().len()).sum::<usize>();
            #[cfg(feature = "tracing")]
            tracing::debug!(
                sheet = sheet.name(),
                columns = sheet.header().len(),
                rows = sheet.rows().len(),
                "loaded sheet"
            );
            spreadsheet.insert(sheet);
        }

        let elapsed_ms = start.elapsed().as_millis() as u64;
        self.stats.load_time_ms = if elapsed_ms == 0 { 1 } else { elapsed_ms };
        Ok(spreadsheet)
    }
}

/// Open `backend` and load all of its sheets with default options.
pub fn load_spreadsheet<B>(backend: B) -> Result<Spreadsheet, IoError>
where
    B: SpreadsheetReader,
    IoError: From<B::Error>,
{
    SpreadsheetLoader::new(backend).load()
}
