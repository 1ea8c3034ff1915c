use crate::sheet::Sheet;
use indexmap::IndexMap;

/// Named sheets in spreadsheet order.
#[derive(Clone, Debug, Default)]
pub struct Spreadsheet {
    sheets: IndexMap<String, Sheet>,
}

impl Spreadsheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a sheet, replacing (in place) any sheet with the same name.
    pub fn insert(&mut self, sheet: Sheet) {
        self.sheets.insert(sheet.name().to_string(), sheet);
    }

    pub fn with_sheet(mut self, sheet: Sheet) -> Self {
        self.insert(sheet);
        self
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sheets.contains_key(name)
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }

    pub fn sheets(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.values()
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

impl FromIterator<Sheet> for Spreadsheet {
    fn from_iter<I: IntoIterator<Item = Sheet>>(iter: I) -> Self {
        let mut out = Spreadsheet::new();
        for sheet in iter {
            out.insert(sheet);
        }
        out
    }
}
