#![cfg(feature = "csv")]

use sheetgraph_workbook::{
    CsvAdapter, CsvReadOptions, CsvTrim, LiteralValue, LoaderOptions, SpreadsheetLoader,
    SpreadsheetReader, load_spreadsheet,
};

#[test]
fn csv_bytes_are_a_single_sheet() {
    let input = b"Name,Age\nAlice,30\n".to_vec();
    let mut adapter = CsvAdapter::open_bytes(input).unwrap();
    assert_eq!(adapter.sheet_names().unwrap(), vec!["Sheet1".to_string()]);

    let sheet = adapter.read_sheet("Sheet1").unwrap();
    assert_eq!(sheet.dimensions, Some((2, 2)));
    // No type inference: numbers stay text.
    assert_eq!(
        sheet.cells.get(&(2, 2)).and_then(|c| c.value.clone()),
        Some(LiteralValue::Text("30".to_string()))
    );
}

#[test]
fn csv_text_is_not_reformatted() {
    let input = b"Code\n1.50\n007\n".to_vec();
    let book = load_spreadsheet(CsvAdapter::open_bytes(input).unwrap()).unwrap();
    let sheet = book.sheet("Sheet1").unwrap();
    let rows = sheet.data_rows();
    assert_eq!(sheet.text(&rows[0], "Code").as_deref(), Some("1.50"));
    assert_eq!(sheet.text(&rows[1], "Code").as_deref(), Some("007"));
}

#[test]
fn csv_quotes_and_ragged_rows() {
    let input = b"A,B,C\n\"hello, world\",x\n1,2,3,4\n".to_vec();
    let mut adapter = CsvAdapter::open_bytes(input).unwrap();
    assert_eq!(adapter.sheet_bounds("Sheet1"), Some((3, 4)));
    let sheet = adapter.read_sheet("Sheet1").unwrap();
    assert_eq!(
        sheet.cells.get(&(2, 1)).and_then(|c| c.text()).as_deref(),
        Some("hello, world")
    );
    assert!(!sheet.cells.contains_key(&(2, 3)));
}

#[test]
fn csv_options_delimiter_trim_and_name() {
    let input = b"Name\t Tag \nRex\t good boy \n".to_vec();
    let opts = CsvReadOptions {
        delimiter: b'\t',
        trim: CsvTrim::All,
        default_sheet_name: "Pets".to_string(),
    };
    let mut adapter = CsvAdapter::open_bytes_with_options(input, opts).unwrap();
    assert_eq!(adapter.sheet_names().unwrap(), vec!["Pets".to_string()]);
    let sheet = adapter.read_sheet("Pets").unwrap();
    assert_eq!(
        sheet.cells.get(&(1, 2)).and_then(|c| c.text()).as_deref(),
        Some("Tag")
    );
    assert_eq!(
        sheet.cells.get(&(2, 2)).and_then(|c| c.text()).as_deref(),
        Some("good boy")
    );
}

#[test]
fn csv_directory_opens_every_file_in_name_order() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("People.csv"), "Name,Age\nAlice,30\n").unwrap();
    std::fs::write(dir.path().join("Pets.csv"), "Name,Owner.Name\nRex,Alice\n").unwrap();
    std::fs::write(dir.path().join("readme.txt"), "not a sheet").unwrap();

    let adapter = CsvAdapter::open_path(dir.path()).unwrap();
    assert_eq!(
        adapter.sheet_names().unwrap(),
        vec!["People".to_string(), "Pets".to_string()]
    );

    let book = load_spreadsheet(adapter).unwrap();
    let pets = book.sheet("Pets").unwrap();
    assert_eq!(pets.header(), ["Name", "Owner.Name"]);
}

#[test]
fn csv_add_sheet_bytes_appends_and_replaces() {
    let mut adapter = CsvAdapter::new();
    adapter.add_sheet_bytes("A", b"x\n1\n".to_vec()).unwrap();
    adapter.add_sheet_bytes("B", b"y\n2\n".to_vec()).unwrap();
    adapter.add_sheet_bytes("A", b"z\n".to_vec()).unwrap();
    assert_eq!(
        adapter.sheet_names().unwrap(),
        vec!["A".to_string(), "B".to_string()]
    );
    assert_eq!(adapter.sheet_bounds("A"), Some((1, 1)));
}

#[test]
fn csv_has_no_hidden_sheets_to_skip() {
    let adapter = CsvAdapter::open_bytes(b"Name\nRex\n".to_vec()).unwrap();
    let caps = adapter.capabilities();
    assert!(!caps.hidden_sheets);
    assert!(!caps.typed_values);

    let mut loader = SpreadsheetLoader::with_options(adapter, LoaderOptions { skip_hidden: true });
    let book = loader.load().unwrap();
    assert_eq!(book.len(), 1);
    assert!(loader.stats().hidden_unsupported);
}
