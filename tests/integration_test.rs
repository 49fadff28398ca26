//! End-to-end scenarios over hand-built byte fixtures (no `.db` files are
//! shipped in this pack, so fixtures are built in-memory and written to a
//! temp file, matching the teacher's one-`#[test]`-per-scenario structure
//! but trading its `resources/test/*.db` fixtures for literal bytes).

use std::io::Write;

use sqlitedump::database::Database;
use sqlitedump::value::ColumnValue;

fn varint(v: u64) -> Vec<u8> {
    assert!(v < 128);
    vec![v as u8]
}

/// Builds a single-page database whose page 1 is the schema table, with
/// one `CREATE TABLE` row.
fn one_table_schema_db() -> Vec<u8> {
    let page_size = 512_usize;
    let mut page = vec![0_u8; page_size];

    let sql = "CREATE TABLE widgets (id INTEGER, name TEXT)";

    // Column values: type="table", name="widgets", tbl_name="widgets",
    // rootpage=2, sql=<sql>.
    let cols: Vec<(u64, Vec<u8>)> = vec![
        (2 * 5 + 13, b"table".to_vec()),
        (2 * 7 + 13, b"widgets".to_vec()),
        (2 * 7 + 13, b"widgets".to_vec()),
        (1, vec![2]),
        (2 * sql.len() as u64 + 13, sql.as_bytes().to_vec()),
    ];
    let mut body_header = Vec::new();
    for (st, _) in &cols {
        body_header.extend(varint(*st));
    }
    let header_size = 1 + body_header.len();
    let mut record = Vec::new();
    record.extend(varint(header_size as u64));
    record.extend(&body_header);
    for (_, bytes) in &cols {
        record.extend(bytes);
    }

    let mut cell = Vec::new();
    cell.extend(varint(record.len() as u64));
    cell.extend(varint(1)); // rowid
    cell.extend(&record);

    let cell_offset = page_size - cell.len();
    page[cell_offset..].copy_from_slice(&cell);

    // Page 1's b-tree header starts at file/page offset 100, after the
    // database file header.
    page[100] = 0x0d; // leaf table
    page[103..105].copy_from_slice(&1_u16.to_be_bytes()); // 1 cell
    page[105..107].copy_from_slice(&(cell_offset as u16).to_be_bytes());
    page[108..110].copy_from_slice(&(cell_offset as u16).to_be_bytes()); // cell pointer array

    let mut file = vec![0_u8; 100];
    file[0..16].copy_from_slice(b"SQLite format 3\0");
    file[16..18].copy_from_slice(&(page_size as u16).to_be_bytes());
    file[18] = 1;
    file[19] = 1;
    file[21] = 64;
    file[22] = 32;
    file[23] = 32;
    file[28..32].copy_from_slice(&1_u32.to_be_bytes());
    file.extend(&page[100..]);
    file
}

fn write_temp_db(bytes: &[u8], name: &str) -> String {
    let path = std::env::temp_dir().join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(bytes).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn opens_file_and_decodes_header() {
    let path = write_temp_db(&one_table_schema_db(), "sqlitedump_test_header.db");
    let db = Database::open(&path).unwrap();
    assert_eq!(db.header.page_size, 512);
    assert_eq!(db.header.header_db_size, 1);
}

#[test]
fn recovers_schema_from_page_one() {
    let path = write_temp_db(&one_table_schema_db(), "sqlitedump_test_schema.db");
    let db = Database::open(&path).unwrap();
    let schema = db.schema().unwrap();
    assert_eq!(schema.len(), 1);
    assert_eq!(schema[0].kind.as_deref(), Some("table"));
    assert_eq!(schema[0].name.as_deref(), Some("widgets"));
    assert_eq!(schema[0].rootpage, 2);
    assert_eq!(
        schema[0].sql.as_deref(),
        Some("CREATE TABLE widgets (id INTEGER, name TEXT)")
    );
}

#[test]
fn page_one_decodes_its_single_cell_as_a_record() {
    let path = write_temp_db(&one_table_schema_db(), "sqlitedump_test_page.db");
    let db = Database::open(&path).unwrap();
    let page = db.page(1).unwrap();
    assert_eq!(page.cells.len(), 1);
    let record = page.cells[0].as_ref().unwrap();
    assert_eq!(record.rowid, 1);
    assert_eq!(record.values[0], ColumnValue::Text(b"table".to_vec()));
    assert_eq!(record.values[3], ColumnValue::Int(2));
}

#[test]
fn bad_magic_is_rejected_at_open() {
    let mut bytes = one_table_schema_db();
    bytes[0] = b'X';
    let path = write_temp_db(&bytes, "sqlitedump_test_badmagic.db");
    let err = Database::open(&path).unwrap_err();
    assert_eq!(err, sqlitedump::error::Error::BadMagic);
}

#[test]
fn nonexistent_file_is_an_io_error() {
    let err = Database::open("/nonexistent/path/does-not-exist.db").unwrap_err();
    assert!(matches!(err, sqlitedump::error::Error::IoFailed(_)));
}

#[test]
fn text_and_json_renderers_both_succeed_on_a_decodable_file() {
    let path = write_temp_db(&one_table_schema_db(), "sqlitedump_test_render.db");
    let db = Database::open(&path).unwrap();
    let text = sqlitedump::render::text::dump(&db).unwrap();
    assert!(text.contains("widgets") || text.contains("page_size"));
    let json = sqlitedump::render::json::dump(&db).unwrap();
    assert!(json.contains("\"schema\""));
    assert!(json.contains("\"pages\""));
}
