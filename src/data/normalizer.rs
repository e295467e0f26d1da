use super::StockRow;
use crate::error::{Result, SiteError};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

/// Recognised columns, matched case-insensitively after trimming
#[derive(Debug, Clone, Copy)]
enum Field {
    Symbol,
    Description,
    Exchange,
    Sector,
    Industry,
    Open,
    High,
    Low,
    Close,
}

impl Field {
    const ALL: [Field; 9] = [
        Field::Symbol,
        Field::Description,
        Field::Exchange,
        Field::Sector,
        Field::Industry,
        Field::Open,
        Field::High,
        Field::Low,
        Field::Close,
    ];

    fn header(self) -> &'static str {
        match self {
            Field::Symbol => "symbol",
            Field::Description => "description",
            Field::Exchange => "exchange",
            Field::Sector => "sector",
            Field::Industry => "industry",
            Field::Open => "open",
            Field::High => "high",
            Field::Low => "low",
            Field::Close => "close",
        }
    }
}

/// Column index for each recognised field, if present in the header
struct ColumnMap {
    indices: [Option<usize>; 9],
}

impl ColumnMap {
    fn from_headers(headers: &csv::ByteRecord) -> Self {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| {
                String::from_utf8_lossy(h)
                    .trim_start_matches('\u{feff}')
                    .trim()
                    .to_lowercase()
            })
            .collect();

        let mut indices = [None; 9];
        for (slot, field) in indices.iter_mut().zip(Field::ALL) {
            // First matching column wins on duplicate headers
            *slot = normalized.iter().position(|h| h == field.header());
        }
        Self { indices }
    }

    fn text(&self, record: &csv::ByteRecord, field: Field) -> String {
        self.indices[field as usize]
            .and_then(|idx| record.get(idx))
            .map(|cell| String::from_utf8_lossy(cell).trim().to_string())
            .unwrap_or_default()
    }

    fn price(&self, record: &csv::ByteRecord, field: Field) -> Option<Decimal> {
        parse_price(&self.text(record, field))
    }
}

/// Parse a price cell; anything unparseable is absent, not zero.
fn parse_price(cell: &str) -> Option<Decimal> {
    if cell.is_empty() {
        return None;
    }
    Decimal::from_str(cell)
        .or_else(|_| Decimal::from_scientific(cell))
        .ok()
}

/// Read every record of a country CSV in file order.
///
/// Ragged rows are accepted; cells past the end of a short row count as
/// missing.
pub fn read_rows<R: Read>(reader: R) -> csv::Result<Vec<StockRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(csv_reader.byte_headers()?);

    let mut rows = Vec::new();
    for result in csv_reader.byte_records() {
        let record = result?;
        rows.push(StockRow {
            symbol: columns.text(&record, Field::Symbol),
            description: columns.text(&record, Field::Description),
            exchange: columns.text(&record, Field::Exchange),
            sector: columns.text(&record, Field::Sector),
            industry: columns.text(&record, Field::Industry),
            open: columns.price(&record, Field::Open),
            high: columns.price(&record, Field::High),
            low: columns.price(&record, Field::Low),
            close: columns.price(&record, Field::Close),
        });
    }

    Ok(rows)
}

/// Open and normalize one country file
pub fn read_country_file(path: &Path) -> Result<Vec<StockRow>> {
    let file = File::open(path).map_err(|e| SiteError::io(path, e))?;
    read_rows(BufReader::new(file)).map_err(|source| SiteError::Csv {
        path: path.to_path_buf(),
        source,
    })
}
