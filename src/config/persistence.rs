//! File locations for OHLCV input data

use std::path::PathBuf;

/// Directory holding `{symbol}{timeframe}.csv` files
pub const DATA_PATH: &str = "data";

pub struct DataFiles {
    pub directory: &'static str,
    pub extension: &'static str,
}

pub struct PersistenceConfig {
    pub data: DataFiles,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    data: DataFiles {
        directory: DATA_PATH,
        extension: "csv",
    },
};

/// Path of the CSV for a symbol/timeframe pair.
/// Example: ("BTCUSDT", "1d") -> "data/btcusdt1d.csv"
pub fn data_csv_path(symbol: &str, timeframe: &str) -> PathBuf {
    let filename = format!(
        "{}{}.{}",
        symbol.to_lowercase(),
        timeframe.to_lowercase(),
        PERSISTENCE.data.extension
    );
    PathBuf::from(PERSISTENCE.data.directory).join(filename)
}
