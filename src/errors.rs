#[derive(Debug)]
pub enum TableError {
    MissingTimeColumn {
        path: std::path::PathBuf,
    },
    NonNumericCell {
        path: std::path::PathBuf,
        column: String,
        row: usize,
        cell: String,
    },
    EmptyTable {
        path: std::path::PathBuf,
    },
    MissingRow {
        path: std::path::PathBuf,
        row: String,
    },
}

#[derive(Debug)]
pub enum FluorkinError {
    Io {
        source: std::io::Error,
        path: Option<std::path::PathBuf>,
    },
    Csv(csv::Error),
    ParseError {
        msg: String,
    },
    Table(TableError),
    ChannelCountMismatch {
        configured: usize,
        provided: usize,
    },
    PeakIndexOutOfRange {
        column: String,
        index: usize,
        len: usize,
    },
}

impl std::fmt::Display for FluorkinError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for FluorkinError {}

pub type Result<T> = std::result::Result<T, FluorkinError>;

impl From<TableError> for FluorkinError {
    fn from(x: TableError) -> Self {
        Self::Table(x)
    }
}

impl From<csv::Error> for FluorkinError {
    fn from(x: csv::Error) -> Self {
        Self::Csv(x)
    }
}

impl From<toml::de::Error> for FluorkinError {
    fn from(x: toml::de::Error) -> Self {
        Self::ParseError { msg: x.to_string() }
    }
}

impl From<serde_json::Error> for FluorkinError {
    fn from(x: serde_json::Error) -> Self {
        Self::ParseError { msg: x.to_string() }
    }
}

impl From<std::num::ParseIntError> for FluorkinError {
    fn from(x: std::num::ParseIntError) -> Self {
        Self::ParseError { msg: x.to_string() }
    }
}

impl From<std::num::ParseFloatError> for FluorkinError {
    fn from(x: std::num::ParseFloatError) -> Self {
        Self::ParseError { msg: x.to_string() }
    }
}
