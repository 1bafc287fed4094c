use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Unsupported granularity '{value}': expected day, week or month")]
    UnsupportedGranularity { value: String },

    #[error("Order data unavailable: {message}")]
    DataUnavailable { message: String },

    #[error("Dashboard build cancelled: {message}")]
    Cancelled { message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

/// 錯誤分類，對應呼叫端可依賴的失敗語義
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 輸入在任何資料存取前就被拒絕
    InvalidArgument,
    /// 訂單資料取不到，整個儀表板建置失敗
    DataUnavailable,
    /// 逾時或取消，沒有部分結果
    Cancelled,
    Config,
    Io,
}

impl DashboardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DashboardError::InvalidDate { .. } => ErrorKind::InvalidArgument,
            DashboardError::UnsupportedGranularity { .. } => ErrorKind::InvalidArgument,
            DashboardError::DataUnavailable { .. } => ErrorKind::DataUnavailable,
            DashboardError::ApiError(_) => ErrorKind::DataUnavailable,
            DashboardError::Cancelled { .. } => ErrorKind::Cancelled,
            DashboardError::ConfigError { .. }
            | DashboardError::InvalidConfigValueError { .. }
            | DashboardError::MissingConfigError { .. } => ErrorKind::Config,
            DashboardError::CsvError(_)
            | DashboardError::ZipError(_)
            | DashboardError::IoError(_)
            | DashboardError::SerializationError(_) => ErrorKind::Io,
        }
    }

    /// CLI 程序結束碼，依錯誤分類決定
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::InvalidArgument => 2,
            ErrorKind::DataUnavailable => 3,
            ErrorKind::Cancelled => 4,
            ErrorKind::Config => 1,
            ErrorKind::Io => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
