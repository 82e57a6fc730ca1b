use std::fmt;

#[derive(Debug, Clone)]
pub enum LovemeterError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Serialization(String),
    Validation(String),
}

impl LovemeterError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LovemeterError::DatabaseConfig(_) => "E001",
            LovemeterError::DatabaseConnection(_) => "E002",
            LovemeterError::DatabaseOperation(_) => "E003",
            LovemeterError::FileOperation(_) => "E004",
            LovemeterError::Serialization(_) => "E005",
            LovemeterError::Validation(_) => "E006",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LovemeterError::DatabaseConfig(_) => "Database Configuration Error",
            LovemeterError::DatabaseConnection(_) => "Database Connection Error",
            LovemeterError::DatabaseOperation(_) => "Database Operation Error",
            LovemeterError::FileOperation(_) => "File Operation Error",
            LovemeterError::Serialization(_) => "Serialization Error",
            LovemeterError::Validation(_) => "Validation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LovemeterError::DatabaseConfig(msg) => msg,
            LovemeterError::DatabaseConnection(msg) => msg,
            LovemeterError::DatabaseOperation(msg) => msg,
            LovemeterError::FileOperation(msg) => msg,
            LovemeterError::Serialization(msg) => msg,
            LovemeterError::Validation(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LovemeterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 默认使用简洁格式
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LovemeterError {}

// 便捷的构造函数
impl LovemeterError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        LovemeterError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        LovemeterError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        LovemeterError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        LovemeterError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LovemeterError::Serialization(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LovemeterError::Validation(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for LovemeterError {
    fn from(err: sea_orm::DbErr) -> Self {
        LovemeterError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for LovemeterError {
    fn from(err: std::io::Error) -> Self {
        LovemeterError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LovemeterError {
    fn from(err: serde_json::Error) -> Self {
        LovemeterError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LovemeterError>;
