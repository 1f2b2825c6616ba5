use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortyError {
    Transport(String),
    HttpStatus(u16, String),
    MalformedResponse(String),
    Validation(String),
    Unauthenticated(String),
    Cancelled(String),
    Clipboard(String),
    Config(String),
    FileOperation(String),
    Serialization(String),
    Busy(String),
}

impl ShortyError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ShortyError::Transport(_) => "E001",
            ShortyError::HttpStatus(..) => "E002",
            ShortyError::MalformedResponse(_) => "E003",
            ShortyError::Validation(_) => "E004",
            ShortyError::Unauthenticated(_) => "E005",
            ShortyError::Cancelled(_) => "E006",
            ShortyError::Clipboard(_) => "E007",
            ShortyError::Config(_) => "E008",
            ShortyError::FileOperation(_) => "E009",
            ShortyError::Serialization(_) => "E010",
            ShortyError::Busy(_) => "E011",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ShortyError::Transport(_) => "Network Error",
            ShortyError::HttpStatus(..) => "Server Error",
            ShortyError::MalformedResponse(_) => "Malformed Response",
            ShortyError::Validation(_) => "Validation Error",
            ShortyError::Unauthenticated(_) => "Not Logged In",
            ShortyError::Cancelled(_) => "Request Cancelled",
            ShortyError::Clipboard(_) => "Clipboard Error",
            ShortyError::Config(_) => "Configuration Error",
            ShortyError::FileOperation(_) => "File Operation Error",
            ShortyError::Serialization(_) => "Serialization Error",
            ShortyError::Busy(_) => "Request Pending",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ShortyError::Transport(msg) => msg,
            ShortyError::HttpStatus(_, msg) => msg,
            ShortyError::MalformedResponse(msg) => msg,
            ShortyError::Validation(msg) => msg,
            ShortyError::Unauthenticated(msg) => msg,
            ShortyError::Cancelled(msg) => msg,
            ShortyError::Clipboard(msg) => msg,
            ShortyError::Config(msg) => msg,
            ShortyError::FileOperation(msg) => msg,
            ShortyError::Serialization(msg) => msg,
            ShortyError::Busy(msg) => msg,
        }
    }

    /// HTTP status carried by the error, if the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ShortyError::HttpStatus(status, _) => Some(*status),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ShortyError::Cancelled(_))
    }

    /// 格式化为彩色输出（用于 CLI 模式）
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

    /// 格式化为简洁输出（用于 TUI 状态栏）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ShortyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ShortyError {}

// 便捷的构造函数
impl ShortyError {
    pub fn transport<T: Into<String>>(msg: T) -> Self {
        ShortyError::Transport(msg.into())
    }

    pub fn http_status<T: Into<String>>(status: u16, msg: T) -> Self {
        ShortyError::HttpStatus(status, msg.into())
    }

    pub fn malformed_response<T: Into<String>>(msg: T) -> Self {
        ShortyError::MalformedResponse(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ShortyError::Validation(msg.into())
    }

    pub fn unauthenticated<T: Into<String>>(msg: T) -> Self {
        ShortyError::Unauthenticated(msg.into())
    }

    pub fn cancelled<T: Into<String>>(msg: T) -> Self {
        ShortyError::Cancelled(msg.into())
    }

    pub fn clipboard<T: Into<String>>(msg: T) -> Self {
        ShortyError::Clipboard(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        ShortyError::Config(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        ShortyError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ShortyError::Serialization(msg.into())
    }

    pub fn busy<T: Into<String>>(msg: T) -> Self {
        ShortyError::Busy(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<std::io::Error> for ShortyError {
    fn from(err: std::io::Error) -> Self {
        ShortyError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ShortyError {
    fn from(err: serde_json::Error) -> Self {
        ShortyError::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for ShortyError {
    fn from(err: url::ParseError) -> Self {
        ShortyError::Config(format!("Invalid URL: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, ShortyError>;
