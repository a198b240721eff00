//! # 统一错误处理模块
//!
//! 定义 atkread 的所有错误类型，使用 `thiserror` 派生。
//! 只有容器级错误（文件无法打开或解码）是致命的；
//! 提取类错误被隔离到单条记录，不会中断整个解析流程。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// atkread 统一错误类型
#[derive(Error, Debug)]
pub enum AtkError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 容器错误（致命：整个文件不可用）
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read NetCDF container: {path}\nReason: {reason}")]
    ContainerError { path: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 提取错误（可恢复：只影响单条记录）
    // ─────────────────────────────────────────────────────────────
    #[error("Pattern '{pattern}' not found in {context}")]
    PatternNotFound { pattern: String, context: String },

    #[error("Failed to parse unit token: '{token}'")]
    UnitParseError { token: String },

    #[error("No {what} correlated for {key}")]
    CorrelationMiss { key: String, what: String },

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },

    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, AtkError>;
