//! 错误类型
//!
//! 解析失败是整体性的：调用方要么拿到完整结果，要么拿到描述第一条出错记录的错误。

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TraceError>;

#[derive(Debug, Error)]
pub enum TraceError {
    /// 记录文本不符合其预期语法（ordinal 从 1 开始）
    #[error("record #{ordinal} is malformed: {reason}")]
    MalformedRecord { ordinal: usize, reason: String },

    /// 判别字母不是 `t` / `r`
    #[error("record #{ordinal} has unknown type letter '{letter}'")]
    UnknownRecordType { ordinal: usize, letter: char },

    /// 输入格式正确，但过滤后没有任何记录
    #[error("no {what} records found in input")]
    EmptyInput { what: &'static str },

    #[error("invalid capture json: {0}")]
    Json(#[from] serde_json::Error),
}

impl TraceError {
    pub(crate) fn malformed(ordinal: usize, reason: impl Into<String>) -> Self {
        TraceError::MalformedRecord {
            ordinal,
            reason: reason.into(),
        }
    }

    /// 出错记录的位置（EmptyInput / Json 没有位置）
    pub fn ordinal(&self) -> Option<usize> {
        match self {
            TraceError::MalformedRecord { ordinal, .. }
            | TraceError::UnknownRecordType { ordinal, .. } => Some(*ordinal),
            TraceError::EmptyInput { .. } | TraceError::Json(_) => None,
        }
    }
}
