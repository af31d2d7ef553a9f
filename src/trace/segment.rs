//! 记录切分
//!
//! 两种切分方式：
//! - **时间戳切分**：以 `^<字母> <时间>` 开头的行作为一条记录的起点，直到下一个起点之前；
//!   起点的字母在切分时就决定了后续使用的语法（`t` 带 PacketStamp，`r` 不带）。
//! - **尺寸标记切分**：以字面量 `(size=40)` 分块，只保留以 `t` 开头的块，
//!   用于只需要发送时刻与 TxRange 的时间轴。

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::Split;

use super::kv::NUMBER;
use crate::error::{Result, TraceError};

/// 固定负载长度标记，尺寸标记切分以它为分隔符
pub const SIZE_MARKER: &str = "(size=40)";

static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^([A-Za-z])[ \t]+{NUMBER}(?:[ \t]|$)")).expect("record marker regex")
});

/// 记录类型（判别字母）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Transmit,
    Receive,
}

impl RecordKind {
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            't' => Some(Self::Transmit),
            'r' => Some(Self::Receive),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Self::Transmit => 't',
            Self::Receive => 'r',
        }
    }
}

/// 一条原始记录：输入缓冲区中的一段连续文本
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord<'a> {
    pub kind: RecordKind,
    /// 第几条记录（从 1 开始）
    pub ordinal: usize,
    /// 在缓冲区中的字节偏移，仅用于诊断
    pub offset: usize,
    pub text: &'a str,
}

fn marker_letter(line: &str) -> Option<char> {
    let caps = MARKER_RE.captures(line.trim_end_matches('\r'))?;
    caps[1].chars().next()
}

/// 时间戳切分迭代器，见 [`segment_records`]
#[derive(Debug, Clone)]
pub struct Records<'a> {
    buf: &'a str,
    pos: usize,
    ordinal: usize,
    failed: bool,
}

/// 按记录起点切分整个 trace。
///
/// 惰性产出；遇到第一个错误后产出该错误并结束。不修改输入，可对同一缓冲区重新调用。
pub fn segment_records(buf: &str) -> Records<'_> {
    Records {
        buf,
        pos: 0,
        ordinal: 0,
        failed: false,
    }
}

impl<'a> Records<'a> {
    /// 返回 (行起点, 行内容, 下一行起点)
    fn line(&self, pos: usize) -> Option<(usize, &'a str, usize)> {
        if pos >= self.buf.len() {
            return None;
        }
        let rest = &self.buf[pos..];
        match rest.find('\n') {
            Some(i) => Some((pos, &rest[..i], pos + i + 1)),
            None => Some((pos, rest, self.buf.len())),
        }
    }

    fn fail(&mut self, err: TraceError) -> Option<Result<RawRecord<'a>>> {
        self.failed = true;
        Some(Err(err))
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<RawRecord<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let (start, letter) = loop {
            let (line_start, line, next) = self.line(self.pos)?;
            self.pos = next;
            if let Some(letter) = marker_letter(line) {
                break (line_start, letter);
            }
            if line.trim().is_empty() {
                continue;
            }
            // 记录之间不会出现游离文本，能走到这里只可能是第一个起点之前
            return self.fail(TraceError::malformed(
                self.ordinal + 1,
                format!("text before the first record marker: {:?}", line.trim()),
            ));
        };

        self.ordinal += 1;
        let ordinal = self.ordinal;
        let Some(kind) = RecordKind::from_letter(letter) else {
            return self.fail(TraceError::UnknownRecordType { ordinal, letter });
        };

        let mut end = self.pos;
        while let Some((_, line, next)) = self.line(self.pos) {
            if marker_letter(line).is_some() {
                break;
            }
            self.pos = next;
            end = next;
        }

        Some(Ok(RawRecord {
            kind,
            ordinal,
            offset: start,
            text: self.buf[start..end].trim_end(),
        }))
    }
}

/// 尺寸标记切分出的一个发送块
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransmitBlock<'a> {
    /// 在所有非空块中的序号（从 1 开始），接收块也计数
    pub ordinal: usize,
    /// 去掉首尾空白后的块文本
    pub text: &'a str,
}

/// 尺寸标记切分迭代器，见 [`transmit_blocks`]
#[derive(Debug, Clone)]
pub struct TransmitBlocks<'a> {
    parts: Split<'a, &'static str>,
    ordinal: usize,
}

/// 按 [`SIZE_MARKER`] 切分；空块丢弃，非 `t` 开头的块静默丢弃。
pub fn transmit_blocks(buf: &str) -> TransmitBlocks<'_> {
    TransmitBlocks {
        parts: buf.split(SIZE_MARKER),
        ordinal: 0,
    }
}

impl<'a> Iterator for TransmitBlocks<'a> {
    type Item = TransmitBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for part in self.parts.by_ref() {
            let text = part.trim();
            if text.is_empty() {
                continue;
            }
            self.ordinal += 1;
            if text.starts_with('t') {
                return Some(TransmitBlock {
                    ordinal: self.ordinal,
                    text,
                });
            }
        }
        None
    }
}
