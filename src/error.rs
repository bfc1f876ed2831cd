use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// 任务表无法打开或格式错误，此时还没有进行任何比较
    #[error("无法读取任务表 '{}': {reason}", path.display())]
    JobTableUnreadable { path: PathBuf, reason: String },
    /// 扩展名不在支持列表中，不会尝试读取文件内容
    #[error("不支持的图片格式: '{}'", path.display())]
    UnsupportedFormat { path: PathBuf },
    /// 扩展名合法，但文件无法打开或解码
    #[error("无法解码图片 '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("无法写入结果文件 '{}': {source}", path.display())]
    ResultsWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
