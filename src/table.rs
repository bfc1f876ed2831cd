use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use log::debug;

use crate::error::{Error, Result};

/// 任务表的分隔符
pub const DELIMITER: u8 = b' ';

/// 以空格分隔的任务表，第一行为表头
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl JobTable {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    /// 读取任务表
    ///
    /// 表头不参与校验；数据行至少需要两列非空的图片 A 和图片 B，多余的列原样保留
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let unreadable =
            |reason: String| Error::JobTableUnreadable { path: path.to_path_buf(), reason };

        let file = std::fs::File::open(path).map_err(|e| unreadable(e.to_string()))?;
        let table = Self::from_reader(file).map_err(unreadable)?;
        debug!("读取任务表 {}，共 {} 行", path.display(), table.rows.len());
        Ok(table)
    }

    /// 从任意输入读取任务表，出错时返回错误原因
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, String> {
        let mut reader = ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records = reader.records();
        let header = match records.next() {
            Some(record) => record.map_err(|e| e.to_string())?,
            None => return Err("任务表为空".to_string()),
        };

        let mut rows = vec![];
        for record in records {
            let record = record.map_err(|e| e.to_string())?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            if record.len() < 2 {
                return Err(format!("第 {} 行只有 {} 列，至少需要 2 列", line, record.len()));
            }
            // 连续的空格会切出空列，把图片 B 挤到第 3 列
            if let Some(col) = record.iter().take(2).position(str::is_empty) {
                return Err(format!(
                    "第 {} 行第 {} 列为空，请检查是否有连续的空格",
                    line,
                    col + 1
                ));
            }
            rows.push(record.iter().map(str::to_owned).collect());
        }

        Ok(Self { header: header.iter().map(str::to_owned).collect(), rows })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 每个数据行的 (图片 A, 图片 B)
    pub fn pairs(&self) -> impl ExactSizeIterator<Item = (&str, &str)> {
        self.rows.iter().map(|row| (row[0].as_str(), row[1].as_str()))
    }

    /// 写入文件，格式与输入相同
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let results_err = |source| Error::ResultsWrite { path: path.to_path_buf(), source };

        let file = std::fs::File::create(path).map_err(|e| results_err(e.into()))?;
        self.to_writer(file).map_err(results_err)
    }

    pub fn to_writer<W: io::Write>(&self, writer: W) -> csv::Result<()> {
        let mut writer =
            WriterBuilder::new().delimiter(DELIMITER).flexible(true).from_writer(writer);
        writer.write_record(&self.header)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// 结果文件路径：在输入路径后直接追加 `results.csv`，而不是替换扩展名
pub fn results_path(input: &Path) -> PathBuf {
    let mut path = OsString::from(input.as_os_str());
    path.push("results.csv");
    PathBuf::from(path)
}
