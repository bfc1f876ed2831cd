use indicatif::{ParallelProgressIterator, ProgressBar};
use log::{info, warn};
use rayon::prelude::*;

use crate::config::ScoreScale;
use crate::error::Result;
use crate::scorer::{Comparison, compare};
use crate::table::JobTable;
use crate::utils::format_decimal;

/// 结果表新增的两列
pub const SCORE_COLUMN: &str = "Similar";
pub const ELAPSED_COLUMN: &str = "Elapsed";

/// 失败行的耗时列
pub const FAILED_ELAPSED: &str = "-";

#[derive(Debug)]
pub struct BatchOutcome {
    /// 追加了相似度与耗时两列的任务表
    pub table: JobTable,
    /// 失败的行数
    pub failed: usize,
}

/// 并行比较每一行，结果按行号排列，与完成顺序无关
///
/// 需要限制线程数时，在 `rayon::ThreadPool::install` 中调用
pub fn score_rows(
    table: &JobTable,
    scale: ScoreScale,
    pb: &ProgressBar,
) -> Vec<Result<Comparison>> {
    pb.set_length(table.len() as u64);
    table
        .rows()
        .par_iter()
        .progress_with(pb.clone())
        .map(|row| compare(&row[0], &row[1], scale))
        .collect()
}

/// 比较整张任务表
///
/// 默认单行失败不影响其他行，失败原因写入相似度一列；`fail_fast` 时遇到错误直接返回，
/// 此时返回的不一定是行号最小的错误。无论成功与否，返回前进度条都会被清除
pub fn run(
    table: &JobTable,
    scale: ScoreScale,
    fail_fast: bool,
    pb: &ProgressBar,
) -> Result<BatchOutcome> {
    let results = score_all(table, scale, fail_fast, pb);
    pb.finish_and_clear();
    let results = results?;

    let mut header = table.header().to_vec();
    header.push(SCORE_COLUMN.to_string());
    header.push(ELAPSED_COLUMN.to_string());

    let mut failed = 0;
    let rows = table
        .rows()
        .iter()
        .zip(results)
        .enumerate()
        .map(|(i, (row, result))| {
            let mut row = row.clone();
            match result {
                Ok(cmp) => {
                    row.push(format_decimal(cmp.score));
                    row.push(format_decimal(cmp.elapsed_ms()));
                }
                Err(e) => {
                    // 表头占第 1 行
                    warn!("第 {} 行比较失败: {}", i + 2, e);
                    failed += 1;
                    row.push(e.to_string());
                    row.push(FAILED_ELAPSED.to_string());
                }
            }
            row
        })
        .collect();

    info!("比较完成，共 {} 行，失败 {} 行", table.len(), failed);

    Ok(BatchOutcome { table: JobTable::new(header, rows), failed })
}

fn score_all(
    table: &JobTable,
    scale: ScoreScale,
    fail_fast: bool,
    pb: &ProgressBar,
) -> Result<Vec<Result<Comparison>>> {
    if !fail_fast {
        return Ok(score_rows(table, scale, pb));
    }
    pb.set_length(table.len() as u64);
    table
        .rows()
        .par_iter()
        .progress_with(pb.clone())
        .map(|row| compare(&row[0], &row[1], scale).map(Ok))
        .collect()
}
