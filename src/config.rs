use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::*;
use crate::hash::HASH_BITS;

#[derive(Parser, Debug, Clone)]
pub struct CompareOptions {
    /// 并行比较的线程数，默认为 CPU 核心数
    #[arg(short = 'j', long, value_name = "N", default_value_t = num_cpus::get())]
    pub threads: usize,
    /// 任意一行失败时立即中止，不写入结果文件
    #[arg(long)]
    pub fail_fast: bool,
    /// 相似度的归一化方式
    #[arg(long, value_enum, default_value_t = ScoreScale::Legacy)]
    pub scale: ScoreScale,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "imcmp", version, about = "逐行比较任务表中两张图片的相似度")]
pub struct Opts {
    #[command(subcommand)]
    pub subcmd: SubCommand,
    /// 任务表路径，空格分隔，第一行为表头
    #[arg(short, long, value_name = "FILE")]
    pub path: PathBuf,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SubCommand {
    /// 比较任务表中的图片，并写入 `<path>results.csv`
    #[command(visible_alias = "c")]
    Compare(CompareCommand),
    /// 列出将要比较的图片
    #[command(visible_alias = "l")]
    List(ListCommand),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreScale {
    /// 距离除以 100，与旧版输出保持一致
    Legacy,
    /// 距离除以指纹位数，结果在 0 到 1 之间
    BitLength,
}

impl ScoreScale {
    pub fn divisor(self) -> f64 {
        match self {
            ScoreScale::Legacy => 100.0,
            ScoreScale::BitLength => HASH_BITS as f64,
        }
    }

    pub fn apply(self, distance: u32) -> f64 {
        distance as f64 / self.divisor()
    }
}
