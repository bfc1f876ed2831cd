use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use indicatif::ProgressBar;
use log::info;
use rayon::ThreadPoolBuilder;
use tokio::task::block_in_place;

use crate::batch;
use crate::cli::SubCommandExtend;
use crate::config::{CompareOptions, Opts};
use crate::table::{JobTable, results_path};
use crate::utils::pb_style;

#[derive(Parser, Debug, Clone)]
pub struct CompareCommand {
    #[command(flatten)]
    pub options: CompareOptions,
    /// 结果文件路径，默认在任务表路径后追加 `results.csv`
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl SubCommandExtend for CompareCommand {
    async fn run(&self, opts: &Opts) -> Result<()> {
        let table = JobTable::read(&opts.path)?;
        info!("开始比较 {} 组图片", table.len());

        let pool = ThreadPoolBuilder::new().num_threads(self.options.threads).build()?;
        let pb = ProgressBar::no_length().with_style(pb_style());

        let outcome = block_in_place(|| {
            pool.install(|| batch::run(&table, self.options.scale, self.options.fail_fast, &pb))
        })?;

        let output = self.output.clone().unwrap_or_else(|| results_path(&opts.path));
        block_in_place(|| outcome.table.write(&output))?;
        info!("结果已写入 {}", output.display());

        if outcome.failed > 0 {
            bail!("{} 行比较失败，详见 {}", outcome.failed, output.display());
        }
        Ok(())
    }
}
