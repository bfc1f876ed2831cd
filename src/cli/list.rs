use anyhow::Result;
use clap::{Parser, ValueEnum};
use serde::Serialize;

use crate::cli::SubCommandExtend;
use crate::config::Opts;
use crate::table::JobTable;

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// 输出格式
    #[arg(long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Table)]
    pub output_format: OutputFormat,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
struct Pair<'a> {
    a: &'a str,
    b: &'a str,
}

impl SubCommandExtend for ListCommand {
    async fn run(&self, opts: &Opts) -> Result<()> {
        let table = JobTable::read(&opts.path)?;
        print!("{}", render(&table, &self.output_format)?);
        Ok(())
    }
}

fn render(table: &JobTable, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let pairs = table.pairs().map(|(a, b)| Pair { a, b }).collect::<Vec<_>>();
            Ok(serde_json::to_string_pretty(&pairs)? + "\n")
        }
        OutputFormat::Table => {
            Ok(table.pairs().map(|(a, b)| format!("{} comparing with {}\n", a, b)).collect())
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Table,
}
