use indicatif::ProgressStyle;

pub fn pb_style() -> ProgressStyle {
    ProgressStyle::with_template("[{elapsed_precise}] {wide_bar} {pos}/{len} ({eta}) {msg}")
        .expect("failed to build progress style")
}

/// 以最短的十进制形式输出，如 `0`、`0.05`、`12`
pub fn format_decimal(v: f64) -> String {
    format!("{}", v)
}
