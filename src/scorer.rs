use std::path::Path;
use std::time::{Duration, Instant};

use log::debug;

use crate::config::ScoreScale;
use crate::decode::decode;
use crate::error::Result;
use crate::hash::{Fingerprint, HashKind};

/// 一次比较的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    /// aHash 与 dHash 距离中较大的一个
    pub distance: u32,
    /// 归一化后的相似度，0 表示完全相同
    pub score: f64,
    /// 从开始解码到计算出距离的耗时
    pub elapsed: Duration,
}

impl Comparison {
    /// 耗时的整数毫秒
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_millis() as f64
    }
}

/// 单张图片的两种指纹
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageFingerprints {
    pub average: Fingerprint,
    pub difference: Fingerprint,
}

impl ImageFingerprints {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let image = decode(path)?;
        Ok(Self {
            average: HashKind::Average.compute(&image),
            difference: HashKind::Difference.compute(&image),
        })
    }

    /// 两种距离中较大的一个，只有两种哈希都认为接近时才算相似
    pub fn distance(&self, other: &ImageFingerprints) -> u32 {
        let d_avg = self.average.distance(&other.average);
        let d_diff = self.difference.distance(&other.difference);
        d_avg.max(d_diff)
    }
}

/// 比较两张图片，任意一张解码失败都会返回错误
pub fn compare<P: AsRef<Path>, Q: AsRef<Path>>(
    image1: P,
    image2: Q,
    scale: ScoreScale,
) -> Result<Comparison> {
    let start = Instant::now();

    let fp1 = ImageFingerprints::from_file(&image1)?;
    let fp2 = ImageFingerprints::from_file(&image2)?;
    let distance = fp1.distance(&fp2);

    let elapsed = start.elapsed();
    debug!(
        "{} [{}, {}] vs {} [{}, {}]: distance={}, {:.2}ms",
        image1.as_ref().display(),
        fp1.average,
        fp1.difference,
        image2.as_ref().display(),
        fp2.average,
        fp2.difference,
        distance,
        elapsed.as_secs_f64() * 1000.0,
    );

    Ok(Comparison { distance, score: scale.apply(distance), elapsed })
}
