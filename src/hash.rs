//! 平均哈希 (aHash) 与差值哈希 (dHash)
//!
//! 两种算法的缩放、灰度和位序都是固定的，保证不同实现能得到逐位相同的结果：
//!
//! - 灰度：每个像素 `299 * R + 587 * G + 114 * B`（BT.601 × 1000，整数）
//! - 缩放：盒式滤波，`W` 缩放到 `w` 时第 `c` 格覆盖源像素 `[floor(c*W/w), ceil((c+1)*W/w))`，
//!   格子亮度为覆盖像素灰度之和整除像素数（单位为 1/1000 灰度级）
//! - 所有比较都是整数运算，aHash 用 `64 * 格子 > 所有格子之和` 代替与均值比较
//! - 位序：第 `i = y * 8 + x` 位存放在第 `i / 8` 字节的 `7 - i % 8` 位（高位在前）

use std::fmt;
use std::ops::Range;

use crate::decode::CanonicalImage;
use crate::hamming::hamming;

/// 缩放后网格的边长
pub const HASH_SIZE: u32 = 8;
/// 指纹位数
pub const HASH_BITS: u32 = HASH_SIZE * HASH_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Fingerprint([u8; 8]);

impl Fingerprint {
    fn from_bits(bits: impl IntoIterator<Item = bool>) -> Self {
        let mut bytes = [0u8; 8];
        for (i, bit) in bits.into_iter().take(HASH_BITS as usize).enumerate() {
            if bit {
                bytes[i / 8] |= 1 << (7 - i % 8);
            }
        }
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// 汉明距离，范围 0..=64
    pub fn distance(&self, other: &Fingerprint) -> u32 {
        hamming::<{ HASH_BITS as usize }>(&self.0, &other.0)
    }

    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashKind {
    Average,
    Difference,
}

impl HashKind {
    pub fn compute(self, image: &CanonicalImage) -> Fingerprint {
        match self {
            HashKind::Average => average_hash(image),
            HashKind::Difference => difference_hash(image),
        }
    }
}

/// 缩放到 8x8，亮度严格大于均值的格子置 1
pub fn average_hash(image: &CanonicalImage) -> Fingerprint {
    let grid = luma_grid(image, HASH_SIZE, HASH_SIZE);
    let total: u64 = grid.iter().sum();
    let cells = grid.len() as u64;
    Fingerprint::from_bits(grid.iter().map(|&v| v * cells > total))
}

/// 缩放到 9x8，亮度严格大于右侧相邻格子的位置 1
pub fn difference_hash(image: &CanonicalImage) -> Fingerprint {
    let width = HASH_SIZE + 1;
    let grid = luma_grid(image, width, HASH_SIZE);
    let bits = grid
        .chunks_exact(width as usize)
        .flat_map(|row| row.windows(2).map(|pair| pair[0] > pair[1]));
    Fingerprint::from_bits(bits)
}

/// 盒式滤波缩放到 `width x height`，返回按行优先排列的格子亮度
fn luma_grid(image: &CanonicalImage, width: u32, height: u32) -> Vec<u64> {
    let rgb = image.as_rgb();
    let (iw, ih) = (rgb.width(), rgb.height());
    let luma: Vec<u32> = rgb
        .pixels()
        .map(|p| 299 * p[0] as u32 + 587 * p[1] as u32 + 114 * p[2] as u32)
        .collect();

    let mut grid = Vec::with_capacity((width * height) as usize);
    for cy in 0..height {
        let rows = cell_range(cy, height, ih);
        for cx in 0..width {
            let cols = cell_range(cx, width, iw);
            let mut sum = 0u64;
            for y in rows.clone() {
                let offset = (y * iw) as usize;
                sum += luma[offset + cols.start as usize..offset + cols.end as usize]
                    .iter()
                    .map(|&v| v as u64)
                    .sum::<u64>();
            }
            let count = (rows.len() * cols.len()) as u64;
            grid.push(sum / count);
        }
    }
    grid
}

/// 第 `cell` 格在长度为 `len` 的源坐标上覆盖的范围，保证非空
fn cell_range(cell: u32, cells: u32, len: u32) -> Range<u32> {
    let (cell, cells, len) = (cell as u64, cells as u64, len as u64);
    let start = cell * len / cells;
    let end = ((cell + 1) * len).div_ceil(cells);
    start as u32..end as u32
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};

    use super::*;

    fn canonical(image: RgbImage) -> CanonicalImage {
        CanonicalImage::new(image).unwrap()
    }

    fn gray(v: u8) -> Rgb<u8> {
        Rgb([v, v, v])
    }

    #[test]
    fn test_cell_range() {
        assert_eq!(cell_range(0, 8, 16), 0..2);
        assert_eq!(cell_range(7, 8, 16), 14..16);
        // 不能整除时相邻格子共享边界像素
        assert_eq!(cell_range(0, 8, 10), 0..2);
        assert_eq!(cell_range(1, 8, 10), 1..3);
        assert_eq!(cell_range(7, 8, 10), 8..10);
        // 源图小于网格时放大
        assert_eq!(cell_range(0, 9, 1), 0..1);
        assert_eq!(cell_range(8, 9, 1), 0..1);
        assert_eq!(cell_range(4, 9, 3), 1..2);
    }

    #[test]
    fn test_solid_image_is_all_zero() {
        let image = canonical(RgbImage::from_pixel(100, 100, Rgb([128, 64, 32])));
        assert_eq!(average_hash(&image), Fingerprint::default());
        assert_eq!(difference_hash(&image), Fingerprint::default());
    }

    #[test]
    fn test_flat_colors_hash_to_zero() {
        let colors = [
            [0, 0, 0],
            [0, 0, 1],
            [1, 0, 0],
            [0, 1, 0],
            [7, 3, 200],
            [255, 255, 254],
            [33, 99, 17],
        ];
        let hashes = colors
            .iter()
            .flat_map(|&c| {
                // 不能整除的尺寸，让格子覆盖的像素数各不相同
                let image = canonical(RgbImage::from_pixel(67, 45, Rgb(c)));
                [average_hash(&image), difference_hash(&image)]
            })
            .collect::<Vec<_>>();
        for h in &hashes {
            assert_eq!(*h, Fingerprint::default(), "{}", h);
            for other in &hashes {
                assert_eq!(h.distance(other), 0);
            }
        }
    }

    #[test]
    fn test_average_hash_ties_with_mean() {
        // 亮度 2/1/0 的行各占 2/4/2 行，均值正好是 1：等于均值的格子不置位
        let image = canonical(RgbImage::from_fn(8, 8, |_, y| {
            gray(match y {
                0..2 => 2,
                2..6 => 1,
                _ => 0,
            })
        }));
        assert_eq!(average_hash(&image).as_bytes(), &[0xff, 0xff, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_tiny_image() {
        let image = canonical(RgbImage::from_pixel(1, 1, gray(200)));
        assert_eq!(average_hash(&image), Fingerprint::default());
        assert_eq!(difference_hash(&image), Fingerprint::default());
    }

    #[test]
    fn test_average_hash_bit_order() {
        // 只有左上角一个亮格
        let image =
            canonical(RgbImage::from_fn(8, 8, |x, y| gray(if x == 0 && y == 0 { 255 } else { 0 })));
        let hash = average_hash(&image);
        assert_eq!(hash.as_bytes(), &[0x80, 0, 0, 0, 0, 0, 0, 0]);

        let image =
            canonical(RgbImage::from_fn(8, 8, |x, y| gray(if x == 7 && y == 7 { 255 } else { 0 })));
        assert_eq!(average_hash(&image).as_bytes(), &[0, 0, 0, 0, 0, 0, 0, 0x01]);
    }

    #[test]
    fn test_average_hash_right_half_bright() {
        let image = canonical(RgbImage::from_fn(16, 16, |x, _| gray(if x < 8 { 0 } else { 255 })));
        assert_eq!(average_hash(&image).as_bytes(), &[0x0f; 8]);
        assert_eq!(average_hash(&image).to_hex(), "0f0f0f0f0f0f0f0f");
    }

    #[test]
    fn test_difference_hash_gradients() {
        // 从左到右变亮：左侧永远不大于右侧
        let ltr = canonical(RgbImage::from_fn(90, 80, |x, _| gray((x * 255 / 89) as u8)));
        // 从左到右变暗：左侧永远大于右侧
        let rtl = canonical(RgbImage::from_fn(90, 80, |x, _| gray(((89 - x) * 255 / 89) as u8)));

        let h1 = difference_hash(&ltr);
        let h2 = difference_hash(&rtl);
        assert_eq!(h1, Fingerprint::default());
        assert_eq!(h2.as_bytes(), &[0xff; 8]);
        assert_eq!(h1.distance(&h2), HASH_BITS);
    }

    #[test]
    fn test_difference_hash_single_edge() {
        // 9x8 图像，第一列亮，其余暗：每行只有第 0 位为 1
        let image = canonical(RgbImage::from_fn(9, 8, |x, _| gray(if x == 0 { 255 } else { 0 })));
        assert_eq!(difference_hash(&image).as_bytes(), &[0x80; 8]);
    }

    #[test]
    fn test_luma_weighting() {
        // 纯绿比纯红亮，纯红比纯蓝亮
        let image = canonical(RgbImage::from_fn(3, 1, |x, _| match x {
            0 => Rgb([0, 255, 0]),
            1 => Rgb([255, 0, 0]),
            _ => Rgb([0, 0, 255]),
        }));
        let grid = luma_grid(&image, 3, 1);
        assert_eq!(grid, vec![149_685, 76_245, 29_070]);
    }

    #[test]
    fn test_hash_is_deterministic() {
        let image = canonical(RgbImage::from_fn(37, 23, |x, y| {
            Rgb([(x * 7) as u8, (y * 11) as u8, ((x + y) * 3) as u8])
        }));
        for kind in [HashKind::Average, HashKind::Difference] {
            assert_eq!(kind.compute(&image), kind.compute(&image.clone()));
        }
    }
}
