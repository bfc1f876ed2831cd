use bytemuck::pod_read_unaligned;

/// 计算两个 N 位向量的汉明距离
#[inline(always)]
pub fn hamming<const N: usize>(va: &[u8], vb: &[u8]) -> u32 {
    match N {
        64 => hamming_64(va, vb),
        _ => hamming_naive::<N>(va, vb),
    }
}

#[inline(always)]
pub fn hamming_naive<const N: usize>(va: &[u8], vb: &[u8]) -> u32 {
    let mut sum = 0;
    for i in 0..N / 8 {
        sum += (va[i] ^ vb[i]).count_ones();
    }
    sum
}

#[inline(always)]
pub fn hamming_64(va: &[u8], vb: &[u8]) -> u32 {
    // 指纹只是 [u8; 8]，不保证按 u64 对齐
    let a: u64 = pod_read_unaligned(&va[..8]);
    let b: u64 = pod_read_unaligned(&vb[..8]);
    (a ^ b).count_ones()
}
