// via https://fgiesen.wordpress.com/2009/12/13/decoding-morton-codes/
// extended to 64bit codes, 21 bits per dimension

pub const MORTON_BITS_PER_DIMENSION: u32 = 21;
pub const MORTON_MAX_COORDINATE: u32 = (1 << MORTON_BITS_PER_DIMENSION) - 1;

// "Insert" two 0 bits after each of the 21 low bits of x
// Example: input 0b1011, output 0b001_000_001_001
#[inline]
pub fn part_1by2(x: u32) -> u64 {
    let mut x = x as u64 & 0x1f_ffff; // 21 bits
    x = (x ^ (x << 32)) & 0x001f_0000_0000_ffff;
    x = (x ^ (x << 16)) & 0x001f_0000_ff00_00ff;
    x = (x ^ (x << 8)) & 0x100f_00f0_0f00_f00f;
    x = (x ^ (x << 4)) & 0x10c3_0c30_c30c_30c3;
    x = (x ^ (x << 2)) & 0x1249_2492_4924_9249;
    x
}

// Inverse of part_1by2
#[inline]
pub fn compact_1by2(x: u64) -> u32 {
    let mut x = x & 0x1249_2492_4924_9249;
    x = (x ^ (x >> 2)) & 0x10c3_0c30_c30c_30c3;
    x = (x ^ (x >> 4)) & 0x100f_00f0_0f00_f00f;
    x = (x ^ (x >> 8)) & 0x001f_0000_ff00_00ff;
    x = (x ^ (x >> 16)) & 0x001f_0000_0000_ffff;
    x = (x ^ (x >> 32)) & 0x1f_ffff;
    x as u32
}

// encodes three 21(!) bit numbers into a single 64bit number by interleaving the bits.
#[inline]
pub fn encode(x: u32, y: u32, z: u32) -> u64 {
    (part_1by2(z) << 2) | (part_1by2(y) << 1) | part_1by2(x)
}

#[inline]
pub fn decode(code: u64) -> (u32, u32, u32) {
    (compact_1by2(code), compact_1by2(code >> 1), compact_1by2(code >> 2))
}
