//! # Description
//! - hex `.mem` files for `$readmemh` style BRAM initialization
//! - pixels are packed little-endian: pixel 0 of a word is its least
//!   significant byte
//! - data lines are `@AAAA WORD`, comment lines start with `//`

use std::io::Write;

use log::debug;

use crate::{error::GenError, im2col::reorder_for_dma, im2col::Im2colMatrix};

/// the address field is 4 hex digits wide
pub const MAX_ADDRESSES: usize = 0x1_0000;

/// # Description
/// - pack `bytes` into words of `bytes_per_word` bytes, little-endian
/// - the last word is zero padded
/// # Return
/// - `GenError::Dimension` unless a word holds 1 to 8 bytes
/// # Example
/// ```
/// use conv_testgen::serializer::mem::pack_le_words;
/// assert_eq!(pack_le_words(&[1, 2, 3], 2).unwrap(), vec![0x0201, 0x0003]);
/// ```
pub fn pack_le_words(bytes: &[u8], bytes_per_word: usize) -> Result<Vec<u64>, GenError> {
    if !(1..=8).contains(&bytes_per_word) {
        return Err(GenError::Dimension(format!(
            "a word holds 1 to 8 bytes, got {}",
            bytes_per_word
        )));
    }
    Ok(bytes
        .chunks(bytes_per_word)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u64, |word, (j, &b)| word | (b as u64) << (8 * j))
        })
        .collect())
}

fn write_words<W: Write>(
    writer: &mut W,
    header: &[String],
    words: &[u64],
    bytes_per_word: usize,
    trailer: &[String],
) -> Result<usize, GenError> {
    if words.len() > MAX_ADDRESSES {
        return Err(GenError::Dimension(format!(
            "{} words do not fit in a 4 digit address space",
            words.len()
        )));
    }
    for line in header {
        writeln!(writer, "// {}", line)?;
    }
    writeln!(writer)?;
    let digits = bytes_per_word * 2;
    for (addr, word) in words.iter().enumerate() {
        writeln!(writer, "@{:04X} {:0width$X}", addr, word, width = digits)?;
    }
    writeln!(writer)?;
    for line in trailer {
        writeln!(writer, "// {}", line)?;
    }
    Ok(words.len())
}

/// # Description
/// - write a window-major pixel stream as 64-bit words, 8 pixels per address
/// # Arguments
/// - pixels: the pixels, window after window
/// - windows, pixels_per_window: reported in the trailer so the stream can be
///   split again without the im2col matrix
/// # Return
/// - the number of addresses written
///
/// # Example
/// ```
/// use conv_testgen::serializer::mem::write_mem;
/// let mut out = Vec::new();
/// let addrs = write_mem(&mut out, &[1, 2, 3, 4, 5, 6, 7, 8, 9], 1, 9).unwrap();
/// assert_eq!(addrs, 2);
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.contains("@0000 0807060504030201\n@0001 0000000000000009\n"));
/// ```
pub fn write_mem<W: Write>(
    writer: &mut W,
    pixels: &[u8],
    windows: usize,
    pixels_per_window: usize,
) -> Result<usize, GenError> {
    let words = pack_le_words(pixels, 8)?;
    let header = vec![
        "im2col image, one window after another, pixels in row-major kernel order".to_string(),
        "64-bit words, 8 pixels per address, pixel 0 in the least significant byte".to_string(),
        "the last word is zero padded".to_string(),
    ];
    let trailer = vec![
        format!("total addresses: {}", words.len()),
        format!("total pixels: {}", pixels.len()),
        format!("windows: {}", windows),
        format!("pixels per window: {}", pixels_per_window),
    ];
    let addresses = write_words(writer, &header, &words, 8, &trailer)?;
    debug!("mem: {} pixels in {} addresses", pixels.len(), addresses);
    Ok(addresses)
}

/// write the column-major im2col stream, see `write_mem`
pub fn write_im2col_mem<W: Write>(writer: &mut W, cols: &Im2colMatrix) -> Result<usize, GenError> {
    write_mem(
        writer,
        &cols.column_major(),
        cols.window_count(),
        cols.pixels_per_window(),
    )
}

/// # Description
/// - write the DMA burst stream (see `reorder_for_dma`) as 32-bit words,
///   4 pixels per address
pub fn write_dma_mem<W: Write>(
    writer: &mut W,
    cols: &Im2colMatrix,
    patches_per_burst: usize,
) -> Result<usize, GenError> {
    let stream = reorder_for_dma(cols, patches_per_burst)?;
    let words = pack_le_words(&stream, 4)?;
    let header = vec![
        format!(
            "im2col image in dma order, bursts of {} windows, kernel position major inside a burst",
            patches_per_burst
        ),
        "32-bit words, 4 pixels per address, pixel 0 in the least significant byte".to_string(),
        "every burst spans the full burst width, unused lanes of the last burst are zero".to_string(),
    ];
    let trailer = vec![
        format!("total addresses: {}", words.len()),
        format!("total bytes: {}", stream.len()),
        format!("windows: {}", cols.window_count()),
        format!("pixels per window: {}", cols.pixels_per_window()),
        format!("windows per burst: {}", patches_per_burst),
    ];
    write_words(writer, &header, &words, 4, &trailer)
}
