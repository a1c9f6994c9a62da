use std::fmt::Display;
use std::io::{self, Write};

use crate::im2col::Im2colMatrix;

const HEADER: &str = "memory_initialization_radix=10;\nmemory_initialization_vector=\n";

/// # Description
/// - write `values` as a decimal coe file
/// - every value but the last ends with ",\n", the last one ends with ";"
///   and no line break
/// # Return
/// - the number of values written
///
/// # Example
/// ```
/// use conv_testgen::serializer::coe::write_coe;
/// let mut out = Vec::new();
/// write_coe(&mut out, [1, 2, 3]).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "memory_initialization_radix=10;\nmemory_initialization_vector=\n1,\n2,\n3;"
/// );
/// ```
pub fn write_coe<W, T, I>(writer: &mut W, values: I) -> io::Result<usize>
where
    W: Write,
    T: Display,
    I: IntoIterator<Item = T>,
{
    writer.write_all(HEADER.as_bytes())?;
    let mut count = 0;
    let mut values = values.into_iter().peekable();
    while let Some(value) = values.next() {
        if values.peek().is_some() {
            writeln!(writer, "{},", value)?;
        } else {
            write!(writer, "{};", value)?;
        }
        count += 1;
    }
    Ok(count)
}

/// # Description
/// - write the im2col matrix column by column: all pixels of window 0,
///   then all pixels of window 1, ...
pub fn write_im2col_coe<W: Write>(writer: &mut W, cols: &Im2colMatrix) -> io::Result<usize> {
    write_coe(writer, cols.matrix().iter_column_major())
}
