use std::fmt::Write;

const BYTES_PER_ROW: usize = 16;

/// Renders `data` as offset / hex / ASCII rows, Wireshark style:
///
/// ```text
/// 0x0000:  45 00 00 28 1c 46 00 00  40 06 db 1b c0 a8 01 0a  E..(.F..@.......
/// ```
pub fn format_hexdump(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len().div_ceil(BYTES_PER_ROW) * 75);

    for (row, chunk) in data.chunks(BYTES_PER_ROW).enumerate() {
        let _ = write!(out, "0x{:04x}: ", row * BYTES_PER_ROW);

        for column in 0..BYTES_PER_ROW {
            if column == BYTES_PER_ROW / 2 {
                out.push(' ');
            }
            match chunk.get(column) {
                Some(byte) => {
                    let _ = write!(out, " {byte:02x}");
                }
                None => out.push_str("   "),
            }
        }

        out.push_str("  ");
        out.extend(chunk.iter().map(|&byte| {
            if byte.is_ascii_graphic() {
                byte as char
            } else {
                '.'
            }
        }));
        out.push('\n');
    }

    out
}
